//! Delivery options and their carrier companies.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Numeric, Varchar};
use diesel_async::RunQueryDsl;

use crate::db::{Database, TxContext};
use crate::error::{AppError, AppResult};
use crate::models::{DeliveryInput, DeliveryView};
use crate::repositories::{db_error, transactional};

const INSERT_DELIVERY: &str = "INSERT INTO deliveries (name, company_id, price) \
     VALUES ($1, (SELECT id FROM delivery_companies WHERE name = $2), $3) \
     RETURNING id";

const UPDATE_DELIVERY: &str = "UPDATE deliveries \
     SET name = $1, company_id = (SELECT id FROM delivery_companies WHERE name = $2), price = $3 \
     WHERE id = $4";

#[derive(QueryableByName)]
struct IdRow {
    #[diesel(sql_type = Integer)]
    id: i32,
}

#[derive(Clone)]
pub struct DeliveryRepository {
    db: Database,
}

transactional!(DeliveryRepository);

impl DeliveryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn exists(&self, ctx: &TxContext, delivery_id: i32) -> AppResult<bool> {
        use crate::schema::deliveries::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::select(diesel::dsl::exists(deliveries.filter(id.eq(delivery_id))))
            .get_result(&mut *conn)
            .await
            .map_err(db_error("check delivery"))
    }

    /// Expects an already normalised company name.
    pub async fn exists_company(&self, ctx: &TxContext, company: &str) -> AppResult<bool> {
        use crate::schema::delivery_companies::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::select(diesel::dsl::exists(delivery_companies.filter(name.eq(company))))
            .get_result(&mut *conn)
            .await
            .map_err(db_error("check delivery company"))
    }

    /// Inserts a company. A row inserted concurrently under the same name is
    /// left as is, so two writers racing on a new company both proceed.
    pub async fn create_company(&self, ctx: &TxContext, company: &str) -> AppResult<()> {
        use crate::schema::delivery_companies::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(delivery_companies)
            .values(name.eq(company))
            .on_conflict(name)
            .do_nothing()
            .execute(&mut *conn)
            .await
            .map_err(db_error("insert delivery company"))?;
        Ok(())
    }

    /// Inserts a delivery, resolving `company_id` from the company name.
    /// The company row must already exist.
    pub async fn create(&self, ctx: &TxContext, input: &DeliveryInput) -> AppResult<i32> {
        let mut conn = self.db.resolve(ctx).await?;

        let row: IdRow = diesel::sql_query(INSERT_DELIVERY)
            .bind::<Varchar, _>(&input.name)
            .bind::<Varchar, _>(&input.company_name)
            .bind::<Numeric, _>(&input.price)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert delivery"))?;
        Ok(row.id)
    }

    /// Updates a delivery in place. Fails with `DeliveryNotFound` when no row
    /// matched `delivery_id`.
    pub async fn update(&self, ctx: &TxContext, delivery_id: i32, input: &DeliveryInput) -> AppResult<()> {
        let mut conn = self.db.resolve(ctx).await?;

        let affected = diesel::sql_query(UPDATE_DELIVERY)
            .bind::<Varchar, _>(&input.name)
            .bind::<Varchar, _>(&input.company_name)
            .bind::<Numeric, _>(&input.price)
            .bind::<Integer, _>(delivery_id)
            .execute(&mut *conn)
            .await
            .map_err(db_error("update delivery"))?;

        if affected == 0 {
            return Err(AppError::DeliveryNotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, ctx: &TxContext, delivery_id: i32) -> AppResult<usize> {
        use crate::schema::deliveries::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(deliveries.filter(id.eq(delivery_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete delivery"))
    }

    pub async fn find_by_id(&self, ctx: &TxContext, delivery_id: i32) -> AppResult<Option<DeliveryView>> {
        use crate::schema::{deliveries, delivery_companies};
        let mut conn = self.db.resolve(ctx).await?;

        deliveries::table
            .inner_join(delivery_companies::table)
            .filter(deliveries::id.eq(delivery_id))
            .select((
                deliveries::id,
                deliveries::name,
                delivery_companies::name,
                deliveries::price,
            ))
            .first::<DeliveryView>(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find delivery"))
    }

    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<DeliveryView>> {
        use crate::schema::{deliveries, delivery_companies};
        let mut conn = self.db.resolve(ctx).await?;

        deliveries::table
            .inner_join(delivery_companies::table)
            .order(deliveries::id.asc())
            .select((
                deliveries::id,
                deliveries::name,
                delivery_companies::name,
                deliveries::price,
            ))
            .load::<DeliveryView>(&mut *conn)
            .await
            .map_err(db_error("list deliveries"))
    }
}
