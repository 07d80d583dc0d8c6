//! Delivery options with find-or-create of the carrier company.

use crate::db::TxContext;
use crate::error::{AppError, AppResult};
use crate::models::{DeliveryInput, DeliveryView};
use crate::repositories::DeliveryRepository;

/// Normalised form of a company name: trimmed and lowercased.
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone)]
pub struct DeliveryService {
    repo: DeliveryRepository,
}

impl DeliveryService {
    pub fn new(repo: DeliveryRepository) -> Self {
        Self { repo }
    }

    /// Creates a delivery, creating its company first when it is new.
    ///
    /// Both steps share one transaction.
    pub async fn create(&self, ctx: &TxContext, input: DeliveryInput) -> AppResult<i32> {
        let input = normalized(input);
        let delivery_id = self
            .repo
            .run_in_transaction(ctx, |tx| async move {
                self.ensure_company(&tx, &input.company_name).await?;
                self.repo.create(&tx, &input).await
            })
            .await?;

        tracing::info!(delivery_id, "Delivery created");
        Ok(delivery_id)
    }

    /// Replaces a delivery's fields. `DeliveryNotFound` when `id` is unknown.
    pub async fn update(&self, ctx: &TxContext, id: i32, input: DeliveryInput) -> AppResult<()> {
        let input = normalized(input);
        self.repo
            .run_in_transaction(ctx, |tx| async move {
                self.ensure_company(&tx, &input.company_name).await?;
                self.repo.update(&tx, id, &input).await
            })
            .await?;

        tracing::info!(delivery_id = id, "Delivery updated");
        Ok(())
    }

    /// Deletes unconditionally; deleting an unknown id succeeds.
    pub async fn delete(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(ctx, id).await?;
        tracing::debug!(delivery_id = id, affected, "Delivery deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, ctx: &TxContext, id: i32) -> AppResult<DeliveryView> {
        self.repo
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::id_not_found("delivery", id))
    }

    pub async fn get_all(&self, ctx: &TxContext) -> AppResult<Vec<DeliveryView>> {
        self.repo.list_all(ctx).await
    }

    pub async fn exists(&self, ctx: &TxContext, id: i32) -> AppResult<bool> {
        self.repo.exists(ctx, id).await
    }

    async fn ensure_company(&self, tx: &TxContext, company: &str) -> AppResult<()> {
        if !self.repo.exists_company(tx, company).await? {
            self.repo.create_company(tx, company).await?;
            tracing::debug!(company, "Delivery company created");
        }
        Ok(())
    }
}

fn normalized(mut input: DeliveryInput) -> DeliveryInput {
    input.company_name = normalize_company_name(&input.company_name);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn company_names_are_trimmed_and_lowercased() {
        assert_eq!(normalize_company_name("  DHL "), "dhl");
        assert_eq!(normalize_company_name("dhl"), "dhl");
        assert_eq!(normalize_company_name("\tUps Ground\n"), "ups ground");
    }

    #[test]
    fn only_company_name_is_normalized() {
        let input = normalized(DeliveryInput {
            name: " Express ".to_string(),
            company_name: " FedEx".to_string(),
            price: BigDecimal::from(5),
        });
        assert_eq!(input.name, " Express ");
        assert_eq!(input.company_name, "fedex");
    }
}
