//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod categories;
pub mod colors;
pub mod delivery;
pub mod health;
pub mod items;
pub mod orders;
pub mod payment_methods;
pub mod tags;
pub mod users;
