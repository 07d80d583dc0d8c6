//! HTTP layer: handlers, middleware, request/response bodies and routing.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
