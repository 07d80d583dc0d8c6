//! Request middleware: request ids, access logging, error shaping and
//! identity checks.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{
    admin_middleware, auth_middleware, bearer_token, completed_middleware, require_admin,
    require_auth, require_completed, AuthUser,
};
pub use error_handler::{error_parts, global_error_handler};
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
