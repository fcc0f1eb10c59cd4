pub mod access_log;
pub mod error;
pub mod http_api;

pub use error::{ApiError, UnknownEndpoint};
pub use http_api::{build_app, create_router, AppState};
