pub mod application_service;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod port;
pub mod presentation;
pub mod server;
#[cfg(test)]
pub mod test_utils;

pub use application_service::contact_service::{ContactService, DirectoryError};
pub use config::DirectoryConfig;
pub use domain::*;
pub use port::*;
pub use server::DirectoryServer;
