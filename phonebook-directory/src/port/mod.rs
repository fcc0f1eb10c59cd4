//! Port layer - Abstract interfaces for infrastructure dependencies
//!
//! The application layer only reaches the contact store through these traits,
//! so the store can be swapped without touching resource semantics.

pub mod contact_repository;

pub use contact_repository::{ContactRepository, RepositoryError, RepositoryResult};
