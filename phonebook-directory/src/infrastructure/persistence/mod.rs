//! Persistence implementations for data storage.
//!
//! This module provides persistent storage implementations using sled.

pub mod sled_contact_repository;

pub use sled_contact_repository::SledContactRepository;
