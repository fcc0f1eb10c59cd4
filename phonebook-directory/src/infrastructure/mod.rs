pub mod persistence;
pub mod timeout_repository;

pub use persistence::SledContactRepository;
pub use timeout_repository::TimeoutContactRepository;
