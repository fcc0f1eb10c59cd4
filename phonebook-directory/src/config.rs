//! Runtime configuration for the directory service.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Sub-directory of the data directory holding the sled database.
pub const CONTACT_STORE_DIR: &str = "contacts";
/// Front-end build directory served when no other is configured.
pub const DEFAULT_STATIC_DIR: &str = "dist";

/// Configuration for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Data directory for persistence.
    pub data_dir: PathBuf,
    /// HTTP API listen address.
    pub http_addr: SocketAddr,
    /// Static front-end directory. Falls back to `dist` when it exists.
    pub static_dir: Option<PathBuf>,
    /// Upper bound on any single store operation, in seconds.
    pub store_timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            http_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            static_dir: None,
            store_timeout_secs: 5,
        }
    }
}

impl DirectoryConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(CONTACT_STORE_DIR)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// The static directory to serve, if any exists on disk.
    pub fn resolved_static_dir(&self) -> Option<PathBuf> {
        let dir = self
            .static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        dir.is_dir().then_some(dir)
    }
}
