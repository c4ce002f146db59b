//! Database Configuration
//!
//! `TigerStyle`: Sensible defaults, builder pattern, explicit over implicit.

use std::path::{Path, PathBuf};

use crate::constants::{KV_DIRECTORY_NAME, NATIVE_DATABASE_FILE_NAME};

// =============================================================================
// DatabaseConfig
// =============================================================================

/// Configuration for [`Database::connect`](crate::vita::Database::connect).
///
/// `TigerStyle`:
/// - Sensible defaults via Default impl
/// - Builder pattern for customization
/// - All fields public for transparency
///
/// # Example
///
/// ```rust
/// use vita_store::DatabaseConfig;
///
/// let config = DatabaseConfig::default()
///     .with_storage_path("/tmp/vita")
///     .without_demo_data();
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Directory holding durable state (database file, key-value files).
    ///
    /// `None` keeps everything in memory. Default: `None`
    pub storage_path: Option<PathBuf>,

    /// Whether to try the native relational engine before falling back.
    ///
    /// Default: true
    pub prefer_native: bool,

    /// Whether the fallback path seeds demo rows on first initialize.
    ///
    /// Default: true
    pub seed_demo_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            prefer_native: true,
            seed_demo_data: true,
        }
    }
}

impl DatabaseConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the durable storage directory.
    #[must_use]
    pub fn with_storage_path(mut self, path: impl AsRef<Path>) -> Self {
        self.storage_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip the native engine and go straight to the fallback store.
    #[must_use]
    pub fn without_native(mut self) -> Self {
        self.prefer_native = false;
        self
    }

    /// Disable demo-row seeding on the fallback path.
    #[must_use]
    pub fn without_demo_data(mut self) -> Self {
        self.seed_demo_data = false;
        self
    }

    /// Database URL handed to the native engine.
    #[must_use]
    pub fn native_url(&self) -> String {
        match &self.storage_path {
            Some(dir) => format!(
                "sqlite://{}?mode=rwc",
                dir.join(NATIVE_DATABASE_FILE_NAME).display()
            ),
            None => "sqlite::memory:".to_string(),
        }
    }

    /// Directory for the file-backed key-value substrate, if durable.
    #[must_use]
    pub fn kv_dir(&self) -> Option<PathBuf> {
        self.storage_path
            .as_ref()
            .map(|dir| dir.join(KV_DIRECTORY_NAME))
    }
}

// =============================================================================
// Tests
// =============================================================================
