//! `TigerStyle` Constants
//!
//! All limits use big-endian naming: `CATEGORY_SPECIFICS_UNIT_LIMIT`
//! Example: `ROW_ID_TOKEN_BYTES` (not `TOKEN_BYTES_ROW_ID`)
//!
//! Every constant includes units in the name:
//! - _`BYTES`/_`BYTES_MAX` for size limits
//! - _`COUNT`/_`COUNT_MAX` for quantity limits
//! - _`MAX`/_`MIN`/_`DEFAULT` for bounds and defaults

// =============================================================================
// Row Identity
// =============================================================================

/// Number of random hex characters appended to the timestamp in a row id.
///
/// Row ids read `"{millis}-{token}"`. The timestamp gives practical
/// monotonicity, the token breaks ties within a millisecond.
pub const ROW_ID_TOKEN_BYTES: usize = 8;

// =============================================================================
// Condition Grammar
// =============================================================================

/// Maximum number of `AND`-joined equality clauses the textual condition
/// grammar accepts. Anything larger fails closed.
pub const CONDITION_CLAUSES_COUNT_MAX: usize = 2;

// =============================================================================
// Native Engine
// =============================================================================

/// Connection pool size for the embedded relational engine.
///
/// The store has a single logical owner per process; a small pool is enough.
pub const NATIVE_POOL_CONNECTIONS_MAX: u32 = 4;

/// Database file name used when a storage directory is configured.
pub const NATIVE_DATABASE_FILE_NAME: &str = "vita.db";

// =============================================================================
// Key-Value Substrate
// =============================================================================

/// Maximum size of a single serialized row in the key-value substrate.
pub const KV_VALUE_BYTES_MAX: usize = 256 * 1024; // 256KB

/// Directory name for the file-backed key-value store under the storage path.
pub const KV_DIRECTORY_NAME: &str = "kv";

// =============================================================================
// Schema
// =============================================================================

/// Number of logical tables declared by the schema manager.
pub const SCHEMA_TABLES_COUNT: usize = 11;

// =============================================================================
// Demo Seeding
// =============================================================================

/// Email of the well-known demo identity seeded on the fallback path.
pub const DEMO_USER_EMAIL: &str = "demo@vita.app";

/// Display name of the demo identity.
pub const DEMO_USER_NAME: &str = "Demo";
