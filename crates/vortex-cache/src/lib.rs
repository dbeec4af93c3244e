//! Type-safe key-value persistence for the Vortex cart.
//!
//! Provides a simple, ergonomic API for storing data in a pluggable
//! key-value backend with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use vortex_cache::Cache;
//!
//! let mut cache = Cache::open_dir("/var/lib/vortex")?;
//!
//! // Store a value
//! cache.set("vortex_warenkorb", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = cache.get("vortex_warenkorb")?;
//!
//! // Delete a value
//! cache.delete("vortex_warenkorb")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
