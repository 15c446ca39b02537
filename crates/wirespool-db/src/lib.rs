//! # wirespool-db
//!
//! Catalog Store implementations for wirespool.
//!
//! This crate provides:
//! - [`MemCatalogStore`]: per-scope in-memory catalogs behind a mutex each
//! - [`PgCatalogStore`]: PostgreSQL-backed catalog with embedded migrations
//! - Connection pool management
//!
//! Both stores implement [`WireTypeRepository`] and enforce default-record
//! protection themselves.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wirespool_db::{CatalogScope, MemCatalogStore, WireTypeRepository};
//!
//! let store = MemCatalogStore::new();
//! let wire_types = store.list(&CatalogScope::Shared).await?;
//! ```

pub mod memory;
pub mod pool;
pub mod wire_types;

// Re-export core types
pub use wirespool_core::*;

pub use memory::MemCatalogStore;
pub use pool::{create_pool, PoolConfig};
pub use wire_types::PgCatalogStore;

/// Connect to PostgreSQL and build a catalog store.
pub async fn connect_postgres(database_url: &str, config: PoolConfig) -> Result<PgCatalogStore> {
    let pool = create_pool(database_url, config).await?;
    Ok(PgCatalogStore::new(pool))
}
