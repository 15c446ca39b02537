//! Core traits for wirespool abstractions.
//!
//! These traits define the interfaces that storage backends must satisfy,
//! so HTTP handlers and tests can run against any of them.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// WIRE TYPE REPOSITORY
// =============================================================================

/// Catalog of wire types, partitioned by [`CatalogScope`].
///
/// Every implementation enforces the default/custom partition itself:
/// default records can never be updated or deleted through this trait,
/// whoever the caller is.
///
/// A scope's catalog is seeded with the default table the first time it is
/// accessed, so callers never observe an unseeded scope.
#[async_trait]
pub trait WireTypeRepository: Send + Sync {
    /// All defaults plus the custom records visible to `scope`, in insertion order.
    async fn list(&self, scope: &CatalogScope) -> Result<Vec<WireType>>;

    /// Fetch one record; `Error::WireTypeNotFound` if it is not visible to `scope`.
    async fn get(&self, scope: &CatalogScope, id: i64) -> Result<WireType>;

    /// Create a custom record with a freshly allocated id.
    async fn create(&self, scope: &CatalogScope, req: CreateWireTypeRequest) -> Result<WireType>;

    /// Overwrite a custom record's name and ratio.
    ///
    /// Fails with `Error::WireTypeNotFound` if absent and `Error::Protected`
    /// if the record is a default.
    async fn update(
        &self,
        scope: &CatalogScope,
        id: i64,
        req: UpdateWireTypeRequest,
    ) -> Result<WireType>;

    /// Remove a custom record.
    ///
    /// Returns `Ok(false)`, not an error, when the record is missing or is a
    /// default.
    async fn delete(&self, scope: &CatalogScope, id: i64) -> Result<bool>;

    /// Populate the default table into `scope`'s catalog.
    ///
    /// Idempotent: a no-op when the catalog already holds entries.
    async fn seed_defaults(&self, scope: &CatalogScope) -> Result<()>;
}
