//! In-memory implementation of WireTypeRepository.
//!
//! Each scope owns its own keyed collection and id counter behind a mutex, so
//! concurrent mutations of one scope serialize while other scopes proceed.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use wirespool_core::defaults::CUSTOM_ID_START;
use wirespool_core::{
    default_wire_types, validate_name, CatalogScope, CreateWireTypeRequest, Error, Result,
    UpdateWireTypeRequest, WireType, WireTypeRepository,
};

/// One scope's catalog.
///
/// Ids are allocated in increasing order, so iterating the map by key yields
/// insertion order.
#[derive(Debug)]
struct ScopeCatalog {
    entries: BTreeMap<i64, WireType>,
    next_id: i64,
}

impl ScopeCatalog {
    fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: CUSTOM_ID_START,
        }
    }

    /// Returns the number of records written (0 when already populated).
    fn seed_if_empty(&mut self) -> usize {
        if !self.entries.is_empty() {
            return 0;
        }
        let defaults = default_wire_types();
        let count = defaults.len();
        for wire_type in defaults {
            self.entries.insert(wire_type.id, wire_type);
        }
        count
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Wire type catalog held in process memory.
///
/// Construct a fresh instance per test for isolation.
#[derive(Debug, Default)]
pub struct MemCatalogStore {
    scopes: RwLock<HashMap<CatalogScope, Arc<Mutex<ScopeCatalog>>>>,
}

impl MemCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes that have been accessed so far.
    pub async fn scope_count(&self) -> usize {
        self.scopes.read().await.len()
    }

    /// Catalog for `scope`, created and seeded on first access.
    ///
    /// A catalog is seeded before it is inserted into the map, so no caller
    /// can ever observe an empty one.
    async fn catalog(&self, scope: &CatalogScope) -> Arc<Mutex<ScopeCatalog>> {
        if let Some(catalog) = self.scopes.read().await.get(scope) {
            return catalog.clone();
        }

        let mut seeded = 0;
        let catalog = {
            let mut scopes = self.scopes.write().await;
            scopes
                .entry(*scope)
                .or_insert_with(|| {
                    let mut fresh = ScopeCatalog::new();
                    seeded = fresh.seed_if_empty();
                    Arc::new(Mutex::new(fresh))
                })
                .clone()
        };

        if seeded > 0 {
            info!(
                subsystem = "db",
                component = "mem_store",
                op = "seed",
                scope = %scope,
                seeded_count = seeded,
                "Seeded default wire types"
            );
        }
        catalog
    }
}

#[async_trait]
impl WireTypeRepository for MemCatalogStore {
    async fn list(&self, scope: &CatalogScope) -> Result<Vec<WireType>> {
        let catalog = self.catalog(scope).await;
        let catalog = catalog.lock().await;
        let wire_types: Vec<WireType> = catalog.entries.values().cloned().collect();
        debug!(
            subsystem = "db",
            component = "mem_store",
            op = "list",
            scope = %scope,
            result_count = wire_types.len(),
            "Listed wire types"
        );
        Ok(wire_types)
    }

    async fn get(&self, scope: &CatalogScope, id: i64) -> Result<WireType> {
        let catalog = self.catalog(scope).await;
        let catalog = catalog.lock().await;
        catalog
            .entries
            .get(&id)
            .cloned()
            .ok_or(Error::WireTypeNotFound(id))
    }

    async fn create(&self, scope: &CatalogScope, req: CreateWireTypeRequest) -> Result<WireType> {
        let name = validate_name(&req.name)?;

        let catalog = self.catalog(scope).await;
        let mut catalog = catalog.lock().await;
        let id = catalog.allocate_id();
        let wire_type = WireType {
            id,
            name,
            ratio: req.ratio,
            is_default: false,
            owner_id: scope.owner_id(),
        };
        catalog.entries.insert(id, wire_type.clone());

        info!(
            subsystem = "db",
            component = "mem_store",
            op = "create",
            scope = %scope,
            wire_type_id = id,
            "Created custom wire type"
        );
        Ok(wire_type)
    }

    async fn update(
        &self,
        scope: &CatalogScope,
        id: i64,
        req: UpdateWireTypeRequest,
    ) -> Result<WireType> {
        let name = validate_name(&req.name)?;

        let catalog = self.catalog(scope).await;
        let mut catalog = catalog.lock().await;
        let existing = catalog
            .entries
            .get_mut(&id)
            .ok_or(Error::WireTypeNotFound(id))?;

        if !existing.is_mutable() {
            warn!(
                subsystem = "db",
                component = "mem_store",
                op = "update",
                scope = %scope,
                wire_type_id = id,
                "Rejected update of default wire type"
            );
            return Err(Error::Protected("Cannot modify default wire type".into()));
        }

        existing.name = name;
        existing.ratio = req.ratio;
        debug!(
            subsystem = "db",
            component = "mem_store",
            op = "update",
            scope = %scope,
            wire_type_id = id,
            "Updated custom wire type"
        );
        Ok(existing.clone())
    }

    async fn delete(&self, scope: &CatalogScope, id: i64) -> Result<bool> {
        let catalog = self.catalog(scope).await;
        let mut catalog = catalog.lock().await;

        match catalog.entries.get(&id) {
            None => Ok(false),
            Some(existing) if !existing.is_mutable() => {
                warn!(
                    subsystem = "db",
                    component = "mem_store",
                    op = "delete",
                    scope = %scope,
                    wire_type_id = id,
                    "Refused to delete default wire type"
                );
                Ok(false)
            }
            Some(_) => {
                catalog.entries.remove(&id);
                info!(
                    subsystem = "db",
                    component = "mem_store",
                    op = "delete",
                    scope = %scope,
                    wire_type_id = id,
                    "Deleted custom wire type"
                );
                Ok(true)
            }
        }
    }

    async fn seed_defaults(&self, scope: &CatalogScope) -> Result<()> {
        // First access seeds; a second explicit pass is a no-op unless the
        // catalog was somehow emptied.
        let catalog = self.catalog(scope).await;
        catalog.lock().await.seed_if_empty();
        Ok(())
    }
}
