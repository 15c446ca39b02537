//! PostgreSQL implementation of WireTypeRepository.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

use wirespool_core::{
    default_wire_types, validate_name, CatalogScope, CreateWireTypeRequest, Error, Result,
    UpdateWireTypeRequest, WireType, WireTypeRepository,
};

/// Columns selected for every wire type read; `ratio` comes back as text so
/// it can be parsed exactly into a fixed-point `Ratio`.
const WIRE_TYPE_COLUMNS: &str = "id, name, ratio::TEXT AS ratio, is_default, owner_id";

/// Visibility predicate: defaults are shared; custom rows belong to their
/// owner; the shared scope (`NULL` owner parameter) sees every row.
const VISIBLE_TO_SCOPE: &str = "(is_default OR $1::UUID IS NULL OR owner_id = $1)";

pub struct PgCatalogStore {
    pool: Pool<Postgres>,
    seeded: AtomicBool,
}

impl PgCatalogStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            seeded: AtomicBool::new(false),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    // Helper to map a row onto the domain type
    fn row_to_wire_type(row: &PgRow) -> Result<WireType> {
        let ratio_text: String = row.get("ratio");
        let ratio = ratio_text.parse().map_err(|_| {
            Error::Internal(format!("stored ratio '{}' is not a valid decimal", ratio_text))
        })?;
        Ok(WireType {
            id: row.get("id"),
            name: row.get("name"),
            ratio,
            is_default: row.get("is_default"),
            owner_id: row.get::<Option<Uuid>, _>("owner_id"),
        })
    }

    /// Seed once per process before the first catalog access.
    async fn ensure_seeded(&self, scope: &CatalogScope) -> Result<()> {
        if self.seeded.load(Ordering::Acquire) {
            return Ok(());
        }
        self.seed_defaults(scope).await?;
        self.seeded.store(true, Ordering::Release);
        Ok(())
    }
}

#[async_trait]
impl WireTypeRepository for PgCatalogStore {
    async fn list(&self, scope: &CatalogScope) -> Result<Vec<WireType>> {
        self.ensure_seeded(scope).await?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM wire_type WHERE {} ORDER BY id",
            WIRE_TYPE_COLUMNS, VISIBLE_TO_SCOPE
        ))
        .bind(scope.owner_id())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let wire_types = rows
            .iter()
            .map(Self::row_to_wire_type)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            subsystem = "db",
            component = "pg_store",
            op = "list",
            scope = %scope,
            result_count = wire_types.len(),
            "Listed wire types"
        );
        Ok(wire_types)
    }

    async fn get(&self, scope: &CatalogScope, id: i64) -> Result<WireType> {
        self.ensure_seeded(scope).await?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM wire_type WHERE {} AND id = $2",
            WIRE_TYPE_COLUMNS, VISIBLE_TO_SCOPE
        ))
        .bind(scope.owner_id())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => Self::row_to_wire_type(&row),
            None => Err(Error::WireTypeNotFound(id)),
        }
    }

    async fn create(&self, scope: &CatalogScope, req: CreateWireTypeRequest) -> Result<WireType> {
        let name = validate_name(&req.name)?;
        self.ensure_seeded(scope).await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO wire_type (name, ratio, is_default, owner_id)
            VALUES ($1, $2::NUMERIC, FALSE, $3)
            RETURNING {}
            "#,
            WIRE_TYPE_COLUMNS
        ))
        .bind(&name)
        .bind(req.ratio.to_string())
        .bind(scope.owner_id())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let wire_type = Self::row_to_wire_type(&row)?;
        info!(
            subsystem = "db",
            component = "pg_store",
            op = "create",
            scope = %scope,
            wire_type_id = wire_type.id,
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

        // First check existence and protection
        let existing = self.get(scope, id).await?;
        if !existing.is_mutable() {
            warn!(
                subsystem = "db",
                component = "pg_store",
                op = "update",
                scope = %scope,
                wire_type_id = id,
                "Rejected update of default wire type"
            );
            return Err(Error::Protected("Cannot modify default wire type".into()));
        }

        let row = sqlx::query(&format!(
            r#"
            UPDATE wire_type SET name = $2, ratio = $3::NUMERIC
            WHERE id = $4 AND is_default = FALSE AND ($1::UUID IS NULL OR owner_id = $1)
            RETURNING {}
            "#,
            WIRE_TYPE_COLUMNS
        ))
        .bind(scope.owner_id())
        .bind(&name)
        .bind(req.ratio.to_string())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        // Row may have been deleted between the check and the update
        let row = row.ok_or(Error::WireTypeNotFound(id))?;
        debug!(
            subsystem = "db",
            component = "pg_store",
            op = "update",
            scope = %scope,
            wire_type_id = id,
            "Updated custom wire type"
        );
        Self::row_to_wire_type(&row)
    }

    async fn delete(&self, scope: &CatalogScope, id: i64) -> Result<bool> {
        self.ensure_seeded(scope).await?;

        let result = sqlx::query(
            "DELETE FROM wire_type WHERE id = $2 AND is_default = FALSE AND ($1::UUID IS NULL OR owner_id = $1)",
        )
        .bind(scope.owner_id())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let deleted = result.rows_affected() > 0;
        info!(
            subsystem = "db",
            component = "pg_store",
            op = "delete",
            scope = %scope,
            wire_type_id = id,
            success = deleted,
            "Delete wire type"
        );
        Ok(deleted)
    }

    async fn seed_defaults(&self, scope: &CatalogScope) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let populated: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM wire_type WHERE {})",
            VISIBLE_TO_SCOPE
        ))
        .bind(scope.owner_id())
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if populated {
            tx.commit().await.map_err(Error::Database)?;
            return Ok(());
        }

        let mut seeded = 0_u64;
        for wire_type in default_wire_types() {
            let result = sqlx::query(
                r#"
                INSERT INTO wire_type (id, name, ratio, is_default, owner_id)
                VALUES ($1, $2, $3::NUMERIC, TRUE, NULL)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(wire_type.id)
            .bind(&wire_type.name)
            .bind(wire_type.ratio.to_string())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
            seeded += result.rows_affected();
        }

        tx.commit().await.map_err(Error::Database)?;
        info!(
            subsystem = "db",
            component = "pg_store",
            op = "seed",
            scope = %scope,
            seeded_count = seeded,
            "Seeded default wire types"
        );
        Ok(())
    }
}
