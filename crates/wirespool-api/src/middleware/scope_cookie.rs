//! Caller identity cookie for per-user catalogs.
//!
//! In per-user mode every caller is identified by an opaque `userId` cookie.
//! A caller without a parseable cookie gets a fresh random id, stored in the
//! request extensions for this request and sent back as `Set-Cookie`.
//! This only partitions custom wire types; it is not authentication.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ScopeMode;
use crate::{ApiError, AppState};
use wirespool_core::defaults::{USER_COOKIE_MAX_AGE_SECS, USER_COOKIE_NAME};
use wirespool_core::CatalogScope;

/// Caller id resolved for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub Uuid);

/// Find the `userId` cookie among all `Cookie` headers.
pub fn caller_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == USER_COOKIE_NAME)
        .and_then(|(_, value)| Uuid::parse_str(value.trim().trim_matches('"')).ok())
}

/// `Set-Cookie` value for a newly issued caller id.
pub fn caller_cookie(id: Uuid) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        USER_COOKIE_NAME, id, USER_COOKIE_MAX_AGE_SECS
    )
}

/// Resolve (or issue) the caller id in per-user mode.
pub async fn caller_cookie_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.scope_mode == ScopeMode::Shared {
        return next.run(request).await;
    }

    if let Some(id) = caller_id_from_headers(request.headers()) {
        request.extensions_mut().insert(CallerId(id));
        return next.run(request).await;
    }

    let id = Uuid::new_v4();
    debug!(subsystem = "api", component = "caller_cookie", scope = %id, "Issuing caller id");
    request.extensions_mut().insert(CallerId(id));

    let mut response = next.run(request).await;
    match HeaderValue::from_str(&caller_cookie(id)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => warn!(subsystem = "api", error = %e, "Could not encode caller cookie"),
    }
    response
}

/// Catalog scope of the caller, for handlers.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CallerScope(scope): CallerScope, State(state): State<AppState>) {
///     let wire_types = state.catalog.list(&scope).await?;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerScope(pub CatalogScope);

#[axum::async_trait]
impl FromRequestParts<AppState> for CallerScope {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.scope_mode == ScopeMode::Shared {
            return Ok(CallerScope(CatalogScope::Shared));
        }

        let id = parts
            .extensions
            .get::<CallerId>()
            .map(|caller| caller.0)
            .or_else(|| caller_id_from_headers(&parts.headers))
            .ok_or_else(|| {
                ApiError::Internal(wirespool_core::Error::Internal(
                    "caller cookie middleware is not installed".to_string(),
                ))
            })?;

        Ok(CallerScope(CatalogScope::Owner(id)))
    }
}
