//! # HTTP Routes
//!
//! Router assembly for the catalog API.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Route Map                                     │
//! │                                                                         │
//! │  /api/products      (v1, Basic profile)      ─┐                         │
//! │  /api/v2/products   (v2, Extended profile)    ├─► products::routes     │
//! │  /products          (minimal routes)         ─┘    GET    /            │
//! │                                                    POST   /            │
//! │                                                    GET    /available   │
//! │                                                    DELETE /Delete (v1/v2)│
//! │                                                    POST   /Delete (min)│
//! │                                                    GET    /{id}        │
//! │                                                    PUT    /{id}        │
//! │                                                    DELETE /{id}        │
//! │                                                                         │
//! │  /api/categories                             ──► categories::routes    │
//! │  /health                                     ──► database ping         │
//! │                                                                         │
//! │  All of it behind tower-http TraceLayer, sharing one AppState.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod categories;
pub mod products;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::service::CatalogService;
use catalog_core::query::QueryProfile;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// The three product route sets.
///
/// They run the same operations; they differ in base path, in which listing
/// parameters they honor and in the verb used for batch delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Controller-style v1: all products, pagination and price bounds.
    V1,
    /// Controller-style v2: available products only, search and sort.
    V2,
    /// Minimal route set, mirrors v1 listing; batch delete is a POST.
    Minimal,
}

impl Surface {
    /// Mount point of this route set.
    pub fn base_path(&self) -> &'static str {
        match self {
            Surface::V1 => "/api/products",
            Surface::V2 => "/api/v2/products",
            Surface::Minimal => "/products",
        }
    }

    /// Listing profile honored by `GET /`.
    pub fn profile(&self) -> QueryProfile {
        match self {
            Surface::V2 => QueryProfile::Extended,
            Surface::V1 | Surface::Minimal => QueryProfile::Basic,
        }
    }

    /// Get-by-id URL of a product on this surface, for `Location` headers.
    pub fn product_location(&self, id: i64) -> String {
        format!("{}/{}", self.base_path(), id)
    }
}

/// Builds the complete application router.
pub fn build_router(catalog: CatalogService) -> Router {
    let state = AppState { catalog };

    let mut router = Router::new();
    for surface in [Surface::V1, Surface::V2, Surface::Minimal] {
        router = router.nest(surface.base_path(), products::routes(surface));
    }

    router
        .nest("/api/categories", categories::routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `200` while the database answers, `503` otherwise.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.catalog.database().health_check().await {
        (StatusCode::OK, Json(json!({ "status": "healthy" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}

// =============================================================================
// Test Support
// =============================================================================


#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use super::test_support::{app, send};
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (router, db) = app().await;

        let (status, _, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        db.close().await;
        let (status, _, _) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_surfaces() {
        assert_eq!(Surface::V2.profile(), QueryProfile::Extended);
        assert_eq!(Surface::Minimal.profile(), QueryProfile::Basic);
        assert_eq!(Surface::V1.product_location(7), "/api/products/7");
        assert_eq!(Surface::Minimal.product_location(7), "/products/7");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (router, _) = app().await;
        let (status, _, _) = send(&router, Method::GET, "/api/v3/products", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
