//! # Product Routes
//!
//! One set of handlers serves all three product surfaces. Each nested router
//! carries its [`Surface`] as a request extension, which picks the listing
//! profile and the `Location` prefix.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/v2/products?searchTerm=awmps&sortBy=Price&sortOrder=desc     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RawQuery ──► form_urlencoded pairs ──► ProductQueryParams             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogService::list(params, Surface::V2.profile())                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  200 OK                                                                │
//! │  X-Total-Count: 1                                                      │
//! │  [ { "id": 2, "sku": "AWMPS", ... } ]                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batch delete reads repeated `ids` keys (`?ids=1&ids=2`); a single value
//! may also be comma separated (`?ids=1,2`).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use url::form_urlencoded;

use super::{AppState, Surface};
use crate::error::{ApiError, ApiResult};
use catalog_core::query::ProductQueryParams;
use catalog_core::{Product, ProductPayload};

/// Response header carrying the number of products matching a listing.
pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Product routes for one surface, to be nested at `surface.base_path()`.
pub fn routes(surface: Surface) -> Router<AppState> {
    let batch_delete = match surface {
        Surface::Minimal => post(delete_products),
        Surface::V1 | Surface::V2 => delete(delete_products),
    };

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/available", get(list_available))
        .route("/Delete", batch_delete)
        .route(
            "/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .layer(Extension(surface))
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_products(
    State(state): State<AppState>,
    Extension(surface): Extension<Surface>,
    RawQuery(query): RawQuery,
) -> ApiResult<impl IntoResponse> {
    let params = query_params(query.as_deref());
    let page = state.catalog.list(&params, surface.profile()).await?;

    Ok(([(TOTAL_COUNT, page.total.to_string())], Json(page.items)))
}

async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.catalog.get(id).await?))
}

async fn list_available(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list_available().await?))
}

async fn create_product(
    State(state): State<AppState>,
    Extension(surface): Extension<Surface>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let product = state.catalog.create(payload).await?;
    let location = surface.product_location(product.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

async fn replace_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state.catalog.replace(id, payload).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.catalog.delete(id).await?))
}

async fn delete_products(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Vec<Product>>> {
    let ids = parse_ids(query.as_deref())?;
    Ok(Json(state.catalog.delete_many(&ids).await?))
}

// =============================================================================
// Query-String Helpers
// =============================================================================

fn query_params(raw: Option<&str>) -> ProductQueryParams {
    ProductQueryParams::from_pairs(form_urlencoded::parse(raw.unwrap_or_default().as_bytes()))
}

/// Collects `ids` / `ids[]` values (any case) in request order.
fn parse_ids(raw: Option<&str>) -> ApiResult<Vec<i64>> {
    let mut ids = Vec::new();

    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        if !key.trim_end_matches("[]").eq_ignore_ascii_case("ids") {
            continue;
        }

        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request(format!("'{}' is not a valid product id", part)))?;
            ids.push(id);
        }
    }

    Ok(ids)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};

    use super::*;
    use crate::routes::test_support::{app, send};

    fn widget(sku: &str, name: &str, price: f64, available: bool) -> Value {
        json!({
            "sku": sku,
            "name": name,
            "description": format!("{} description", name),
            "price": price,
            "isAvailable": available,
            "categoryId": 1
        })
    }

    async fn create(router: &Router, body: Value) -> Value {
        let (status, _, product) = send(router, Method::POST, "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        product
    }

    fn ids(body: &Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids(Some("ids=1&ids=2")).unwrap(), vec![1, 2]);
        assert_eq!(parse_ids(Some("IDS=3,4&other=9")).unwrap(), vec![3, 4]);
        assert_eq!(parse_ids(Some("ids%5B%5D=5")).unwrap(), vec![5]);
        assert!(parse_ids(None).unwrap().is_empty());
        assert!(parse_ids(Some("ids=abc")).is_err());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (router, _) = app().await;

        let (status, headers, created) = send(
            &router,
            Method::POST,
            "/api/products",
            Some(json!({
                "sku": "A1", "name": "Widget", "description": "A widget",
                "price": 9.99, "categoryId": 1, "isAvailable": true
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["price"], json!(9.99));
        assert_eq!(created["version"], 1);
        assert_eq!(
            headers.get(header::LOCATION).unwrap(),
            format!("/api/products/{}", id).as_str()
        );

        let (status, _, fetched) = send(&router, Method::GET, &format!("/api/products/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_location_follows_surface() {
        let (router, _) = app().await;

        let (_, headers, created) =
            send(&router, Method::POST, "/products", Some(widget("A1", "Widget", 1.0, true))).await;
        let location = headers.get(header::LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, format!("/products/{}", created["id"]));

        let (_, headers, created) =
            send(&router, Method::POST, "/api/v2/products", Some(widget("A2", "Widget", 1.0, true))).await;
        let location = headers.get(header::LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, format!("/api/v2/products/{}", created["id"]));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (router, _) = app().await;

        let (status, _, body) = send(
            &router,
            Method::POST,
            "/api/products",
            Some(json!({ "name": "No sku", "description": "x", "categoryId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "sku is required");

        let (status, _, _) = send(
            &router,
            Method::POST,
            "/api/products",
            Some(widget("A1", "Widget", -1.0, true)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut orphan = widget("A1", "Widget", 1.0, true);
        orphan["categoryId"] = json!(42);
        let (status, _, _) = send(&router, Method::POST, "/api/products", Some(orphan)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (router, _) = app().await;

        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{ not json"))
            .unwrap();
        let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_and_bad_id() {
        let (router, _) = app().await;

        let (status, _, body) = send(&router, Method::GET, "/api/products/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found: 999");

        let (status, _, _) = send(&router, Method::GET, "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_min_price_filter() {
        let (router, _) = app().await;
        create(&router, widget("CHEAP", "Cheap", 5.00, true)).await;
        let dear = create(&router, widget("DEAR", "Dear", 15.00, true)).await;

        let (status, headers, body) = send(&router, Method::GET, "/api/products?MinPrice=10", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![dear["id"].as_i64().unwrap()]);
        assert_eq!(headers.get(&TOTAL_COUNT).unwrap(), "1");
    }

    #[tokio::test]
    async fn test_sort_by_price_descending_on_v2() {
        let (router, _) = app().await;
        for (sku, price) in [("A", 5.0), ("B", 15.0), ("C", 10.0)] {
            create(&router, widget(sku, sku, price, true)).await;
        }

        let (status, _, body) = send(
            &router,
            Method::GET,
            "/api/v2/products?SortBy=Price&SortOrder=descending",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let prices: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["price"].as_f64().unwrap())
            .collect();
        assert_eq!(prices, vec![15.0, 10.0, 5.0]);
    }

    #[tokio::test]
    async fn test_v1_ignores_sort_and_v2_hides_unavailable() {
        let (router, _) = app().await;
        let a = create(&router, widget("A", "Alpha", 9.0, true)).await;
        let b = create(&router, widget("B", "Beta", 1.0, false)).await;

        let (_, _, v1) = send(&router, Method::GET, "/api/products?sortBy=Price", None).await;
        assert_eq!(ids(&v1), vec![a["id"].as_i64().unwrap(), b["id"].as_i64().unwrap()]);

        let (_, headers, v2) = send(&router, Method::GET, "/api/v2/products", None).await;
        assert_eq!(ids(&v2), vec![a["id"].as_i64().unwrap()]);
        assert_eq!(headers.get(&TOTAL_COUNT).unwrap(), "1");

        let (_, _, available) = send(&router, Method::GET, "/products/available", None).await;
        assert_eq!(ids(&available), vec![a["id"].as_i64().unwrap()]);
    }

    #[tokio::test]
    async fn test_v2_search_filters() {
        let (router, _) = app().await;
        create(&router, widget("AWMPS", "Polo Shirt", 35.0, true)).await;
        create(&router, widget("AWMSTS", "Slicker Jacket", 125.0, true)).await;
        create(&router, widget("AWMTJ", "Thermal Fleece Jacket", 60.0, true)).await;

        let (_, _, body) = send(&router, Method::GET, "/api/v2/products?searchTerm=awmps", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, _, body) = send(&router, Method::GET, "/api/v2/products?name=jacket&sortBy=Price", None).await;
        let skus: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["sku"].as_str().unwrap()).collect();
        assert_eq!(skus, vec!["AWMTJ", "AWMSTS"]);

        let (_, _, body) = send(&router, Method::GET, "/api/v2/products?sku=awmtj", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pagination() {
        let (router, _) = app().await;
        for i in 0..5 {
            create(&router, widget(&format!("S{}", i), "Widget", 1.0, true)).await;
        }

        let (_, headers, page2) = send(&router, Method::GET, "/products?page=2&size=2", None).await;
        assert_eq!(ids(&page2), vec![3, 4]);
        assert_eq!(headers.get(&TOTAL_COUNT).unwrap(), "5");

        let (_, _, past_end) = send(&router, Method::GET, "/products?page=10&size=2", None).await;
        assert!(past_end.as_array().unwrap().is_empty());

        let (status, headers, far) = send(&router, Method::GET, "/products?page=4294967296&size=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(far.as_array().unwrap().is_empty());
        assert_eq!(headers.get(&TOTAL_COUNT).unwrap(), "5");

        let (status, _, clamped) = send(&router, Method::GET, "/products?size=99999999999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(clamped.as_array().unwrap().len(), 5);

        for bad in ["page=0", "size=0", "page=-1", "size=ten", "minPrice=cheap"] {
            let (status, _, _) = send(&router, Method::GET, &format!("/products?{}", bad), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", bad);
        }
    }

    #[tokio::test]
    async fn test_replace_with_mismatched_id() {
        let (router, _) = app().await;
        create(&router, widget("A1", "Widget", 1.0, true)).await;

        let mut body = widget("A1", "Widget", 1.0, true);
        body["id"] = json!(2);
        let (status, _, _) = send(&router, Method::PUT, "/api/products/1", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_replace_and_conflict() {
        let (router, _) = app().await;
        let product = create(&router, widget("A1", "Widget", 1.0, true)).await;
        let id = product["id"].as_i64().unwrap();
        let uri = format!("/api/products/{}", id);

        // Two clients read version 1
        let (_, _, first_read) = send(&router, Method::GET, &uri, None).await;
        let (_, _, second_read) = send(&router, Method::GET, &uri, None).await;

        let mut first = widget("A1", "First writer", 2.0, true);
        first["id"] = json!(id);
        first["version"] = first_read["version"].clone();
        let (status, _, body) = send(&router, Method::PUT, &uri, Some(first)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let mut second = widget("A1", "Second writer", 3.0, true);
        second["id"] = json!(id);
        second["version"] = second_read["version"].clone();
        let (status, _, body) = send(&router, Method::PUT, &uri, Some(second)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");

        let (_, _, stored) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(stored["name"], "First writer");
        assert_eq!(stored["version"], 2);
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let (router, _) = app().await;

        let mut body = widget("A1", "Widget", 1.0, true);
        body["id"] = json!(77);
        let (status, _, _) = send(&router, Method::PUT, "/api/products/77", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_one() {
        let (router, _) = app().await;
        let product = create(&router, widget("A1", "Widget", 1.0, true)).await;
        let uri = format!("/api/v2/products/{}", product["id"]);

        let (status, _, removed) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed, product);

        let (status, _, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_batch_delete_verbs() {
        let (router, db) = app().await;
        for i in 0..4 {
            create(&router, widget(&format!("S{}", i), "Widget", 1.0, true)).await;
        }

        let (status, _, removed) = send(&router, Method::DELETE, "/api/products/Delete?ids=1&ids=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&removed), vec![1, 2]);

        // Minimal surface uses POST
        let (status, _, _) = send(&router, Method::DELETE, "/products/Delete?ids=3", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _, removed) = send(&router, Method::POST, "/products/Delete?ids=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&removed), vec![3]);

        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_batch_delete_is_all_or_nothing() {
        let (router, db) = app().await;
        create(&router, widget("A", "Widget", 1.0, true)).await;
        create(&router, widget("B", "Widget", 1.0, true)).await;

        let (status, _, body) =
            send(&router, Method::DELETE, "/api/v2/products/Delete?ids=1&ids=99&ids=2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found: 99");
        assert_eq!(db.products().count().await.unwrap(), 2);

        let (status, _, body) = send(&router, Method::DELETE, "/api/products/Delete", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
