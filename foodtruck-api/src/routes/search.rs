use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::VendorsResponse,
    app_state::AppState,
    domain::models::{NameSearchParams, NameSearchRequest, SearchParams, SearchRequest},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/searchfood", get(search_food))
        .route("/foodtruck", get(search_food_truck))
}

#[instrument(name = "GET /searchfood", skip(app_state, connect_info))]
async fn search_food(
    State(app_state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<VendorsResponse>, ApiError> {
    let client_ip = connect_info.map(|ConnectInfo(peer)| peer.ip());
    let request = SearchRequest::from_params(params, client_ip, app_state.search_config())?;

    let vendors = app_state.vendor_search().search(request).await?;

    Ok(Json(VendorsResponse::from(vendors)))
}

#[instrument(name = "GET /foodtruck", skip(app_state))]
async fn search_food_truck(
    State(app_state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<VendorsResponse>, ApiError> {
    let request = NameSearchRequest::from_params(params, app_state.search_config())?;

    let vendors = app_state.vendor_search().search_by_name(request).await?;

    Ok(Json(VendorsResponse::from(vendors)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::outbound::{
            memory::MemoryVendorStore,
            mock::{MockGeocoder, MockIpLocator, MockQueryCache},
        },
        domain::{
            models::{Position, SearchConfig, Vendor, VendorId},
            services::VendorSearchServiceImpl,
        },
    };

    fn vendor(id: &str, applicant: &str, lat: f64, lon: f64) -> Vendor {
        Vendor {
            id: VendorId::new(id),
            applicant: applicant.to_string(),
            facilitytype: "Truck".to_string(),
            fooditems: "Tacos".to_string(),
            status: "APPROVED".to_string(),
            address: None,
            loc: Position::new(lon, lat),
            distance: None,
        }
    }

    fn app() -> Router {
        let store = MemoryVendorStore::new(vec![
            vendor("1", "Taco Truck", 37.7801, -122.4201),
            vendor("2", "Burrito Truck", 37.7811, -122.4211),
        ]);
        let ip_locator =
            MockIpLocator::default().with_ip("203.0.113.9".parse().unwrap(), 37.78, -122.42);
        let service = VendorSearchServiceImpl::new(
            Arc::new(MockGeocoder::default()),
            Arc::new(ip_locator),
            Arc::new(store),
            Arc::new(MockQueryCache::new()),
            SearchConfig::default(),
        );
        let state = AppState::new(Arc::new(service), SearchConfig::default());

        router()
            .with_state(state)
            .layer(MockConnectInfo(SocketAddr::from(([203, 0, 113, 9], 4242))))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn point_search_returns_envelope() {
        let (status, body) = get("/searchfood?point=37.78,-122.42&limit=10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["text"][0], json!(0));
        let vendors = body["response"]["text"][1].as_array().unwrap();
        assert_eq!(vendors.len(), 2);
        assert_eq!(vendors[0]["id"], json!("1"));
        assert!(vendors[0]["distance"].is_number());
    }

    #[tokio::test]
    async fn current_location_uses_peer_address() {
        let (status, body) = get("/searchfood").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["text"][1].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ambiguous_location_is_bad_request() {
        let (status, body) = get("/searchfood?location=SF&point=37.78,-122.42").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"text": [1001, "multiple locations specified, cannot disambiguate"]}})
        );
    }

    #[tokio::test]
    async fn malformed_limit_is_bad_request() {
        let (status, body) = get("/searchfood?point=37.78,-122.42&limit=lots").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["text"][0], json!(1001));
    }

    #[tokio::test]
    async fn name_search_without_name_is_missing_parameter() {
        let (status, body) = get("/foodtruck").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"text": [1000, "name field is missing in query"]}})
        );
    }

    #[tokio::test]
    async fn name_search_finds_vendor() {
        let (status, body) = get("/foodtruck?name=burrito").await;

        assert_eq!(status, StatusCode::OK);
        let vendors = body["response"]["text"][1].as_array().unwrap();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0]["applicant"], json!("Burrito Truck"));
    }
}
