#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

fn config() -> ApiConfig {
    ApiConfig {
        base_url: "https://planner.example".to_owned(),
        csrf_token: "token-123".to_owned(),
    }
}

// =============================================================
// Endpoint routing
// =============================================================

#[test]
fn artwork_positions_route_to_artwork_endpoint() {
    let id = Uuid::new_v4();
    assert_eq!(
        position_path(EntityKind::Artwork, &id),
        format!("update_artwork_position/{id}")
    );
}

#[test]
fn object_positions_route_to_object_endpoint() {
    let id = Uuid::new_v4();
    assert_eq!(
        position_path(EntityKind::PermanentObject, &id),
        format!("update_object_position/{id}")
    );
}

#[test]
fn url_joins_base_and_path() {
    let client = ApiClient::new(config());
    assert_eq!(client.url("check-auth-status"), "https://planner.example/check-auth-status");
}

#[test]
fn url_tolerates_trailing_slash_in_base() {
    let client = ApiClient::new(ApiConfig {
        base_url: "https://planner.example/".to_owned(),
        csrf_token: String::new(),
    });
    assert_eq!(client.url("artwork-manual"), "https://planner.example/artwork-manual");
}

// =============================================================
// Wire payloads
// =============================================================

#[test]
fn position_update_uses_legacy_field_names() {
    let body = PositionUpdate { x_position: 35.0, y_position: 20.0, wall_id: Uuid::new_v4() };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value.get("x_position").unwrap().as_f64().unwrap(), 35.0);
    assert_eq!(value.get("y_position").unwrap().as_f64().unwrap(), 20.0);
    assert!(value.get("wall_id").is_some());
    assert!(value.get("x").is_none());
}

#[test]
fn status_response_success_is_ok() {
    let response: StatusResponse = serde_json::from_value(json!({"success": true})).unwrap();
    assert!(response.into_result().is_ok());
}

#[test]
fn status_response_failure_carries_backend_message() {
    let response: StatusResponse =
        serde_json::from_value(json!({"success": false, "error": "wall not found"})).unwrap();
    match response.into_result().unwrap_err() {
        ApiError::Rejected(message) => assert_eq!(message, "wall not found"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn status_response_failure_without_message_still_errors() {
    let response: StatusResponse = serde_json::from_value(json!({"success": false})).unwrap();
    assert!(response.into_result().is_err());
}

#[test]
fn artwork_response_parses_nested_entity_with_legacy_names() {
    let raw = json!({
        "success": true,
        "artwork": {
            "id": Uuid::new_v4(),
            "name": "Sunset",
            "kind": "artwork",
            "width": 24.0,
            "height": 36.0,
            "x_position": 0.0,
            "y_position": 0.0,
            "hanging_point": 2.0,
        },
    });
    let response: ArtworkResponse = serde_json::from_value(raw).unwrap();
    let artwork = response.artwork.unwrap();
    assert_eq!(artwork.name, "Sunset");
    assert_eq!(artwork.hanging_point, Some(2.0));
}

#[test]
fn auth_status_parses() {
    let status: AuthStatus = serde_json::from_value(json!({"authenticated": true})).unwrap();
    assert!(status.authenticated);
}

// =============================================================
// NewArtwork validation
// =============================================================

#[test]
fn valid_artwork_passes() {
    let artwork = NewArtwork {
        name: "Sunset".to_owned(),
        width: 24.0,
        height: 36.0,
        hanging_point: 2.0,
        ..Default::default()
    };
    assert!(artwork.validate().is_ok());
}

#[test]
fn blank_name_rejected() {
    let artwork = NewArtwork { name: "  ".to_owned(), width: 24.0, height: 36.0, ..Default::default() };
    assert!(matches!(artwork.validate().unwrap_err(), ApiError::Invalid(_)));
}

#[test]
fn non_positive_dimensions_rejected() {
    for (width, height) in [(0.0, 36.0), (-1.0, 36.0), (24.0, 0.0), (f64::NAN, 36.0)] {
        let artwork = NewArtwork {
            name: "Sunset".to_owned(),
            width,
            height,
            ..Default::default()
        };
        assert!(artwork.validate().is_err(), "width {width} height {height} should fail");
    }
}

#[test]
fn negative_hanging_point_rejected() {
    let artwork = NewArtwork {
        name: "Sunset".to_owned(),
        width: 24.0,
        height: 36.0,
        hanging_point: -1.0,
        ..Default::default()
    };
    assert!(artwork.validate().is_err());
}

#[test]
fn zero_hanging_point_allowed() {
    let artwork =
        NewArtwork { name: "Sunset".to_owned(), width: 24.0, height: 36.0, ..Default::default() };
    assert!(artwork.validate().is_ok());
}

// =============================================================
// Transport
// =============================================================

#[tokio::test]
async fn create_artwork_validates_before_any_network_call() {
    // Unroutable base URL: if validation didn't run first, this would try
    // to connect. An invalid artwork must fail without any transport error.
    let client = ApiClient::new(ApiConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        csrf_token: String::new(),
    });
    let result = client.create_artwork(NewArtwork::default()).await;
    assert!(matches!(result.unwrap_err(), ApiError::Invalid(_)));
}

#[tokio::test]
async fn transport_failure_surfaces_as_http_error() {
    let client = ApiClient::new(ApiConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        csrf_token: String::new(),
    });
    let result = client
        .update_position(EntityKind::Artwork, &Uuid::new_v4(), 1.0, 2.0, Uuid::new_v4())
        .await;
    assert!(matches!(result.unwrap_err(), ApiError::Http(_)));
}
