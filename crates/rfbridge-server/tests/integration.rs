use std::sync::Arc;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rfbridge_core::config::{RadioSettings, TransactionSettings};
use rfbridge_core::link::loopback::LoopbackLink;
use rfbridge_core::link::BoxedLink;
use rfbridge_core::Transceiver;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build an initialized transceiver over the given loopback link, with a
/// short timeout so no-reply tests stay fast.
fn radio_with(link: LoopbackLink) -> Arc<Transceiver<BoxedLink>> {
    let settings = TransactionSettings {
        reply_timeout_ms: 100,
        poll_interval_ms: 1,
    };
    let radio = Arc::new(Transceiver::new(
        Box::new(link) as BoxedLink,
        RadioSettings::default(),
        &settings,
    ));
    radio.init().unwrap();
    radio
}

fn echo_router() -> axum::Router {
    rfbridge_server::build_router(radio_with(LoopbackLink::new()))
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_service_banner() {
    let (status, json) = get(echo_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "rfbridge");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn on_returns_remote_reply() {
    let app = rfbridge_server::build_router(radio_with(LoopbackLink::with_reply(b"LEDOn".to_vec())));
    let (status, json) = get(app, "/on").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "LED turned on");
    assert_eq!(json["reply"], "LEDOn");
}

#[tokio::test]
async fn off_returns_remote_reply() {
    let app =
        rfbridge_server::build_router(radio_with(LoopbackLink::with_reply(b"LEDOff".to_vec())));
    let (status, json) = get(app, "/off").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "LED turned off");
    assert_eq!(json["reply"], "LEDOff");
}

#[tokio::test]
async fn servo_echoes_the_wire_command() {
    let (status, json) = get(echo_router(), "/servo/90").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Servo moved to 90°");
    assert_eq!(json["reply"], "servo 90");
}

#[tokio::test]
async fn servo_out_of_range_is_rejected() {
    let (status, json) = get(echo_router(), "/servo/200").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("servo angle out of range"));
}

#[tokio::test]
async fn rdoff_within_range_succeeds() {
    let (status, json) = get(echo_router(), "/rdoff/30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "RD off for 30 min");
    assert_eq!(json["reply"], "rdoff 30");
}

#[tokio::test]
async fn rdoff_out_of_range_is_rejected() {
    let (status, json) = get(echo_router(), "/rdoff/1000").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("sleep minutes out of range"));
}

#[tokio::test]
async fn silent_remote_yields_no_reply_sentinel() {
    let app = rfbridge_server::build_router(radio_with(LoopbackLink::silent()));
    let (status, json) = get(app, "/btlvl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["reply"], "No reply");
}

#[tokio::test]
async fn rejected_transmission_maps_to_502() {
    let app = rfbridge_server::build_router(radio_with(LoopbackLink::rejecting()));
    let (status, json) = get(app, "/off").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("off"));
}

#[tokio::test]
async fn uninitialized_link_returns_503() {
    let settings = TransactionSettings::default();
    let radio = Arc::new(Transceiver::new(
        Box::new(LoopbackLink::new()) as BoxedLink,
        RadioSettings::default(),
        &settings,
    ));
    // Deliberately do NOT call init.
    let app = rfbridge_server::build_router(radio);
    let (status, json) = get(app, "/on").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("not initialized"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _json) = get(echo_router(), "/reboot").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
