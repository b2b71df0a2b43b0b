use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use util::{config::AppConfig, state::AppState};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Router mounted under `/api` on a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);

    let app_state = AppState::new(setup_test_db().await);
    let router = Router::new()
        .nest("/api", routes(app_state.clone()))
        .with_state(app_state.clone());

    (router, app_state)
}

pub fn bearer(user_id: i64) -> String {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    let (token, _) = generate_jwt(user_id).unwrap();
    format!("Bearer {token}")
}

pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
