//! HTTP surface tests: auth gating, envelopes and the document endpoints,
//! driven through the router with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use orcamento_api::config::AppConfig;
use orcamento_api::{handlers, AppState};

fn test_config(template_dir: &str) -> AppConfig {
    let raw = json!({
        "host": "127.0.0.1",
        "port": 0,
        "log_level": "warn",
        "log_json": false,
        "jwt_secret": "integration-test-secret-key-0123456789abcdef",
        "token_ttl_secs": 3600,
        "admin_username": "admin",
        "admin_password": "s3nha",
        "template_dir": template_dir,
        "mail_from": "orcamentos@example.com"
    });
    serde_json::from_value(raw).unwrap()
}

struct TestApp {
    state: AppState,
    _template_dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("order.html"),
        "<p>{{CustomerName}}</p>{{ItemRows}}<p>{{Total}}</p><p>{{DateExpiration}}</p>",
    )
    .unwrap();
    std::fs::write(dir.path().join("price_list.html"), "{{ProductList}}").unwrap();

    let state = AppState::build(test_config(dir.path().to_str().unwrap()));
    TestApp {
        state,
        _template_dir: dir,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &TestApp) -> String {
    let response = handlers::router(app.state.clone())
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "s3nha"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn request_json(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: &str,
    payload: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    let body = match payload {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = handlers::router(app.state.clone())
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn health_is_open() {
    let app = test_app();
    let response = handlers::router(app.state.clone())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn entity_routes_require_a_bearer_token() {
    let app = test_app();
    let response = handlers::router(app.state.clone())
        .oneshot(Request::get("/products").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_login_is_rejected() {
    let app = test_app();
    let response = handlers::router(app.state.clone())
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "wrong"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn quote_flow_over_http() {
    let app = test_app();
    let token = login(&app).await;

    let (status, customer) = request_json(
        &app,
        "POST",
        "/customers",
        &token,
        Some(json!({
            "name": "Maria Silva",
            "email": "maria@example.com",
            "cpf_cnpj": "123.456.789-09"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let customer_id = customer["data"]["id"].as_str().unwrap().to_string();

    let (status, product) = request_json(
        &app,
        "POST",
        "/products",
        &token,
        Some(json!({"name": "Parafuso", "price": "10.00"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["data"]["code"], 1);
    let product_id = product["data"]["id"].as_str().unwrap().to_string();

    let (status, order) = request_json(
        &app,
        "POST",
        "/orders",
        &token,
        Some(json!({
            "customer_id": customer_id,
            "items": [
                {"product_id": product_id, "quantity": 2, "unit_price": "10.00"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["data"]["total"], "20.00");
    assert!(order["data"]["title"]
        .as_str()
        .unwrap()
        .contains("Maria Silva"));
    let order_id = order["data"]["id"].as_str().unwrap().to_string();

    // Download returns PDF bytes (passthrough converter → rendered HTML).
    let response = handlers::router(app.state.clone())
        .oneshot(
            Request::post(format!("/orders/{}/download", order_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("R$ 20,00"));

    // Send delivers to the customer's address.
    let (status, sent) =
        request_json(&app, "POST", &format!("/orders/{}/send", order_id), &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["data"]["recipient"], "maria@example.com");
}

#[tokio::test]
async fn order_with_no_items_is_a_validation_error() {
    let app = test_app();
    let token = login(&app).await;

    let (status, body) = request_json(
        &app,
        "POST",
        "/orders",
        &token,
        Some(json!({
            "customer_id": uuid::Uuid::new_v4(),
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn unknown_order_detail_is_not_found() {
    let app = test_app();
    let token = login(&app).await;

    let (status, _) = request_json(
        &app,
        "GET",
        &format!("/orders/{}", uuid::Uuid::new_v4()),
        &token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
