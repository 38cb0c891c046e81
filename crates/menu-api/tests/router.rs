use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use menu_api::{build_router, AppState};
use menu_security::Session;
use menu_shared::config::AppConfig;

const SECRET: &str = "router-test-secret";

fn state(server: &MockServer) -> AppState {
    let config = AppConfig::from_toml(&format!(
        "[backend]\nurl = \"{}\"\nanon_key = \"anon-key\"\n",
        server.uri()
    ))
    .unwrap();
    AppState::new(config, SECRET.to_string()).unwrap()
}

fn category_row(id: Uuid, name_tr: &str, order: i32) -> serde_json::Value {
    json!({
        "id": id,
        "name_tr": name_tr,
        "name_en": "Main Courses",
        "subtitle_tr": "Özenle hazırlanmış ana yemekler",
        "subtitle_en": null,
        "display_order": order
    })
}

fn item_row(id: Uuid, category_id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "name_tr": "Pirzola",
        "name_en": null,
        "description_tr": "Izgara kuzu pirzola",
        "ingredients_tr": "kuzu, tuz",
        "allergens_tr": "süt",
        "price": 450.0,
        "category_id": category_id,
        "image": null,
        "is_available": true,
        "is_featured": true,
        "display_order": 1
    })
}

async fn mount_catalog(server: &MockServer, categories: serde_json::Value, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(categories))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/menu_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

async fn mount_user(server: &MockServer, user_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": "admin@lezzet.com.tr"
        })))
        .mount(server)
        .await;
}

/// Sealed session cookie header plus the matching CSRF token
fn signed_in(state: &AppState, user_id: Uuid) -> (String, String) {
    let session = Session::new(
        user_id,
        Some("admin@lezzet.com.tr".to_string()),
        "access-1".to_string(),
        "refresh-1".to_string(),
    );
    let cookie = format!(
        "{}={}",
        state.config.auth.cookie_name,
        state.sessions.seal(&session).unwrap()
    );
    (cookie, state.csrf.token(&session.id))
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{}=", name)))
}

#[tokio::test]
async fn health_reports_version() {
    let server = MockServer::start().await;
    let response = send(build_router(state(&server)), get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("healthy"));
}

#[tokio::test]
async fn readiness_accepts_missing_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "PGRST205",
            "message": "Could not find the table 'public.categories' in the schema cache"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "GoTrue" })))
        .mount(&server)
        .await;

    let response = send(build_router(state(&server)), get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("not_provisioned"));
}

#[tokio::test]
async fn readiness_fails_when_backend_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = send(build_router(state(&server)), get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn menu_renders_active_category_in_english() {
    let server = MockServer::start().await;
    let (category_id, item_id) = (Uuid::new_v4(), Uuid::new_v4());
    mount_catalog(
        &server,
        json!([category_row(category_id, "Ana Yemekler", 1)]),
        json!([item_row(item_id, category_id)]),
    )
    .await;

    let response = send(build_router(state(&server)), get("/menu?lang=en")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Main Courses"));
    assert!(html.contains("Pirzola"));
    assert!(html.contains("/static/delicious-food.svg"));
    assert!(html.contains("Click for details"));
    assert!(html.contains(&format!("/menu/items/{}", item_id)));
}

#[tokio::test]
async fn empty_menu_shows_update_notice() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([]), json!([])).await;

    let response = send(build_router(state(&server)), get("/menu")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Menü güncelleniyor"));
}

#[tokio::test]
async fn menu_backend_failure_is_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let response = send(build_router(state(&server)), get("/menu")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn item_detail_shows_optional_sections() {
    let server = MockServer::start().await;
    let (category_id, item_id) = (Uuid::new_v4(), Uuid::new_v4());
    Mock::given(method("GET"))
        .and(path("/rest/v1/menu_items"))
        .and(query_param("id", format!("eq.{}", item_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([item_row(item_id, category_id)])))
        .mount(&server)
        .await;

    let response = send(build_router(state(&server)), get(&format!("/menu/items/{}", item_id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("İçindekiler"));
    assert!(html.contains("Alerjenler"));
    assert!(!html.contains("Şef Önerisi"));
    assert!(!html.contains("Besin Değerleri"));
}

#[tokio::test]
async fn item_detail_unknown_ids_are_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/menu_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let app = build_router(state(&server));
    let response = send(app.clone(), get("/menu/items/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(app, get(&format!("/menu/items/{}", Uuid::new_v4()))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_requires_session() {
    let server = MockServer::start().await;
    let response = send(build_router(state(&server)), get("/admin")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn tampered_cookie_is_rejected() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .uri("/admin")
        .header(header::COOKIE, "menu_session=not-a-token")
        .body(Body::empty())
        .unwrap();

    let response = send(build_router(state(&server)), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn failed_login_rerenders_with_toast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=admin%40lezzet.com.tr&password=wrong"))
        .unwrap();

    let response = send(build_router(state(&server)), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Geçersiz e-posta veya şifre"));
    assert!(html.contains("value=\"admin@lezzet.com.tr\""));
}

#[tokio::test]
async fn successful_login_sets_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1",
            "user": { "id": Uuid::new_v4(), "email": "admin@lezzet.com.tr" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=admin%40lezzet.com.tr&password=s3cret"))
        .unwrap();

    let response = send(build_router(state(&server)), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    assert!(sets_cookie(&response, "menu_session"));
    assert!(sets_cookie(&response, "_toast"));
}

#[tokio::test]
async fn dashboard_renders_for_signed_in_admin() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    mount_user(&server, user_id).await;
    mount_catalog(
        &server,
        json!([category_row(category_id, "Ana Yemekler", 1)]),
        json!([item_row(Uuid::new_v4(), category_id)]),
    )
    .await;

    let state = state(&server);
    let (cookie, csrf) = signed_in(&state, user_id);
    let request = Request::builder()
        .uri("/admin?new_item=1")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();

    let response = send(build_router(state), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Yönetici Paneli"));
    assert!(html.contains("Yeni Menü Öğesi Ekle"));
    assert!(html.contains(&csrf));
}

#[tokio::test]
async fn dashboard_shows_setup_when_tables_missing() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    mount_user(&server, user_id).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "message": "relation \"public.categories\" does not exist"
        })))
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, _) = signed_in(&state, user_id);
    let request = Request::builder()
        .uri("/admin")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();

    let response = send(build_router(state), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Veritabanı Kurulumu Gerekli"));
    assert!(html.contains("Tekrar Kontrol Et"));
}

#[tokio::test]
async fn mutation_without_csrf_token_is_forbidden() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    mount_user(&server, user_id).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, _) = signed_in(&state, user_id);
    let request = Request::builder()
        .method("POST")
        .uri("/admin/categories")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("csrf_token=forged&name_tr=Salatalar"))
        .unwrap();

    let response = send(build_router(state), request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

fn removes_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{}=;", name)) && v.contains("Max-Age=0"))
}

/// Decoded JSON of the pending toast cookie
fn toast_json(response: &Response) -> Option<serde_json::Value> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    let value = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("_toast="))?
        .split(';')
        .next()?;
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(value).ok()?).ok()
}

fn logout_request(cookie: String, csrf: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("csrf_token={}", csrf)))
        .unwrap()
}

#[tokio::test]
async fn logout_signs_out_upstream_and_clears_session() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(wiremock::matchers::header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, csrf) = signed_in(&state, user_id);
    let cookie_name = state.config.auth.cookie_name.clone();

    let response = send(build_router(state), logout_request(cookie, &csrf)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/menu");
    assert!(removes_cookie(&response, &cookie_name));
    let toast = toast_json(&response).unwrap();
    assert_eq!(toast["title"], "Çıkış yapıldı");
    assert_eq!(toast["variant"], "default");
}

#[tokio::test]
async fn logout_with_wrong_csrf_token_is_forbidden() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, _) = signed_in(&state, user_id);
    let cookie_name = state.config.auth.cookie_name.clone();

    let response = send(build_router(state), logout_request(cookie, "forged")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!removes_cookie(&response, &cookie_name));
}

#[tokio::test]
async fn duplicate_category_redirects_with_toast() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    mount_user(&server, user_id).await;
    mount_catalog(
        &server,
        json!([category_row(Uuid::new_v4(), "Ana Yemekler", 1)]),
        json!([]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, csrf) = signed_in(&state, user_id);
    let request = Request::builder()
        .method("POST")
        .uri("/admin/categories")
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("csrf_token={}&tab=&name_tr=ana+yemekler&name_en=", csrf)))
        .unwrap();

    let response = send(build_router(state), request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin?manage_categories=1");
    assert!(sets_cookie(&response, "_toast"));
}

#[tokio::test]
async fn rejected_upload_keeps_item_dialog_open() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let category_id = Uuid::new_v4();
    mount_user(&server, user_id).await;
    mount_catalog(&server, json!([category_row(category_id, "Ana Yemekler", 1)]), json!([])).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/menu_items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let state = state(&server);
    let (cookie, csrf) = signed_in(&state, user_id);
    let boundary = "menu-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"csrf_token\"\r\n\r\n{csrf}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"name_tr\"\r\n\r\nPirzola\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"category_id\"\r\n\r\n{category}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"image_file\"; filename=\"menu.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n%PDF-1.4\r\n\
         --{b}--\r\n",
        b = boundary,
        csrf = csrf,
        category = category_id,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/admin/items")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = send(build_router(state), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Geçersiz dosya türü"));
    assert!(html.contains("value=\"Pirzola\""));
}
