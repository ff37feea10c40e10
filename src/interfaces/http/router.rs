//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::{auth_middleware, AuthState};
use super::modules::{access, health, request_id, users};
use crate::application::IdentityService;

/// Unified state for every route. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub identity: Arc<IdentityService>,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for access::AccessHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        access::AccessHandlerState {
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        users::UserHandlerState {
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            identity: Arc::clone(&s.identity),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        AuthState {
            identity: Arc::clone(&s.identity),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/access/user/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        access::login,
        users::list_users,
    ),
    components(
        schemas(
            ApiResponse<String>,
            access::LoginRequest,
            access::LoginResponse,
            users::UserDto,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Access", description = "Credential check and token issuance"),
        (name = "Users", description = "User directory (bearer token required)"),
    ),
    info(
        title = "User Directory API",
        version = "1.0.0",
        description = "Issues signed JWTs for seeded users and serves the protected user listing",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(identity: Arc<IdentityService>) -> Router {
    let state = ApiState {
        identity,
        started_at: Arc::new(Instant::now()),
    };
    let auth_state = AuthState::from_ref(&state);

    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::temporary("/docs") }))
        .route("/health", get(health::health_check))
        .route("/api/access/user/login", post(access::login));

    let protected_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    public_routes
        .merge(protected_routes)
        .with_state(state)
        .merge(swagger_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::infrastructure::crypto::jwt::JwtConfig;
    use crate::server::build_identity;

    fn app() -> Router {
        let identity = build_identity(JwtConfig {
            secret: "router-test-signing-secret-0123456789abcdef".into(),
            issuer: "userdir".into(),
            audience: "userdir-clients".into(),
            expiration_minutes: 60,
        })
        .unwrap();
        create_api_router(identity)
    }

    async fn send(
        router: &Router,
        req: Request<Body>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut svc = router.clone().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/access/user/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": username, "password": password}).to_string(),
            ))
            .unwrap()
    }

    fn users_request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/api/users");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn token_for(router: &Router, username: &str) -> String {
        let (status, _, body) = send(router, login_request(username, "password@123")).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn login_with_seeded_credentials_returns_token() {
        let router = app();
        let (status, _, body) = send(&router, login_request("jperez", "password@123")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "jperez");
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["expiresIn"], 3600);
        assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_401() {
        let router = app();
        let (status, _, body) = send(&router, login_request("jperez", "wrong")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn unknown_user_gets_the_same_401_body() {
        let router = app();
        let (_, _, known) = send(&router, login_request("jperez", "wrong")).await;
        let (status, _, unknown) = send(&router, login_request("nobody", "wrong")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(known, unknown);
    }

    #[tokio::test]
    async fn login_with_empty_fields_is_422() {
        let router = app();
        let (status, _, body) = send(&router, login_request("", "")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn users_without_token_is_401() {
        let router = app();
        let (status, headers, body) = send(&router, users_request(None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
        assert_eq!(body["error"], "Missing authentication token");
    }

    #[tokio::test]
    async fn users_with_invalid_token_is_401() {
        let router = app();
        let (status, _, _) = send(&router, users_request(Some("Bearer not.a.jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(&router, users_request(Some("Token abc"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_from_another_process_is_rejected() {
        let other = build_identity(JwtConfig {
            secret: "a-completely-different-signing-secret-xyz".into(),
            issuer: "userdir".into(),
            audience: "userdir-clients".into(),
            expiration_minutes: 60,
        })
        .unwrap();
        let foreign = other.login("jperez", "password@123").unwrap().token;

        let router = app();
        let auth = format!("Bearer {}", foreign);
        let (status, _, _) = send(&router, users_request(Some(&auth))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn users_with_token_lists_directory_without_passwords() {
        let router = app();
        let token = token_for(&router, "crodriguez").await;
        let auth = format!("Bearer {}", token);

        let (status, _, body) = send(&router, users_request(Some(&auth))).await;
        assert_eq!(status, StatusCode::OK);

        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 3);
        let ids: Vec<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(users[0]["username"], "jperez");
        assert_eq!(users[1]["lastName"], "García");
        assert_eq!(users[2]["email"], "carlos.rodriguez@designli.co");
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }

    #[tokio::test]
    async fn health_reports_user_count() {
        let router = app();
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, _, body) = send(&router, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Healthy");
        assert_eq!(body["users"], 3);
        assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    }

    #[tokio::test]
    async fn root_redirects_to_docs() {
        let router = app();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, headers, _) = send(&router, req).await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(headers[header::LOCATION], "/docs");
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let router = app();
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = send(&router, req).await;
        assert_eq!(headers["x-request-id"], "abc-123");

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (_, headers, _) = send(&router, req).await;
        assert_eq!(headers["x-request-id"].len(), 36);
    }

    #[test]
    fn openapi_document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/api/access/user/login"));
        assert!(paths.contains(&"/api/users"));
        assert!(paths.contains(&"/health"));
    }
}
