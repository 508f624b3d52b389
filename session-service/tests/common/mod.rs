use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Extension;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use session_service::inbound::http::login;
use session_service::inbound::http::refresh;
use session_service::inbound::http::require_access_token;
use session_service::inbound::http::require_api_key;
use session_service::inbound::http::revoke;
use session_service::inbound::http::AuthenticatedUser;
use session_service::session::errors::StoreError;
use session_service::session::models::EmailAddress;
use session_service::session::models::NewRefreshToken;
use session_service::session::models::RefreshTokenRecord;
use session_service::session::models::SessionSettings;
use session_service::session::models::UserId;
use session_service::session::models::UserRecord;
use session_service::session::ports::RefreshTokenStore;
use session_service::session::ports::SessionServicePort;
use session_service::session::ports::UserDirectory;
use session_service::session::service::SessionService;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";
pub const EMAIL: &str = "walt@breakingbad.com";
pub const PASSWORD: &str = "04234";

pub type TestService = SessionService<InMemoryUserDirectory, InMemoryRefreshTokenStore>;

/// User directory backed by a map keyed on email
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn add(&self, user: UserRecord) {
        self.users
            .lock()
            .unwrap()
            .insert(user.email.as_str().to_string(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }
}

/// Refresh token store backed by a map keyed on token
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenStore {
    pub fn get(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.tokens.lock().unwrap().get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn active_count(&self) -> usize {
        self.tokens
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.revoked_at.is_none())
            .count()
    }

    pub fn expire(&self, token: &str) {
        if let Some(record) = self.tokens.lock().unwrap().get_mut(token) {
            record.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn insert(&self, token: NewRefreshToken) -> Result<(), StoreError> {
        let record = RefreshTokenRecord {
            token: token.token.clone(),
            user_id: token.user_id,
            created_at: Utc::now(),
            expires_at: token.expires_at,
            revoked_at: None,
        };
        self.tokens.lock().unwrap().insert(token.token, record);
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, StoreError> {
        Ok(self.get(token))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, StoreError> {
        match self.tokens.lock().unwrap().get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(revoked_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Session service wired to in-memory stores, plus a router mounting its handlers
pub struct TestApp {
    pub service: Arc<TestService>,
    pub users: Arc<InMemoryUserDirectory>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenStore>,
    pub user_id: UserId,
    router: Router,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_settings(SessionSettings::new(JWT_SECRET, API_KEY))
    }

    pub fn with_settings(settings: SessionSettings) -> Self {
        let users = Arc::new(InMemoryUserDirectory::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenStore::default());
        let service = Arc::new(SessionService::new(
            users.clone(),
            refresh_tokens.clone(),
            settings,
        ));

        let password_hash = service
            .hash_password(PASSWORD)
            .expect("Failed to hash test password");
        let user_id = UserId::new();
        let now = Utc::now();
        users.add(UserRecord {
            id: user_id,
            email: EmailAddress::new(EMAIL.to_string()).unwrap(),
            password_hash,
            created_at: now,
            updated_at: now,
        });

        let router = router(service.clone());

        Self {
            service,
            users,
            refresh_tokens,
            user_id,
            router,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_with_authorization(&self, uri: &str, authorization: &str) -> Response {
        self.send(
            Request::post(uri)
                .header(header::AUTHORIZATION, authorization)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get_with_authorization(&self, uri: &str, authorization: &str) -> Response {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, authorization)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Log the seeded user in and return the response body
    pub async fn login(&self) -> serde_json::Value {
        let response = self
            .post_json(
                "/api/login",
                serde_json::json!({ "email": EMAIL, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
    user.user_id.to_string()
}

async fn admin_ping() -> StatusCode {
    StatusCode::OK
}

fn router(service: Arc<TestService>) -> Router {
    let protected_routes = Router::new()
        .route("/api/me", get(whoami))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            require_access_token::<TestService>,
        ));

    let admin_routes = Router::new()
        .route("/admin/ping", post(admin_ping))
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            require_api_key::<TestService>,
        ));

    Router::new()
        .route("/api/login", post(login::<TestService>))
        .route("/api/refresh", post(refresh::<TestService>))
        .route("/api/revoke", post(revoke::<TestService>))
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(service)
}
