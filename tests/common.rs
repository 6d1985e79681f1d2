use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use guestlist_backend::{
    api::router::create_router,
    config::Config,
    domain::models::organizer::Claims,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo, sqlite_guest_repo::SqliteGuestRepo,
        sqlite_invitation_repo::SqliteInvitationRepo,
    },
    state::AppState,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            app_base_url: "http://localhost:3000".to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            import_max_rows: 500,
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            invitation_repo: Arc::new(SqliteInvitationRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mint an access token for the given organizer, signed with the test
    /// key pair. Token issuance is the identity provider's job in
    /// production; tests stand in for it here.
    pub fn auth_for(&self, organizer_id: &str) -> AuthHeaders {
        let priv_key_pem = include_str!("keys/test_private.pem");
        let csrf_token = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp() as usize;

        let claims = Claims {
            iss: "test-issuer".to_string(),
            sub: organizer_id.to_string(),
            aud: "guestlist-frontend".to_string(),
            exp: now + 3600,
            iat: now,
            csrf_token: csrf_token.clone(),
        };

        let key = EncodingKey::from_ed_pem(priv_key_pem.as_bytes()).unwrap();
        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &key).unwrap();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    pub async fn authed_request(
        &self,
        auth: &AuthHeaders,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
