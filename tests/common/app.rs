//! Test application fixture
//!
//! Builds the real router over a fresh in-memory SQLite database and a
//! temporary upload directory. bcrypt runs at its minimum cost.

use axum_test::TestServer;
use sqlx::SqlitePool;
use tempfile::TempDir;

use freelance_hub::backend::auth::password::PasswordHasher;
use freelance_hub::backend::auth::sessions::{JwtSecret, TokenIssuer};
use freelance_hub::backend::auth::uploads::UploadStore;
use freelance_hub::backend::auth::AuthService;
use freelance_hub::backend::routes::create_router;
use freelance_hub::backend::server::config::connect_database;
use freelance_hub::backend::server::{AppState, Environment, ServerConfig};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Test application with direct database access
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub uploads: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_environment(Environment::Development).await
    }

    pub async fn with_environment(environment: Environment) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let config = test_config(environment, &uploads);
        Self::from_config(config, uploads).await
    }

    /// Build over `config`, which must point at `uploads`
    pub async fn from_config(config: ServerConfig, uploads: TempDir) -> Self {
        let pool = connect_database(&config.database_url, config.max_connections)
            .await
            .expect("Failed to create test database");
        let auth = AuthService::new(
            pool.clone(),
            &config.jwt_secret().expect("Test config has no signing secret"),
            PasswordHasher::new(config.bcrypt_cost),
            UploadStore::new(&config.upload_dir),
        );

        let app = create_router(AppState::new(auth, config));
        let server = TestServer::new(app).expect("Failed to start test server");

        Self {
            server,
            pool,
            uploads,
        }
    }

    /// Issuer sharing the server's signing secret
    pub fn issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&JwtSecret::new(TEST_JWT_SECRET))
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }

    /// Names of files currently in the upload directory
    pub fn stored_uploads(&self) -> Vec<String> {
        std::fs::read_dir(self.uploads.path())
            .expect("Failed to read upload dir")
            .map(|entry| {
                entry
                    .expect("Failed to read upload entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

/// Environment lookup with everything a server needs except `APP_ENV`
pub fn env_without_app_env(uploads: &TempDir) -> impl Fn(&str) -> Option<String> {
    let upload_dir = uploads.path().to_string_lossy().into_owned();
    move |key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DB_MAX_CONNECTIONS" => Some("1".to_string()),
        "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
        "UPLOAD_DIR" => Some(upload_dir.clone()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    }
}

/// Configuration pointing at an in-memory database and `uploads`
pub fn test_config(environment: Environment, uploads: &TempDir) -> ServerConfig {
    ServerConfig {
        environment,
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        jwt_secret: Some(JwtSecret::new(TEST_JWT_SECRET)),
        upload_dir: uploads.path().to_path_buf(),
        bcrypt_cost: 4,
        ..ServerConfig::default()
    }
}
