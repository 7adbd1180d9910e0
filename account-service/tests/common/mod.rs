use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;

use account_service::domain::authentication::service::AuthService;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::NewUser;
use account_service::domain::user::models::PublicId;
use account_service::domain::user::models::User;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::HttpSettings;
use account_service::user::errors::UserRepositoryError;
use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use auth::TransportGate;
use chrono::Utc;
use rsa::RsaPrivateKey;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-32-byte";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: TokenService,
    pub transport: Arc<TransportGate>,
}

/// User store kept in memory, enforcing the same uniqueness rules as the
/// users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.email.as_str()) {
            return Err(UserRepositoryError::DuplicateEmail(
                user.email.as_str().to_string(),
            ));
        }

        let stored = User {
            id: users.len() as i64 + 1,
            public_id: user.public_id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            avatar_url: user.avatar_url,
            created_at: Utc::now(),
            updated_at: None,
        };
        users.insert(stored.email.as_str().to_string(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| &user.public_id == public_id)
            .cloned())
    }
}

fn transport() -> Arc<TransportGate> {
    static TRANSPORT: OnceLock<Arc<TransportGate>> = OnceLock::new();
    TRANSPORT
        .get_or_init(|| {
            let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
                .expect("Failed to generate RSA key");
            Arc::new(TransportGate::new(private_key).expect("Failed to build transport gate"))
        })
        .clone()
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn the application configured as a production deployment
    pub async fn spawn_production() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(production: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(
            PasswordHasher::with_cost(1).expect("Failed to build password hasher"),
            TokenService::new(ACCESS_SECRET, REFRESH_SECRET),
        ));
        let transport = transport();

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let user_service = Arc::new(UserService::new(repository));

        let router = create_router(
            auth_service,
            user_service,
            authenticator,
            Arc::clone(&transport),
            HttpSettings {
                production,
                cors_origin: "http://localhost:5173".to_string(),
            },
        )
        .expect("Failed to build router");

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            tokens: TokenService::new(ACCESS_SECRET, REFRESH_SECRET),
            transport,
        }
    }

    /// Encrypt a password the way a client would before sending it
    pub fn encrypt(&self, password: &str) -> String {
        self.transport
            .encrypt_password(password)
            .expect("Failed to encrypt password")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the raw response
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": self.encrypt(password),
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": self.encrypt(password),
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
