#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::errors::MailerError;
use account_service::account::messages;
use account_service::account::models::EmailAddress;
use account_service::account::models::RefreshToken;
use account_service::account::models::User;
use account_service::account::models::UserId;
use account_service::account::ports::Mailer;
use account_service::account::ports::RefreshTokenRepository;
use account_service::account::ports::UserRepository;
use account_service::account::service::AccountService;
use account_service::account::service::AccountSettings;
use account_service::inbound::http::router::create_router;
use account_service::organisation::models::Organisation;
use account_service::organisation::ports::OrganisationRepository;
use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenSettings;
use axum::http::HeaderValue;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

pub const PUBLIC_URL: &str = "http://api.test/api/v1/auth";
pub const CLIENT_URL: &str = "http://client.test";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub organisations: Arc<InMemoryOrganisationRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());
        let organisations = Arc::new(InMemoryOrganisationRepository::default());
        let mailer = Arc::new(RecordingMailer::default());

        let authenticator = Arc::new(Authenticator::new(
            TokenSettings::new(
                b"test-access-secret-for-jwt-signing-32-bytes",
                Duration::minutes(15),
            ),
            TokenSettings::new(
                b"test-refresh-secret-for-jwt-signing-32-bytes",
                Duration::days(7),
            ),
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&users),
            Arc::clone(&refresh_tokens),
            Arc::clone(&organisations),
            Arc::clone(&mailer),
            Arc::clone(&authenticator),
            AccountSettings {
                public_url: PUBLIC_URL.to_string(),
                client_url: CLIENT_URL.to_string(),
                password_reset_ttl: Duration::minutes(15),
            },
        ));

        let application = create_router(
            account_service,
            Arc::clone(&authenticator),
            HeaderValue::from_static(CLIENT_URL),
        );

        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            refresh_tokens,
            organisations,
            mailer,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Register a user and return the confirmation token and code from the email.
    pub async fn register(&self, email: &str, password: &str, role: &str) -> (String, String) {
        let response = self
            .post("/api/v1/auth/register")
            .json(&serde_json::json!({
                "name": "Ada Lovelace",
                "emailAddress": email,
                "password": password,
                "consent": true,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let email = self
            .mailer
            .last_to(email)
            .expect("No confirmation email sent");
        confirmation_from(&email.html_body)
    }

    pub async fn verify(&self, token: &str, code: &str) -> reqwest::Response {
        self.put(&format!("/api/v1/auth/confirmation/{}?code={}", token, code))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&serde_json::json!({
                "emailAddress": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, confirm and log in; returns the login response body.
    pub async fn signed_in(&self, email: &str, password: &str, role: &str) -> serde_json::Value {
        let (token, code) = self.register(email, password, role).await;
        assert_eq!(self.verify(&token, &code).await.status(), reqwest::StatusCode::OK);

        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }
}

/// Pull `(token, code)` out of a confirmation email body.
pub fn confirmation_from(html: &str) -> (String, String) {
    let prefix = format!("{}/confirmation/", PUBLIC_URL);
    let start = html.find(&prefix).expect("No confirmation link") + prefix.len();
    let rest = &html[start..];
    let (token, rest) = rest.split_once("?code=").expect("No code in link");
    let code: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    (token.to_string(), code)
}

/// Pull the reset token out of a password reset email body.
pub fn reset_token_from(html: &str) -> String {
    let prefix = format!("{}/reset-password/", CLIENT_URL);
    let start = html.find(&prefix).expect("No reset link") + prefix.len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned()
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| predicate(user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AccountError::AlreadyExists(messages::already_exists(
                "User",
                "emailAddress",
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        Ok(self.find(|user| user.email.as_str() == email))
    }

    async fn find_by_confirmation(
        &self,
        token: &str,
        code: &str,
    ) -> Result<Option<User>, AccountError> {
        Ok(self.find(|user| {
            user.account_confirmation.token == token && user.account_confirmation.code == code
        }))
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AccountError> {
        Ok(self.find(|user| user.password_reset.token.as_deref() == Some(token)))
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(AccountError::NotFound(messages::not_found("User"))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<Vec<RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AccountError> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AccountError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.token == token)
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AccountError> {
        self.tokens
            .lock()
            .unwrap()
            .retain(|stored| stored.token != token);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, AccountError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|stored| stored.user_id != *user_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|stored| stored.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryOrganisationRepository {
    organisations: Mutex<Vec<Organisation>>,
}

impl InMemoryOrganisationRepository {
    pub fn seed(&self, name: &str, email: &str) {
        self.organisations.lock().unwrap().push(Organisation {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl OrganisationRepository for InMemoryOrganisationRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Organisation>, AccountError> {
        Ok(self
            .organisations
            .lock()
            .unwrap()
            .iter()
            .find(|organisation| organisation.email.as_str() == email)
            .cloned())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Mailer stub that keeps every email in memory.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_to(&self, recipient: &str) -> Option<SentEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|email| email.recipients.iter().any(|r| r == recipient))
            .cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset so the suite still runs
    /// on machines without Postgres.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_account_service_{}",
            Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
