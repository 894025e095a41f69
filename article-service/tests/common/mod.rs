use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use article_service::article::errors::ArticleError;
use article_service::article::models::Article;
use article_service::article::models::ArticleId;
use article_service::article::models::NewArticle;
use article_service::article::ports::ArticleRepository;
use article_service::domain::article::service::ArticleService;
use article_service::domain::auth::service::AuthService;
use article_service::domain::user::service::UserService;
use article_service::inbound::http::router::create_router;
use article_service::user::errors::UserError;
use article_service::user::models::EmailAddress;
use article_service::user::models::NewUser;
use article_service::user::models::PersonName;
use article_service::user::models::User;
use article_service::user::models::UserId;
use article_service::user::ports::UserRepository;
use async_trait::async_trait;
use auth::HashingCost;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Duration;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "pass_word!";

#[derive(Default)]
struct StoreState {
    next_user_id: i64,
    next_article_id: i64,
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, Article>,
}

/// In-memory store implementing both repository ports.
///
/// Mirrors the database constraints: unique email, owner foreign key and
/// cascading delete of a user's articles.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn article_count(&self) -> usize {
        self.state.lock().unwrap().articles.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.lock().unwrap();

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.next_user_id += 1;
        let created = User {
            id: UserId(state.next_user_id),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
        };
        state.users.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.lock().unwrap().users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.state.lock().unwrap().users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.lock().unwrap();

        if !state.users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if state
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut state = self.state.lock().unwrap();

        if state.users.remove(&id.0).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        state.articles.retain(|_, a| a.owner_id != *id);

        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryStore {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let mut state = self.state.lock().unwrap();

        if !state.users.contains_key(&article.owner_id.0) {
            return Err(ArticleError::OwnerNotFound(article.owner_id.to_string()));
        }

        state.next_article_id += 1;
        let created = Article {
            id: ArticleId(state.next_article_id),
            title: article.title,
            description: article.description,
            source_url: article.source_url,
            owner_id: article.owner_id,
        };
        state.articles.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        Ok(self.state.lock().unwrap().articles.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .articles
            .values()
            .cloned()
            .collect())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Article>, ArticleError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .articles
            .values()
            .filter(|a| a.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let mut state = self.state.lock().unwrap();

        if !state.articles.contains_key(&article.id.0) {
            return Err(ArticleError::NotFound(article.id.to_string()));
        }
        if !state.users.contains_key(&article.owner_id.0) {
            return Err(ArticleError::OwnerNotFound(article.owner_id.to_string()));
        }

        state.articles.insert(article.id.0, article.clone());
        Ok(article)
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        match self.state.lock().unwrap().articles.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(ArticleError::NotFound(id.to_string())),
        }
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: InMemoryStore,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
    pub password_hasher: PasswordHasher,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryStore::default();
        let repository = Arc::new(store.clone());

        // Minimal Argon2 cost keeps the suite fast
        let password_hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let token_service = TokenService::new(TEST_SECRET, Duration::minutes(30))
            .expect("Failed to build token service");

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            password_hasher.clone(),
        ));
        let article_service = Arc::new(ArticleService::new(
            Arc::clone(&repository),
            Arc::clone(&repository),
        ));
        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&repository),
                password_hasher.clone(),
                Arc::new(token_service.clone()),
            )
            .expect("Failed to build auth service"),
        );

        let router = create_router(user_service, article_service, auth_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            token_service,
            password_hasher,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Sign up a user through the API and return its id.
    pub async fn signup(&self, email: &str) -> i64 {
        let response = self
            .post("/users/signup")
            .json(&json!({
                "first_name": "Test",
                "last_name": "User",
                "email": email,
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing user id")
    }

    /// Log in through the API and return the access token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post("/users/login")
            .form(&[("username", email), ("password", TEST_PASSWORD)])
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Sign up and log in, returning the user id and token.
    pub async fn signup_and_login(&self, email: &str) -> (i64, String) {
        let id = self.signup(email).await;
        let token = self.login(email).await;
        (id, token)
    }

    /// Insert an admin directly into the store. Signup never creates admins.
    pub async fn seed_admin(&self, email: &str) -> (i64, String) {
        let admin = UserRepository::create(
            &self.store,
            NewUser {
                first_name: PersonName::new("Admin".to_string()).unwrap(),
                last_name: PersonName::new("User".to_string()).unwrap(),
                email: EmailAddress::new(email.to_string()).unwrap(),
                password_hash: self.password_hasher.hash(TEST_PASSWORD).unwrap(),
                is_admin: true,
            },
        )
        .await
        .expect("Failed to seed admin");

        let token = self.login(email).await;
        (admin.id.0, token)
    }

    /// Create an article through the API and return its id.
    pub async fn create_article(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post_authenticated("/articles", token)
            .json(&json!({
                "title": title,
                "description": "A short description",
                "source_url": "https://example.com/article"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing article id")
    }
}
