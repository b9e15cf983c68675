//! Shared fixtures for router tests: in-memory stores and request helpers.

#![allow(clippy::unwrap_used, dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;

use vitrine_core::{ProductId, UserId};
use vitrine_web::config::AppConfig;
use vitrine_web::db::{ProductStore, RepositoryError, UserStore};
use vitrine_web::models::{NewProduct, NewUser, Product, User};
use vitrine_web::routes;
use vitrine_web::state::AppState;

/// Product store backed by a vector, assigning sequential IDs.
#[derive(Default)]
pub struct MemoryProducts {
    rows: Mutex<(i32, Vec<Product>)>,
}

impl MemoryProducts {
    pub fn snapshot(&self) -> Vec<Product> {
        self.rows.lock().unwrap().1.clone()
    }
}

#[async_trait]
impl ProductStore for MemoryProducts {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.snapshot().into_iter().find(|p| p.id == id))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut guard = self.rows.lock().unwrap();
        guard.0 += 1;
        let created = product.with_id(ProductId::new(guard.0));
        guard.1.push(created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let mut guard = self.rows.lock().unwrap();
        match guard.1.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut guard = self.rows.lock().unwrap();
        let before = guard.1.len();
        guard.1.retain(|p| p.id != id);
        Ok(guard.1.len() != before)
    }
}

/// Product store whose every operation fails as if the database were down.
pub struct UnreachableProducts;

fn unreachable() -> RepositoryError {
    RepositoryError::Connection(sqlx::Error::Protocol(
        "could not connect to server at 10.0.0.5".to_string(),
    ))
}

#[async_trait]
impl ProductStore for UnreachableProducts {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Err(unreachable())
    }

    async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Err(unreachable())
    }

    async fn create(&self, _product: NewProduct) -> Result<Product, RepositoryError> {
        Err(unreachable())
    }

    async fn update(&self, _product: &Product) -> Result<bool, RepositoryError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: ProductId) -> Result<bool, RepositoryError> {
        Err(unreachable())
    }

    async fn check_connection(&self) -> Result<(), RepositoryError> {
        Err(unreachable())
    }
}

/// User store backed by a vector.
#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
}

impl MemoryUsers {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let id = i32::try_from(rows.len()).unwrap() + 1;
        let created = User {
            id: UserId::new(id),
            name: user.name,
            email: user.email,
        };
        rows.push((created.clone(), user.password_hash));
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<(User, String)>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|(u, _)| u.email == email).cloned())
    }
}

/// User store whose every operation fails as if the database were down.
pub struct UnreachableUsers;

#[async_trait]
impl UserStore for UnreachableUsers {
    async fn create(&self, _user: NewUser) -> Result<User, RepositoryError> {
        Err(unreachable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<(User, String)>, RepositoryError> {
        Err(unreachable())
    }
}

/// Configuration with only the required secret set.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key: &str| match key {
        "SECRET_KEY" => Some("test-secret-key".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Test harness holding the router and handles to its stores.
pub struct TestApp {
    pub router: Router,
    pub products: Arc<MemoryProducts>,
    pub users: Arc<MemoryUsers>,
}

impl TestApp {
    pub fn new() -> Self {
        let products = Arc::new(MemoryProducts::default());
        let users = Arc::new(MemoryUsers::default());
        let state = AppState::new(test_config(), products.clone(), users.clone());

        Self {
            router: routes::app(state),
            products,
            users,
        }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        send_to(self.router.clone(), request).await
    }

    /// Register a user and log in, returning the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let email = email.replace('@', "%40");
        let body = format!("name=Ana&email={email}&password={password}");
        let response = self.send(form_request("/register", &body, None)).await;
        assert_eq!(response.status(), 303);

        let body = format!("email={email}&password={password}");
        let response = self.send(form_request("/login", &body, None)).await;
        assert_eq!(response.status(), 303);

        session_cookie(&response).expect("login should set the session cookie")
    }
}

/// Send a request through an arbitrary router.
pub async fn send_to(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

/// Build a request with an optional session cookie.
pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a JSON request with an optional session cookie.
pub fn json_request(
    method: &str,
    uri: &str,
    body: &serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a urlencoded form POST with an optional session cookie.
pub fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Extract `name=value` of the session cookie from a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(vitrine_web::middleware::SESSION_COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
