#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;
use wit_config::AuthConfig;
use wit_core::Space;
use wit_interfaces::{DeploymentsService, Transaction, TransactionManager, UnavailableDeployments};
use wit_rest_api::{create_rest_app, AppConfig, AppContext, AppsContext, CacheControlPolicy, WorkItemTypesContext};
use wit_storage::{ensure_system_types, InMemoryDatabase};
use wit_web::JwtManager;

pub struct TestApp {
    pub router: Router,
    pub db: InMemoryDatabase,
    pub jwt: Arc<JwtManager>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn setup() -> TestApp {
    setup_with_deployments(Arc::new(UnavailableDeployments)).await
}

pub async fn setup_with_deployments(deployments: Arc<dyn DeploymentsService>) -> TestApp {
    let db = InMemoryDatabase::new();
    ensure_system_types(&db).await.unwrap();

    let jwt = Arc::new(JwtManager::new(AuthConfig {
        enabled: true,
        jwt_secret: "integration-test-secret-value".to_string(),
        issuer: None,
        audience: None,
    }));

    let context = AppContext {
        work_item_types: WorkItemTypesContext::new(
            Arc::new(db.clone()),
            CacheControlPolicy::new("max-age=60", "max-age=30"),
            "/api",
        ),
        apps: AppsContext::new(deployments),
    };

    let router = create_rest_app(context, jwt.clone(), AppConfig::default());
    TestApp { router, db, jwt }
}

impl TestApp {
    pub fn token(&self, user: Uuid) -> String {
        self.jwt.generate_token(user, chrono::Duration::hours(1)).unwrap()
    }

    /// Store a space owned by `owner` and return its id
    pub async fn create_space(&self, owner: Uuid) -> Uuid {
        let space = Space::new(Uuid::new_v4(), "demo", owner);
        let id = space.id;
        let tx = self.db.begin().await.unwrap();
        tx.application().spaces().create(space).await.unwrap();
        tx.commit().await.unwrap();
        id
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_as(&self, uri: &str, user: Uuid) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_as(&self, uri: &str, user: Option<Uuid>, body: &Value) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }
}

pub fn error_code(response: &TestResponse) -> &str {
    response.body["errors"][0]["code"].as_str().unwrap_or_default()
}
