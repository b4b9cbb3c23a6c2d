use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;
use warehouse_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    services::AppServices,
    AppState,
};

/// Helper harness for spinning up an application state backed by a
/// throwaway SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir for test database");
        let db_path = db_dir.path().join("warehouse_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone());

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .route("/status", get(warehouse_api::api_status))
            .route("/health", get(warehouse_api::health_check))
            .nest("/api", warehouse_api::api_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
            _event_task: event_task,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Seed a supplier and return its id.
    #[allow(dead_code)]
    pub async fn seed_supplier(&self, name: &str) -> i32 {
        self.state
            .services
            .suppliers
            .create(name.to_string())
            .await
            .expect("seed supplier for tests")
    }

    /// Seed a SKU and return its id.
    #[allow(dead_code)]
    pub async fn seed_sku(&self, weight: i32, volume: i32, quantity: i32) -> i32 {
        self.state
            .services
            .skus
            .create(
                format!("Test SKU {}x{}", weight, volume),
                weight,
                volume,
                Some("seeded for integration tests".to_string()),
                Decimal::new(1099, 2),
                quantity,
            )
            .await
            .expect("seed SKU for tests")
    }

    /// Seed an empty position addressed by its 12-digit id.
    #[allow(dead_code)]
    pub async fn seed_position(&self, position_id: &str, max_weight: i32, max_volume: i32) {
        let aisle = position_id[0..4].to_string();
        let row = position_id[4..8].to_string();
        let col = position_id[8..12].to_string();
        self.state
            .services
            .positions
            .create(
                position_id.to_string(),
                aisle,
                row,
                col,
                max_weight,
                max_volume,
            )
            .await
            .expect("seed position for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
