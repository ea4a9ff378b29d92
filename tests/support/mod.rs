//! Shared helpers for the HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use trailfit::adapters::broker::{ConsumerStats, InMemoryBroker};
use trailfit::adapters::http;
use trailfit::bootstrap::{Application, BrokerHandles};
use trailfit::config::AppConfig;

/// A single-process deployment on the in-memory broker.
pub struct TestApp {
    pub router: Router,
    pub app: Application,
    shutdown: watch::Sender<bool>,
    consumers: Vec<JoinHandle<ConsumerStats>>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Self {
        let broker = BrokerHandles::in_memory(Arc::new(InMemoryBroker::new()));
        let mut app = Application::build(&config, broker).unwrap();
        let (shutdown, rx) = watch::channel(false);
        let consumers = app.start_consumers(rx).await.unwrap();
        let router = http::router(app.state.clone(), Duration::from_secs(5));
        Self {
            router,
            app,
            shutdown,
            consumers,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, body).await
    }

    /// Polls `uri` until `done` holds, failing after two seconds.
    pub async fn eventually<F>(&self, uri: &str, done: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let (status, body) = self.get(uri).await;
            if status == StatusCode::OK && done(&body) {
                return body;
            }
            if tokio::time::Instant::now() >= deadline {
                panic!("condition on {} not met, last body: {}", uri, body);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Stops the consumers and returns their counters.
    pub async fn shutdown(self) -> Vec<ConsumerStats> {
        self.shutdown.send(true).unwrap();
        let mut stats = Vec::new();
        for handle in self.consumers {
            stats.push(handle.await.unwrap());
        }
        stats
    }
}

pub fn player_body(email: &str) -> Value {
    serde_json::json!({
        "user": {"name": "Ueli", "email": email, "dob": "1988-04-12"},
        "weight": 68.0,
        "height": 176.0,
        "zone_id": "7a6c5f0e-93a3-4d51-8c44-2d1f6e0b9a10",
        "hardcore_mode": true,
    })
}
