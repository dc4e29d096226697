//! Shared helpers for API integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use linkstrat_ui::services::{GenerateError, TextGenerator};
use linkstrat_ui::AppState;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Generator that replays a fixed script of outcomes
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
        })
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        let next = self
            .script
            .lock()
            .await
            .pop_front()
            .expect("scripted generator exhausted");
        next.map_err(GenerateError::Network)
    }
}

/// Fresh state over an in-memory database
pub async fn test_state() -> AppState {
    let pool = linkstrat_common::db::init_memory_pool().await.unwrap();
    AppState::new(pool)
}

/// Fresh state with a scripted generator injected
pub async fn test_state_with_script(script: Vec<Result<&str, &str>>) -> AppState {
    test_state().await.with_generator(ScriptedGenerator::new(script))
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
