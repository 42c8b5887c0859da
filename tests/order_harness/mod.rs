//! Shared test harness: a mock order endpoint served by axum on an ephemeral port.

#![allow(dead_code)]

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use pizza_order::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<Value>>>,
}

/// A running mock of `POST /api/order`
pub struct MockOrderEndpoint {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockOrderEndpoint {
    /// Serve `body` verbatim with `status` for every order
    pub async fn start_raw(status: StatusCode, body: impl Into<String>) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            received: Arc::clone(&received),
        };

        let app = Router::new()
            .route("/api/order", post(handle_order))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock endpoint");
        let addr = listener.local_addr().expect("mock endpoint address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock endpoint");
        });

        Self {
            url: format!("http://{}/api/order", addr),
            received,
        }
    }

    /// Answer every order with `{"message": message}`
    pub async fn start(status: StatusCode, message: &str) -> Self {
        Self::start_raw(status, serde_json::json!({ "message": message }).to_string()).await
    }

    /// Request bodies received so far
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().expect("received lock").clone()
    }
}

async fn handle_order(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().expect("received lock").push(body);
    (state.status, state.body.clone())
}

/// An endpoint URL nothing is listening on
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}/api/order", addr)
}

/// Controller posting to `url` with the stock topping catalog
pub fn http_form(url: &str) -> OrderFormController<HttpOrderSubmitter> {
    OrderFormController::new(
        HttpOrderSubmitter::new(url),
        ToppingCatalog::new(&FormConfig::default_config().toppings),
    )
}

/// Controller backed by an in-memory submitter with the stock topping catalog
pub fn memory_form(
    submitter: &InMemoryOrderSubmitter,
) -> OrderFormController<InMemoryOrderSubmitter> {
    OrderFormController::new(
        submitter.clone(),
        ToppingCatalog::new(&FormConfig::default_config().toppings),
    )
}

/// Set a field and wait until its validation has landed
pub async fn set_and_settle<S, V>(form: &OrderFormController<S, V>, field: Field, raw: &str)
where
    S: OrderSubmitter + 'static,
    V: FieldValidator + 'static,
{
    form.set_field(field, raw)
        .expect("set field")
        .settled()
        .await
        .expect("validation settled");
}
