#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use smm_client::{ApiRequest, ApiResult, ClientConfig, RawResponse, SmmClient, Transport};

pub const BASE_URL: &str = "http://backend.test";

#[derive(Debug, Clone)]
struct Route {
    response: RawResponse,
    delay: Option<Duration>,
}

/// Транспорт-заглушка: отвечает заранее заданными ответами по пути запроса
/// и запоминает все полученные запросы.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, response: RawResponse) {
        self.route(path, response, None);
    }

    pub fn respond_json(&self, path: &str, status: u16, body: Value) {
        self.route(path, RawResponse::json(status, &body), None);
    }

    pub fn respond_after(&self, path: &str, delay: Duration, body: Value) {
        self.route(path, RawResponse::json(200, &body), Some(delay));
    }

    fn route(&self, path: &str, response: RawResponse, delay: Option<Duration>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Route { response, delay });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("transport must have received a request")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        self.requests.lock().unwrap().push(request);

        let route = self.routes.lock().unwrap().get(&path).cloned();
        match route {
            Some(route) => {
                if let Some(delay) = route.delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(route.response)
            }
            None => Ok(RawResponse::json(404, &json!({ "error": "Not found" }))),
        }
    }
}

pub fn client_with(transport: &Arc<FakeTransport>) -> SmmClient {
    let shared: Arc<dyn Transport> = transport.clone();
    SmmClient::with_transport(ClientConfig::new(BASE_URL), shared)
}

pub fn content_type(request: &ApiRequest) -> Option<String> {
    request
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub fn trend_json(id: i64, keyword: &str, platform: &str) -> Value {
    json!({
        "id": id,
        "keyword": keyword,
        "platform": platform,
        "category": "technology",
        "engagement_score": 9.8,
        "volume": 45000,
        "growth_rate": 15.2,
        "sentiment": "positive"
    })
}
