use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::request::RequestConfig;

impl SmmClient {
    /// Проверка доступности backend.
    pub async fn health(&self) -> ApiResult<Value> {
        self.fetch("/api/health", RequestConfig::get()).await
    }
}
