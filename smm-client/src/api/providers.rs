use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{Provider, models_for};
use crate::request::RequestConfig;

impl SmmClient {
    /// Доступные AI-провайдеры.
    ///
    /// Сервер отдаёт либо массив, либо `{"providers": [...]}`.
    pub async fn providers(&self) -> ApiResult<Vec<Provider>> {
        self.fetch_listing("/api/ai_providers", "providers", RequestConfig::get())
            .await
    }

    /// Модели провайдера `name` по свежему списку провайдеров.
    ///
    /// Неизвестный провайдер даёт пустой список, а не ошибку.
    pub async fn provider_models(&self, name: &str) -> ApiResult<Vec<String>> {
        let providers = self.providers().await?;
        Ok(models_for(&providers, name))
    }

    /// Синоним [`test_ai_config`](Self::test_ai_config).
    pub async fn test_provider(&self, config_id: i64) -> ApiResult<Value> {
        self.test_ai_config(config_id).await
    }
}
