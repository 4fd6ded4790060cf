use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{AiConfig, AiConfigUpdate, ApiMessage, NewAiConfig, UserId};
use crate::request::{QueryParams, RequestConfig};

impl SmmClient {
    /// Конфигурации AI-провайдеров.
    ///
    /// Без `user_id` сервер выбирает пользователя по сессии.
    pub async fn ai_configs(&self, user_id: Option<UserId>) -> ApiResult<Vec<AiConfig>> {
        let query = QueryParams::new().with_opt("user_id", user_id);
        self.fetch("/api/ai_configs", RequestConfig::get().query(query))
            .await
    }

    pub async fn create_ai_config(&self, config: &NewAiConfig) -> ApiResult<ApiMessage> {
        self.fetch("/api/ai_configs", RequestConfig::post().json(config)?)
            .await
    }

    pub async fn update_ai_config(&self, config_id: i64, update: &AiConfigUpdate) -> ApiResult<ApiMessage> {
        self.fetch(
            &format!("/api/ai_configs/{config_id}"),
            RequestConfig::put().json(update)?,
        )
        .await
    }

    pub async fn delete_ai_config(&self, config_id: i64) -> ApiResult<()> {
        self.execute(&format!("/api/ai_configs/{config_id}"), RequestConfig::delete())
            .await
    }

    /// Проверка подключения к провайдеру. Ответ сервера возвращается как есть.
    pub async fn test_ai_config(&self, config_id: i64) -> ApiResult<Value> {
        self.fetch(&format!("/api/ai_configs/{config_id}/test"), RequestConfig::post())
            .await
    }

    /// Делает конфигурацию конфигурацией по умолчанию.
    ///
    /// Локальный список можно обновить заранее через
    /// [`apply_default`](crate::models::apply_default).
    pub async fn set_default_ai_config(&self, config_id: i64) -> ApiResult<Option<ApiMessage>> {
        self.fetch_optional(
            &format!("/api/ai_configs/set_default/{config_id}"),
            RequestConfig::post(),
        )
        .await
    }
}
