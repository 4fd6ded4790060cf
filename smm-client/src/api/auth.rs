use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{
    ApiKey, ApiKeyUpdate, ApiMessage, Credentials, DefaultProvider, NewApiKey, PasswordChange,
    Registration,
};
use crate::request::RequestConfig;

impl SmmClient {
    /// Регистрирует пользователя. Сессионную cookie сохраняет транспорт.
    pub async fn register(&self, registration: &Registration) -> ApiResult<Value> {
        self.fetch("/api/auth/register", RequestConfig::post().json(registration)?)
            .await
    }

    /// Выполняет вход. Сессионную cookie сохраняет транспорт.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Value> {
        self.fetch("/api/auth/login", RequestConfig::post().json(credentials)?)
            .await
    }

    /// Завершает сессию на сервере.
    pub async fn logout(&self) -> ApiResult<()> {
        self.execute("/api/auth/logout", RequestConfig::post()).await
    }

    /// Состояние текущей сессии.
    pub async fn auth_status(&self) -> ApiResult<Value> {
        self.fetch("/api/auth/status", RequestConfig::get()).await
    }

    /// Профиль текущего пользователя.
    pub async fn profile(&self) -> ApiResult<Value> {
        self.fetch("/api/auth/profile", RequestConfig::get()).await
    }

    /// Обновляет профиль; `profile` уходит на сервер без изменений.
    pub async fn update_profile(&self, profile: &Value) -> ApiResult<Value> {
        self.fetch("/api/auth/profile", RequestConfig::put().json(profile)?)
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> ApiResult<()> {
        self.execute("/api/auth/change-password", RequestConfig::post().json(change)?)
            .await
    }

    /// Ключи внешних сервисов пользователя (замаскированные).
    pub async fn api_keys(&self) -> ApiResult<Vec<ApiKey>> {
        self.fetch("/api/auth/api-keys", RequestConfig::get()).await
    }

    pub async fn add_api_key(&self, key: &NewApiKey) -> ApiResult<ApiKey> {
        self.fetch("/api/auth/api-keys", RequestConfig::post().json(key)?)
            .await
    }

    pub async fn api_key(&self, key_id: i64) -> ApiResult<ApiKey> {
        self.fetch(&format!("/api/auth/api-keys/{key_id}"), RequestConfig::get())
            .await
    }

    pub async fn update_api_key(&self, key_id: i64, update: &ApiKeyUpdate) -> ApiResult<ApiKey> {
        self.fetch(
            &format!("/api/auth/api-keys/{key_id}"),
            RequestConfig::put().json(update)?,
        )
        .await
    }

    pub async fn remove_api_key(&self, key_id: i64) -> ApiResult<()> {
        self.execute(&format!("/api/auth/api-keys/{key_id}"), RequestConfig::delete())
            .await
    }

    /// Выбирает провайдера по умолчанию для текущего пользователя.
    pub async fn set_default_provider(&self, provider: &DefaultProvider) -> ApiResult<Option<ApiMessage>> {
        self.fetch_optional("/api/auth/default-provider", RequestConfig::post().json(provider)?)
            .await
    }
}
