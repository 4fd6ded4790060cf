use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{
    ContentRequest, GeneratedContent, HashtagRequest, InsightsRequest, OptimizeRequest,
    VariationsRequest,
};
use crate::request::RequestConfig;

impl SmmClient {
    /// Генерирует пост под тренд от имени персонажа.
    pub async fn generate_content(&self, request: &ContentRequest) -> ApiResult<GeneratedContent> {
        self.fetch("/api/content/generate", RequestConfig::post().json(request)?)
            .await
    }

    /// Вариации существующего текста.
    pub async fn generate_variations(&self, request: &VariationsRequest) -> ApiResult<Value> {
        self.fetch("/api/content_variations", RequestConfig::post().json(request)?)
            .await
    }

    pub async fn generate_hashtags(&self, request: &HashtagRequest) -> ApiResult<Value> {
        self.fetch("/api/content/hashtags", RequestConfig::post().json(request)?)
            .await
    }

    pub async fn optimize_content(&self, request: &OptimizeRequest) -> ApiResult<Value> {
        self.fetch("/api/content/optimize", RequestConfig::post().json(request)?)
            .await
    }

    /// Инсайты по тексту: тональность, темы, рекомендации.
    pub async fn analyze_content(&self, request: &InsightsRequest) -> ApiResult<Value> {
        self.fetch("/api/content_insights", RequestConfig::post().json(request)?)
            .await
    }

    pub async fn content_templates(&self) -> ApiResult<Vec<Value>> {
        self.fetch("/api/content/templates", RequestConfig::get()).await
    }
}
