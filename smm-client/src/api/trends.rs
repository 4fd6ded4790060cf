use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{ContentRecommendation, Trend, TrendQuery, UserId};
use crate::request::{QueryParams, RequestConfig};

#[derive(Serialize)]
struct UserScopedDto {
    user_id: UserId,
}

impl SmmClient {
    /// Тренды с фильтрами по платформе, категории и лимиту.
    pub async fn trends(&self, query: &TrendQuery) -> ApiResult<Vec<Trend>> {
        self.fetch("/api/trends", RequestConfig::get().query(query.to_params()))
            .await
    }

    /// Лучшие тренды за последние сутки.
    pub async fn top_trends(&self, limit: u32) -> ApiResult<Vec<Trend>> {
        let query = QueryParams::new().with("limit", limit);
        self.fetch("/api/trends/top", RequestConfig::get().query(query))
            .await
    }

    /// Запускает обновление трендов на сервере и возвращает свежие записи.
    ///
    /// Принимает и `{"trends": [...]}`, и голый массив.
    pub async fn refresh_trends(&self) -> ApiResult<Vec<Trend>> {
        self.fetch_listing("/api/trends/refresh", "trends", RequestConfig::post())
            .await
    }

    /// Трендовые хэштеги; формат ответа определяет сервер.
    pub async fn trending_hashtags(&self, filters: QueryParams) -> ApiResult<Value> {
        self.fetch("/api/trends/hashtags", RequestConfig::get().query(filters))
            .await
    }

    /// Топ-5 трендов по каждой платформе.
    pub async fn trends_by_platform(&self) -> ApiResult<BTreeMap<String, Vec<Trend>>> {
        self.fetch("/api/trends/platforms", RequestConfig::get()).await
    }

    /// Поиск трендов по подстроке ключевой фразы.
    pub async fn search_trends(&self, keyword: &str) -> ApiResult<Vec<Trend>> {
        let query = QueryParams::new().with("q", keyword);
        self.fetch("/api/search", RequestConfig::get().query(query))
            .await
    }

    pub async fn recommendations(&self, user_id: UserId) -> ApiResult<Vec<ContentRecommendation>> {
        let query = QueryParams::new().with("user_id", user_id);
        self.fetch("/api/recommendations", RequestConfig::get().query(query))
            .await
    }

    /// Просит сервер построить новые рекомендации для пользователя.
    pub async fn generate_recommendations(
        &self,
        user_id: UserId,
    ) -> ApiResult<Vec<ContentRecommendation>> {
        self.fetch_listing(
            "/api/recommendations/generate",
            "recommendations",
            RequestConfig::post().json(&UserScopedDto { user_id })?,
        )
        .await
    }
}
