use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{ApiMessage, EngagementAnalytics, NewUserMetric, PostingTimeRequest, UserMetric};
use crate::request::{QueryParams, RequestConfig};

impl SmmClient {
    /// Сводная аналитика; фильтры передаются в query как есть.
    pub async fn analytics_summary(&self, filters: QueryParams) -> ApiResult<Value> {
        self.fetch("/api/analytics/summary", RequestConfig::get().query(filters))
            .await
    }

    pub async fn optimal_posting_times(&self, filters: QueryParams) -> ApiResult<Value> {
        self.fetch("/api/analytics/posting-times", RequestConfig::get().query(filters))
            .await
    }

    /// Метрики текущего пользователя (по сессии).
    pub async fn user_analytics(&self) -> ApiResult<Vec<UserMetric>> {
        self.fetch("/api/user_analytics", RequestConfig::get()).await
    }

    pub async fn user_analytics_summary(&self) -> ApiResult<Value> {
        self.fetch("/api/user_analytics/summary", RequestConfig::get())
            .await
    }

    pub async fn platform_distribution(&self, filters: QueryParams) -> ApiResult<Value> {
        self.visualization("platform-distribution", filters).await
    }

    pub async fn category_distribution(&self, filters: QueryParams) -> ApiResult<Value> {
        self.visualization("category-distribution", filters).await
    }

    pub async fn sentiment_distribution(&self, filters: QueryParams) -> ApiResult<Value> {
        self.visualization("sentiment-distribution", filters).await
    }

    /// Ряд вовлечённости по дням.
    pub async fn engagement_over_time(&self, filters: QueryParams) -> ApiResult<Value> {
        self.visualization("engagement-over-time", filters).await
    }

    /// Вовлечённость по трендам за `days` дней (по умолчанию сервер берёт 7).
    pub async fn engagement_analytics(&self, filters: QueryParams) -> ApiResult<EngagementAnalytics> {
        self.fetch("/api/analytics/engagement", RequestConfig::get().query(filters))
            .await
    }

    pub async fn record_user_metric(&self, metric: &NewUserMetric) -> ApiResult<ApiMessage> {
        self.fetch("/api/user_analytics", RequestConfig::post().json(metric)?)
            .await
    }

    /// Рекомендация времени публикации для платформы.
    pub async fn suggest_posting_time(&self, request: &PostingTimeRequest) -> ApiResult<Value> {
        self.fetch("/api/optimal_posting_time", RequestConfig::post().json(request)?)
            .await
    }

    async fn visualization(&self, series: &str, filters: QueryParams) -> ApiResult<Value> {
        self.fetch(
            &format!("/api/trends/visualization/{series}"),
            RequestConfig::get().query(filters),
        )
        .await
    }
}
