use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{AnalyzeVideoRequest, TrendingVideosRequest, UserId, VideoAnalysis};
use crate::request::{QueryParams, RequestConfig};

impl SmmClient {
    /// Ставит ролик на анализ. Ответ сервера возвращается как есть.
    pub async fn analyze_video(&self, request: &AnalyzeVideoRequest) -> ApiResult<Value> {
        self.fetch("/api/analyze_video", RequestConfig::post().json(request)?)
            .await
    }

    /// Анализ ролика, привязанного к посту `post_id`.
    pub async fn video_analysis(&self, post_id: i64) -> ApiResult<VideoAnalysis> {
        self.fetch(&format!("/api/analyze_video/{post_id}"), RequestConfig::get())
            .await
    }

    pub async fn video_analyses(&self, user_id: UserId) -> ApiResult<Vec<VideoAnalysis>> {
        let query = QueryParams::new().with("user_id", user_id);
        self.fetch("/api/video_analyses", RequestConfig::get().query(query))
            .await
    }

    /// Пакетный анализ трендовых роликов.
    pub async fn analyze_trending_videos(&self, request: &TrendingVideosRequest) -> ApiResult<Value> {
        self.fetch("/api/analyze_trending", RequestConfig::post().json(request)?)
            .await
    }
}
