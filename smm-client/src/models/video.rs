use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Тональность ролика.
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Результат анализа видео.
pub struct VideoAnalysis {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_description: Option<String>,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis_date: Option<NaiveDateTime>,
    /// Оценка вовлечённости, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_score: Option<f64>,
    /// Трендовые элементы в порядке значимости.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub trending_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Длительность вида `00:01:23`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос на анализ ролика по ссылке.
pub struct AnalyzeVideoRequest {
    pub user_id: UserId,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Запрос на пакетный анализ трендовых роликов.
pub struct TrendingVideosRequest {
    pub user_id: UserId,
    pub trending_items: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_from_detail_endpoint_decodes_without_optional_fields() {
        let analysis: VideoAnalysis = serde_json::from_value(json!({
            "id": 1,
            "post_id": 10,
            "video_url": "https://tiktok.com/@u/video/1",
            "transcription_text": "hello",
            "visual_description": "a cat",
            "analysis_date": "2024-08-23T10:30:00.000001",
            "provider_config_id": null
        }))
        .expect("analysis must decode");

        assert_eq!(analysis.post_id, Some(10));
        assert!(analysis.trending_elements.is_empty());
        assert!(analysis.sentiment.is_none());
    }

    #[test]
    fn analysis_with_dashboard_fields_decodes() {
        let analysis: VideoAnalysis = serde_json::from_value(json!({
            "id": 2,
            "video_url": "https://youtube.com/watch?v=x",
            "platform": "youtube",
            "analysis_date": "2024-08-23T09:15:00Z",
            "engagement_score": 92,
            "trending_elements": ["dance", "challenge"],
            "sentiment": "positive",
            "duration": "00:00:45"
        }))
        .expect("analysis must decode");

        assert_eq!(analysis.sentiment, Some(Sentiment::Positive));
        assert_eq!(analysis.trending_elements, vec!["dance", "challenge"]);
        assert_eq!(analysis.engagement_score, Some(92.0));
    }

    #[test]
    fn unknown_sentiment_is_rejected() {
        let result = serde_json::from_value::<VideoAnalysis>(json!({
            "id": 3,
            "video_url": "u",
            "sentiment": "ecstatic"
        }));
        assert!(result.is_err());
    }
}
