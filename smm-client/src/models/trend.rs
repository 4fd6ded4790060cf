use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::request::QueryParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Тренд на одной платформе.
pub struct Trend {
    /// Идентификатор тренда.
    pub id: i64,
    /// Ключевая фраза.
    pub keyword: String,
    /// Платформа (`twitter`, `instagram`, `tiktok`, ...).
    pub platform: String,
    /// Категория.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Оценка вовлечённости.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub engagement_score: f64,
    /// Объём упоминаний.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
    /// Темп роста, %.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,
    /// Тональность (`positive`, `negative`, `neutral`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    /// Связанные хэштеги в том виде, в каком их хранит backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<serde_json::Value>,
    /// Время создания записи (UTC).
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    /// Время последнего обновления (UTC).
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Фильтры списка трендов.
pub struct TrendQuery {
    /// Только эта платформа.
    pub platform: Option<String>,
    /// Только эта категория.
    pub category: Option<String>,
    /// Максимум записей (сервер по умолчанию отдаёт 20).
    pub limit: Option<u32>,
    /// Прочие фильтры (`content_type`, `hours_back`, ...), уходят после основных.
    pub extra: QueryParams,
}

impl TrendQuery {
    pub(crate) fn to_params(&self) -> QueryParams {
        let base = QueryParams::new()
            .with_opt("platform", self.platform.as_deref())
            .with_opt("category", self.category.as_deref())
            .with_opt("limit", self.limit);
        base.into_pairs()
            .into_iter()
            .chain(self.extra.pairs().iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Рекомендация контента под тренд для пользователя.
pub struct ContentRecommendation {
    pub id: i64,
    pub user_id: i64,
    pub trend_id: i64,
    /// `post`, `story`, `reel`, `video`.
    pub content_type: String,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub confidence_score: f64,
    /// JSON-строка с хэштегами.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtag_suggestions: Option<String>,
    /// JSON-строка с идеями контента.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_suggestions: Option<String>,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Box<Trend>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_decodes_backend_record() {
        let raw = r##"{
            "id": 7,
            "keyword": "AI Revolution",
            "platform": "twitter",
            "engagement_score": 9.8,
            "volume": 45000,
            "growth_rate": 15.2,
            "sentiment": "positive",
            "category": "technology",
            "hashtags": "[\"#ai\"]",
            "created_at": "2024-08-23T10:30:00.511000",
            "updated_at": null
        }"##;

        let trend: Trend = serde_json::from_str(raw).expect("trend must decode");
        assert_eq!(trend.id, 7);
        assert_eq!(trend.volume, Some(45000));
        assert!(trend.created_at.is_some());
        assert!(trend.updated_at.is_none());
    }

    #[test]
    fn trend_query_serializes_only_present_filters() {
        let query = TrendQuery {
            platform: Some("tiktok".to_string()),
            category: None,
            limit: Some(5),
            extra: QueryParams::new(),
        };
        let pairs = query.to_params();
        assert_eq!(
            pairs.pairs(),
            &[
                ("platform".to_string(), "tiktok".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn trend_query_appends_extra_filters() {
        let query = TrendQuery {
            category: Some("technology".to_string()),
            extra: QueryParams::new().with("content_type", "video").with("hours_back", 48),
            ..TrendQuery::default()
        };
        assert_eq!(
            query.to_params().pairs(),
            &[
                ("category".to_string(), "technology".to_string()),
                ("content_type".to_string(), "video".to_string()),
                ("hours_back".to_string(), "48".to_string()),
            ]
        );
    }

    #[test]
    fn null_engagement_score_reads_as_zero() {
        let trend: Trend = serde_json::from_str(
            r#"{"id": 1, "keyword": "x", "platform": "tiktok", "engagement_score": null}"#,
        )
        .expect("null score must decode");
        assert_eq!(trend.engagement_score, 0.0);
    }
}
