use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Одна метрика пользователя.
pub struct UserMetric {
    pub id: i64,
    pub user_id: UserId,
    pub metric_name: String,
    pub value: serde_json::Value,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Запись новой метрики.
pub struct NewUserMetric {
    pub user_id: UserId,
    pub metric_name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос рекомендации по времени публикации.
pub struct PostingTimeRequest {
    pub user_id: UserId,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Сводка вовлечённости по трендам за период.
pub struct EngagementAnalytics {
    pub total_trends: u64,
    pub avg_engagement: f64,
    pub avg_volume: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub platform_stats: BTreeMap<String, PlatformStats>,
    pub period_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Статистика одной платформы внутри [`EngagementAnalytics`].
pub struct PlatformStats {
    pub count: u64,
    pub total_engagement: f64,
    pub total_volume: f64,
    pub avg_engagement: f64,
    pub avg_volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn engagement_analytics_decodes_platform_stats() {
        let analytics: EngagementAnalytics = serde_json::from_value(json!({
            "total_trends": 2,
            "avg_engagement": 8.5,
            "avg_volume": 1500,
            "platform_stats": {
                "twitter": {
                    "count": 2,
                    "total_engagement": 17,
                    "total_volume": 3000,
                    "avg_engagement": 8.5,
                    "avg_volume": 1500
                }
            },
            "period_days": 7
        }))
        .expect("analytics must decode");

        assert_eq!(analytics.platform_stats["twitter"].count, 2);
        assert_eq!(analytics.avg_volume, 1500.0);
    }

    #[test]
    fn empty_period_has_no_platforms() {
        let analytics: EngagementAnalytics = serde_json::from_value(json!({
            "total_trends": 0,
            "avg_engagement": 0,
            "avg_volume": 0,
            "platform_stats": {},
            "period_days": 30
        }))
        .unwrap();
        assert!(analytics.platform_stats.is_empty());
    }
}
