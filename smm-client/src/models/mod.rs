//! Публичные модели данных, которыми клиент обменивается с backend.
//!
//! Неизвестные поля ответов игнорируются, необязательные поля при отсутствии
//! становятся `None`/пустыми списками.

mod ai_config;
mod analytics;
mod auth;
mod character;
mod content;
mod favorite;
mod provider;
mod trend;
mod video;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use ai_config::{AiConfig, AiConfigUpdate, ConfigStatus, NewAiConfig, apply_default};
pub use analytics::{EngagementAnalytics, NewUserMetric, PlatformStats, PostingTimeRequest, UserMetric};
pub use auth::{ApiKey, ApiKeyUpdate, Credentials, DefaultProvider, NewApiKey, PasswordChange, Registration};
pub use character::{Character, CharacterTemplate, CharacterUpdate, NewCharacter};
pub use content::{
    ContentRequest, GeneratedContent, HashtagRequest, InsightsRequest, OptimizeRequest,
    VariationsRequest,
};
pub use favorite::{Favorite, FavoriteStatus, NewFavorite};
pub use provider::{Provider, models_for};
pub use trend::{ContentRecommendation, Trend, TrendQuery};
pub use video::{AnalyzeVideoRequest, Sentiment, TrendingVideosRequest, VideoAnalysis};

/// Идентификатор пользователя backend.
pub type UserId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Типовой ответ изменяющих операций: `{"message": "...", "id": 1}`.
pub struct ApiMessage {
    /// Сообщение сервера.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Идентификатор созданной записи, если сервер его вернул.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Секрет (пароль, API-ключ), который уходит на сервер, но не печатается.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Оборачивает значение.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Исходное значение.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Nullable-колонки backend приходят как `null`; читаем их как значение по умолчанию.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Метки времени backend: ISO-8601 без зоны (`2024-08-23T10:30:00.123456`)
/// или RFC 3339 (`2024-08-23T10:30:00Z`). Всё приводится к UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub(crate) fn parse(raw: &str) -> Option<NaiveDateTime> {
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Some(value.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT).ok()
    }

    pub(crate) fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.format(NAIVE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}"))),
            None => Ok(None),
        }
    }
}
