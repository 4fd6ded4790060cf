use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос на генерацию поста под тренд от имени персонажа.
pub struct ContentRequest {
    pub trend_id: i64,
    pub character_id: i64,
    /// `post`, `story`, `reel`, `thread`, ...
    pub content_type: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Сгенерированный контент.
pub struct GeneratedContent {
    pub content: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Запрос вариаций существующего текста.
pub struct VariationsRequest {
    pub user_id: UserId,
    pub original_content: String,
    /// Профиль персонажа в свободной форме.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_profile: Option<serde_json::Value>,
    /// Сколько вариаций нужно (сервер по умолчанию делает 3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос хэштегов к тексту.
pub struct HashtagRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос оптимизации текста под платформу.
pub struct OptimizeRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Запрос анализа текста (инсайты).
pub struct InsightsRequest {
    pub user_id: UserId,
    pub content_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_request_omits_missing_context() {
        let body = serde_json::to_value(ContentRequest {
            trend_id: 1,
            character_id: 2,
            content_type: "post".to_string(),
            platform: "twitter".to_string(),
            additional_context: None,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"trend_id": 1, "character_id": 2, "content_type": "post", "platform": "twitter"})
        );
    }

    #[test]
    fn generated_content_survives_decode_and_encode() {
        let wire = json!({"content": "Big news", "hashtags": ["#a", "#b"], "call_to_action": "Share it"});
        let decoded: GeneratedContent = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(serde_json::to_value(&decoded).unwrap(), wire);
    }
}
