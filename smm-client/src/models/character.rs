use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Профиль персонажа, от имени которого генерируется контент.
pub struct Character {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tone: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_wardrobe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_props: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_background: Option<String>,
    /// Платформы в порядке, заданном пользователем.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub preferred_platforms: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub keywords: Vec<String>,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Данные для создания персонажа. Обязательны `user_id`, `name`, `tone`.
pub struct NewCharacter {
    pub user_id: UserId,
    pub name: String,
    pub tone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialogue_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_wardrobe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_props: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_background: Option<String>,
    pub preferred_platforms: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Частичное обновление персонажа: отправляются только заданные поля.
pub struct CharacterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Готовый шаблон персонажа.
pub struct CharacterTemplate {
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    pub tone: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content_style: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub preferred_platforms: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub keywords: Vec<String>,
}

impl CharacterTemplate {
    /// Заготовка персонажа из шаблона для пользователя `user_id`.
    pub fn to_new_character(&self, user_id: UserId) -> NewCharacter {
        NewCharacter {
            user_id,
            name: self.name.clone(),
            tone: self.tone.clone(),
            description: Some(self.description.clone()),
            target_audience: Some(self.target_audience.clone()),
            content_style: Some(self.content_style.clone()),
            preferred_platforms: self.preferred_platforms.clone(),
            keywords: self.keywords.clone(),
            ..NewCharacter::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn character_keeps_wire_order_of_lists() {
        let character: Character = serde_json::from_value(json!({
            "id": 3,
            "user_id": 1,
            "name": "Tech Guru",
            "description": "",
            "tone": "informative",
            "target_audience": "developers",
            "content_style": "technical",
            "preferred_platforms": ["youtube", "twitter", "linkedin"],
            "keywords": ["rust", "ai"],
            "dialogue_style": null,
            "created_at": "2024-08-20T08:00:00"
        }))
        .expect("character must decode");

        assert_eq!(character.preferred_platforms, vec!["youtube", "twitter", "linkedin"]);
        assert!(character.dialogue_style.is_none());
    }

    #[test]
    fn nullable_columns_decode_as_empty() {
        let character: Character = serde_json::from_value(json!({
            "id": 1,
            "user_id": 1,
            "name": "Draft",
            "description": null,
            "tone": null,
            "target_audience": null,
            "content_style": null,
            "preferred_platforms": [],
            "keywords": null,
            "dialogue_style": null,
            "created_at": "2024-08-20T08:00:00",
            "updated_at": null
        }))
        .expect("nullable columns must not break decoding");

        assert_eq!(character.description, "");
        assert_eq!(character.tone, "");
        assert!(character.keywords.is_empty());
    }

    #[test]
    fn update_sends_only_present_fields() {
        let update = CharacterUpdate {
            tone: Some("casual".to_string()),
            keywords: Some(vec!["travel".to_string()]),
            ..CharacterUpdate::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({"tone": "casual", "keywords": ["travel"]}));
    }

    #[test]
    fn template_becomes_new_character_for_user() {
        let template = CharacterTemplate {
            name: "Lifestyle Influencer".to_string(),
            description: "Casual and relatable".to_string(),
            tone: "casual".to_string(),
            target_audience: "Young adults".to_string(),
            content_style: "Personal".to_string(),
            preferred_platforms: vec!["instagram".to_string(), "tiktok".to_string()],
            keywords: vec!["lifestyle".to_string()],
        };

        let draft = template.to_new_character(42);
        assert_eq!(draft.user_id, 42);
        assert_eq!(draft.tone, "casual");
        assert_eq!(draft.preferred_platforms.len(), 2);
        assert!(draft.dialogue_style.is_none());
    }
}
