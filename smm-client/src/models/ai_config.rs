use serde::{Deserialize, Serialize};

use super::{Secret, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Состояние конфигурации AI-провайдера.
pub enum ConfigStatus {
    /// Проверена и используется.
    Active,
    /// Последняя проверка завершилась ошибкой.
    Error,
    /// Проверка выполняется.
    Testing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Конфигурация AI-провайдера пользователя.
///
/// `api_key` приходит от сервера замаскированным (`***abcd`).
pub struct AiConfig {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub provider_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model_speech_to_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model_vision_to_text: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConfigStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Новая конфигурация AI-провайдера.
pub struct NewAiConfig {
    pub user_id: UserId,
    pub provider_name: String,
    pub api_key: Secret,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_speech_to_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_vision_to_text: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Частичное обновление конфигурации.
pub struct AiConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_speech_to_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_vision_to_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Оптимистично отражает смену конфигурации по умолчанию в локальном списке.
///
/// Если `id` есть в списке, только он остаётся `is_default`, остальные
/// сбрасываются, и возвращается `true`. Иначе список не меняется.
pub fn apply_default(configs: &mut [AiConfig], id: i64) -> bool {
    if !configs.iter().any(|config| config.id == id) {
        return false;
    }
    for config in configs.iter_mut() {
        config.is_default = config.id == id;
    }
    true
}
