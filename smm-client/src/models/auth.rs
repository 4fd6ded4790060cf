use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Secret, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Учётные данные для входа.
pub struct Credentials {
    pub username: String,
    pub password: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Данные регистрации.
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Смена пароля.
pub struct PasswordChange {
    pub current_password: Secret,
    pub new_password: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Сохранённый ключ внешнего сервиса; `key` приходит замаскированным.
pub struct ApiKey {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub service: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub key: String,
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Новый ключ внешнего сервиса (`openai`, `twitter`, ...).
pub struct NewApiKey {
    pub service: String,
    pub key: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Замена значения ключа.
pub struct ApiKeyUpdate {
    pub key: Secret,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Выбор провайдера по умолчанию.
pub struct DefaultProvider {
    pub provider_name: String,
}
