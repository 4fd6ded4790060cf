use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Контент, добавленный пользователем в избранное.
pub struct Favorite {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub content_id: i64,
    #[serde(
        default,
        with = "crate::models::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Добавление в избранное.
pub struct NewFavorite {
    pub user_id: UserId,
    pub content_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Ответ проверки «уже в избранном?».
pub struct FavoriteStatus {
    #[serde(alias = "exists")]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_exists_alias() {
        let status: FavoriteStatus = serde_json::from_str(r#"{"exists": true, "favorite_id": 4}"#).unwrap();
        assert!(status.is_favorite);
        assert_eq!(status.favorite_id, Some(4));
    }

    #[test]
    fn favorite_decodes_saved_date() {
        let favorite: Favorite = serde_json::from_str(
            r#"{"id": 1, "user_id": 2, "content_id": 3, "saved_date": "2024-08-01T12:00:00"}"#,
        )
        .unwrap();
        assert!(favorite.saved_date.is_some());
    }
}
