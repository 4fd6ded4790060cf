use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{ApiMessage, Favorite, FavoriteStatus, NewFavorite, UserId};
use crate::request::{QueryParams, RequestConfig};

impl SmmClient {
    /// Избранный контент, последние добавленные первыми.
    pub async fn favorites(&self, user_id: Option<UserId>) -> ApiResult<Vec<Favorite>> {
        let query = QueryParams::new().with_opt("user_id", user_id);
        self.fetch("/api/favorite_content", RequestConfig::get().query(query))
            .await
    }

    pub async fn add_favorite(&self, favorite: &NewFavorite) -> ApiResult<ApiMessage> {
        self.fetch("/api/favorite_content", RequestConfig::post().json(favorite)?)
            .await
    }

    pub async fn remove_favorite(&self, favorite_id: i64) -> ApiResult<()> {
        self.execute(
            &format!("/api/favorite_content/{favorite_id}"),
            RequestConfig::delete(),
        )
        .await
    }

    pub async fn is_favorite(&self, content_id: i64) -> ApiResult<FavoriteStatus> {
        let query = QueryParams::new().with("content_id", content_id);
        self.fetch("/api/favorite_content/check", RequestConfig::get().query(query))
            .await
    }
}
