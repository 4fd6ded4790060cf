use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::models::{Character, CharacterTemplate, CharacterUpdate, NewCharacter, UserId};
use crate::request::{QueryParams, RequestConfig};

impl SmmClient {
    /// Персонажи пользователя, новые первыми.
    pub async fn characters(&self, user_id: UserId) -> ApiResult<Vec<Character>> {
        let query = QueryParams::new().with("user_id", user_id);
        self.fetch("/api/characters", RequestConfig::get().query(query))
            .await
    }

    pub async fn character(&self, character_id: i64) -> ApiResult<Character> {
        self.fetch(&format!("/api/characters/{character_id}"), RequestConfig::get())
            .await
    }

    pub async fn create_character(&self, character: &NewCharacter) -> ApiResult<Character> {
        self.fetch("/api/characters", RequestConfig::post().json(character)?)
            .await
    }

    /// Обновляет только поля, заданные в `update`.
    pub async fn update_character(
        &self,
        character_id: i64,
        update: &CharacterUpdate,
    ) -> ApiResult<Character> {
        self.fetch(
            &format!("/api/characters/{character_id}"),
            RequestConfig::put().json(update)?,
        )
        .await
    }

    pub async fn delete_character(&self, character_id: i64) -> ApiResult<()> {
        self.execute(&format!("/api/characters/{character_id}"), RequestConfig::delete())
            .await
    }

    pub async fn character_templates(&self) -> ApiResult<Vec<CharacterTemplate>> {
        self.fetch("/api/characters/templates", RequestConfig::get())
            .await
    }
}
