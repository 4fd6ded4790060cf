use serde_json::Value;

use crate::client::SmmClient;
use crate::error::ApiResult;
use crate::request::RequestConfig;
use crate::transport::UploadForm;

impl SmmClient {
    /// Отправляет аудио на распознавание речи.
    ///
    /// Форма уходит как `multipart/form-data`; JSON `Content-Type` не
    /// выставляется.
    pub async fn transcribe_audio(&self, form: UploadForm) -> ApiResult<Value> {
        self.fetch("/api/ai/transcribe", RequestConfig::post().multipart(form))
            .await
    }

    /// Отправляет изображение на описание моделью vision-to-text.
    pub async fn analyze_image(&self, form: UploadForm) -> ApiResult<Value> {
        self.fetch("/api/ai/analyze-image", RequestConfig::post().multipart(form))
            .await
    }
}
