use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Одна часть multipart-формы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPart {
    /// Текстовое поле.
    Text {
        /// Имя поля.
        name: String,
        /// Значение.
        value: String,
    },
    /// Файл.
    File {
        /// Имя поля.
        name: String,
        /// Имя файла, которое увидит сервер.
        file_name: String,
        /// MIME-тип, например `audio/wav`. Без него транспорт не выставляет тип.
        mime: Option<String>,
        /// Содержимое файла.
        bytes: Vec<u8>,
    },
}

/// Multipart-форма для загрузки файлов.
///
/// Хранится в виде, не зависящем от транспорта, чтобы тестовые транспорты могли
/// её проверять; `ReqwestTransport` переводит её в `reqwest::multipart::Form`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    parts: Vec<UploadPart>,
}

impl UploadForm {
    /// Пустая форма.
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет текстовое поле.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(UploadPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Добавляет файл.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(UploadPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.map(str::to_string),
            bytes,
        });
        self
    }

    /// Части формы в порядке добавления.
    pub fn parts(&self) -> &[UploadPart] {
        &self.parts
    }

    fn into_reqwest(self) -> ApiResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                UploadPart::Text { name, value } => form.text(name, value),
                UploadPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let mut file = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                    if let Some(mime) = mime {
                        file = file
                            .mime_str(&mime)
                            .map_err(|err| ApiError::InvalidRequest(format!("mime {mime}: {err}")))?;
                    }
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

/// Тело запроса.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// Без тела.
    #[default]
    Empty,
    /// JSON-документ.
    Json(serde_json::Value),
    /// Multipart-форма (загрузка файлов).
    Multipart(UploadForm),
}

impl RequestBody {
    /// `true` для multipart-формы.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Полностью подготовленный запрос, который транспорт отправляет как есть.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP-метод.
    pub method: Method,
    /// Абсолютный URL без query-строки.
    pub url: String,
    /// Пары query-параметров в порядке добавления.
    pub query: Vec<(String, String)>,
    /// Итоговые заголовки (умолчания уже слиты с заголовками вызывающего).
    pub headers: HeaderMap,
    /// Тело.
    pub body: RequestBody,
}

/// Сырой ответ транспорта.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP-код.
    pub status: u16,
    /// Значение заголовка `Content-Type`, если он есть.
    pub content_type: Option<String>,
    /// Тело ответа.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// JSON-ответ с заданным статусом.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    /// `true` для кодов 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true`, если сервер объявил тело как JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }
}

/// Транспорт: выполняет ровно один HTTP-обмен.
///
/// Нормализацию ответа, логирование, сроки и отмену выполняет `SmmClient`;
/// транспорт сообщает только о сетевых сбоях (`ApiError::Transport`).
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Отправляет запрос и возвращает ответ с любым статусом.
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

#[derive(Debug, Clone)]
/// HTTP-транспорт на `reqwest` с хранилищем cookie.
///
/// Сессионная cookie, выставленная сервером (например, после входа),
/// автоматически отправляется со всеми последующими запросами.
pub struct ReqwestTransport {
    client: Client,
    cookies: Arc<Jar>,
}

impl ReqwestTransport {
    /// Создаёт транспорт с пустым хранилищем cookie.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_cookie_jar(config, Arc::new(Jar::default()))
    }

    /// Создаёт транспорт поверх существующего хранилища cookie.
    pub fn with_cookie_jar(config: &ClientConfig, cookies: Arc<Jar>) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(ApiError::from_reqwest)?;

        Ok(Self { client, cookies })
    }

    /// Хранилище cookie транспорта.
    pub fn cookie_jar(&self) -> Arc<Jar> {
        Arc::clone(&self.cookies)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let ApiRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder.send().await.map_err(ApiError::from_reqwest)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(ApiError::from_reqwest)?;

        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_detection_ignores_case_and_charset() {
        let response = RawResponse {
            status: 200,
            content_type: Some("Application/JSON; charset=utf-8".to_string()),
            body: b"{}".to_vec(),
        };
        assert!(response.is_json());
        assert!(response.is_success());
    }

    #[test]
    fn missing_content_type_is_not_json() {
        let response = RawResponse {
            status: 204,
            ..RawResponse::default()
        };
        assert!(!response.is_json());
    }

    #[test]
    fn upload_form_keeps_part_order() {
        let form = UploadForm::new()
            .text("language", "en")
            .file("file", "clip.wav", Some("audio/wav"), vec![1, 2, 3]);

        assert_eq!(form.parts().len(), 2);
        assert!(matches!(&form.parts()[0], UploadPart::Text { name, .. } if name == "language"));
        assert!(matches!(&form.parts()[1], UploadPart::File { file_name, .. } if file_name == "clip.wav"));
    }

    #[test]
    fn invalid_mime_is_rejected_before_sending() {
        let form = UploadForm::new().file("file", "x.bin", Some("not a mime"), vec![]);
        let err = form.into_reqwest().expect_err("bad mime must fail");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
