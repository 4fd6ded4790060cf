//! Клиентская библиотека для работы с backend социального менеджера по HTTP.
//!
//! Весь обмен идёт через один диспетчер [`SmmClient::request`]:
//! - базовый URL, JSON по умолчанию и cookie-сессия;
//! - единая нормализация ошибок в [`ApiError`];
//! - таймаут и отмена на каждый вызов.
//!
//! Поверх диспетчера построены ресурсные операции (тренды, контент,
//! персонажи, анализ видео, аналитика, AI-конфигурации, провайдеры,
//! избранное). Клиент не хранит глобального состояния: его можно клонировать
//! и вызывать из нескольких задач одновременно.

mod api;
mod client;
mod config;
mod error;
pub mod models;
mod request;
mod transport;

pub use client::SmmClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use request::{CancelToken, QueryParams, RequestConfig};
pub use transport::{
    ApiRequest, RawResponse, RequestBody, ReqwestTransport, Transport, UploadForm, UploadPart,
};

/// HTTP-метод запроса.
pub use reqwest::Method;
