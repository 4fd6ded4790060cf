use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `smm-client`.
///
/// Любая неудача вызова сводится к одному из вариантов; текст ошибки
/// (`Display`) пригоден для показа пользователю как есть.
pub enum ApiError {
    /// Транспорт не смог выполнить запрос (сеть, DNS, TLS, разрыв соединения).
    #[error("{0}")]
    Transport(String),

    /// Сервер ответил статусом вне диапазона 2xx.
    ///
    /// `message` берётся из поля `error` тела ответа, иначе содержит код статуса.
    #[error("{message}")]
    Status {
        /// HTTP-код ответа.
        status: u16,
        /// Сообщение для пользователя.
        message: String,
    },

    /// Успешный ответ не удалось разобрать в ожидаемую структуру.
    #[error("decode error: {0}")]
    Decode(String),

    /// Вызов не уложился в отведённый срок.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Вызов отменён через `CancelToken`.
    #[error("request cancelled")]
    Cancelled,

    /// Запрос некорректен ещё до отправки (заголовки, mime-тип файла).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `smm-client`.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Вид ошибки без деталей, для ветвления на стороне вызывающего кода.
pub enum ApiErrorKind {
    /// См. [`ApiError::Transport`].
    Transport,
    /// См. [`ApiError::Status`].
    Status,
    /// См. [`ApiError::Decode`].
    Decode,
    /// См. [`ApiError::Timeout`].
    Timeout,
    /// См. [`ApiError::Cancelled`].
    Cancelled,
    /// См. [`ApiError::InvalidRequest`].
    InvalidRequest,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::InvalidRequest => "invalid_request",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

impl ApiError {
    /// Вид ошибки.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Transport(_) => ApiErrorKind::Transport,
            Self::Status { .. } => ApiErrorKind::Status,
            Self::Decode(_) => ApiErrorKind::Decode,
            Self::Timeout(_) => ApiErrorKind::Timeout,
            Self::Cancelled => ApiErrorKind::Cancelled,
            Self::InvalidRequest(_) => ApiErrorKind::InvalidRequest,
        }
    }

    /// HTTP-код, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Человекочитаемое сообщение.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Собирает ошибку из неуспешного ответа: поле `error` тела, если оно есть,
    /// иначе общее сообщение с кодом статуса.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorResponseDto>(body)
            .ok()
            .and_then(|dto| dto.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("API request failed with status: {status}"));
        Self::Status { status, message }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Transport(format!("transport timeout: {err}"));
        }
        Self::Transport(err.to_string())
    }
}
