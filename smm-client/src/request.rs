use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::{ApiError, ApiResult};
use crate::transport::{RequestBody, UploadForm};

/// Токен отмены вызова.
///
/// Клоны разделяют одно состояние: `cancel()` на любом клоне завершает все
/// вызовы, которые ждут этот токен, ошибкой `ApiError::Cancelled`.
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Новый неотменённый токен.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
        }
    }

    /// Отменяет все вызовы, связанные с токеном.
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// `true`, если токен уже отменён.
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Завершается, когда токен отменён.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // Отправитель живёт в `self`, поэтому ошибка закрытого канала невозможна.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Набор query-параметров; порядок сохраняется, повторы ключей допустимы.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Пустой набор.
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет пару `key=value`.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Добавляет пару, только если значение задано.
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// `true`, если параметров нет.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Пары в порядке добавления.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.to_string()))
                .collect(),
        )
    }
}

/// Параметры одного вызова диспетчера.
///
/// Всё, что не задано явно, берётся по умолчанию: метод `GET`, без тела,
/// без дополнительных заголовков, срок и отмена берутся из настроек клиента.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub(crate) method: Method,
    pub(crate) body: RequestBody,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: QueryParams,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancel: Option<CancelToken>,
}

impl RequestConfig {
    /// `GET` без параметров.
    pub fn get() -> Self {
        Self::default()
    }

    /// `POST` без тела.
    pub fn post() -> Self {
        Self::default().method(Method::POST)
    }

    /// `PUT` без тела.
    pub fn put() -> Self {
        Self::default().method(Method::PUT)
    }

    /// `DELETE` без тела.
    pub fn delete() -> Self {
        Self::default().method(Method::DELETE)
    }

    /// Задаёт HTTP-метод.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Сериализует `body` в JSON и делает его телом запроса.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::InvalidRequest(format!("failed to encode body: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Делает телом запроса multipart-форму.
    pub fn multipart(mut self, form: UploadForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Добавляет заголовок поверх заголовков по умолчанию.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Задаёт query-параметры.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Срок на этот вызов; перекрывает настройки клиента.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Токен отмены для этого вызова; перекрывает токен клиента.
    pub fn cancel_with(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_skip_missing_values() {
        let params = QueryParams::new()
            .with("platform", "twitter")
            .with_opt("category", None::<&str>)
            .with_opt("limit", Some(20));

        assert_eq!(
            params.pairs(),
            &[
                ("platform".to_string(), "twitter".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn query_params_collect_from_map() {
        let params: QueryParams = [("days", "7"), ("platform", "tiktok")].into_iter().collect();
        assert_eq!(params.pairs().len(), 2);
        assert!(!params.is_empty());
    }

    #[test]
    fn default_request_is_bodyless_get() {
        let config = RequestConfig::default();
        assert_eq!(config.method, Method::GET);
        assert_eq!(config.body, RequestBody::Empty);
        assert!(config.query.is_empty());
    }

    #[tokio::test]
    async fn cancel_wakes_waiters_on_every_clone() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        assert!(!token.is_cancelled());
        token.cancel();

        handle.await.expect("waiter task must finish");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_for_cancelled_token() {
        let token = CancelToken::new();
        token.cancel();
        token.cancelled().await;
    }
}
