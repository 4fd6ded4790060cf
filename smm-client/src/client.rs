use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{CancelToken, RequestConfig};
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
/// Клиент REST API social-media-manager.
///
/// Создаётся один раз и передаётся вызывающему коду по ссылке или клоном:
/// клоны разделяют транспорт (и, как следствие, сессионные cookie). Клиент
/// не держит изменяемого состояния, поэтому параллельные вызовы не блокируют
/// друг друга.
pub struct SmmClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl SmmClient {
    /// Создаёт клиент с HTTP-транспортом `reqwest`.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Создаёт клиент поверх произвольного транспорта.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url,
            transport,
            timeout: config.request_timeout,
            cancel: None,
        }
    }

    /// Клон клиента, у которого все вызовы ограничены сроком `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// Клон клиента, все вызовы которого отменяются через `token`.
    pub fn with_cancel(&self, token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Базовый URL сервера.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Диспетчер: выполняет один HTTP-обмен и нормализует результат.
    ///
    /// - 2xx с `Content-Type: application/json` и непустым телом (кроме 204):
    ///   разобранный документ;
    /// - 2xx без JSON, с пустым телом или 204: `None`;
    /// - иначе `ApiError::Status` с полем `error` тела или кодом статуса.
    ///
    /// Каждый вызов логируется до возврата результата или ошибки.
    pub async fn request(&self, endpoint: &str, config: RequestConfig) -> ApiResult<Option<Value>> {
        let method = config.method.clone();
        let url = self.endpoint(endpoint);
        let started = Instant::now();

        let result = self.dispatch(url.clone(), config).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok((status, _)) => debug!(%method, %url, status, elapsed_ms, "api request completed"),
            Err(err) => warn!(
                %method,
                %url,
                status = err.status(),
                kind = %err.kind(),
                elapsed_ms,
                "api request failed: {err}"
            ),
        }

        result.map(|(_, body)| body)
    }

    async fn dispatch(&self, url: String, config: RequestConfig) -> ApiResult<(u16, Option<Value>)> {
        let RequestConfig {
            method,
            body,
            headers,
            query,
            timeout,
            cancel,
        } = config;

        let headers = build_headers(&headers, body.is_multipart())?;
        let request = ApiRequest {
            method,
            url,
            query: query.into_pairs(),
            headers,
            body,
        };

        let timeout = timeout.or(self.timeout);
        let cancel = cancel.or_else(|| self.cancel.clone());
        let response = self.round_trip(request, timeout, cancel.as_ref()).await?;

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }

        let status = response.status;
        Ok((status, parse_success_body(response)?))
    }

    async fn round_trip(
        &self,
        request: ApiRequest,
        timeout: Option<Duration>,
        cancel: Option<&CancelToken>,
    ) -> ApiResult<RawResponse> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ApiError::Cancelled);
        }

        let send = self.transport.send(request);
        let bounded = async {
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, send).await {
                    Ok(result) => result,
                    Err(_) => Err(ApiError::Timeout(limit)),
                },
                None => send.await,
            }
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiError::Cancelled),
                result = bounded => result,
            },
            None => bounded.await,
        }
    }

    /// Вызов, тело ответа которого разбирается в `T`.
    ///
    /// Пустой или не-JSON ответ даёт `ApiError::Decode`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, config: RequestConfig) -> ApiResult<T> {
        let body = self
            .request(endpoint, config)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("expected a JSON body from {endpoint}")))?;
        decode(body)
    }

    /// Как [`fetch`](Self::fetch), но пустой ответ даёт `None`.
    pub async fn fetch_optional<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        config: RequestConfig,
    ) -> ApiResult<Option<T>> {
        self.request(endpoint, config).await?.map(decode).transpose()
    }

    /// Вызов, тело ответа которого не нужно.
    pub async fn execute(&self, endpoint: &str, config: RequestConfig) -> ApiResult<()> {
        self.request(endpoint, config).await.map(|_| ())
    }

    /// Вызов, возвращающий список либо голым массивом, либо объектом,
    /// в котором массив лежит под ключом `key`.
    pub(crate) async fn fetch_listing<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        key: &str,
        config: RequestConfig,
    ) -> ApiResult<Vec<T>> {
        match self.request(endpoint, config).await? {
            Some(body) => decode_listing(body, key),
            None => Ok(Vec::new()),
        }
    }
}

fn build_headers(extra: &[(String, String)], multipart: bool) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| ApiError::InvalidRequest(format!("header name {name:?}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| ApiError::InvalidRequest(format!("header {name}: {err}")))?;
        headers.insert(name, value);
    }

    // Boundary multipart-формы выставляет транспорт.
    if multipart {
        headers.remove(CONTENT_TYPE);
    }

    Ok(headers)
}

fn parse_success_body(response: RawResponse) -> ApiResult<Option<Value>> {
    if response.status == 204 || !response.is_json() || response.body.is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(&response.body)
        .map(Some)
        .map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) fn decode_listing<T: DeserializeOwned>(body: Value, key: &str) -> ApiResult<Vec<T>> {
    match body {
        Value::Array(_) => decode(body),
        Value::Object(mut object) => match object.remove(key) {
            Some(items) => decode(items),
            None => Err(ApiError::Decode(format!("missing field `{key}`"))),
        },
        other => Err(ApiError::Decode(format!(
            "expected an array or an object with `{key}`, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> SmmClient {
        SmmClient::new(ClientConfig::new(base_url)).expect("client must build")
    }

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("http://localhost:5000/");
        assert_eq!(client.endpoint("/api/trends"), "http://localhost:5000/api/trends");
        assert_eq!(client.endpoint("api/trends"), "http://localhost:5000/api/trends");
    }

    #[test]
    fn json_content_type_is_default() {
        let headers = build_headers(&[], false).expect("headers must build");
        assert_eq!(header(&headers, "content-type"), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn caller_headers_override_defaults() {
        let extra = vec![
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Request-Source".to_string(), "dashboard".to_string()),
        ];
        let headers = build_headers(&extra, false).expect("headers must build");
        assert_eq!(header(&headers, "content-type"), Some("text/plain"));
        assert_eq!(header(&headers, "x-request-source"), Some("dashboard"));
    }

    #[test]
    fn multipart_drops_any_content_type() {
        let extra = vec![("content-type".to_string(), "application/json".to_string())];
        let headers = build_headers(&extra, true).expect("headers must build");
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let extra = vec![("bad header".to_string(), "x".to_string())];
        let err = build_headers(&extra, false).expect_err("space in name must fail");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn no_content_and_non_json_bodies_are_empty() {
        let no_content = RawResponse {
            status: 204,
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: Vec::new(),
        };
        assert!(parse_success_body(no_content).unwrap().is_none());

        let html = RawResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: b"<p>ok</p>".to_vec(),
        };
        assert!(parse_success_body(html).unwrap().is_none());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let response = RawResponse {
            status: 200,
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: b"{not json".to_vec(),
        };
        let err = parse_success_body(response).expect_err("must fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn listing_accepts_bare_and_wrapped_arrays() {
        let bare: Vec<i64> = decode_listing(json!([1, 2]), "items").unwrap();
        let wrapped: Vec<i64> = decode_listing(json!({"message": "ok", "items": [3]}), "items").unwrap();
        assert_eq!(bare, vec![1, 2]);
        assert_eq!(wrapped, vec![3]);
    }

    #[test]
    fn listing_without_key_is_a_decode_error() {
        let err = decode_listing::<i64>(json!({"message": "ok"}), "items").expect_err("must fail");
        assert_eq!(err.message(), "decode error: missing field `items`");
    }
}
