use std::time::Duration;

use thiserror::Error;

/// Базовый URL backend по умолчанию (локальный dev-сервер).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
/// Ошибка чтения конфигурации из окружения.
pub enum ConfigError {
    /// Переменная задана, но не является положительным целым числом.
    #[error("failed to parse {key}, expecting positive integer, got {value:?}")]
    InvalidNumber {
        /// Имя переменной окружения.
        key: &'static str,
        /// Исходное значение.
        value: String,
    },
    /// Переменная задана пустой строкой.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone)]
/// Параметры клиента, неизменяемые после его создания.
pub struct ClientConfig {
    /// Базовый URL сервера без суффикса `/api`, например `http://localhost:5000`.
    pub base_url: String,
    /// Срок на один вызов по умолчанию. `None`: без ограничения.
    pub request_timeout: Option<Duration>,
    /// Таймаут установки TCP-соединения.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Конфигурация с заданным базовым URL и значениями по умолчанию.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Задаёт срок на один вызов по умолчанию.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Задаёт таймаут установки соединения.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Читает конфигурацию из переменных окружения:
    /// `SMM_API_BASE_URL`, `SMM_API_TIMEOUT_SECS`, `SMM_API_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("SMM_API_BASE_URL") {
            Some(raw) => {
                let value = raw.trim().to_string();
                if value.is_empty() {
                    return Err(ConfigError::Empty("SMM_API_BASE_URL"));
                }
                value
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout = parse_secs(&lookup, "SMM_API_TIMEOUT_SECS")?;
        let connect_timeout = parse_secs(&lookup, "SMM_API_CONNECT_TIMEOUT_SECS")?
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        Ok(Self {
            base_url,
            request_timeout,
            connect_timeout,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).expect("defaults must load");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SMM_API_BASE_URL", " https://smm.example.com "),
            ("SMM_API_TIMEOUT_SECS", "30"),
            ("SMM_API_CONNECT_TIMEOUT_SECS", "2"),
        ]))
        .expect("config must load");

        assert_eq!(config.base_url, "https://smm.example.com");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[("SMM_API_TIMEOUT_SECS", "0")]))
            .expect_err("zero must be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: "SMM_API_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn rejects_blank_base_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[("SMM_API_BASE_URL", "   ")]))
            .expect_err("blank url must be rejected");
        assert!(matches!(err, ConfigError::Empty("SMM_API_BASE_URL")));
    }
}
