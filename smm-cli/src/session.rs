//! Сохранение cookie-сессии между запусками CLI.
//!
//! После `auth login`/`auth register` cookie, выставленные сервером для
//! базового URL, записываются в `.smm_session` по одной на строку. При старте
//! они возвращаются в хранилище транспорта.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

pub const SESSION_FILE: &str = ".smm_session";

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    url: Url,
    jar: Arc<Jar>,
}

impl Session {
    pub fn load(base_url: &str) -> Result<Self> {
        Self::load_from(SESSION_FILE, base_url)
    }

    pub fn load_from(path: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        let path = path.into();
        let url: Url = base_url
            .parse()
            .with_context(|| format!("некорректный адрес сервера: {base_url}"))?;
        let jar = Arc::new(Jar::default());

        if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("не удалось прочитать {}", path.display()))?;
            for cookie in parse_session_content(&raw) {
                jar.add_cookie_str(&cookie, &url);
            }
        }

        Ok(Self { path, url, jar })
    }

    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Записывает текущие cookie. `false`, если сохранять нечего.
    pub fn persist(&self) -> io::Result<bool> {
        let Some(header) = self.jar.cookies(&self.url) else {
            return Ok(false);
        };
        let Ok(header) = header.to_str() else {
            return Ok(false);
        };

        let cookies = split_cookie_header(header);
        if cookies.is_empty() {
            return Ok(false);
        }
        fs::write(&self.path, cookies.join("\n"))?;
        Ok(true)
    }

    pub fn clear(&self) -> io::Result<()> {
        remove_if_exists(&self.path)
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn parse_session_content(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_cookie_header(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("smm-cli-{name}-{}", std::process::id()))
    }

    #[test]
    fn parse_session_content_skips_blank_lines() {
        let cookies = parse_session_content("  session=abc  \n\n theme=dark\n");
        assert_eq!(cookies, vec!["session=abc", "theme=dark"]);
    }

    #[test]
    fn split_cookie_header_keeps_pairs() {
        let cookies = split_cookie_header("session=abc; theme=dark");
        assert_eq!(cookies, vec!["session=abc", "theme=dark"]);
    }

    #[test]
    fn cookies_survive_persist_and_reload() {
        let path = temp_session_path("roundtrip");
        let session = Session::load_from(&path, "http://localhost:5000").unwrap();
        let url: Url = "http://localhost:5000".parse().unwrap();
        session.jar().add_cookie_str("session=abc123; Path=/", &url);

        assert!(session.persist().unwrap());

        let reloaded = Session::load_from(&path, "http://localhost:5000").unwrap();
        let header = reloaded.jar().cookies(&url).expect("cookie must be restored");
        assert_eq!(header.to_str().unwrap(), "session=abc123");

        reloaded.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn persist_without_cookies_writes_nothing() {
        let path = temp_session_path("empty");
        let session = Session::load_from(&path, "http://localhost:5000").unwrap();

        assert!(!session.persist().unwrap());
        assert!(!path.exists());
        session.clear().unwrap();
    }

    #[test]
    fn invalid_server_is_rejected() {
        let err = Session::load_from(temp_session_path("bad"), "not a url").unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }
}
