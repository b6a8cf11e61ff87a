use axum_extra::extract::cookie::Key;
use figment::{Figment, providers::Env};
use serde::Deserialize;
use sha2::{Digest, Sha512};
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
};
use url::Url;

/// Default upstream endpoint; overridable for self-hosted gateways and tests.
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

/// Process configuration, read once at startup from `SNAPFORGE_`-prefixed
/// environment variables (after `dotenvy` has loaded `.env`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: SocketAddr,
    pub loglevel: String,
    pub gemini_api_key: String,
    pub gemini_api_url: Url,
    pub upstream_timeout_secs: u64,
    pub cookie_secret: String,
    /// Prebuilt SPA bundle directory; `index.html` inside it is the entry file.
    pub static_dir: PathBuf,
    /// Optional JSON file of `{"username": "password"}` entries, merged over
    /// `users` at startup.
    pub users_path: Option<PathBuf>,
    pub users: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8000)),
            loglevel: "info".to_string(),
            gemini_api_key: String::new(),
            gemini_api_url: Url::parse(DEFAULT_GEMINI_URL).expect("default Gemini URL is valid"),
            upstream_timeout_secs: 120,
            cookie_secret: String::new(),
            static_dir: PathBuf::from("dist"),
            users_path: None,
            users: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("SNAPFORGE_"))
            .extract()
    }

    /// Derive the private-cookie key from the configured secret.
    /// SHA-512 yields exactly the 64 bytes `Key::from` requires.
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.cookie_secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_key_is_deterministic_per_secret() {
        let mut a = Config::default();
        a.cookie_secret = "secret-one".to_string();
        let mut b = Config::default();
        b.cookie_secret = "secret-one".to_string();
        assert_eq!(a.cookie_key().master(), b.cookie_key().master());

        let mut c = Config::default();
        c.cookie_secret = "secret-two".to_string();
        assert_ne!(a.cookie_key().master(), c.cookie_key().master());
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.upstream_timeout_secs, 120);
        assert_eq!(cfg.static_dir, PathBuf::from("dist"));
        assert!(cfg.users.is_empty());
        assert!(cfg.gemini_api_url.as_str().contains("generateContent"));
    }
}
