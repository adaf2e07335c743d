use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "zh-CN";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3146";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            other => Err(anyhow!("Unknown MCP_TRANSPORT '{}' (expected stdio or http)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Checked lazily: only tool calls need it.
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub language: String,
    pub log_level: String,
    pub transport: Transport,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let transport = match non_empty("MCP_TRANSPORT") {
            Some(v) => v.parse()?,
            None => Transport::Stdio,
        };
        let bind_raw = non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR '{}'", bind_raw))?;

        Ok(Self {
            tmdb_api_key: non_empty("TMDB_API_KEY"),
            tmdb_base_url: non_empty("TMDB_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language: non_empty("TMDB_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            transport,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tmdb_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.bind_addr, "127.0.0.1:3146".parse().unwrap());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).unwrap();
        assert!(config.tmdb_api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "secret"),
            ("TMDB_LANGUAGE", "en-US"),
            ("TMDB_BASE_URL", "http://127.0.0.1:9000/3/"),
            ("LOG_LEVEL", "debug"),
            ("MCP_TRANSPORT", "HTTP"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.tmdb_api_key.as_deref(), Some("secret"));
        assert_eq!(config.language, "en-US");
        assert_eq!(config.tmdb_base_url, "http://127.0.0.1:9000/3");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.transport, Transport::Http);
    }

    #[test]
    fn rejects_unknown_transport() {
        assert!(Config::from_lookup(lookup(&[("MCP_TRANSPORT", "carrier-pigeon")])).is_err());
    }
}
