// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read once from the environment at startup and shared
//! read-only for the lifetime of the process.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `HTTP_PORT` | Server bind port | `80` |
//! | `DEVELOPMENT` | Skip identity validation, permissive CORS | `false` |
//! | `IDENTITY_SERVICE` | Identity backend address | `id-checker.todo-list:3000` |
//! | `TODO_SERVICE` | List backend address | `todo-service.todo-list:3000` |
//! | `ACCOUNT_SERVICE` | Account backend address | `account-service.todo-list:3000` |
//! | `BACKEND_TIMEOUT_SECS` | Timeout for a single backend call | `5` |
//! | `REQUEST_TIMEOUT_SECS` | Timeout for a whole inbound request | `15` |
//! | `DATA_DIR` | Root directory of the document store | `/data` |
//! | `VAPID_EMAIL` | Subscriber identity for push messages | empty |
//! | `VAPID_PRIVATE` | VAPID private key (base64url, raw scalar) | empty |
//! | `VAPID_PUBLIC` | VAPID public key (base64url, uncompressed point) | empty |
//! | `ALLOWED_ORIGINS` | Comma separated CORS origins | todo-list.app origins |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::notifications::VapidKeyPair;

/// Environment variable name for the document store directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_IDENTITY_SERVICE: &str = "id-checker.todo-list:3000";
const DEFAULT_TODO_SERVICE: &str = "todo-service.todo-list:3000";
const DEFAULT_ACCOUNT_SERVICE: &str = "account-service.todo-list:3000";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DATA_DIR: &str = "/data";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://todo-list.app",
    "https://beta.todo-list.app",
];

/// Errors raised while building the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid {expected}: {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{name} is not a valid service address: {reason}")]
    InvalidAddress { name: &'static str, reason: String },

    #[error("invalid VAPID configuration: {0}")]
    InvalidVapid(String),
}

/// Address and call timeout of one backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Base URL every RPC path is appended to.
    pub base_url: Url,
    /// Deadline for a single call, connection included.
    pub timeout: Duration,
}

impl ServiceEndpoint {
    /// Parse a service address, accepting bare `host:port` values.
    pub fn parse(
        name: &'static str,
        raw: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("http://{raw}")
        };

        let base_url = Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidAddress {
            name,
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidAddress {
                name,
                reason: format!("unsupported scheme {}", base_url.scheme()),
            });
        }

        Ok(Self { base_url, timeout })
    }

    /// Full URL for an RPC path such as `/v1/check`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Process-local settings.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub host: String,
    pub http_port: u16,
    /// Bypasses identity validation. Never enable in production.
    pub development: bool,
}

/// Addresses of the delegated backends.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub identity: ServiceEndpoint,
    pub list: ServiceEndpoint,
    pub account: ServiceEndpoint,
}

/// Web-push credentials.
#[derive(Debug, Clone, Default)]
pub struct NotificationsConfig {
    /// Subscriber identity sent in the VAPID `sub` claim.
    pub vapid_email: String,
    /// `None` when push delivery is not configured.
    pub vapid_keys: Option<VapidKeyPair>,
}

/// Immutable gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub local: LocalConfig,
    pub services: ServicesConfig,
    pub notifications: NotificationsConfig,
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let development = match get("DEVELOPMENT") {
            Some(raw) => parse_bool("DEVELOPMENT", &raw)?,
            None => false,
        };

        let http_port = match get("HTTP_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "HTTP_PORT",
                expected: "port number",
                value: raw,
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        let backend_timeout = parse_secs(
            "BACKEND_TIMEOUT_SECS",
            get("BACKEND_TIMEOUT_SECS"),
            DEFAULT_BACKEND_TIMEOUT_SECS,
        )?;
        let request_timeout = parse_secs(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let services = ServicesConfig {
            identity: ServiceEndpoint::parse(
                "IDENTITY_SERVICE",
                &get("IDENTITY_SERVICE").unwrap_or_else(|| DEFAULT_IDENTITY_SERVICE.into()),
                backend_timeout,
            )?,
            list: ServiceEndpoint::parse(
                "TODO_SERVICE",
                &get("TODO_SERVICE").unwrap_or_else(|| DEFAULT_TODO_SERVICE.into()),
                backend_timeout,
            )?,
            account: ServiceEndpoint::parse(
                "ACCOUNT_SERVICE",
                &get("ACCOUNT_SERVICE").unwrap_or_else(|| DEFAULT_ACCOUNT_SERVICE.into()),
                backend_timeout,
            )?,
        };

        let vapid_keys = match (get("VAPID_PUBLIC"), get("VAPID_PRIVATE")) {
            (Some(public), Some(private)) => Some(
                VapidKeyPair::from_base64url(&public, &private)
                    .map_err(|e| ConfigError::InvalidVapid(e.to_string()))?,
            ),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidVapid(
                    "VAPID_PUBLIC and VAPID_PRIVATE must be set together".to_string(),
                ))
            }
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            local: LocalConfig {
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                http_port,
                development,
            },
            services,
            notifications: NotificationsConfig {
                vapid_email: get("VAPID_EMAIL").unwrap_or_default(),
                vapid_keys,
            },
            data_dir: PathBuf::from(get(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.into())),
            request_timeout,
            allowed_origins,
        })
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.local.host, self.local.http_port)
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            expected: "boolean",
            value: raw.to_string(),
        }),
    }
}

fn parse_secs(
    name: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            name,
            expected: "positive number of seconds",
            value: raw,
        }),
    }
}
