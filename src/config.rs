// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read once at startup into an immutable [`Config`] and
//! handed to every component at construction time. Nothing reads the process
//! environment after [`Config::from_env`] returns.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DB_URL` | Firebase Realtime Database base URL | Required |
//! | `JWT_SECRET` | HS256 secret for session tokens | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `EMAIL_SERVICE_ID` | EmailJS service identifier | Required |
//! | `EMAIL_TEMPLATE_ID` | EmailJS template identifier | Required |
//! | `EMAIL_PUBLIC_KEY` | EmailJS public key | Required |
//! | `EMAIL_PRIVATE_KEY` | EmailJS private key | Required |
//! | `FIREBASE_SERVICE_ACCOUNT` | Inline service-account JSON | Optional |
//! | `FIREBASE_SERVICE_ACCOUNT_PATH` | Service-account JSON file | `service-account.json` |
//! | `FIREBASE_ACCESS_TOKEN` | Static bearer token (emulators) | Optional |
//! | `FIREBASE_PROJECT_ID` | Overrides the service-account project | Optional |
//! | `FCM_BASE_URL` | Firebase Cloud Messaging API base | `https://fcm.googleapis.com` |
//! | `EMAILJS_BASE_URL` | EmailJS API base | `https://api.emailjs.com` |
//! | `PROVIDER_TIMEOUT_SECS` | Outbound request timeout | `15` |
//! | `TOKEN_TTL_SECS` | Session token lifetime, at most ten years | Unset (no expiry) |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | Serve HTTPS when both are set | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use url::Url;

use crate::providers::google::{GoogleCredentials, ServiceAccountKey};

pub const DB_URL_ENV: &str = "DB_URL";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const EMAIL_SERVICE_ID_ENV: &str = "EMAIL_SERVICE_ID";
pub const EMAIL_TEMPLATE_ID_ENV: &str = "EMAIL_TEMPLATE_ID";
pub const EMAIL_PUBLIC_KEY_ENV: &str = "EMAIL_PUBLIC_KEY";
pub const EMAIL_PRIVATE_KEY_ENV: &str = "EMAIL_PRIVATE_KEY";
pub const SERVICE_ACCOUNT_ENV: &str = "FIREBASE_SERVICE_ACCOUNT";
pub const SERVICE_ACCOUNT_PATH_ENV: &str = "FIREBASE_SERVICE_ACCOUNT_PATH";
pub const ACCESS_TOKEN_ENV: &str = "FIREBASE_ACCESS_TOKEN";
pub const PROJECT_ID_ENV: &str = "FIREBASE_PROJECT_ID";
pub const FCM_BASE_URL_ENV: &str = "FCM_BASE_URL";
pub const EMAILJS_BASE_URL_ENV: &str = "EMAILJS_BASE_URL";
pub const PROVIDER_TIMEOUT_ENV: &str = "PROVIDER_TIMEOUT_SECS";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SERVICE_ACCOUNT_PATH: &str = "service-account.json";
const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";
const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 15;
/// Longest accepted session token lifetime (ten years).
const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("service account credentials unusable: {0}")]
    ServiceAccount(String),
}

/// EmailJS account settings used by the contact relay.
#[derive(Clone)]
pub struct EmailConfig {
    pub base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: String,
}

/// Firebase project settings shared by the credential store and push relay.
#[derive(Clone)]
pub struct FirebaseConfig {
    pub database_url: Url,
    pub project_id: String,
    pub fcm_base_url: String,
    pub credentials: GoogleCredentials,
}

#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// `None` keeps session tokens valid indefinitely.
    pub token_ttl: Option<Duration>,
    pub provider_timeout: Duration,
    pub firebase: FirebaseConfig,
    pub email: EmailConfig,
    pub tls: Option<TlsConfig>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let host = env.or_default(HOST_ENV, DEFAULT_HOST);
        let host: IpAddr = host.parse().map_err(|e| ConfigError::Invalid {
            name: HOST_ENV,
            reason: format!("{host:?} is not an IP address: {e}"),
        })?;
        let port = env.parsed(PORT_ENV)?.unwrap_or(DEFAULT_PORT);

        let jwt_secret = env.required(JWT_SECRET_ENV)?;
        let token_ttl = match env.parsed::<u64>(TOKEN_TTL_ENV)? {
            Some(secs @ 1..=MAX_TOKEN_TTL_SECS) => Some(Duration::from_secs(secs)),
            Some(secs) => {
                return Err(ConfigError::Invalid {
                    name: TOKEN_TTL_ENV,
                    reason: format!("{secs} is outside 1..={MAX_TOKEN_TTL_SECS} seconds"),
                })
            }
            None => None,
        };
        let provider_timeout = Duration::from_secs(
            env.parsed(PROVIDER_TIMEOUT_ENV)?
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
        );

        let database_url = parse_base_url(DB_URL_ENV, &env.required(DB_URL_ENV)?)?;
        let (credentials, account_project) = load_google_credentials(&env)?;
        let project_id = env
            .optional(PROJECT_ID_ENV)
            .or(account_project)
            .ok_or(ConfigError::Missing(PROJECT_ID_ENV))?;
        let fcm_base_url = env.or_default(FCM_BASE_URL_ENV, DEFAULT_FCM_BASE_URL);
        parse_base_url(FCM_BASE_URL_ENV, &fcm_base_url)?;

        let email_base_url = env.or_default(EMAILJS_BASE_URL_ENV, DEFAULT_EMAILJS_BASE_URL);
        parse_base_url(EMAILJS_BASE_URL_ENV, &email_base_url)?;
        let email = EmailConfig {
            base_url: email_base_url,
            service_id: env.required(EMAIL_SERVICE_ID_ENV)?,
            template_id: env.required(EMAIL_TEMPLATE_ID_ENV)?,
            public_key: env.required(EMAIL_PUBLIC_KEY_ENV)?,
            private_key: env.required(EMAIL_PRIVATE_KEY_ENV)?,
        };

        let tls = match (env.optional(TLS_CERT_PATH_ENV), env.optional(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: cert.into(),
                key_path: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            jwt_secret,
            token_ttl,
            provider_timeout,
            firebase: FirebaseConfig {
                database_url,
                project_id,
                fcm_base_url,
                credentials,
            },
            email,
            tls,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("provider_timeout", &self.provider_timeout)
            .field("database_url", &self.firebase.database_url.as_str())
            .field("project_id", &self.firebase.project_id)
            .field("fcm_base_url", &self.firebase.fcm_base_url)
            .field("credentials", &self.firebase.credentials)
            .field("email_base_url", &self.email.base_url)
            .field("email_service_id", &self.email.service_id)
            .field("email_template_id", &self.email.template_id)
            .field("tls", &self.tls)
            .finish()
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        self.optional(name)
            .map(|raw| {
                raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                    name,
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("{raw:?} is not an http(s) base URL"),
        });
    }

    Ok(url)
}

/// Resolve how the service authenticates to Google APIs.
///
/// A static access token wins over service-account credentials; an inline
/// service-account document wins over the file path.
fn load_google_credentials<F>(
    env: &Lookup<F>,
) -> Result<(GoogleCredentials, Option<String>), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = env.optional(ACCESS_TOKEN_ENV) {
        return Ok((GoogleCredentials::Static(token), None));
    }

    let raw = match env.optional(SERVICE_ACCOUNT_ENV) {
        Some(inline) => inline,
        None => {
            let path = env.or_default(SERVICE_ACCOUNT_PATH_ENV, DEFAULT_SERVICE_ACCOUNT_PATH);
            std::fs::read_to_string(&path).map_err(|e| {
                ConfigError::ServiceAccount(format!("failed to read {path}: {e}"))
            })?
        }
    };

    let key = ServiceAccountKey::from_json(&raw)
        .map_err(|e| ConfigError::ServiceAccount(format!("invalid JSON: {e}")))?;
    let project_id = key.project_id.clone();

    Ok((GoogleCredentials::ServiceAccount(key), project_id))
}
