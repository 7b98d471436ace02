//! Server configuration
//!
//! Read from the process environment (after `.env` is loaded). Every
//! setting has a development default except the JWT secrets in release
//! builds.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use auth::config::{AuthConfig, DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL};
use profile::S3Config;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Shortest accepted token lifetime
pub const MIN_TOKEN_TTL: Duration = Duration::from_secs(1);

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub auth: AuthConfig,
    pub storage: S3Config,
    /// Allowed CORS origins; `*` allows any
    pub frontend_origins: Vec<String>,
}

#[derive(Clone)]
pub struct DatabaseSettings {
    /// Takes precedence over the individual fields when set
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
}

#[derive(Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = parse_var(&get, "SERVER_PORT", 8080)?;

        let database = DatabaseSettings {
            url: get("DATABASE_URL"),
            host: get_or("POSTGRES_HOST", "localhost"),
            port: parse_var(&get, "POSTGRES_PORT", 5432)?,
            user: get_or("POSTGRES_USER", "postgres"),
            password: get_or("POSTGRES_PASSWORD", "password"),
            dbname: get_or("POSTGRES_DBNAME", "user_service"),
            sslmode: get_or("POSTGRES_SSLMODE", "disable"),
        };

        let (redis_host, redis_port) = split_host_port(&get_or("REDIS_ADDR", "localhost:6379"))
            .context("invalid REDIS_ADDR")?;
        let redis = RedisSettings {
            host: redis_host,
            port: redis_port,
            password: get("REDIS_PASSWORD"),
            db: parse_var(&get, "REDIS_DB", 0)?,
        };

        let auth = auth_config(&get)?;

        let defaults = S3Config::default();
        let storage = S3Config {
            endpoint: get_or("MINIO_ENDPOINT", &defaults.endpoint),
            access_key: get_or("MINIO_ACCESS_KEY", &defaults.access_key),
            secret_key: get_or("MINIO_SECRET_KEY", &defaults.secret_key),
            bucket: get_or("MINIO_BUCKET", &defaults.bucket),
            use_ssl: parse_bool(&get, "MINIO_USE_SSL")?,
            public_domain: get_or("MINIO_DOMAIN", &defaults.public_domain),
            region: get_or("MINIO_REGION", &defaults.region),
        };

        let frontend_origins = get_or("FRONTEND_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            database,
            redis,
            auth,
            storage,
            frontend_origins,
        })
    }
}

fn auth_config(get: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AuthConfig> {
    let access_ttl = match get("JWT_ACCESS_TTL") {
        Some(v) => parse_duration(&v).context("invalid JWT_ACCESS_TTL")?,
        None => DEFAULT_ACCESS_TTL,
    };
    let refresh_ttl = match get("JWT_REFRESH_TTL") {
        Some(v) => parse_duration(&v).context("invalid JWT_REFRESH_TTL")?,
        None => DEFAULT_REFRESH_TTL,
    };
    // Claims carry whole seconds; anything shorter is expired on issue.
    if access_ttl < MIN_TOKEN_TTL || refresh_ttl < MIN_TOKEN_TTL {
        bail!("token lifetimes must be at least one second");
    }

    let mut config = match (get("JWT_ACCESS_SECRET"), get("JWT_REFRESH_SECRET")) {
        (Some(access), Some(refresh)) => {
            if access == refresh {
                tracing::warn!("JWT_ACCESS_SECRET equals JWT_REFRESH_SECRET; token kinds are not separated");
            }
            AuthConfig {
                access_secret: access.into_bytes(),
                refresh_secret: refresh.into_bytes(),
                ..AuthConfig::default()
            }
        }
        (None, None) if cfg!(debug_assertions) => {
            tracing::warn!("JWT secrets not set, using random per-process secrets");
            AuthConfig::development()
        }
        _ => bail!("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must both be set"),
    };

    config.access_ttl = access_ttl;
    config.refresh_ttl = refresh_ttl;
    config.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);
    Ok(config)
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).context("invalid DATABASE_URL");
        }

        let ssl_mode = PgSslMode::from_str(&self.sslmode)
            .with_context(|| format!("invalid POSTGRES_SSLMODE: {}", self.sslmode))?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(ssl_mode))
    }
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

impl RedisSettings {
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..RedisConnectionInfo::default()
            },
        }
    }
}

impl std::fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("db", &self.db)
            .finish()
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {v}")),
        None => Ok(default),
    }
}

fn parse_bool(get: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<bool> {
    match get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "t" | "true" | "yes" => Ok(true),
            "0" | "f" | "false" | "no" => Ok(false),
            _ => bail!("invalid {key}: {v}"),
        },
    }
}

fn split_host_port(addr: &str) -> anyhow::Result<(String, u16)> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("expected host:port, got {addr}"))?;
    if host.is_empty() {
        bail!("expected host:port, got {addr}");
    }
    Ok((host.to_string(), port.parse()?))
}

/// Parse a duration such as `15m`, `720h`, `1h30m` or `250ms`
fn parse_duration(input: &str) -> anyhow::Result<Duration> {
    Ok(humantime::parse_duration(input.trim())?)
}
