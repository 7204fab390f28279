//! Configuration layer: typed settings with layered precedence
//! (defaults → files → env → CLI).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{builder::BoolishValueParser, Parser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::content::cache::CachePolicy;
use crate::content::related::RelatedPolicy;
use crate::content::service::ContentSettings;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "folio";
const ENV_PREFIX: &str = "FOLIO";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: i64 = 3000;
const DEFAULT_CONTENT_DIR: &str = "content/blog";
const DEFAULT_WORDS_PER_MINUTE: i64 = 200;
const DEFAULT_RELATED_LIMIT: i64 = 3;
const DEFAULT_CACHE_TTL_SECS: i64 = 300;
const DEFAULT_PER_PAGE: i64 = 12;
const DEFAULT_MAX_PER_PAGE: i64 = 50;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the Folio server.
#[derive(Debug, Default, Parser)]
#[command(name = "folio", version, about = "Folio blog content API")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override the directory holding the markdown posts.
    #[arg(long = "content-dir", value_name = "PATH")]
    pub content_dir: Option<PathBuf>,

    /// Override the listener host.
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Override the listener port.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(long = "log-json", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub log_json: Option<bool>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    server: RawServer,
    content: RawContent,
    related: RawRelated,
    cache: RawCache,
    api: RawApi,
    log: RawLog,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    dir: PathBuf,
    words_per_minute: u32,
}

#[derive(Debug, Deserialize)]
struct RawRelated {
    limit: usize,
    policy: String,
}

#[derive(Debug, Deserialize)]
struct RawCache {
    policy: String,
    ttl_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    default_per_page: usize,
    max_per_page: usize,
    #[serde(default)]
    service_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLog {
    level: String,
    json: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub content_dir: PathBuf,
    pub content: ContentSettings,
    pub api: ApiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

/// Limits and credentials for the HTTP API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub default_per_page: usize,
    pub max_per_page: usize,
    /// Bearer token accepted by the cache invalidation endpoint. Invalidation
    /// is disabled when unset.
    pub service_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE as usize,
            max_per_page: DEFAULT_MAX_PER_PAGE as usize,
            service_token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

fn parse_cache_policy(policy: &str, ttl_secs: u64) -> Result<CachePolicy, LoadError> {
    match policy.trim().to_lowercase().as_str() {
        "always" | "none" => Ok(CachePolicy::Always),
        "manual" => Ok(CachePolicy::Manual),
        "ttl" if ttl_secs > 0 => Ok(CachePolicy::Ttl(Duration::from_secs(ttl_secs))),
        "ttl" => Err(LoadError::Invalid {
            key: "cache.ttl_secs",
            reason: "must be positive when cache.policy is ttl".to_string(),
        }),
        other => Err(LoadError::Invalid {
            key: "cache.policy",
            reason: format!("unknown policy '{}', expected always, ttl or manual", other),
        }),
    }
}

impl RawSettings {
    fn into_settings(self) -> Result<Settings, LoadError> {
        let host: IpAddr = self.server.host.parse().map_err(|e| LoadError::Invalid {
            key: "server.host",
            reason: format!("'{}': {}", self.server.host, e),
        })?;

        if self.content.words_per_minute == 0 {
            return Err(LoadError::Invalid {
                key: "content.words_per_minute",
                reason: "must be positive".to_string(),
            });
        }
        if self.api.max_per_page == 0 {
            return Err(LoadError::Invalid {
                key: "api.max_per_page",
                reason: "must be positive".to_string(),
            });
        }

        let related_policy: RelatedPolicy = self
            .related
            .policy
            .parse()
            .map_err(|reason| LoadError::Invalid {
                key: "related.policy",
                reason,
            })?;
        let cache_policy = parse_cache_policy(&self.cache.policy, self.cache.ttl_secs)?;

        Ok(Settings {
            server: ServerSettings {
                addr: SocketAddr::new(host, self.server.port),
            },
            content_dir: self.content.dir,
            content: ContentSettings {
                words_per_minute: self.content.words_per_minute,
                related_limit: self.related.limit,
                related_policy,
                cache_policy,
            },
            api: ApiSettings {
                default_per_page: self.api.default_per_page.clamp(1, self.api.max_per_page),
                max_per_page: self.api.max_per_page,
                service_token: self
                    .api
                    .service_token
                    .filter(|token| !token.trim().is_empty()),
            },
            log: LogSettings {
                level: self.log.level,
                json: self.log.json,
            },
        })
    }
}

/// Build the layered configuration and apply CLI overrides.
///
/// Environment variables use the `FOLIO__` prefix and `__` as the nesting
/// separator, e.g. `FOLIO__CACHE__POLICY=ttl`.
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", DEFAULT_PORT)?
        .set_default("content.dir", DEFAULT_CONTENT_DIR)?
        .set_default("content.words_per_minute", DEFAULT_WORDS_PER_MINUTE)?
        .set_default("related.limit", DEFAULT_RELATED_LIMIT)?
        .set_default("related.policy", RelatedPolicy::Fill.to_string())?
        .set_default("cache.policy", "always")?
        .set_default("cache.ttl_secs", DEFAULT_CACHE_TTL_SECS)?
        .set_default("api.default_per_page", DEFAULT_PER_PAGE)?
        .set_default("api.max_per_page", DEFAULT_MAX_PER_PAGE)?
        .set_default("log.level", DEFAULT_LOG_LEVEL)?
        .set_default("log.json", false)?
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .set_override_option(
            "content.dir",
            cli.content_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
        )?
        .set_override_option("server.host", cli.host.clone())?
        .set_override_option("server.port", cli.port.map(i64::from))?
        .set_override_option("log.level", cli.log_level.clone())?
        .set_override_option("log.json", cli.log_json)?;

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.into_settings()
}

pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
