use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Deployment mode flag; the protected docs routes are mounted only in
    /// `dev`.
    pub env: String,
    pub body_limit_mb: usize,
    pub docs_user: String,
    pub docs_pass: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Minimum level: trace, debug, info, warn or error.
    pub level: String,
    /// Structured JSON output when true, human-readable otherwise.
    pub json: bool,
}

/// One S3-compatible bucket. The service carries two of these: a public and
/// a private one.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketConfig {
    pub bucket: String,
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Public URLs as `endpoint/bucket/key` when true, bucket-subdomain
    /// style otherwise.
    pub url_path_style: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub public: BucketConfig,
    pub private: BucketConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub storage: StorageConfig,
}

/// Loads configuration in layers: embedded defaults, then an optional
/// `bookbin.toml` in the working directory (or `BOOKBIN_CONFIG` path), then
/// `BOOKBIN__`-prefixed environment variables with highest precedence.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name("bookbin").required(false));

    if let Ok(custom_path) = std::env::var("BOOKBIN_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    builder = builder.add_source(::config::Environment::with_prefix("BOOKBIN").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    if cfg.server.body_limit_mb == 0 || cfg.server.body_limit_mb > 1024 {
        return Err(anyhow::anyhow!("server.body_limit_mb must be in 1..=1024"));
    }
    match cfg.log.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => return Err(anyhow::anyhow!("invalid log.level: {}", other)),
    }
    if cfg.server.env == "dev" && (cfg.server.docs_user.is_empty() || cfg.server.docs_pass.is_empty()) {
        return Err(anyhow::anyhow!("docs credentials must be set when server.env is dev"));
    }
    for (label, bucket) in [("public", &cfg.storage.public), ("private", &cfg.storage.private)] {
        if bucket.bucket.is_empty() {
            return Err(anyhow::anyhow!("storage.{}.bucket must not be empty", label));
        }
        let parsed = url::Url::parse(&bucket.endpoint)
            .map_err(|e| anyhow::anyhow!("invalid storage.{}.endpoint: {}", label, e))?;
        if parsed.host_str().is_none() {
            return Err(anyhow::anyhow!("storage.{}.endpoint has no host", label));
        }
    }
    Ok(())
}

/// Creates the parent directory for a `sqlite://` URL so first start does
/// not fail on a missing data directory.
pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
