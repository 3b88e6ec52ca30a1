// SPDX-License-Identifier: Apache-2.0

use regdesk_model::Cpf;
use regdesk_store::{default_database_path, default_upload_dir, DEFAULT_DATA_DIR};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub database_file: PathBuf,
    pub upload_dir: PathBuf,
    /// Directory holding the front-end `index.html`; `GET /` is 404 without it.
    pub static_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
    pub max_upload_bytes: usize,
    /// `*` allows every origin.
    pub cors_allowed_origins: Vec<String>,
    pub strict_store: bool,
    pub bootstrap_cpfs: Vec<Cpf>,
    pub enable_audit_log: bool,
    pub log_json: bool,
    pub shutdown_drain_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            database_file: default_database_path(&data_dir),
            upload_dir: default_upload_dir(&data_dir),
            data_dir,
            static_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origins: vec!["*".to_string()],
            strict_store: false,
            bootstrap_cpfs: Vec::new(),
            enable_audit_log: false,
            log_json: true,
            shutdown_drain_ms: 1000,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `REGDESK_*` variables resolved through `lookup`.
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = var("REGDESK_BIND").unwrap_or_else(|| {
            let port = var("PORT")
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT);
            format!("0.0.0.0:{port}")
        });
        let data_dir = var("REGDESK_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let database_file = var("REGDESK_DATABASE_FILE")
            .map_or_else(|| default_database_path(&data_dir), PathBuf::from);
        let upload_dir = var("REGDESK_UPLOAD_DIR")
            .map_or_else(|| default_upload_dir(&data_dir), PathBuf::from);
        let cors_allowed_origins = var("REGDESK_CORS_ALLOWED_ORIGINS")
            .map_or(defaults.cors_allowed_origins, |raw| parse_list(&raw));
        let bootstrap_cpfs = var("REGDESK_BOOTSTRAP_CPFS")
            .map(|raw| {
                parse_list(&raw)
                    .iter()
                    .filter_map(|s| Cpf::parse(s).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            database_file,
            upload_dir,
            data_dir,
            static_dir: var("REGDESK_STATIC_DIR").map(PathBuf::from),
            max_body_bytes: env_usize(&var, "REGDESK_MAX_BODY_BYTES", defaults.max_body_bytes),
            max_upload_bytes: env_usize(
                &var,
                "REGDESK_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            ),
            cors_allowed_origins,
            strict_store: env_bool(&var, "REGDESK_STRICT_STORE", defaults.strict_store),
            bootstrap_cpfs,
            enable_audit_log: env_bool(&var, "REGDESK_ENABLE_AUDIT_LOG", defaults.enable_audit_log),
            log_json: env_bool(&var, "REGDESK_LOG_JSON", defaults.log_json),
            shutdown_drain_ms: env_u64(
                &var,
                "REGDESK_SHUTDOWN_DRAIN_MS",
                defaults.shutdown_drain_ms,
            ),
        }
    }

    #[must_use]
    pub fn cors_allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

pub fn validate_startup_config(cfg: &ServerConfig) -> Result<(), String> {
    cfg.bind_addr
        .parse::<SocketAddr>()
        .map_err(|e| format!("invalid bind addr {}: {e}", cfg.bind_addr))?;
    if cfg.max_body_bytes == 0 || cfg.max_upload_bytes == 0 {
        return Err("body size limits must be > 0".to_string());
    }
    if cfg.database_file.file_name().is_none() {
        return Err(format!(
            "database file {} must name a file",
            cfg.database_file.display()
        ));
    }
    if cfg.upload_dir.as_os_str().is_empty() {
        return Err("upload dir must not be empty".to_string());
    }
    if cfg.cors_allows_any_origin() && cfg.cors_allowed_origins.len() > 1 {
        return Err("cors origin `*` cannot be combined with explicit origins".to_string());
    }
    Ok(())
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn env_bool(var: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    var(name).and_then(|v| parse_bool(&v)).unwrap_or(default)
}

fn env_u64(var: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> u64 {
    var(name)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(var: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    var(name)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}
