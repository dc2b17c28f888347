//! Server configuration read from the environment.
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use arena_core::{PlayerRecord, UserId};

/// Where file logs go, if anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// Stderr only.
    Stderr,
    /// Stderr plus a log file in the platform cache directory.
    CacheDir,
    /// Stderr plus a log file in the given directory.
    Dir(PathBuf),
}

/// Arena server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `config.toml` and `powers.ron`. Embedded content is
    /// used when unset.
    pub data_dir: Option<PathBuf>,
    pub log: LogTarget,
    /// Longer request lines are answered with an error and skipped.
    pub max_line_bytes: usize,
    /// Accounts created at startup. Registration lives outside this server.
    pub seed_users: Vec<PlayerRecord>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7878)),
            data_dir: None,
            log: LogTarget::Stderr,
            max_line_bytes: Self::DEFAULT_MAX_LINE_BYTES,
            seed_users: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_BIND_ADDR` - Listen address (default: `127.0.0.1:7878`)
    /// - `ARENA_DATA_DIR` - Content directory (default: embedded content)
    /// - `ARENA_LOG_DIR` - Log file directory, or `auto` for the platform cache dir
    /// - `ARENA_MAX_LINE_BYTES` - Maximum request line length (default: 65536)
    /// - `ARENA_SEED_USERS` - Comma separated `id:nick` accounts to create
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = read_env::<SocketAddr>("ARENA_BIND_ADDR") {
            config.bind_addr = addr;
        }

        config.data_dir = env::var_os("ARENA_DATA_DIR").map(PathBuf::from);

        if let Ok(dir) = env::var("ARENA_LOG_DIR") {
            config.log = parse_log_target(&dir);
        }

        if let Some(bytes) = read_env::<usize>("ARENA_MAX_LINE_BYTES") {
            config.max_line_bytes = bytes.max(1);
        }

        if let Ok(raw) = env::var("ARENA_SEED_USERS") {
            config.seed_users = parse_seed_users(&raw).context("invalid ARENA_SEED_USERS")?;
        }

        Ok(config)
    }
}

fn parse_log_target(raw: &str) -> LogTarget {
    match raw.trim() {
        "" => LogTarget::Stderr,
        "auto" => LogTarget::CacheDir,
        dir => LogTarget::Dir(PathBuf::from(dir)),
    }
}

/// Parses `1:ana,2:bo` into fresh accounts.
pub fn parse_seed_users(raw: &str) -> Result<Vec<PlayerRecord>> {
    let mut users: Vec<PlayerRecord> = Vec::new();

    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (id, nick) = item
            .split_once(':')
            .with_context(|| format!("expected `id:nick`, got `{item}`"))?;
        let id: i64 = id
            .trim()
            .parse()
            .with_context(|| format!("user id `{id}` is not an integer"))?;
        let nick = nick.trim();
        if nick.is_empty() {
            bail!("user {id} has an empty nick");
        }
        if users.iter().any(|user| user.id == UserId(id)) {
            bail!("user {id} is listed twice");
        }
        users.push(PlayerRecord::new(UserId(id), nick));
    }

    Ok(users)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
