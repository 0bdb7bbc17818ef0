//! Server Configuration
//!
//! Settings come from the environment (a `.env` file is honoured) and can be
//! overridden on the command line with `--bind <addr:port>` and `--data <path>`.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

pub const ENV_BIND: &str = "DICTIONARY_BIND";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATA_FILE: &str = "DICTIONARY_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Snapshot file for the entry store. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Reads `.env`, the process environment and the given arguments (program name first).
    pub fn load(args: &[String]) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(|key| std::env::var(key).ok(), args)
    }

    pub fn from_sources<F>(env: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match (env(ENV_BIND), env(ENV_PORT)) {
            (Some(bind), _) => bind,
            (None, Some(port)) => format!("0.0.0.0:{}", port.trim()),
            (None, None) => DEFAULT_BIND.to_string(),
        };
        let mut bind_addr: SocketAddr = bind
            .trim()
            .parse()
            .with_context(|| format!("invalid bind address '{}'", bind))?;
        let mut data_file = env(ENV_DATA_FILE)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args.get(i + 1).context("--bind requires <addr:port>")?;
                    bind_addr = value
                        .parse()
                        .with_context(|| format!("invalid bind address '{}'", value))?;
                    i += 2;
                }
                "--data" => {
                    let value = args.get(i + 1).context("--data requires <path>")?;
                    data_file = Some(PathBuf::from(value));
                    i += 2;
                }
                other => {
                    tracing::warn!("Ignoring unknown argument '{}'", other);
                    i += 1;
                }
            }
        }

        Ok(Self {
            bind_addr,
            data_file,
        })
    }
}
