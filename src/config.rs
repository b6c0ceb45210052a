//! Process configuration.
//!
//! Flags take precedence over environment variables, which take precedence over defaults.
//!
//! ```text
//! --bind <addr:port>   SEARCH_BIND        127.0.0.1:3000
//! --data <path>        SEARCH_DATA        built-in demo dataset
//! --store-url <url>    SEARCH_STORE_URL   in-memory store
//! ```

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Seed file for the in-memory store.
    pub data_path: Option<PathBuf>,
    /// Peer to read collections from instead of holding them locally.
    pub store_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// `args[0]` is the program name and is skipped. Unknown flags are ignored.
    pub fn from_sources<F>(args: &[String], env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut data: Option<String> = None;
        let mut store_url: Option<String> = None;

        let mut i = 1;
        while i < args.len() {
            let slot = match args[i].as_str() {
                "--bind" => &mut bind,
                "--data" => &mut data,
                "--store-url" => &mut store_url,
                other => {
                    tracing::warn!("Ignoring unknown argument {}", other);
                    i += 1;
                    continue;
                }
            };
            let value = args
                .get(i + 1)
                .with_context(|| format!("{} requires a value", args[i]))?;
            *slot = Some(value.clone());
            i += 2;
        }

        let bind = bind
            .or_else(|| env("SEARCH_BIND"))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address {}", bind))?;

        Ok(Self {
            bind_addr,
            data_path: data.or_else(|| env("SEARCH_DATA")).map(PathBuf::from),
            store_url: store_url.or_else(|| env("SEARCH_STORE_URL")),
        })
    }
}
