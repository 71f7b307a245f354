//! Server configuration, read from environment variables at startup.
//!
//! | Variable       | Default     |
//! |----------------|-------------|
//! | `PORT`         | `8003`      |
//! | `HOST`         | `0.0.0.0`   |
//! | `STORAGE_FILE` | `temp.txt`  |
//! | `AUTH_KEY`     | (required)  |

use anyhow::{Context, Result, bail};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8003;
pub const DEFAULT_STORAGE_FILE: &str = "temp.txt";

#[derive(Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Relative paths resolve against the working directory.
    pub storage_file: PathBuf,
    pub auth_key: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid HOST: {:?}", raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let storage_file = lookup("STORAGE_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE));

        let auth_key = match lookup("AUTH_KEY") {
            Some(key) if !key.is_empty() => key,
            _ => bail!("AUTH_KEY must be set to a non-empty shared secret"),
        };

        Ok(Self {
            host,
            port,
            storage_file,
            auth_key,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("storage_file", &self.storage_file)
            .field("auth_key", &"[redacted]")
            .finish()
    }
}
