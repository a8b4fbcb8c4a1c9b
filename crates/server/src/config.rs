// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process configuration.
//!
//! Parsed once at startup from command-line flags with environment variable
//! fallbacks, then treated as immutable.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bloodlink_persistence::{Persistence, PersistenceError};
use clap::{Args, Parser};
use tracing::{info, warn};

/// Errors raised while turning configuration into live resources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `MySQL` host was configured but the backend is not compiled in.
    #[error("DB_HOST is set but this build lacks MySQL support (enable the `mysql` feature)")]
    MysqlUnsupported,
    /// A `MySQL` host was configured without a database name.
    #[error("DB_NAME is required when DB_HOST is set")]
    MissingDatabaseName,
    /// The database could not be opened.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Database connection settings shared by the server and the setup tool.
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    /// `SQLite` database file, or the `MySQL` database name when `--db-host` is set.
    /// An in-memory `SQLite` database is used when absent.
    #[arg(long = "db-name", env = "DB_NAME")]
    pub db_name: Option<String>,

    /// `MySQL` host. Selects the `MySQL` backend.
    #[arg(long = "db-host", env = "DB_HOST")]
    pub db_host: Option<String>,

    /// `MySQL` port.
    #[arg(long = "db-port", env = "DB_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// `MySQL` user.
    #[arg(long = "db-user", env = "DB_USER")]
    pub db_user: Option<String>,

    /// `MySQL` password.
    #[arg(long = "db-pass", env = "DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,
}

impl DatabaseArgs {
    /// Whether these settings select the in-memory `SQLite` default.
    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        self.db_name.is_none() && self.db_host.is_none()
    }

    /// The `mysql://` connection URL for `host`, with credentials
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDatabaseName` when no database name is set.
    pub fn mysql_url(&self, host: &str) -> Result<String, ConfigError> {
        let db_name: &str = self
            .db_name
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseName)?;
        let credentials: String = match (&self.db_user, &self.db_pass) {
            (Some(user), Some(pass)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(pass)
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            _ => String::new(),
        };
        Ok(format!(
            "mysql://{credentials}{host}:{}/{}",
            self.db_port,
            urlencoding::encode(db_name)
        ))
    }

    /// Opens the configured database and runs pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the database cannot
    /// be opened.
    pub fn open(&self) -> Result<Persistence, ConfigError> {
        if let Some(host) = &self.db_host {
            return self.open_mysql(host);
        }

        if let Some(path) = &self.db_name {
            info!(path = %path, "Using file-based SQLite database");
            Ok(Persistence::new_with_file(path)?)
        } else {
            warn!(
                "Using in-memory SQLite database; data is lost on exit and no admin \
                 account can be created, so set DB_NAME to be able to log in"
            );
            Ok(Persistence::new_in_memory()?)
        }
    }

    #[cfg(feature = "mysql")]
    fn open_mysql(&self, host: &str) -> Result<Persistence, ConfigError> {
        let url: String = self.mysql_url(host)?;

        info!(host = %host, port = self.db_port, database = ?self.db_name, "Using MySQL database");
        Ok(Persistence::new_with_mysql(&url)?)
    }

    #[cfg(not(feature = "mysql"))]
    fn open_mysql(&self, host: &str) -> Result<Persistence, ConfigError> {
        self.mysql_url(host)?;
        Err(ConfigError::MysqlUnsupported)
    }
}

/// BloodLink web server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Key material for encrypting cookies; at least 32 bytes.
    /// A random key is generated when absent, which logs everyone out on restart.
    #[arg(long = "secret-key", env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Address to bind to.
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl Config {
    /// The socket address the server listens on.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
