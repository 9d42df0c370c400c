//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::Mailbox;

/// Top-level relay configuration.
///
/// Loaded once at startup via [`ChatConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Seconds a `/messages` long poll waits before timing out.
    pub poll_timeout_secs: u64,

    /// Pending messages each participant mailbox can hold before fan-out
    /// starts dropping for that participant. Always within
    /// `1..=`[`Mailbox::MAX_CAPACITY`].
    pub mailbox_capacity: usize,
}

impl ChatConfig {
    /// Default bind address.
    pub const DEFAULT_LISTEN_ADDR: &'static str = "0.0.0.0:8080";
    /// Default long-poll window in seconds.
    pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
    /// Default mailbox capacity.
    pub const DEFAULT_MAILBOX_CAPACITY: usize = 8;

    /// Loads configuration from environment variables.
    ///
    /// Falls back to the defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// A `MAILBOX_CAPACITY` that is not a number, is zero, or exceeds
    /// [`Mailbox::MAX_CAPACITY`] falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is present but cannot be parsed
    /// as a [`SocketAddr`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::net::AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| Self::DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let poll_timeout_secs = parse_value(
            lookup("POLL_TIMEOUT_SECS"),
            Self::DEFAULT_POLL_TIMEOUT_SECS,
        );
        let mailbox_capacity = Some(parse_value(
            lookup("MAILBOX_CAPACITY"),
            Self::DEFAULT_MAILBOX_CAPACITY,
        ))
        .filter(|capacity| (1..=Mailbox::MAX_CAPACITY).contains(capacity))
        .unwrap_or(Self::DEFAULT_MAILBOX_CAPACITY);

        Ok(Self {
            listen_addr,
            poll_timeout_secs,
            mailbox_capacity,
        })
    }

    /// Returns the long-poll window as a [`Duration`].
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            poll_timeout_secs: Self::DEFAULT_POLL_TIMEOUT_SECS,
            mailbox_capacity: Self::DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

/// Parses a looked-up value as `T`, returning `default` on missing or
/// invalid values.
fn parse_value<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
