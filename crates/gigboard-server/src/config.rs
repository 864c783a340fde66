//! Server settings read from the environment.

use gigboard_db::DeletePolicy;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub delete_policy: DeletePolicy,
}

impl ServerConfig {
    /// Read `GIGBOARD_BIND` and `GIGBOARD_DELETE_POLICY`.
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("GIGBOARD_BIND").ok().as_deref(),
            env::var("GIGBOARD_DELETE_POLICY").ok().as_deref(),
        )
    }

    fn from_vars(bind: Option<&str>, delete_policy: Option<&str>) -> Self {
        let default_bind: SocketAddr = ([0, 0, 0, 0], 5000).into();

        let bind = match bind {
            Some(raw) => raw.trim().parse::<SocketAddr>().unwrap_or_else(|e| {
                tracing::warn!(value = raw, error = %e, "invalid GIGBOARD_BIND, using {DEFAULT_BIND}");
                default_bind
            }),
            None => default_bind,
        };

        let delete_policy = match delete_policy {
            Some(raw) => raw.parse::<DeletePolicy>().unwrap_or_else(|e| {
                tracing::warn!("{e}, falling back to {}", DeletePolicy::default());
                DeletePolicy::default()
            }),
            None => DeletePolicy::default(),
        };

        Self {
            bind,
            delete_policy,
        }
    }
}
