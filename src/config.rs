use crate::lifecycle::Timings;
use crate::storage::resolve_data_path;
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub port: u16,
    pub timings: Timings,
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Timings::default();
        Self {
            data_path: resolve_data_path(),
            port: env_parse("PORT").unwrap_or(DEFAULT_PORT),
            timings: Timings {
                intro: env_millis("DASHBOARD_INTRO_DELAY_MS").unwrap_or(defaults.intro),
                chart_refresh: env_millis("DASHBOARD_CHART_DELAY_MS")
                    .unwrap_or(defaults.chart_refresh),
            },
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn env_millis(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_millis)
}
