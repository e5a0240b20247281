pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_server_settings, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "./static";
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "fortune-server"))]
#[cfg_attr(feature = "cli", command(about = "Serves New Year fortunes for the color-picking game"))]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_HOST))]
    pub host: String,

    #[cfg_attr(feature = "cli", arg(long, env = "PORT", default_value_t = DEFAULT_PORT))]
    pub port: u16,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_STATIC_DIR))]
    pub static_dir: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_WORKERS))]
    pub workers: usize,

    #[cfg_attr(feature = "cli", arg(short, long, help = "TOML config file; flags given explicitly still take precedence"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_log: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            workers: DEFAULT_WORKERS,
            config: None,
            json_log: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn static_dir(&self) -> &str {
        &self.static_dir
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn json_logs(&self) -> bool {
        self.json_log
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_server_settings(&self.host, self.port, self.workers, &self.static_dir)
    }
}

/// Server flags the user actually set, on the command line or through the
/// environment, as opposed to clap defaults.
#[cfg(feature = "cli")]
pub fn explicit_server_flags(matches: &clap::ArgMatches) -> Vec<&'static str> {
    use clap::parser::ValueSource;

    ["host", "port", "static_dir", "workers"]
        .into_iter()
        .filter(|id| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
            )
        })
        .collect()
}
