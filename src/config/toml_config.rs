use crate::config::{CliConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_WORKERS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FortuneError, Result};
use crate::utils::validation::{validate_server_settings, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FortuneError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FortuneError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PORT})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 命令列或環境變數明確指定的值優先於設定檔
    pub fn apply_cli_overrides(&mut self, cli: &CliConfig, flags: &[&str]) {
        for flag in flags {
            match *flag {
                "host" => self.server.host = Some(cli.host.clone()),
                "port" => self.server.port = Some(cli.port),
                "static_dir" => self.server.static_dir = Some(cli.static_dir.clone()),
                "workers" => self.server.workers = Some(cli.workers),
                _ => {}
            }
        }
        if cli.json_log {
            self.logging.json = Some(true);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    fn static_dir(&self) -> &str {
        self.server.static_dir.as_deref().unwrap_or(DEFAULT_STATIC_DIR)
    }

    fn workers(&self) -> usize {
        self.server.workers.unwrap_or(DEFAULT_WORKERS)
    }

    fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_server_settings(self.host(), self.port(), self.workers(), self.static_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080
workers = 2
static_dir = "/srv/fortune/static"

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.workers(), 2);
        assert_eq!(config.static_dir(), "/srv/fortune/static");
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.workers(), DEFAULT_WORKERS);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FORTUNE_TEST_PORT", "9123");
        let config = TomlConfig::from_toml_str("[server]\nport = ${FORTUNE_TEST_PORT}\n").unwrap();
        assert_eq!(config.port(), 9123);
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let content = "[server]\nhost = \"${FORTUNE_TEST_SURELY_UNSET}\"\n";
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.host(), "${FORTUNE_TEST_SURELY_UNSET}");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, FortuneError::ConfigError { .. }));
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let config = TomlConfig::from_toml_str("[server]\nport = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_only_explicit_flags() {
        let mut config =
            TomlConfig::from_toml_str("[server]\nhost = \"10.0.0.1\"\nport = 7000\nworkers = 8\n")
                .unwrap();
        let cli = CliConfig {
            port: 8080,
            workers: 1,
            ..CliConfig::default()
        };

        config.apply_cli_overrides(&cli, &["port"]);

        assert_eq!(config.bind_address(), "10.0.0.1:8080");
        assert_eq!(config.workers(), 8);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nworkers = 8").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.workers(), 8);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, FortuneError::ConfigError { .. }));
    }
}
