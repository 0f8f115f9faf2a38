//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::ebay::regions::Region;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Regions searched, in order
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the emulated browser's User-Agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_regions() -> Vec<Region> {
    Region::all().to_vec()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.timeout_secs == 0 {
            anyhow::bail!("Invalid config file {}: timeout_secs must be at least 1", path.display());
        }

        Ok(config)
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sold-tracker").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values and a zero
    /// timeout are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("SOLD_TRACKER_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("SOLD_TRACKER_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(0) => debug!("Ignoring SOLD_TRACKER_TIMEOUT=0"),
                Ok(t) => self.timeout_secs = t,
                Err(_) => {}
            }
        }

        if let Ok(regions) = std::env::var("SOLD_TRACKER_REGIONS") {
            if let Ok(r) = parse_regions(&regions) {
                self.regions = r;
            }
        }

        self
    }
}

/// Parses a comma-separated region list such as `"ca,com"`.
pub fn parse_regions(list: &str) -> Result<Vec<Region>> {
    let regions = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Region>())
        .collect::<Result<Vec<_>, _>>()?;

    if regions.is_empty() {
        anyhow::bail!("At least one region is required");
    }

    Ok(regions)
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.regions, vec![Region::Ca, Region::Com]);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.proxy.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_parse_regions() {
        assert_eq!(parse_regions("ca,com").unwrap(), vec![Region::Ca, Region::Com]);
        assert_eq!(parse_regions("com").unwrap(), vec![Region::Com]);
        assert_eq!(parse_regions(" com , ca ").unwrap(), vec![Region::Com, Region::Ca]);
        assert!(parse_regions("ca,de").is_err());
        assert!(parse_regions("").is_err());
        assert!(parse_regions(",").is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            regions = ["com"]
            timeout_secs = 5
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.regions, vec![Region::Com]);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            regions = ["ca", "com"]
            proxy = "socks5://localhost:1080"
            timeout_secs = 20
            user_agent = "Mozilla/5.0"
            format = "csv"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.regions, vec![Region::Ca, Region::Com]);
        assert_eq!(config.proxy.as_deref(), Some("socks5://localhost:1080"));
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 4").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 4);
        assert_eq!(config.regions, vec![Region::Ca, Region::Com]);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let err = Config::from_file("/nonexistent/path/config.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_from_file_zero_timeout() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 0").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be at least 1"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "regions = [\"com\"]").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.regions, vec![Region::Com]);
    }

    #[test]
    fn test_config_with_env() {
        let orig_proxy = std::env::var("SOLD_TRACKER_PROXY").ok();
        let orig_timeout = std::env::var("SOLD_TRACKER_TIMEOUT").ok();
        let orig_regions = std::env::var("SOLD_TRACKER_REGIONS").ok();

        std::env::set_var("SOLD_TRACKER_PROXY", "http://proxy:8080");
        std::env::set_var("SOLD_TRACKER_TIMEOUT", "30");
        std::env::set_var("SOLD_TRACKER_REGIONS", "com");

        let config = Config::new().with_env();
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:8080"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.regions, vec![Region::Com]);

        // Invalid values are ignored
        std::env::set_var("SOLD_TRACKER_TIMEOUT", "soon");
        std::env::set_var("SOLD_TRACKER_REGIONS", "mars");

        let config = Config::new().with_env();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.regions, vec![Region::Ca, Region::Com]);

        // A zero timeout would fail every request
        std::env::set_var("SOLD_TRACKER_TIMEOUT", "0");

        let config = Config::new().with_env();
        assert_eq!(config.timeout_secs, 10);

        for (key, orig) in [
            ("SOLD_TRACKER_PROXY", orig_proxy),
            ("SOLD_TRACKER_TIMEOUT", orig_timeout),
            ("SOLD_TRACKER_REGIONS", orig_regions),
        ] {
            match orig {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            regions: vec![Region::Com],
            proxy: Some("socks5://localhost:1080".to_string()),
            timeout_secs: 15,
            user_agent: None,
            format: OutputFormat::Markdown,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.regions, config.regions);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.format, config.format);
    }
}
