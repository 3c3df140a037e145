//! Stack configuration
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SCRIPTPUSH_STACK_CAPACITY` | `4096` | Slots reserved up front |
//! | `SCRIPTPUSH_MAX_DEPTH` | `1000000` | Pushing past this depth faults the runtime |
//!
//! Invalid values (non-numeric, zero) are warned about and ignored.
//!
//! ## Config File
//!
//! The same settings can be read from TOML:
//!
//! ```toml
//! initial_capacity = 256
//! max_depth = 10000
//! ```

use serde::Deserialize;
use std::path::Path;

/// Default number of slots reserved when a stack is created
pub const DEFAULT_STACK_CAPACITY: usize = 4096;

/// Default depth limit
pub const DEFAULT_MAX_DEPTH: usize = 1_000_000;

const ENV_STACK_CAPACITY: &str = "SCRIPTPUSH_STACK_CAPACITY";
const ENV_MAX_DEPTH: &str = "SCRIPTPUSH_MAX_DEPTH";

/// Configuration for a reference `Vm` stack
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Slots reserved up front (the stack still grows past this)
    pub initial_capacity: usize,
    /// Maximum depth; a push beyond it is a runtime fault
    pub max_depth: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_STACK_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Error while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid TOML for `StackConfig`
    Parse(toml::de::Error),
    /// Parsed but semantically invalid
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl StackConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_capacity: parse_positive(ENV_STACK_CAPACITY)
                .unwrap_or(defaults.initial_capacity),
            max_depth: parse_positive(ENV_MAX_DEPTH).unwrap_or(defaults.max_depth),
        }
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: StackConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be positive".into()));
        }
        Ok(())
    }

    /// Slots to reserve up front, never more than the depth limit
    pub fn reserved_slots(&self) -> usize {
        self.initial_capacity.min(self.max_depth)
    }
}

fn parse_positive(var: &str) -> Option<usize> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            tracing::warn!(var, value = %raw, "ignoring invalid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    // SAFETY (all env helpers): tests touching the environment run #[serial]
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn clear_env() {
        unsafe {
            std::env::remove_var(ENV_STACK_CAPACITY);
            std::env::remove_var(ENV_MAX_DEPTH);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe { clear_env() };
        assert_eq!(StackConfig::from_env(), StackConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_all_values() {
        unsafe {
            set_env(ENV_STACK_CAPACITY, "64");
            set_env(ENV_MAX_DEPTH, "128");
        }
        let config = StackConfig::from_env();
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.max_depth, 128);
        unsafe { clear_env() };
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values_ignored() {
        unsafe {
            set_env(ENV_STACK_CAPACITY, "lots");
            set_env(ENV_MAX_DEPTH, "0");
        }
        assert_eq!(StackConfig::from_env(), StackConfig::default());
        unsafe { clear_env() };
    }

    #[test]
    fn test_from_toml_partial() {
        let config = StackConfig::from_toml_str("max_depth = 32").unwrap();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.initial_capacity, DEFAULT_STACK_CAPACITY);
        assert_eq!(config.reserved_slots(), 32);
    }

    #[test]
    fn test_from_toml_rejects_unknown_and_zero() {
        assert!(matches!(
            StackConfig::from_toml_str("depth = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            StackConfig::from_toml_str("max_depth = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_capacity = 16\nmax_depth = 100").unwrap();
        let config = StackConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            StackConfig {
                initial_capacity: 16,
                max_depth: 100
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StackConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("cannot read config"));
    }
}
