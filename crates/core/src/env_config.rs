//! Environment variable parsing with warn-level logging for invalid values,
//! plus resolution of the two database paths.

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_POOL_SIZE, DEFAULT_STORE_ATTEMPTS, MEASUREMENT_DB_FILE, REGISTRY_DB_FILE,
};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Parse a boolean flag: `1`, `true`, `yes`, `on` (any case) are true.
pub fn env_flag(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| {
        matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    })
}

/// Runtime configuration shared by the CLI and the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub registry_db: PathBuf,
    pub measurement_db: PathBuf,
    pub pool_size: u32,
    pub strict: bool,
    pub store_attempts: u32,
}

impl AppConfig {
    /// Build the configuration from `PHYSLOG_*` variables.
    ///
    /// `data_dir` overrides `PHYSLOG_DATA_DIR` when given.
    #[must_use]
    pub fn from_env(data_dir: Option<&Path>) -> Self {
        let data_dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("PHYSLOG_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let registry_db = std::env::var_os("PHYSLOG_REGISTRY_DB")
            .map_or_else(|| data_dir.join(REGISTRY_DB_FILE), PathBuf::from);
        let measurement_db = std::env::var_os("PHYSLOG_MEASUREMENT_DB")
            .map_or_else(|| data_dir.join(MEASUREMENT_DB_FILE), PathBuf::from);
        Self {
            registry_db,
            measurement_db,
            pool_size: env_parse_with_default("PHYSLOG_DB_POOL_SIZE", DEFAULT_POOL_SIZE).max(1),
            strict: env_flag("PHYSLOG_STRICT"),
            store_attempts: env_parse_with_default("PHYSLOG_STORE_RETRIES", DEFAULT_STORE_ATTEMPTS)
                .max(1),
        }
    }

    /// Configuration rooted in `dir` with default pool and retry settings.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            registry_db: dir.join(REGISTRY_DB_FILE),
            measurement_db: dir.join(MEASUREMENT_DB_FILE),
            pool_size: DEFAULT_POOL_SIZE,
            strict: false,
            store_attempts: DEFAULT_STORE_ATTEMPTS,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("physlog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_PHYSLOG_ENV_PARSE_VALID_41871";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_PHYSLOG_ENV_PARSE_INVALID_41872";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_PHYSLOG_ENV_PARSE_MISSING_41873";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_flag_values() {
        let var_name = "TEST_PHYSLOG_ENV_FLAG_41874";
        unsafe { std::env::set_var(var_name, "TRUE") };
        assert!(env_flag(var_name));
        unsafe { std::env::set_var(var_name, "0") };
        assert!(!env_flag(var_name));
        unsafe { std::env::remove_var(var_name) };
        assert!(!env_flag(var_name));
    }

    #[test]
    fn test_in_dir_uses_default_file_names() {
        let config = AppConfig::in_dir(Path::new("/tmp/physlog-test"));
        assert_eq!(config.registry_db, Path::new("/tmp/physlog-test/id_database.db"));
        assert_eq!(config.measurement_db, Path::new("/tmp/physlog-test/physical_rawdata.db"));
        assert!(!config.strict);
    }
}
