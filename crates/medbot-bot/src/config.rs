use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TESTS_PATH: &str = "resources/tests_config.json";
const DEFAULT_TEST: &str = "MOSF";
const DEFAULT_COMMAND: &str = "/mosftest";

/// Process settings, read from the environment once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the test catalog.
    pub tests_path: PathBuf,
    /// Name fragment of the test started by the shortcut command.
    pub default_test: String,
    pub default_command: String,
}

impl BotConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset or blank keys fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = get("MEDBOT_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid MEDBOT_BIND_ADDR '{bind_addr}': {e}"))?;

        let default_command = get("MEDBOT_DEFAULT_COMMAND", DEFAULT_COMMAND);
        if !default_command.starts_with('/') || default_command.contains(char::is_whitespace) {
            return Err(eyre::eyre!(
                "MEDBOT_DEFAULT_COMMAND must be a single word starting with '/', got '{default_command}'"
            ));
        }

        Ok(Self {
            bind_addr,
            tests_path: PathBuf::from(get("MEDBOT_TESTS_PATH", DEFAULT_TESTS_PATH)),
            default_test: get("MEDBOT_DEFAULT_TEST", DEFAULT_TEST),
            default_command,
        })
    }
}
