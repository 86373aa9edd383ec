use std::fmt;

/// Configuration derived from CLI arguments and environment
#[derive(Clone, Default)]
pub struct Config {
    /// Shared secret every tool call must present, if set
    pub api_key: Option<String>,
    /// Log at debug level when `RUST_LOG` is not set
    pub debug: bool,
}

impl Config {
    pub fn requires_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("debug", &self.debug)
            .finish()
    }
}
