//! Configuration for pgdb
//!
//! The three boolean switches that govern the open/create lifecycle.

/// Open-time configuration for a database
#[derive(Debug, Clone, Default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Lifecycle Configuration
    // -------------------------------------------------------------------------
    /// Create the database directory if it does not exist
    pub create_if_missing: bool,

    /// Fail `open` if the database directory already exists
    pub error_if_exists: bool,

    /// Open for reading only; creation is disallowed and no write access
    /// to the directory is required
    pub readonly: bool,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create the database if the directory is missing
    pub fn create_if_missing(mut self, yn: bool) -> Self {
        self.config.create_if_missing = yn;
        self
    }

    /// Error out if the directory already exists
    pub fn error_if_exists(mut self, yn: bool) -> Self {
        self.config.error_if_exists = yn;
        self
    }

    /// Open the database read-only
    pub fn readonly(mut self, yn: bool) -> Self {
        self.config.readonly = yn;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
