mod args;
mod error;
mod log;
mod render;

pub use args::Args;
pub use error::ConfigError;
pub use log::LogConfig;
pub use render::RenderConfig;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TtmConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

impl TtmConfig {
    /// Load configuration from `TTM_`-prefixed environment variables.
    ///
    /// Each section is read under its own prefix, so `TTM_LOG_LEVEL` maps to
    /// `log.level` and `TTM_RENDER_UNIT` maps to `render.unit`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            log: envy::prefixed("TTM_LOG_").from_env::<LogConfig>()?,
            render: envy::prefixed("TTM_RENDER_").from_env::<RenderConfig>()?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.render.validate()?;
        Ok(())
    }
}
