use crate::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Abbreviate addresses in participant labels and edge endpoints
    ///
    /// Env: TTM_RENDER_SHORT_ADDRESSES
    /// Default: true
    #[serde(default = "default_short_addresses")]
    pub short_addresses: bool,

    /// Unit label appended to formatted message values
    ///
    /// Env: TTM_RENDER_UNIT
    /// Default: TON
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_short_addresses() -> bool {
    true
}

fn default_unit() -> String {
    "TON".to_string()
}

impl RenderConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.unit.trim().is_empty() {
            return Err(ConfigError::ValidateError(
                "Render unit cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            short_addresses: default_short_addresses(),
            unit: default_unit(),
        }
    }
}
