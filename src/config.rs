use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What happens to the working set when a gesture is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelPolicy {
    /// Restore the arrangement from before the drag started
    #[default]
    Restore,
    /// Keep whatever the over events already moved
    Keep,
}

/// Controller settings, usually read from `.hlavi/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub cancel_policy: CancelPolicy,
    /// Queue screen reader announcements for every drag transition
    pub narrate: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            cancel_policy: CancelPolicy::Restore,
            narrate: true,
        }
    }
}

impl ControllerConfig {
    /// Parses a `[board]` table, falling back to defaults for missing keys
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        #[derive(Deserialize, Default)]
        struct File {
            #[serde(default)]
            board: ControllerConfig,
        }

        let file: File = toml::from_str(contents)?;
        Ok(file.board)
    }
}
