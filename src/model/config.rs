use serde::Deserialize;
use std::collections::HashMap;

/// Configuration from focusboard.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Data file path, used when no `--file` flag is given
    #[serde(default)]
    pub data_file: Option<String>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Maximum characters accepted by the text input popup
    #[serde(default = "default_char_limit")]
    pub char_limit: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            char_limit: default_char_limit(),
        }
    }
}

fn default_char_limit() -> usize {
    120
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    /// Theme slot overrides: slot name -> "#RRGGBB" or ANSI-256 index
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = detect.
    /// Needed for Shift+Enter to reach the input popup as a soft newline.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}
