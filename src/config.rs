use crate::commands::keyboard::KeyBinding;
use clap::ValueEnum;
use serde::Deserialize;
use std::{fs, io, path::Path};

/// The user configuration, loaded from `config.yaml`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The defaults used when starting the deck.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub bindings: KeyBindingsConfig,
}

impl Config {
    /// Load the config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Whether to start with the dark or the light theme.
    #[serde(default)]
    pub theme: ThemeSelection,

    /// The name of the theme used in dark mode.
    #[serde(default = "default_dark_theme")]
    pub dark_theme: String,

    /// The name of the theme used in light mode.
    #[serde(default = "default_light_theme")]
    pub light_theme: String,

    /// A max width in columns that the deck must always be capped to.
    #[serde(default = "default_max_columns")]
    pub max_columns: u16,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            theme: Default::default(),
            dark_theme: default_dark_theme(),
            light_theme: default_light_theme(),
            max_columns: default_max_columns(),
        }
    }
}

fn default_dark_theme() -> String {
    "dark".into()
}

fn default_light_theme() -> String {
    "light".into()
}

fn default_max_columns() -> u16 {
    u16::MAX
}

/// The theme the deck starts with.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSelection {
    #[default]
    Dark,
    Light,

    /// Pick the theme that matches the terminal's background color.
    Auto,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Whether to capture the mouse so slides can be changed by clicking on the chrome.
    pub mouse: Option<bool>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    /// The key binding to move to the next slide.
    #[serde(default = "default_next_bindings")]
    pub(crate) next: Vec<KeyBinding>,

    /// The key binding to move to the previous slide.
    #[serde(default = "default_previous_bindings")]
    pub(crate) previous: Vec<KeyBinding>,

    /// The key binding to jump to a specific slide.
    #[serde(default)]
    pub(crate) go_to_slide: Vec<KeyBinding>,

    /// The key binding to switch between the dark and light themes.
    #[serde(default)]
    pub(crate) toggle_theme: Vec<KeyBinding>,

    /// The key binding to close the application.
    #[serde(default = "default_exit_bindings")]
    pub(crate) exit: Vec<KeyBinding>,

    /// The key binding to suspend the application.
    #[serde(default = "default_suspend_bindings")]
    pub(crate) suspend: Vec<KeyBinding>,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            next: default_next_bindings(),
            previous: default_previous_bindings(),
            go_to_slide: Vec::new(),
            toggle_theme: Vec::new(),
            exit: default_exit_bindings(),
            suspend: default_suspend_bindings(),
        }
    }
}

fn make_keybindings<const N: usize>(raw_bindings: [&str; N]) -> Vec<KeyBinding> {
    let mut bindings = Vec::new();
    for binding in raw_bindings {
        bindings.push(binding.parse().expect("invalid binding"));
    }
    bindings
}

fn default_next_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<right>"])
}

fn default_previous_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<left>"])
}

fn default_exit_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<c-c>", "q"])
}

fn default_suspend_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<c-z>"])
}
