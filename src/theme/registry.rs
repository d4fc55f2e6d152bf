use super::raw::RawTheme;
use std::{collections::BTreeMap, fs, io, path::Path};

include!(concat!(env!("OUT_DIR"), "/themes.rs"));

/// The themes a deck can be drawn with: the built-in ones plus any found in the user's themes
/// directory.
#[derive(Default)]
pub struct ThemeRegistry {
    custom_themes: BTreeMap<String, RawTheme>,
}

impl ThemeRegistry {
    /// Loads a theme from its name.
    pub(crate) fn load_by_name(&self, name: &str) -> Option<RawTheme> {
        match THEMES.get(name) {
            Some(contents) => {
                // Built-in themes are validated by the tests below.
                let theme = serde_yaml::from_slice(contents).expect("corrupted theme");
                Some(theme)
            }
            None => self.custom_themes.get(name).cloned(),
        }
    }

    /// Register all the themes in the given directory.
    ///
    /// A missing directory is not an error.
    pub fn register_from_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadThemeError> {
        let handle = match fs::read_dir(&path) {
            Ok(handle) => handle,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let mut bases = BTreeMap::new();
        for entry in handle {
            let entry = entry?;
            let Some(file_name) = entry.file_name().to_str().map(ToOwned::to_owned) else {
                continue;
            };
            let Some(theme_name) = file_name.strip_suffix(".yaml") else {
                continue;
            };
            if !entry.metadata()?.is_file() {
                continue;
            }
            if THEMES.contains_key(theme_name) {
                return Err(LoadThemeError::Duplicate(theme_name.into()));
            }
            let theme = RawTheme::from_path(entry.path())?;
            tracing::debug!("registered custom theme {theme_name}");
            bases.insert(theme_name.to_string(), theme.extends.clone());
            self.custom_themes.insert(theme_name.into(), theme);
        }

        let mut order = ExtensionOrder::new(bases);
        for base in order.pending.keys() {
            if !THEMES.contains_key(base.as_str()) && !self.custom_themes.contains_key(base) {
                return Err(LoadThemeError::ExtendedThemeNotFound(base.clone()));
            }
        }
        while let Some(theme_name) = order.pop() {
            self.extend_theme(&theme_name)?;
        }
        if !order.pending.is_empty() {
            return Err(LoadThemeError::ExtensionLoop(order.pending.into_keys().collect()));
        }
        Ok(())
    }

    fn extend_theme(&mut self, theme_name: &str) -> Result<(), LoadThemeError> {
        let Some(base_name) = self.custom_themes.get(theme_name).and_then(|theme| theme.extends.clone()) else {
            return Ok(());
        };
        let Some(base_theme) = self.load_by_name(&base_name) else {
            return Err(LoadThemeError::ExtendedThemeNotFound(base_name));
        };
        let Some(theme) = self.custom_themes.get_mut(theme_name) else {
            return Ok(());
        };
        *theme = merge_struct::merge(&base_theme, theme)
            .map_err(|e| LoadThemeError::Corrupted(base_name, e.to_string()))?;
        Ok(())
    }

    /// Get all the registered theme names.
    pub fn theme_names(&self) -> Vec<String> {
        let builtin_themes = THEMES.keys().map(|name| name.to_string());
        self.custom_themes.keys().cloned().chain(builtin_themes).collect()
    }
}

// Orders custom themes so that every theme is extended only after its base has been.
struct ExtensionOrder {
    pending: BTreeMap<String, Vec<String>>,
    ready: Vec<String>,
}

impl ExtensionOrder {
    fn new<I>(bases: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut pending: BTreeMap<_, Vec<_>> = BTreeMap::new();
        let mut ready = Vec::new();
        for (name, extends) in bases {
            pending.entry(name.clone()).or_default();
            match extends {
                Some(base) if !THEMES.contains_key(base.as_str()) => {
                    pending.entry(base).or_default().push(name);
                }
                _ => ready.push(name),
            }
        }
        Self { pending, ready }
    }

    fn pop(&mut self) -> Option<String> {
        let theme = self.ready.pop()?;
        if let Some(dependents) = self.pending.remove(&theme) {
            self.ready.extend(dependents);
        }
        Some(theme)
    }
}

/// An error loading a theme.
#[derive(thiserror::Error, Debug)]
pub enum LoadThemeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("theme '{0}' is corrupted: {1}")]
    Corrupted(String, String),

    #[error("duplicate custom theme '{0}'")]
    Duplicate(String),

    #[error("extended theme does not exist: {0}")]
    ExtendedThemeNotFound(String),

    #[error("theme has an extension loop involving: {0:?}")]
    ExtensionLoop(Vec<String>),
}
