//! pitchdeck: the HomeVisor pitch deck, presented in the terminal.
//!
//! This is not meant to be used as a crate!

pub(crate) mod catalog;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod deck;
pub(crate) mod export;
pub(crate) mod presenter;
pub(crate) mod processing;
pub(crate) mod render;
pub(crate) mod terminal;
pub(crate) mod text;
pub(crate) mod theme;
pub(crate) mod ui;

pub use crate::{
    catalog::{Catalog, Slide},
    config::{Config, ConfigLoadError, ThemeSelection},
    deck::ThemeMode,
    export::{ExportError, ExportOptions, Exporter},
    presenter::{PresentationError, Presenter, PresenterOptions},
    render::properties::WindowSize,
    theme::{
        registry::{LoadThemeError, ThemeRegistry},
        DeckThemes, ThemeError,
    },
};
