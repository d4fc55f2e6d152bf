use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use directories::ProjectDirs;
use pitchdeck::{
    Catalog, Config, ConfigLoadError, DeckThemes, ExportOptions, Exporter, Presenter, PresenterOptions, ThemeError,
    ThemeMode, ThemeRegistry, ThemeSelection, WindowSize,
};
use std::{
    env,
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "pitchdeck";
const LOG_ENV_VAR: &str = "PITCHDECK_LOG";
const DEFAULT_LOG_DIRECTIVE: &str = "pitchdeck=info";
const BACKGROUND_QUERY_TIMEOUT: Duration = Duration::from_millis(100);

/// Present the HomeVisor pitch deck from your terminal.
#[derive(Parser)]
#[command(author, version, about = create_splash())]
struct Cli {
    /// The theme to start with.
    #[clap(short, long)]
    theme: Option<ThemeSelection>,

    /// The slide to start at, starting from 1.
    #[clap(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    slide: Option<u32>,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// Write logs to this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Print every slide as plain text rather than presenting the deck.
    #[clap(short, long)]
    export: bool,

    /// Print an outline of every slide as JSON.
    #[clap(long)]
    list_slides: bool,

    /// The width in columns used when exporting.
    #[clap(long, default_value_t = 120)]
    columns: u16,

    /// The height in rows used when exporting.
    #[clap(long, default_value_t = 40)]
    rows: u16,
}

fn create_splash() -> String {
    let crate_version = env!("CARGO_PKG_VERSION");

    format!(
        r#"
  ⌂ HomeVisor v{crate_version}
    The home ownership operating system, pitched from your terminal
"#,
    )
}

fn configs_path() -> Option<PathBuf> {
    match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Some(Path::new(&path).join(APP_NAME)),
        Err(_) => ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().into()),
    }
}

fn load_config(configs_path: Option<&Path>, config_file_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let explicit = config_file_path.is_some();
    let Some(path) = config_file_path.or_else(|| configs_path.map(|path| path.join("config.yaml"))) else {
        return Ok(Config::default());
    };
    match Config::load(&path) {
        Ok(config) => Ok(config),
        // Only a config file the user pointed us at has to exist.
        Err(ConfigLoadError::NotFound) if !explicit => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("loading config file {}", path.display())),
    }
}

fn load_themes(configs_path: Option<&Path>, config: &Config) -> anyhow::Result<DeckThemes> {
    let mut registry = ThemeRegistry::default();
    if let Some(path) = configs_path {
        let themes_path = path.join("themes");
        registry
            .register_from_directory(&themes_path)
            .with_context(|| format!("loading themes from {}", themes_path.display()))?;
    }
    match DeckThemes::load(&registry, &config.defaults.dark_theme, &config.defaults.light_theme) {
        Ok(themes) => Ok(themes),
        Err(ThemeError::NotFound(name)) => {
            let valid_themes = registry.theme_names().join(", ");
            let error_message = format!("invalid theme name '{name}', valid themes are: {valid_themes}");
            Cli::command().error(ErrorKind::InvalidValue, error_message).exit();
        }
        Err(e) => Err(e.into()),
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(Mutex::new(file)).with_ansi(false).init();
    Ok(())
}

fn select_theme_mode(selection: ThemeSelection) -> ThemeMode {
    match selection {
        ThemeSelection::Dark => ThemeMode::Dark,
        ThemeSelection::Light => ThemeMode::Light,
        ThemeSelection::Auto => match termbg::theme(BACKGROUND_QUERY_TIMEOUT) {
            Ok(termbg::Theme::Light) => ThemeMode::Light,
            Ok(termbg::Theme::Dark) => ThemeMode::Dark,
            Err(e) => {
                tracing::warn!("could not detect terminal background, using dark theme: {e}");
                ThemeMode::Dark
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let catalog = Catalog::homevisor();
    if cli.list_slides {
        let slides: Vec<_> = catalog.iter().collect();
        serde_json::to_writer_pretty(io::stdout(), &slides).context("writing slides")?;
        println!();
        return Ok(());
    }

    let configs_path = configs_path();
    let config = load_config(configs_path.as_deref(), cli.config_file.clone())?;
    let themes = load_themes(configs_path.as_deref(), &config)?;
    let theme_mode = select_theme_mode(cli.theme.unwrap_or(config.defaults.theme));
    let max_columns = config.defaults.max_columns;
    tracing::info!("starting in {theme_mode:?} mode");

    if cli.export {
        let dimensions = WindowSize { rows: cli.rows, columns: cli.columns };
        let options = ExportOptions { dimensions, theme_mode, max_columns };
        Exporter::new(&catalog, &themes, options).export(io::stdout().lock()).context("exporting deck")?;
        return Ok(());
    }

    let options = PresenterOptions {
        theme_mode,
        initial_slide: cli.slide.map(|slide| slide as usize - 1).unwrap_or_default(),
        max_columns,
        mouse: config.options.mouse.unwrap_or(true),
        bindings: config.bindings,
    };
    Presenter::new(catalog, themes, options).present()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
