// this_file: crates/fontsel-cli/src/main.rs

//! fontsel CLI: list catalogued families, manage favorites and resolve
//! variants to loaded font files.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use fontsel_api::{FamilyRow, FontSelector};
use fontsel_core::{
    FamilyCatalog, FavoriteStore, FontselError, ResourceCache, SelectorConfig, SelectorState,
};
use fontsel_fontdb::FontScanner;
use fontsel_fs::{FsFontLoader, OsFileSystem};
use std::sync::Arc;

/// fontsel: font family selector
#[derive(Parser)]
#[command(name = "fontsel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the per-user location)
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan font directories and list families
    Scan {
        /// Directory to scan, repeatable (overrides configured directories)
        #[arg(long = "dir")]
        dirs: Vec<Utf8PathBuf>,

        /// Only list favorite families
        #[arg(long)]
        favorites_only: bool,

        /// Case-insensitive family name filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Manage the favorites document
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Load a family's variant and print where it came from
    Resolve {
        family: String,

        /// Variant identifier (defaults to the family's first variant)
        variant: Option<String>,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Mark a family as favorite
    Add { name: String },
    /// Unmark a family
    Remove { name: String },
    /// Print the favorite families
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(SelectorConfig::config_path);
    let config = SelectorConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;
    init_logging(cli.verbose || config.debug);

    match cli.command {
        Commands::Scan {
            dirs,
            favorites_only,
            search,
        } => run_scan(config, dirs, favorites_only, search),
        Commands::Favorite { action } => run_favorite(&config, action),
        Commands::Resolve { family, variant } => run_resolve(&config, &family, variant.as_deref()),
    }
}

/// Initialize logging based on verbosity.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn scan_catalog(config: &SelectorConfig, dirs: Vec<Utf8PathBuf>) -> FamilyCatalog {
    let scanner = if dirs.is_empty() {
        FontScanner::from_config(config)
    } else {
        FontScanner::new(dirs)
    };
    log::debug!("Scanning {:?}", scanner.dirs());
    scanner.scan()
}

fn run_scan(
    config: SelectorConfig,
    dirs: Vec<Utf8PathBuf>,
    favorites_only: bool,
    search: Option<String>,
) -> anyhow::Result<()> {
    let catalog = scan_catalog(&config, dirs);
    let selector = FontSelector::new(
        config,
        catalog,
        Arc::new(FsFontLoader::new()),
        Arc::new(OsFileSystem),
    );

    let mut state = SelectorState::default();
    state.filter.favorites_only = favorites_only;
    state.filter.search = search.unwrap_or_default();

    for row in selector.family_rows(&state) {
        let variants = selector.catalog().variants_of(row.index)?.len();
        println!("{}", format_row(&row, variants));
    }
    Ok(())
}

fn format_row(row: &FamilyRow<'_>, variants: usize) -> String {
    format!(
        "{}{} {} ({} variant{})",
        if row.favorite { '*' } else { ' ' },
        if row.multi_component { '+' } else { ' ' },
        row.name,
        variants,
        if variants == 1 { "" } else { "s" }
    )
}

fn run_favorite(config: &SelectorConfig, action: FavoriteAction) -> anyhow::Result<()> {
    let store = FavoriteStore::new(config.favorites_path());
    match action {
        FavoriteAction::Add { name } => {
            store.toggle_favorite(&name, true)?;
            log::info!("Added {} to {}", name, store.path());
        }
        FavoriteAction::Remove { name } => {
            store.toggle_favorite(&name, false)?;
            log::info!("Removed {} from {}", name, store.path());
        }
        FavoriteAction::List => {
            for name in store.load().iter() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn run_resolve(
    config: &SelectorConfig,
    family: &str,
    variant: Option<&str>,
) -> anyhow::Result<()> {
    let catalog = scan_catalog(config, Vec::new());
    let index = catalog
        .find_family(family)
        .ok_or_else(|| FontselError::UnknownFamily(family.to_string()))?;
    let variant = match variant {
        Some(name) => name,
        None => catalog.first_variant(index)?,
    };
    let target = catalog.variant(index, variant)?;

    let mut cache = ResourceCache::new(Arc::new(FsFontLoader::new()), Arc::new(OsFileSystem));
    let handle = cache.resolve(target)?;
    println!("name: {}", handle.name());
    println!("path: {}", handle.filepath());
    println!("size: {} bytes", handle.data().len());
    Ok(())
}
