//! Recent Items CLI - catalogs recent documents and Jump List destinations.
//!
//! Owns the component runtime for the process, loads the user settings and
//! prints what the core library finds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recent_items::platform::{self, ComRuntime};
use recent_items::{
    CatalogBuilder, CatalogItem, JumpList, JumpListConfig, ListType, RecentDocsStore, Settings,
    ShellHost,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "recent-items")]
#[command(about = "Catalog recent items and Jump Lists")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the catalog from every enabled source
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the destinations of one application's Jump List
    JumpList {
        /// Application user model id
        app_id: String,

        /// pinned, recent or frequent
        #[arg(short, long, default_value = "recent")]
        list: ListType,

        /// Maximum number of destinations
        #[arg(short, long, default_value_t = JumpListConfig::DEFAULT_MAX_ENTRIES)]
        max: u32,
    },
    /// Print the effective settings
    Settings,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; RUST_LOG overrides --debug
    let default_filter = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let settings_path = match args.settings {
        Some(path) => path,
        None => platform::settings_path()?,
    };
    debug!("Settings file: {}", settings_path.display());
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    match args.command {
        Command::Catalog { json } => {
            // Without a runtime only the Jump Lists are lost.
            let runtime = match ComRuntime::initialize() {
                Ok(runtime) => Some(runtime),
                Err(e) => {
                    warn!("Component runtime unavailable, Jump Lists disabled: {}", e);
                    None
                }
            };
            let sources = Sources::discover(&settings, runtime.as_ref());
            print_catalog(&sources.build(&settings), json)?;
        }
        Command::JumpList { app_id, list, max } => {
            let _runtime = ComRuntime::initialize()?;
            let host = platform::default_shell_host()?;
            let jump_list = JumpList::new(host.as_ref(), app_id.as_str())?;
            info!("Reading {} list of {} ({})", list, app_id, jump_list.generation());
            for path in jump_list.paths(list, max) {
                println!("{}", path.display());
            }
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

/// The catalog sources available in this session.
struct Sources {
    recent_dir: Option<PathBuf>,
    shell_host: Option<Box<dyn ShellHost>>,
    recent_docs: Option<Box<dyn RecentDocsStore>>,
}

impl Sources {
    fn discover(settings: &Settings, runtime: Option<&ComRuntime>) -> Self {
        let recent_dir = match platform::recent_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                debug!("No Recent folder: {}", e);
                None
            }
        };

        let shell_host = match runtime.map(|_| platform::default_shell_host()) {
            Some(Ok(host)) => Some(host),
            Some(Err(e)) if settings.scan_jump_lists => {
                warn!("Jump Lists unavailable: {}", e);
                None
            }
            _ => None,
        };

        let recent_docs = match platform::default_recent_docs() {
            Ok(store) => Some(store),
            Err(e) if settings.scan_recent_docs => {
                warn!("RecentDocs unavailable: {}", e);
                None
            }
            Err(_) => None,
        };

        Self {
            recent_dir,
            shell_host,
            recent_docs,
        }
    }

    fn build(&self, settings: &Settings) -> Vec<CatalogItem> {
        let mut builder = CatalogBuilder::new(settings);
        if let Some(dir) = &self.recent_dir {
            builder = builder.with_recent_dir(dir.clone());
        }
        if let Some(host) = &self.shell_host {
            builder = builder.with_shell_host(host.as_ref());
        }
        if let Some(store) = &self.recent_docs {
            builder = builder.with_recent_docs(store.as_ref());
        }
        builder.build()
    }
}

fn print_catalog(items: &[CatalogItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    for item in items {
        println!("{}\t{}", item.label, item.short_desc);
    }
    Ok(())
}
