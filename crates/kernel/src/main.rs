//! menuwalk command-line front end.
//!
//! Renders a menu tree stored as JSON with one of the registered variants.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use menuwalk_kernel::config::Config;
use menuwalk_kernel::menu::options::OptionMap;
use menuwalk_kernel::menu::{MenuRenderer, MenuTree, StaticMenuSource, VariantRegistry};

#[derive(Debug, Parser)]
#[command(name = "menuwalk", version, about = "Render navigation menus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a menu tree to stdout.
    Render {
        /// Variant key (defaults to MENU_DEFAULT_VARIANT).
        #[arg(long)]
        variant: Option<String>,

        /// JSON file holding the menu items, nested or flat.
        #[arg(long)]
        tree: PathBuf,

        /// Location the tree is assigned to.
        #[arg(long, default_value = "primary")]
        location: String,

        /// TOML file with option overrides.
        #[arg(long)]
        options: Option<PathBuf>,

        /// Extra option override as key=value; the value is parsed as JSON
        /// and taken as a plain string otherwise.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// List registered variants and their options.
    Variants,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let registry = VariantRegistry::builtin();
    match cli.command {
        Command::Variants => {
            for variant in registry.all() {
                let keys: Vec<&str> = variant.defaults.keys().map(String::as_str).collect();
                println!("{:<14} {}", variant.key, variant.description);
                println!("{:<14} options: {}", "", keys.join(", "));
            }
        }
        Command::Render {
            variant,
            tree,
            location,
            options,
            set,
        } => {
            let variant = variant.unwrap_or_else(|| config.default_variant.clone());
            let menu = load_tree(&tree)?;
            let options = match options {
                Some(path) => load_options(&path)?,
                None => OptionMap::new(),
            };
            let extra = parse_sets(&set)?;
            info!(
                variant = %variant,
                location = %location,
                items = menu.len(),
                overrides = options.len() + extra.len(),
                "rendering menu"
            );

            let source = StaticMenuSource::new().with(&location, menu);
            let mut renderer = MenuRenderer::new(registry)
                .with_source(Arc::new(source))
                .with_url_policy(config.url_policy());
            if let Some(cache) = config.fragment_cache() {
                renderer = renderer.with_cache(cache);
            }
            let html = renderer
                .render(&variant, &location, &options, &extra)
                .with_context(|| format!("failed to render variant `{variant}`"))?;
            println!("{html}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_tree(path: &Path) -> Result<MenuTree> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read menu tree {}", path.display()))?;
    MenuTree::from_json(&json).with_context(|| format!("invalid menu tree {}", path.display()))
}

fn load_options(path: &Path) -> Result<OptionMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options {}", path.display()))?;
    let table: toml::Table =
        toml::from_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))?;
    match serde_json::to_value(table).context("options are not representable as JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("options file must contain a table"),
    }
}

fn parse_sets(sets: &[String]) -> Result<OptionMap> {
    let mut out = OptionMap::new();
    for set in sets {
        let Some((key, raw)) = set.split_once('=') else {
            bail!("--set expects KEY=VALUE, got `{set}`");
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        out.insert(key.trim().to_string(), value);
    }
    Ok(out)
}
