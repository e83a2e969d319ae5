//! optmerge CLI
//!
//! Entry point for the `optmerge` command-line tool.

use clap::{Parser, Subcommand, ValueEnum};
use optmerge::{
    AssetKind, EffectiveOptions, EngineSettings, Instance, SilentSink, StrategyRegistry,
    TracingSink, WarnSink,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "optmerge")]
#[command(about = "Merge layered component options", version)]
struct Cli {
    /// Path to engine settings (TOML)
    #[arg(long, short = 's', global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge option files (first file lowest) and print the result as JSON
    Merge {
        /// Option layers, TOML or JSON
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Merge for a live instance instead of a type definition
        #[arg(long)]
        instance: bool,

        /// Invoke merged data/provide producers and print their results
        #[arg(long)]
        evaluate: bool,
    },

    /// Resolve a named asset in the merged options
    Resolve {
        /// Option layers, TOML or JSON
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Asset category
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Asset name (exact, camelCase or PascalCase spelling)
        #[arg(long)]
        name: String,
    },

    /// List field names with a registered merge strategy
    Strategies,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Component,
    Directive,
    Filter,
}

impl From<KindArg> for AssetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Component => AssetKind::Component,
            KindArg::Directive => AssetKind::Directive,
            KindArg::Filter => AssetKind::Filter,
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref());

    match cli.command {
        Commands::Merge {
            files,
            instance,
            evaluate,
        } => {
            run_merge(&files, &settings, instance, evaluate);
        }
        Commands::Resolve { files, kind, name } => {
            run_resolve(&files, &settings, kind.into(), &name);
        }
        Commands::Strategies => {
            run_strategies();
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("OPTMERGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> EngineSettings {
    match path {
        Some(path) => match EngineSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error loading settings: {}", e);
                process::exit(1);
            }
        },
        None => EngineSettings::default(),
    }
}

fn build_effective(
    files: &[PathBuf],
    settings: &EngineSettings,
    instance: bool,
) -> EffectiveOptions {
    let paths: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    let vm = instance.then(|| Instance::new(1).with_name("optmerge"));

    let effective = match EffectiveOptions::build(&paths, settings, vm) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error merging options: {}", e);
            process::exit(1);
        }
    };

    for warning in &effective.warnings {
        tracing::warn!(code = warning.diagnostic.code(), "{}", warning.message);
    }
    effective
}

fn run_merge(files: &[PathBuf], settings: &EngineSettings, instance: bool, evaluate: bool) {
    let effective = build_effective(files, settings, instance);

    match effective.to_json(evaluate) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error rendering options: {}", e);
            process::exit(1);
        }
    }
}

fn run_resolve(files: &[PathBuf], settings: &EngineSettings, kind: AssetKind, name: &str) {
    let effective = build_effective(files, settings, false);
    let sink: &dyn WarnSink = if settings.silent {
        &SilentSink
    } else {
        &TracingSink
    };

    match effective.resolve_or_warn(kind, name, sink) {
        Some(asset) => match serde_json::to_string_pretty(&asset.to_json()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        },
        None => process::exit(1),
    }
}

fn run_strategies() {
    let registry = StrategyRegistry::with_defaults();
    for field in registry.fields() {
        println!("{}", field);
    }
}
