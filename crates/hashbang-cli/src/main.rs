//! hashbang CLI
//!
//! Command-line tool for checking route tables against paths.

mod routes;
mod simulate;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use hashbang_router::{
    match_path, FakeLocation, PatternCompiler, Query, RouteTable, Router, RouterConfig,
};

use crate::routes::RoutesFile;
use crate::simulate::Step;

/// Resolve, link and simulate hash-bang routes.
#[derive(Parser)]
#[command(name = "hashbang")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigable link for a path.
    Link {
        /// Path to link to.
        path: String,

        /// Query parameters as key=value.
        #[arg(short, long = "query")]
        query: Vec<String>,

        /// Routes file supplying the link prefix.
        #[arg(short, long)]
        routes: Option<PathBuf>,
    },

    /// Show which route each path resolves to.
    Resolve {
        /// Routes file (JSON).
        #[arg(short, long)]
        routes: PathBuf,

        /// Paths to resolve.
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Run a navigation script: paths, `back` or `back:<fallback>`.
    Simulate {
        /// Routes file (JSON).
        #[arg(short, long)]
        routes: PathBuf,

        /// Script steps, in order.
        steps: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Link {
            path,
            query,
            routes,
        } => {
            let config = match routes {
                Some(file) => RoutesFile::load(&file)?.config,
                None => RouterConfig::default(),
            };
            let router = Router::with_config(Rc::new(FakeLocation::new()), config)?;
            let query = parse_pairs(&query)?;
            println!("{}", router.link_to(&path, Some(&query)));
        }

        Commands::Resolve { routes, paths } => {
            let file = RoutesFile::load(&routes)?;
            let table = resolve_table(&file)?;
            debug!(routes = table.len(), "routes loaded");

            for path in &paths {
                match match_path(&table, path) {
                    Some(result) => {
                        let params: Vec<String> = result
                            .parameters()
                            .map(|(name, value)| format!("{name}={value}"))
                            .collect();
                        println!("{path} -> {} [{}]", result.route.pattern(), params.join(", "));
                    }
                    None => println!("{path} -> not found"),
                }
            }
        }

        Commands::Simulate { routes, steps } => {
            let file = RoutesFile::load(&routes)?;
            let steps: Vec<Step> = steps.iter().map(|s| Step::parse(s)).collect();
            let transcript = simulate::run(&file, &steps)?;

            for line in &transcript.lines {
                println!("{line}");
            }
            println!("location: /{}", transcript.location);
            println!("history: {}", transcript.history.join(" > "));
        }
    }

    Ok(())
}

/// Builds a bare route table for read-only resolution.
fn resolve_table(file: &RoutesFile) -> Result<RouteTable> {
    let compiler = PatternCompiler::new(file.config.parameter_marker);
    let mut table = RouteTable::new();
    for pattern in &file.routes {
        table.add(compiler, pattern, Rc::new(|_: &[String], _: &Query| {}))?;
    }
    Ok(table)
}

/// Parses `key=value` arguments into a query.
fn parse_pairs(pairs: &[String]) -> Result<Query> {
    let mut query = Query::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("query parameter `{pair}` must be key=value");
        };
        query.insert(key.to_string(), value.to_string());
    }
    Ok(query)
}
