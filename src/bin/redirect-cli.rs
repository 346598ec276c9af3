use std::path::PathBuf;

use clap::{Parser, Subcommand};
use redirector::config::loader::load_config;
use redirector::config::RedirectorConfig;
use redirector::redirect::{parse_query, RedirectResolver, Resolution};
use redirector::rules::loader::load_rules;
use redirector::site::SiteLinks;

#[derive(Parser)]
#[command(name = "redirect-cli")]
#[command(about = "Offline tools for redirect rule files", long_about = None)]
struct Cli {
    /// Service configuration (site URL, default code). Defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path (with optional query) against a rules file
    Check {
        /// Rules file (TOML or JSON)
        #[arg(short, long)]
        rules: PathBuf,

        /// Request path, e.g. "/old/page?lang=en"
        url: String,
    },
    /// Load a rules file and report problems
    Validate {
        /// Rules file (TOML or JSON)
        rules: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };

    match cli.command {
        Commands::Check { rules, url } => {
            let rules = load_rules(&rules)?;
            let resolver = RedirectResolver::from_config(
                SiteLinks::from_config(&config.site)?,
                &config.redirects,
            );

            let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
            match resolver.resolve(&rules, path, &parse_query(query))? {
                Resolution::Redirect(decision) => {
                    println!("{}", serde_json::to_string_pretty(&decision)?);
                }
                Resolution::NoMatch => {
                    eprintln!("No redirect for {}", url);
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { rules } => match load_rules(&rules) {
            Ok(set) => println!("{}: {} rule(s) OK", rules.display(), set.len()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
