use clap::{Parser, Subcommand, ValueEnum};
use lti_launch::errors::LaunchError;
use lti_launch::model::LaunchOptions;
use lti_launch::services::{LaunchService, Logger, SiteConfig};
use lti_launch::stores::FixtureStore;
use lti_launch::utils::html::HtmlEscaper;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lti-launch", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a launch for a resource link
    Launch {
        /// JSON file with tools, links, users, courses and services
        #[arg(long)]
        fixtures: PathBuf,
        #[arg(long)]
        link: String,
        #[arg(long)]
        user: String,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        #[arg(long)]
        return_url: Option<String>,
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print the resolved custom parameters of a resource link
    Custom {
        #[arg(long)]
        fixtures: PathBuf,
        #[arg(long)]
        link: String,
        #[arg(long)]
        user: String,
    },
}

fn service(fixtures: &Path, logger: &Logger) -> Result<LaunchService, LaunchError> {
    let site = SiteConfig::load()?;
    let store = FixtureStore::new(fixtures).load()?;
    logger.debug("Fixtures loaded", Some(&store.counts()?));
    Ok(LaunchService::from_store(logger.clone(), site, store))
}

fn run(cli: Cli) -> Result<String, LaunchError> {
    let logger = Logger::new("lti");
    match cli.command {
        Commands::Launch {
            fixtures,
            link,
            user,
            format,
            return_url,
            locale,
        } => {
            let service = service(&fixtures, &logger)?;
            let mut options = LaunchOptions::generate();
            if let Some(url) = return_url {
                options = options.with_return_url(url);
            }
            if let Some(locale) = locale {
                options = options.with_locale(locale);
            }
            let result = service.launch_resource_link(&link, &user, options)?;
            match format {
                OutputFormat::Html => Ok(result.message.render_form(&HtmlEscaper)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "message": result.message,
                    "parameters": result.parameters,
                    "claims": result.claims,
                }))?),
            }
        }
        Commands::Custom {
            fixtures,
            link,
            user,
        } => {
            let service = service(&fixtures, &logger)?;
            let custom =
                service.resolve_custom_parameters(&link, &user, LaunchOptions::generate())?;
            Ok(serde_json::to_string_pretty(&custom)?)
        }
    }
}

fn main() {
    match run(Cli::parse()) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("lti-launch: {}", err);
            if let Some(hint) = err.hint.as_deref() {
                eprintln!("hint: {}", hint);
            }
            std::process::exit(1);
        }
    }
}
