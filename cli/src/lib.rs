use aippt_client::TransportClient;
use aippt_common::{Config, API_KEY_VAR, API_URL_VAR};
use aippt_core::{DeckGenerator, FormInput, StubGenerator};
use aippt_tui::{run_app, AppOptions};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aippt", version)]
#[command(about = "Generate slide decks with an AI presentation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Start with the dark theme
    #[arg(long, global = true)]
    pub dark: bool,

    /// Use the built-in offline generator instead of the service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log file for the interactive app
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive presentation builder (default)
    Interactive,
    /// Generate one deck and print it
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Presentation topic
    #[arg(long, default_value = "")]
    pub topic: String,
    /// What the presentation should achieve
    #[arg(long, default_value = "")]
    pub objective: String,
    /// Who the presentation is for
    #[arg(long, default_value = "")]
    pub audience: String,
    /// Number of slides
    #[arg(long, default_value = "")]
    pub slides: String,
    /// How the content should be split across slides
    #[arg(long, default_value = "")]
    pub breakdown: String,
    /// Output language: en, es, fr, de, it, pt
    #[arg(long, default_value = "en")]
    pub lang: String,
    /// Source document URL
    #[arg(long, default_value = "")]
    pub file_url: String,
    /// Source document type
    #[arg(long, default_value = "pdf")]
    pub file_type: String,
    /// Print the deck as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    fn form_input(&self) -> FormInput {
        FormInput {
            topic: self.topic.clone(),
            objective: self.objective.clone(),
            target_audience: self.audience.clone(),
            n_slides: self.slides.clone(),
            slide_breakdown: self.breakdown.clone(),
            lang: self.lang.clone(),
            file_url: self.file_url.clone(),
            file_type: self.file_type.clone(),
        }
    }
}

enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn init_logging(debug: bool, target: LogTarget, default_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn service_generator(config: &Config) -> Result<Arc<dyn DeckGenerator>> {
    let service = config.require_service().with_context(|| {
        format!("set {API_URL_VAR} and {API_KEY_VAR}, or pass --offline")
    })?;
    let client = TransportClient::new(service)?;
    info!(endpoint = client.endpoint(), "using generation service");
    Ok(Arc::new(client))
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let log_path = cli.log_file.unwrap_or_else(|| config.log_path.clone());
            init_logging(cli.debug, LogTarget::File(log_path), "info")?;

            let generator: Arc<dyn DeckGenerator> = if cli.offline {
                Arc::new(StubGenerator::new().with_delay(Duration::from_millis(800)))
            } else {
                service_generator(&config)?
            };
            run_app(AppOptions {
                generator,
                dark: cli.dark || config.dark_theme,
            })
            .await
        }
        Commands::Generate(args) => {
            init_logging(cli.debug, LogTarget::Stderr, "warn")?;
            generate(args, cli.offline, &config).await
        }
    }
}

async fn generate(args: GenerateArgs, offline: bool, config: &Config) -> Result<()> {
    let request = args
        .form_input()
        .validate()
        .context("invalid generation request")?;

    let generator: Arc<dyn DeckGenerator> = if offline {
        Arc::new(StubGenerator::new())
    } else {
        service_generator(config)?
    };

    let deck = generator
        .generate(&request)
        .await
        .context("Error occurred while generating the presentation")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
    } else {
        print!("{}", deck.to_markdown());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["aippt", "interactive", "--dark"]).unwrap();
        assert!(cli.dark);
        assert!(matches!(cli.command, Some(Commands::Interactive)));

        let cli = Cli::try_parse_from(["aippt", "--dark"]).unwrap();
        assert!(cli.dark);
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["aippt", "generate", "--topic", "Cats"]).unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.topic, "Cats");
        assert_eq!(args.lang, "en");
        assert_eq!(args.file_type, "pdf");
        assert!(!cli.dark);
    }
}
