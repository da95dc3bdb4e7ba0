use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sourcecheck_core::config::{api_url_from_env_value, request_timeout_from_env_value};
use sourcecheck_core::{AppController, ClientConfig, ConfigLoader, Phase, classify};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod session;

#[derive(Parser)]
#[command(name = "sourcecheck")]
#[command(about = "Check claims against a source document with the SourceCheck service")]
struct Cli {
    /// Service base URL (overrides SOURCECHECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate claims against a source document
    Validate(ValidateArgs),
    /// Check that the service is up
    Health,
    /// Print the default schema and policies served by the service
    Defaults,
    /// Print the display bucket for a score
    Classify {
        /// Confidence score, normally between 0 and 1
        score: f64,
    },
    /// Edit inputs and validate interactively
    Session {
        /// Start with empty source and claims instead of the demo earnings call
        #[arg(long)]
        blank: bool,
    },
}

#[derive(Args)]
struct ValidateArgs {
    /// Source document text
    #[arg(long, conflicts_with = "source_file", required_unless_present = "source_file")]
    source: Option<String>,
    /// Read the source document from a file
    #[arg(long)]
    source_file: Option<PathBuf>,
    /// Claims, as plain text or a JSON document
    #[arg(long, conflicts_with = "claims_file", required_unless_present = "claims_file")]
    claims: Option<String>,
    /// Read the claims from a file
    #[arg(long)]
    claims_file: Option<PathBuf>,
    /// Schema document to use instead of the service default
    #[arg(long)]
    schema_file: Option<PathBuf>,
    /// Policies document to use instead of the service default
    #[arg(long)]
    policies_file: Option<PathBuf>,
    /// Print the raw result document
    #[arg(long)]
    json: bool,
}

/// Entry point for the SourceCheck client.
///
/// # Environment Variables
/// - `SOURCECHECK_API_URL`: service base URL (default: "http://localhost:8000")
/// - `SOURCECHECK_TIMEOUT_SECS`: per-request deadline in seconds (default: none)
/// - `RUST_LOG`: log filter; logs go to stderr
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sourcecheck=info".parse()?)
                .add_directive("sourcecheck_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api_url = api_url_from_env_value(
        cli.api_url.or_else(|| std::env::var("SOURCECHECK_API_URL").ok()),
    );
    let timeout =
        request_timeout_from_env_value(std::env::var("SOURCECHECK_TIMEOUT_SECS").ok())?;
    let config = Arc::new(ClientConfig::new(&api_url)?.with_request_timeout(timeout));

    match config.request_timeout() {
        Some(timeout) => tracing::debug!(
            "using {} with a {:?} request timeout",
            config.api_url(),
            timeout
        ),
        None => tracing::debug!("using {} without a request timeout", config.api_url()),
    }

    match cli.command {
        Some(Commands::Validate(args)) => validate(config, args).await?,
        Some(Commands::Health) => {
            let controller = AppController::from_config(config)?;
            let client = controller.client();
            let health = client.health().await?;
            println!(
                "{}: {} (version {}, models loaded: {})",
                client.config().api_url(),
                health.status,
                health.version,
                health.models_loaded
            );
            if !health.is_healthy() {
                anyhow::bail!("service at {} is not healthy", client.config().api_url());
            }
        }
        Some(Commands::Defaults) => {
            let defaults = ConfigLoader::new(config)?.load().await;
            for (name, text) in [("schema", defaults.schema), ("policies", defaults.policies)] {
                println!("# {name}");
                match text {
                    Some(text) => println!("{}", text.trim_end()),
                    None => println!("(unavailable)"),
                }
            }
        }
        Some(Commands::Classify { score }) => {
            println!("{}", classify(Some(score)));
        }
        Some(Commands::Session { blank }) => {
            let mut controller = AppController::from_config(config)?;
            if !blank {
                session::seed_demo(&mut controller);
            }
            session::run(controller).await?;
        }
        None => {
            println!("Use 'sourcecheck --help' for commands");
        }
    }

    Ok(())
}

async fn validate(config: Arc<ClientConfig>, args: ValidateArgs) -> anyhow::Result<()> {
    let mut controller = AppController::from_config(config)?;

    if args.schema_file.is_none() || args.policies_file.is_none() {
        controller.load_defaults().await;
    }
    if let Some(path) = &args.schema_file {
        controller.set_schema_text(read_file(path).await?);
    }
    if let Some(path) = &args.policies_file {
        controller.set_policies_text(read_file(path).await?);
    }

    controller.set_source_text(text_arg(args.source, args.source_file, "source").await?);
    controller.set_claims_input(text_arg(args.claims, args.claims_file, "claims").await?);

    match controller.submit().await? {
        Phase::Success(result) if args.json => {
            println!("{}", serde_json::to_string_pretty(result.as_value())?);
        }
        Phase::Success(result) => {
            print!("{}", render::render_result(result));
        }
        Phase::Error(message) => {
            tracing::warn!("validation ended in error");
            anyhow::bail!("{}", message)
        }
        phase => anyhow::bail!("validation did not complete ({})", render::phase_name(phase)),
    }

    Ok(())
}

async fn text_arg(
    inline: Option<String>,
    file: Option<PathBuf>,
    what: &str,
) -> anyhow::Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => read_file(&path).await,
        (None, None) => anyhow::bail!("missing {}", what),
    }
}

pub(crate) async fn read_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}
