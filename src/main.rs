//! ditto - CLI entry point.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ditto::config::Settings;
use ditto::context::CallContext;
use ditto::git::{Git, GitHubCli};
use ditto::llm::ProviderRegistry;
use ditto::workflow::{CommitRequest, PrRequest, run_commit, run_pr};

/// Environment variable holding a tracing filter directive.
const LOG_ENV_VAR: &str = "DITTO_LOG";

/// Write commit messages and pull requests from your changes with an LLM.
#[derive(Parser, Debug)]
#[command(name = "ditto")]
#[command(about = "Write commit messages and pull requests from your changes with an LLM")]
#[command(version)]
struct Cli {
    /// Provider used for generation (see `ditto providers`)
    #[arg(long, global = true, env = "DITTO_PROVIDER", default_value = "gemini")]
    provider: String,

    /// Additional context passed to the model
    #[arg(long, global = true, default_value = "")]
    prompt: String,

    /// Issues addressed by the change, comma separated (e.g. "#12,#40")
    #[arg(long, global = true, value_delimiter = ',')]
    issues: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message from staged changes and open `git commit`
    Commit(CommitArgs),
    /// Generate a pull request title and body from a branch and open `gh pr create`
    Pr(PrArgs),
    /// List the available providers
    Providers,
}

#[derive(Args, Debug)]
struct CommitArgs {
    /// Amend the previous commit with the current changes
    #[arg(long)]
    amend: bool,

    /// Commit all tracked files, staged or not
    #[arg(short, long)]
    all: bool,
}

#[derive(Args, Debug)]
struct PrArgs {
    /// Branch the pull request merges into
    #[arg(long, default_value = ditto::workflow::pr::DEFAULT_BASE_BRANCH)]
    base: String,

    /// Branch with the changes (defaults to the current branch)
    #[arg(long)]
    head: Option<String>,

    /// Ignore any pull request template defined in the repository
    #[arg(long)]
    no_template: bool,

    /// Open the pull request as a draft
    #[arg(long)]
    draft: bool,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("ditto=debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env before parsing so DITTO_PROVIDER and friends can come from it.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_env();
    let registry = ProviderRegistry::builtin(&settings);

    if let Command::Providers = cli.command {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let backend = registry
        .get(&cli.provider)
        .with_context(|| format!("Unknown provider '{}'", cli.provider))?;

    let ctx = CallContext::new();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, canceling...");
            interrupt.cancel();
        }
    });

    let git = Git::new();

    match cli.command {
        Command::Commit(args) => {
            let request = CommitRequest {
                amend: args.amend,
                all: args.all,
                issues: cli.issues,
                additional_context: cli.prompt,
            };
            run_commit(&ctx, &git, backend.as_ref(), &request, settings.timeout)
                .await
                .context("Failed to create commit")?;
        }
        Command::Pr(args) => {
            let request = PrRequest {
                base: args.base,
                head: args.head,
                no_template: args.no_template,
                draft: args.draft,
                issues: cli.issues,
                additional_context: cli.prompt,
            };
            run_pr(
                &ctx,
                &git,
                &GitHubCli::new(),
                backend.as_ref(),
                &request,
                settings.timeout,
            )
            .await
            .context("Failed to open pull request")?;
        }
        Command::Providers => {}
    }

    Ok(())
}
