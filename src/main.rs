use clap::{Parser, Subcommand};
use runners::core::RunnersError;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "runners")]
#[command(about = "Publish library resources when their content changes")]
#[command(version)]
struct Cli {
    /// Load configuration from this file instead of the per-user default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a file into the repository's resources and record its hash
    AddFile {
        /// File to add
        #[arg(long)]
        file: PathBuf,
        /// Name inside the resources directory (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
        /// Library (project) name
        #[arg(long)]
        library: String,
        /// Git repository to clone
        #[arg(long)]
        repo: String,
    },
    /// Build, pack and publish a library carrying a single resource file
    PushFile {
        /// File to publish
        #[arg(long)]
        file: PathBuf,
        /// Name inside the resources directory (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
        /// Library (project) name
        #[arg(long)]
        library: String,
        /// Git repository to clone
        #[arg(long)]
        repo: String,
    },
    /// Build, pack and publish a library carrying a resource directory
    PushDirectory {
        /// Directory inside the resources directory to fill
        #[arg(long)]
        resources_dir: String,
        /// Directory whose contents are published
        #[arg(long)]
        source: PathBuf,
        /// Library (project) name
        #[arg(long)]
        library: String,
        /// Git repository to clone
        #[arg(long)]
        repo: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling...");
            signal_token.cancel();
        }
    });

    let result = match cli.command {
        Commands::AddFile {
            file,
            name,
            library,
            repo,
        } => {
            cli::add_file::run(
                cli::add_file::AddFileOptions {
                    file,
                    name,
                    library,
                    repo,
                },
                config_path,
                &cancel,
            )
            .await
        }
        Commands::PushFile {
            file,
            name,
            library,
            repo,
        } => {
            cli::push_file::run(
                cli::push_file::PushFileOptions {
                    file,
                    name,
                    library,
                    repo,
                },
                config_path,
                &cancel,
            )
            .await
        }
        Commands::PushDirectory {
            resources_dir,
            source,
            library,
            repo,
        } => {
            cli::push_directory::run(
                cli::push_directory::PushDirectoryOptions {
                    resources_dir,
                    source,
                    library,
                    repo,
                },
                config_path,
                &cancel,
            )
            .await
        }
    };

    // Handle result and exit codes
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunnersError::Cancelled) => {
            eprintln!("\nCancelled.");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("\n{}", runners::core::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
