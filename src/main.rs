//! gearauth is the SSH key and host access layer for gear containers.

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adapters::outbound::accounts::SystemAccounts;
use adapters::outbound::fs::SystemFilesystem;
use application::dto::DistributeKeysRequest;
use application::error::ApplicationError;
use application::ports::inbound::{DistributeKeys, ReconcileUsers};
use application::usecases::{DistributeKeysUseCase, ReconcileUsersUseCase};
use clap::{Parser, Subcommand};
use domain::gear::layout::HostLayout;
use tracing_subscriber::EnvFilter;

use crate::config::Configuration;

#[derive(Parser)]
#[command(name = "gearauth", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a batch of public keys and grant them access.
    Distribute {
        /// YAML document holding the batch request.
        #[arg(long)]
        file: PathBuf,
    },
    /// Remove host accounts whose gear no longer exists.
    Cleanup {
        /// Report candidates without deleting anything.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Configuration::default().path(cli.config).read();

    match cli.command {
        Commands::Distribute { file } => distribute(&file, config.layout()),
        Commands::Cleanup { dry_run } => {
            let job = ReconcileUsersUseCase::new(
                Box::new(SystemAccounts::with_paths(
                    &config.passwd_file,
                    &config.userdel_bin,
                )),
                Box::new(SystemFilesystem::new()),
                config.layout(),
            );
            job.execute(dry_run);
            ExitCode::SUCCESS
        },
    }
}

fn distribute(file: &Path, layout: HostLayout) -> ExitCode {
    let request: DistributeKeysRequest = match std::fs::read_to_string(file)
        .map_err(|err| err.to_string())
        .and_then(|document| {
            serde_yaml::from_str(&document).map_err(|err| err.to_string())
        }) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!(
                file = %file.display(),
                error = %err,
                "unable to read batch request"
            );
            return ExitCode::FAILURE;
        },
    };

    let job =
        DistributeKeysUseCase::new(Box::new(SystemFilesystem::new()), layout);
    match job.execute(&request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ApplicationError::KeysNotCompleted(failed)) => {
            // Machine-readable payload for the dispatcher.
            match serde_json::to_string(&failed) {
                Ok(payload) => println!("{payload}"),
                Err(err) => tracing::error!(
                    error = %err,
                    "unable to serialize failure payload"
                ),
            }
            ExitCode::FAILURE
        },
        Err(err) => {
            tracing::error!(error = %err, "key distribution aborted");
            ExitCode::FAILURE
        },
    }
}
