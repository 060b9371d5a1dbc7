mod api;
mod cli;
mod commands;
mod rc_file;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

use api::client::HubEndpoints;
use api::validator::HubValidator;
use commands::configure::{InquirePrompter, RcFilePersister};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Configure {
            client_id,
            client_secret,
            no_metrics,
            token_url,
            token_audience,
            hub_url,
        } => {
            let persister = RcFilePersister::default();
            let validator = HubValidator::for_persister(
                HubEndpoints {
                    token_url,
                    audience: token_audience,
                    hub_url,
                },
                &persister,
            );
            commands::configure::run(
                client_id,
                client_secret,
                no_metrics,
                &mut InquirePrompter,
                &persister,
                &validator,
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
