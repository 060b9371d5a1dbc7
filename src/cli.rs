use clap::{ArgAction, Parser, Subcommand};

use crate::api::client::{DEFAULT_HUB_URL, DEFAULT_TOKEN_AUDIENCE, DEFAULT_TOKEN_URL};

/// Metrics stay enabled unless `--no-metrics` is passed.
pub const DEFAULT_NO_METRICS: bool = false;

#[derive(Parser)]
#[command(name = "guardrails")]
#[command(about = "Configure access to the Guardrails Hub")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save client credentials to ~/.guardrailsrc and validate them
    Configure {
        /// Client ID (prompted for when omitted)
        #[arg(long)]
        client_id: Option<String>,

        /// Client secret (prompted for, masked, when omitted)
        #[arg(long)]
        client_secret: Option<String>,

        /// Opt out of anonymous metrics collection
        #[arg(
            long,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_value_t = DEFAULT_NO_METRICS,
            default_missing_value = "true"
        )]
        no_metrics: bool,

        /// OAuth token endpoint used to exchange the credentials
        #[arg(long, env = "GUARDRAILS_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
        token_url: String,

        /// Audience requested with the access token
        #[arg(long, env = "GUARDRAILS_TOKEN_AUDIENCE", default_value = DEFAULT_TOKEN_AUDIENCE)]
        token_audience: String,

        /// Guardrails Hub base URL
        #[arg(long, env = "GUARDRAILS_HUB_URL", default_value = DEFAULT_HUB_URL)]
        hub_url: String,
    },
}
