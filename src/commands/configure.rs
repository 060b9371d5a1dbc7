use std::path::PathBuf;

use anyhow::{Context, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;

use crate::rc_file;

/// Interactive input for values missing from the command line.
pub trait Prompt {
    fn text(&mut self, label: &str) -> Result<String>;
    fn secret(&mut self, label: &str) -> Result<String>;
}

/// Stores resolved credentials.
pub trait Persist {
    fn save(&self, client_id: &str, client_secret: &str, no_metrics: bool) -> Result<()>;
}

/// Checks the stored credentials with the authentication service.
pub trait Validate {
    async fn validate(&self) -> Result<()>;
}

pub struct InquirePrompter;

impl Prompt for InquirePrompter {
    fn text(&mut self, label: &str) -> Result<String> {
        Text::new(label)
            .prompt()
            .with_context(|| format!("Failed to read {}", label))
    }

    fn secret(&mut self, label: &str) -> Result<String> {
        Password::new(label)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .with_context(|| format!("Failed to read {}", label))
    }
}

pub struct RcFilePersister {
    pub home_dir: fn() -> Option<PathBuf>,
}

impl Default for RcFilePersister {
    fn default() -> Self {
        Self {
            home_dir: dirs::home_dir,
        }
    }
}

impl Persist for RcFilePersister {
    fn save(&self, client_id: &str, client_secret: &str, no_metrics: bool) -> Result<()> {
        rc_file::save_configuration_file(self.home_dir, client_id, client_secret, no_metrics)?;
        Ok(())
    }
}

/// Resolves credentials, saves them, then asks the validator to check them.
///
/// Missing values are prompted for, the id first and then the secret. The
/// validator runs once the file has been written, whatever its outcome.
pub async fn run<P, S, V>(
    client_id: Option<String>,
    client_secret: Option<String>,
    no_metrics: bool,
    prompter: &mut P,
    persister: &S,
    validator: &V,
) -> Result<()>
where
    P: Prompt,
    S: Persist,
    V: Validate,
{
    info!("Configuring...");

    let client_id = match client_id {
        Some(id) => id,
        None => prompter.text("Client ID")?,
    };
    let client_secret = match client_secret {
        Some(secret) => secret,
        None => prompter.secret("Client secret")?,
    };

    persister.save(&client_id, &client_secret, no_metrics)?;

    info!("Validating credentials...");
    validator.validate().await
}
