//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and dataset path before starting
//! the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults shown in each prompt come from [`ServerConfig::from_env`].
///
/// # Errors
///
/// Returns [`ServerError::Prompt`] if reading from the terminal fails, or
/// any error from [`super::run_server`].
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("Bike Usage Visualization Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr)
        .interact_text()?;

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()?;

    let data_path: String = Input::new()
        .with_prompt("Trip dataset (CSV)")
        .default(defaults.data_path.display().to_string())
        .interact_text()?;

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let config = ServerConfig {
        bind_addr,
        port,
        data_path: PathBuf::from(data_path),
    };

    super::run_server(&config).await
}
