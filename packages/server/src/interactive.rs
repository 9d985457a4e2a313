//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and an optional static asset
//! directory before starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::config::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Each prompt defaults to the corresponding value of `config`; an empty
/// static directory answer selects the API-only deployment. Delegates to
/// [`super::run_server`] once the user confirms.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    println!("{}", config.service_name);
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(config.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| config.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(config.port)
        .interact_text()
        .unwrap_or(config.port);

    let current_dir = config
        .static_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    let static_dir: String = Input::new()
        .with_prompt("Static asset directory (blank for API only)")
        .default(current_dir.clone())
        .allow_empty(true)
        .interact_text()
        .unwrap_or(current_dir);

    let config = ServerConfig {
        bind_addr,
        port,
        static_dir: Some(static_dir)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from),
        ..config
    };

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{}?",
            config.bind_addr, config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
