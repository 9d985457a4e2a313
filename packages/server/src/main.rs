#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Campus safety API server binary.

use std::path::PathBuf;

use campus_safety_server::config::ServerConfig;
use clap::Parser;

/// Serve the campus safety API.
///
/// Settings come from `BIND_ADDR`, `PORT`, `SERVICE_NAME` and
/// `STATIC_DIR`; flags override the environment.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind to.
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Directory of frontend assets to serve under `/static`.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Prompt for settings before starting.
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn into_config(self, env: ServerConfig) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind.unwrap_or(env.bind_addr),
            port: self.port.unwrap_or(env.port),
            static_dir: self.static_dir.or(env.static_dir),
            service_name: env.service_name,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let args = Args::parse();
    let interactive = args.interactive;
    let config = args.into_config(ServerConfig::from_env());

    if interactive {
        campus_safety_server::interactive::run(config).await
    } else {
        campus_safety_server::run_server(config).await
    }
}
