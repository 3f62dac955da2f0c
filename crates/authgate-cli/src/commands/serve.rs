//! Start the AuthGate server.

use clap::Args;

use authgate_core::config::AppConfig;
use authgate_core::error::AppError;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the session lifetime in seconds
    #[arg(long)]
    pub session_ttl: Option<u64>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ttl) = args.session_ttl {
        config.session.ttl_seconds = ttl;
    }
    config.validate()?;

    println!("Starting AuthGate server...");
    output::print_kv("Address", &config.server.bind_address());
    output::print_kv("User directory", &config.database.provider.to_string());
    output::print_kv("Session TTL (s)", &config.session.ttl_seconds.to_string());

    authgate_api::run_server(config).await
}
