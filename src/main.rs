//! User directory service binary
//!
//! ```sh
//! # Run with default config (~/.config/userdir/config.toml)
//! JWT_SECRET=... userdir-service
//!
//! # Custom config path and port
//! userdir-service --config /etc/userdir/config.toml --port 9090
//!
//! # Validate config without starting
//! userdir-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use userdir::config::AppConfig;
use userdir::server::{init_tracing, ServerHandle, ServerOptions};

/// JWT-protected user directory.
#[derive(Parser, Debug)]
#[command(
    name = "userdir-service",
    version,
    about = "Issues JWTs for seeded users and serves a protected user listing",
    long_about = "REST API that authenticates seeded users, issues HS256 JWTs and \
                  lists the user directory to bearer-token holders.\n\n\
                  Default config: ~/.config/userdir/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "USERDIR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(userdir::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        config.jwt_config().validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   JWT issuer  : {}", config.jwt.issuer);
        println!("   JWT audience: {}", config.jwt.audience);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions { config }).await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
