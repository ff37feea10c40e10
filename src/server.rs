//! Server runtime
//!
//! [`ServerHandle`] owns the whole process lifecycle: JWT config validation,
//! store construction, seeding, the REST API and graceful shutdown. Any
//! startup failure is returned before the listener is bound, so a
//! misconfigured process never accepts traffic.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::application::{DataSeeder, IdentityService, PlaintextCredentialVerifier, UserSeeder};
use crate::config::AppConfig;
use crate::create_api_router;
use crate::domain::{Store, User};
use crate::infrastructure::crypto::jwt::{JwtConfig, TokenIssuer};
use crate::infrastructure::InMemoryStore;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::shared::AppResult;

/// Options for starting the service.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    pub config: AppConfig,
}

/// Wire the identity stack: validated signer, seeded store, verifier.
///
/// Fails with a configuration error for an unusable JWT config and with a
/// seeding error if the bootstrap users could not be stored.
pub fn build_identity(jwt_config: JwtConfig) -> AppResult<Arc<IdentityService>> {
    let issuer = TokenIssuer::new(jwt_config)?;
    info!(
        issuer = %issuer.config().issuer,
        audience = %issuer.config().audience,
        "JWT configured with {} minute token lifetime",
        issuer.config().expiration_minutes
    );

    let store: Arc<dyn Store<User>> = Arc::new(InMemoryStore::<User>::new());
    UserSeeder::new(Arc::clone(&store)).seed()?;

    let verifier = Arc::new(PlaintextCredentialVerifier::new(Arc::clone(&store)));
    Ok(Arc::new(IdentityService::new(store, verifier, issuer)))
}

/// Handle to a running service.
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,
    pub identity: Arc<IdentityService>,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;

        info!("Starting user directory service...");

        let identity = match build_identity(config.jwt_config()) {
            Ok(identity) => identity,
            Err(e) => {
                error!("Startup aborted: {}", e);
                return Err(e.into());
            }
        };
        info!("User store ready with {} users", identity.user_count());

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_router = create_api_router(Arc::clone(&identity));

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            identity,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `shutdown_timeout` seconds before the task is
    /// abandoned.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        info!("Waiting up to {}s for in-flight requests...", timeout.as_secs());

        let abort = self.api_task.abort_handle();
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("Shutdown timed out, aborting REST API server");
                abort.abort();
            }
        }

        info!("User directory service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the config.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
