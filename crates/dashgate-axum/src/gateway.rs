//! Gateway lifecycle: bind, serve in the background, stop.
//!
//! The gateway moves through `Unbound -> Listening -> Stopped` and never goes
//! back. Binding happens before anything is spawned so the caller always
//! learns the real address (the requested port may be 0). Stopping closes the
//! event stream first, so long-lived subscriber responses finish, then shuts
//! the listener and every open connection.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, Span, debug, debug_span, error, info, trace, warn};

use crate::error::GatewayError;
use crate::routes::{RouterDeps, create_router};
use crate::stream::EventStream;

/// Default deadline for a client to finish sending request headers.
pub const DEFAULT_HEADER_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Default time `stop` waits for connection tasks to wind down.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Pause after a failed `accept` (e.g. file descriptor exhaustion).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Tuning and logging context for a gateway.
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Deadline for reading request headers on HTTP/1 connections.
    pub header_read_timeout: Duration,
    /// How long `stop` waits for open connections to close.
    pub shutdown_grace: Duration,
    /// Span every gateway log line and connection task is recorded under.
    pub span: Span,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            header_read_timeout: DEFAULT_HEADER_READ_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            span: tracing::info_span!("dashboard"),
        }
    }
}

impl GatewayOptions {
    /// Use `span` as the gateway's logger.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, not yet bound.
    Unbound,
    /// Serving on the given address.
    Listening {
        /// Address the listener is bound to.
        addr: SocketAddr,
    },
    /// Stopped for good.
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => write!(f, "Unbound"),
            Self::Listening { addr } => write!(f, "Listening on {addr}"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Handle to a running accept loop.
struct ServerHandle {
    /// Cancels the accept loop and every connection.
    cancel: CancellationToken,
    /// Tracks connection tasks.
    tracker: TaskTracker,
    /// The accept loop task.
    accept_task: JoinHandle<()>,
    /// Address the listener is bound to.
    bound_addr: SocketAddr,
}

impl ServerHandle {
    async fn shutdown(self, grace: Duration) -> Result<(), GatewayError> {
        self.cancel.cancel();

        match self.accept_task.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => debug!("Accept loop was already cancelled"),
            Err(e) => return Err(GatewayError::Close(e.to_string())),
        }

        self.tracker.close();
        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            warn!(
                open = self.tracker.len(),
                "Connections still open after shutdown grace period"
            );
        }
        Ok(())
    }
}

enum Lifecycle {
    Unbound,
    Listening(ServerHandle),
    Stopped,
}

/// The dashboard HTTP gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = Gateway::new(deps, GatewayOptions::default());
/// let addr = gateway.listen_and_serve("127.0.0.1:0").await?;
/// println!("Dashboard at http://{addr}/");
/// gateway.stop().await?;
/// ```
pub struct Gateway {
    router: Router,
    events: Arc<dyn EventStream>,
    options: GatewayOptions,
    lifecycle: Mutex<Lifecycle>,
}

impl Gateway {
    /// Build the router and wrap it in an unbound gateway.
    pub fn new(deps: RouterDeps, options: GatewayOptions) -> Self {
        let events = Arc::clone(&deps.events);
        Self {
            router: create_router(deps),
            events,
            options,
            lifecycle: Mutex::new(Lifecycle::Unbound),
        }
    }

    /// The request router, for serving in-process without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        match &*self.lifecycle.lock().await {
            Lifecycle::Unbound => LifecycleState::Unbound,
            Lifecycle::Listening(handle) => LifecycleState::Listening {
                addr: handle.bound_addr,
            },
            Lifecycle::Stopped => LifecycleState::Stopped,
        }
    }

    /// Bound address while listening.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match self.state().await {
            LifecycleState::Listening { addr } => Some(addr),
            _ => None,
        }
    }

    /// Bind `address` and start serving in the background.
    ///
    /// Returns as soon as the listener is bound, with the resolved address.
    /// A failed bind leaves the gateway unbound.
    pub async fn listen_and_serve(&self, address: &str) -> Result<SocketAddr, GatewayError> {
        let mut lifecycle = self.lifecycle.lock().await;
        match &*lifecycle {
            Lifecycle::Unbound => {}
            Lifecycle::Listening(handle) => {
                return Err(GatewayError::AlreadyListening(handle.bound_addr));
            }
            Lifecycle::Stopped => return Err(GatewayError::Stopped),
        }

        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| GatewayError::Bind {
                address: address.to_string(),
                source,
            })?;
        let bound_addr = listener.local_addr().map_err(GatewayError::LocalAddr)?;

        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();
        let builder = Arc::new(connection_builder(self.options.header_read_timeout));

        let accept_task = tokio::spawn(
            accept_loop(
                listener,
                self.router.clone(),
                builder,
                cancel.clone(),
                tracker.clone(),
            )
            .instrument(self.options.span.clone()),
        );

        info!(parent: &self.options.span, addr = %bound_addr, "Gateway listening");

        *lifecycle = Lifecycle::Listening(ServerHandle {
            cancel,
            tracker,
            accept_task,
            bound_addr,
        });
        Ok(bound_addr)
    }

    /// Close the event stream, then the server.
    ///
    /// Stopping a gateway that is already stopped, or was never started,
    /// succeeds. Not meant to be called concurrently with itself.
    pub async fn stop(&self) -> Result<(), GatewayError> {
        let mut lifecycle = self.lifecycle.lock().await;
        let previous = std::mem::replace(&mut *lifecycle, Lifecycle::Stopped);

        match previous {
            Lifecycle::Stopped => {
                debug!(parent: &self.options.span, "Gateway already stopped");
                Ok(())
            }
            Lifecycle::Unbound => {
                self.events.close();
                info!(parent: &self.options.span, "Gateway stopped before serving");
                Ok(())
            }
            Lifecycle::Listening(handle) => {
                let addr = handle.bound_addr;
                self.events.close();
                handle
                    .shutdown(self.options.shutdown_grace)
                    .instrument(self.options.span.clone())
                    .await?;
                info!(parent: &self.options.span, addr = %addr, "Gateway stopped");
                Ok(())
            }
        }
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        if let Lifecycle::Listening(handle) = self.lifecycle.get_mut() {
            handle.cancel.cancel();
        }
    }
}

fn connection_builder(header_read_timeout: Duration) -> auto::Builder<TokioExecutor> {
    let mut builder = auto::Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(header_read_timeout);
    builder
}

async fn accept_loop(
    listener: TcpListener,
    router: Router,
    builder: Arc<auto::Builder<TokioExecutor>>,
    cancel: CancellationToken,
    tracker: TaskTracker,
) {
    loop {
        let (stream, peer) = tokio::select! {
            () = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            },
        };

        let service = TowerToHyperService::new(router.clone());
        let builder = Arc::clone(&builder);
        let cancel = cancel.clone();

        tracker.spawn(
            async move {
                let connection =
                    builder.serve_connection_with_upgrades(TokioIo::new(stream), service);
                tokio::select! {
                    result = connection => {
                        if let Err(e) = result {
                            debug!(error = %e, "Connection ended with error");
                        }
                    }
                    () = cancel.cancelled() => trace!("Connection closed by shutdown"),
                }
            }
            .instrument(debug_span!("connection", peer = %peer)),
        );
    }

    drop(listener);
    tracker.close();
    debug!("Accept loop stopped");
}
