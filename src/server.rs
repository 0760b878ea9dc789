//! HTTP listener lifecycle.
//!
//! [`GatewayServer`] owns the listener task and its shutdown. The sequence is
//! fixed:
//!
//! 1. [`listen_and_serve`](GatewayServer::listen_and_serve) spawns a task that
//!    binds the address and accepts connections. A bind failure is pushed onto
//!    a single-slot error channel instead of being returned.
//! 2. [`shutdown`](GatewayServer::shutdown) waits for whichever comes first:
//!    an error on that channel or the shutdown signal. It then stops accepting
//!    connections and gives in-flight requests the configured grace period to
//!    finish. Connections still open after that are closed.
//!
//! `shutdown` consumes the server, so a server is started and stopped once.
//!
//! Every connection runs on its own task, owned by the listener task. Idle
//! keep-alive connections are closed after `idle_timeout`, and a client gets
//! `read_timeout` to send its request headers.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

use axum::Router;
use axum::http::Request;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use log::{debug, error, info, warn};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tower::Service;

/// Pause after an accept error that is not specific to one connection, such
/// as running out of file descriptors.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP server instance
pub struct GatewayServer {
    config: ServerConfig,
    router: Option<Router>,
    error_tx: mpsc::Sender<ServerError>,
    error_rx: mpsc::Receiver<ServerError>,
    stop_tx: watch::Sender<bool>,
    serving: Option<JoinHandle<()>>,
    bound_tx: Option<watch::Sender<Option<SocketAddr>>>,
    bound_rx: watch::Receiver<Option<SocketAddr>>,
}

impl std::fmt::Debug for GatewayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayServer")
            .field("config", &self.config)
            .field("serving", &self.serving.is_some())
            .field("local_addr", &*self.bound_rx.borrow())
            .finish()
    }
}

impl GatewayServer {
    /// Create a new server for `router` with the given configuration.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let (error_tx, error_rx) = mpsc::channel(1);
        let (stop_tx, _) = watch::channel(false);
        let (bound_tx, bound_rx) = watch::channel(None);
        Self {
            config,
            router: Some(router),
            error_tx,
            error_rx,
            stop_tx,
            serving: None,
            bound_tx: Some(bound_tx),
            bound_rx,
        }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start the listener task and return immediately.
    ///
    /// Must be called from within a Tokio runtime. Calling it a second time
    /// has no effect.
    pub fn listen_and_serve(&mut self) {
        let (Some(router), Some(bound_tx)) = (self.router.take(), self.bound_tx.take()) else {
            warn!("Listener already started");
            return;
        };

        let address = self.config.bind_address();
        let timeouts = ConnectionTimeouts::from(&self.config);
        let error_tx = self.error_tx.clone();
        let stop = self.stop_tx.subscribe();

        // The task owns the only sender, so `local_addr` learns when it exits.
        self.serving = Some(tokio::spawn(async move {
            let listener = match TcpListener::bind(&address).await {
                Ok(listener) => listener,
                Err(source) => {
                    report(&error_tx, ServerError::ListenFailure { address, source });
                    return;
                }
            };

            match listener.local_addr() {
                Ok(local_addr) => {
                    info!("SCIM gateway listening on http://{}", local_addr);
                    bound_tx.send_replace(Some(local_addr));
                }
                Err(e) => warn!("Could not read bound address for {}: {}", address, e),
            }

            accept_connections(listener, router, timeouts, stop).await;
        }));
    }

    /// Address the listener is bound to.
    ///
    /// Waits until the listener task has bound its socket; `None` if it never
    /// will, because binding failed or the listener was not started.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        let mut bound = self.bound_rx.clone();
        if self.serving.is_none() {
            return *bound.borrow();
        }
        bound
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|addr| *addr)
    }

    /// Race listener failures against `signal`, then shut down gracefully.
    ///
    /// Returns `Ok(())` after a signal-triggered shutdown that drained every
    /// in-flight request, [`ServerError::ListenFailure`] when the listener
    /// failed, and [`ServerError::ShutdownTimeout`] when draining took longer
    /// than the configured grace period. In the last case every connection
    /// still open is closed before this returns.
    pub async fn shutdown<F>(mut self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        let trigger = tokio::select! {
            Some(error) = self.error_rx.recv() => Err(error),
            () = signal => Ok(()),
        };

        match &trigger {
            Ok(()) => info!("Shutdown requested, draining in-flight requests"),
            Err(_) => warn!("Listener failed, shutting down"),
        }

        self.stop_tx.send_replace(true);

        if let Some(mut serving) = self.serving.take() {
            let grace_period = self.config.shutdown_timeout;
            if tokio::time::timeout(grace_period, &mut serving).await.is_err() {
                // Dropping the listener task drops its JoinSet, which aborts
                // every connection task.
                serving.abort();
                error!(
                    "In-flight requests still running after {:?}, closing their connections",
                    grace_period
                );
                return Err(ServerError::ShutdownTimeout { grace_period });
            }
        }

        // The listener may also have failed while draining.
        if trigger.is_ok() {
            if let Ok(error) = self.error_rx.try_recv() {
                error!("{}", error);
                return Err(error);
            }
        }

        info!("Server shutdown complete");
        trigger
    }
}

fn report(error_tx: &mpsc::Sender<ServerError>, error: ServerError) {
    error!("{}", error);
    if error_tx.try_send(error).is_err() {
        warn!("Listener error dropped, an earlier error is still pending");
    }
}

#[derive(Debug, Clone, Copy)]
struct ConnectionTimeouts {
    read: Duration,
    idle: Duration,
}

impl From<&ServerConfig> for ConnectionTimeouts {
    fn from(config: &ServerConfig) -> Self {
        Self {
            read: config.read_timeout,
            idle: config.idle_timeout,
        }
    }
}

/// Accept connections until `stop` flips, then wait for the open ones.
async fn accept_connections(
    listener: TcpListener,
    router: Router,
    timeouts: ConnectionTimeouts,
    mut stop: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();

    loop {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = stop.wait_for(|stopping| *stopping) => break,
            Some(_) = connections.join_next(), if !connections.is_empty() => continue,
        };

        match accepted {
            Ok((stream, remote)) => {
                connections.spawn(serve_connection(
                    stream,
                    remote,
                    router.clone(),
                    timeouts,
                    stop.clone(),
                ));
            }
            Err(e) if is_connection_error(&e) => debug!("Connection dropped while accepting: {}", e),
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }

    drop(listener);
    if !connections.is_empty() {
        info!("Waiting for {} open connection(s)", connections.len());
    }
    while connections.join_next().await.is_some() {}
}

fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

/// Serve one HTTP/1.1 connection until the client leaves, it idles out or
/// the server stops.
async fn serve_connection(
    stream: TcpStream,
    remote: SocketAddr,
    router: Router,
    timeouts: ConnectionTimeouts,
    mut stop: watch::Receiver<bool>,
) {
    let (in_flight_tx, in_flight_rx) = watch::channel(0usize);
    let in_flight_tx = Arc::new(in_flight_tx);

    let service = service_fn(move |request: Request<Incoming>| {
        let guard = InFlight::enter(Arc::clone(&in_flight_tx));
        let response = router.clone().call(request);
        async move {
            let response = response.await;
            drop(guard);
            response
        }
    });

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(timeouts.read);
    let connection = builder.serve_connection(TokioIo::new(stream), service);
    tokio::pin!(connection);

    let result = tokio::select! {
        result = connection.as_mut() => result,
        () = close_requested(&mut stop, in_flight_rx, timeouts.idle) => {
            connection.as_mut().graceful_shutdown();
            connection.await
        }
    };

    if let Err(e) = result {
        debug!("Connection from {} ended with error: {}", remote, e);
    }
}

/// Counts a request as in flight for as long as it is alive.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn enter(counter: Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|count| *count += 1);
        Self(counter)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|count| *count = count.saturating_sub(1));
    }
}

async fn close_requested(
    stop: &mut watch::Receiver<bool>,
    in_flight: watch::Receiver<usize>,
    idle_timeout: Duration,
) {
    tokio::select! {
        _ = stop.wait_for(|stopping| *stopping) => {}
        () = idle_expired(in_flight, idle_timeout) => debug!("Closing idle connection"),
    }
}

/// Resolve once no request has been in flight for `idle_timeout`.
async fn idle_expired(mut in_flight: watch::Receiver<usize>, idle_timeout: Duration) {
    loop {
        if in_flight.wait_for(|count| *count == 0).await.is_err() {
            return;
        }
        tokio::select! {
            () = tokio::time::sleep(idle_timeout) => return,
            changed = in_flight.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
///
/// The handlers are installed when this is called, not when the future is
/// first polled, so a signal sent while the listener starts is not lost.
/// Must be called within a Tokio runtime. A handler that cannot be installed
/// is logged and never fires; the other one still does.
#[cfg(unix)]
pub fn termination_signal() -> impl Future<Output = ()> + Send + 'static {
    use tokio::signal::unix::{SignalKind, signal};

    let interrupt = signal(SignalKind::interrupt());
    let terminate = signal(SignalKind::terminate());
    async move {
        tokio::select! {
            () = receive(interrupt, "SIGINT") => info!("Received SIGINT"),
            () = receive(terminate, "SIGTERM") => info!("Received SIGTERM"),
        }
    }
}

#[cfg(unix)]
async fn receive(stream: io::Result<tokio::signal::unix::Signal>, name: &'static str) {
    match stream {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            error!("Failed to install {} handler: {}", name, e);
            std::future::pending::<()>().await;
        }
    }
}

/// Wait for Ctrl+C.
#[cfg(not(unix))]
pub fn termination_signal() -> impl Future<Output = ()> + Send + 'static {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C");
    }
}
