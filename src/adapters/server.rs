use crate::adapters::http::{route, AppState};
use crate::utils::error::{FortuneError, Result};
use std::future::Future;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tiny_http::{Header, Request, Response, Server};

/// Request bodies beyond this are cut off before parsing.
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// HTTP front door: a `tiny_http` listener drained by a fixed pool of
/// worker threads, each feeding requests into [`route`].
#[derive(Clone)]
pub struct FortuneServer {
    server: Arc<Server>,
    state: Arc<AppState>,
    shutting_down: Arc<AtomicBool>,
    workers: usize,
}

/// Stops a running [`FortuneServer`] from another thread or task.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    shutting_down: Arc<AtomicBool>,
    workers: usize,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        // each unblock wakes exactly one worker
        for _ in 0..self.workers {
            self.server.unblock();
        }
    }
}

impl FortuneServer {
    pub fn bind(address: &str, state: AppState) -> Result<Self> {
        let server = Server::http(address).map_err(|e| FortuneError::ServerError {
            message: format!("failed to bind {}: {}", address, e),
        })?;

        Ok(Self {
            server: Arc::new(server),
            state: Arc::new(state),
            shutting_down: Arc::new(AtomicBool::new(false)),
            workers: 1,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            shutting_down: Arc::clone(&self.shutting_down),
            workers: self.workers,
        }
    }

    /// Blocks until [`ShutdownHandle::shutdown`] is called.
    pub fn serve(&self) {
        tracing::info!(
            "Serving on {:?} with {} worker(s)",
            self.local_addr(),
            self.workers
        );

        std::thread::scope(|scope| {
            for id in 0..self.workers {
                scope.spawn(move || self.worker_loop(id));
            }
        });

        tracing::info!("All workers stopped");
    }

    /// Serves on a blocking task until Ctrl-C, then drains the workers.
    pub async fn run(self) -> Result<()> {
        self.run_until(tokio::signal::ctrl_c()).await
    }

    /// Serves until `signal` resolves `Ok`. A signal that fails to register
    /// leaves the server running.
    pub async fn run_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        let handle = self.shutdown_handle();
        let mut serving = tokio::task::spawn_blocking(move || self.serve());
        let join_error = |e: tokio::task::JoinError| FortuneError::ServerError {
            message: format!("server task failed: {}", e),
        };

        tokio::select! {
            received = signal => match received {
                Ok(()) => {
                    tracing::info!("Shutdown requested, stopping workers");
                    handle.shutdown();
                }
                Err(e) => {
                    tracing::error!("Failed to listen for shutdown signal, serving until killed: {}", e);
                }
            },
            joined = &mut serving => {
                return joined.map_err(join_error);
            }
        }

        serving.await.map_err(join_error)
    }

    fn worker_loop(&self, id: usize) {
        loop {
            match self.server.recv() {
                Ok(request) => self.handle(request),
                Err(e) => {
                    if self.shutting_down.load(Ordering::SeqCst) {
                        tracing::debug!("Worker {} exiting", id);
                        break;
                    }
                    tracing::warn!("Worker {} failed to receive request: {}", id, e);
                }
            }
        }
    }

    fn handle(&self, mut request: Request) {
        let mut body = Vec::new();
        if let Err(e) = request
            .as_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut body)
        {
            tracing::warn!("Failed to read request body: {}", e);
        }

        let method = request.method().clone();
        let url = request.url().to_string();
        let response = route(&self.state, &method, &url, &body);

        tracing::info!("{} {} -> {}", method, url, response.status);

        let mut reply = Response::from_data(response.body).with_status_code(response.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], response.content_type.as_bytes())
        {
            reply = reply.with_header(header);
        }

        if let Err(e) = request.respond(reply) {
            tracing::warn!("Failed to write response for {} {}: {}", method, url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bind_reports_ephemeral_port() {
        let temp_dir = TempDir::new().unwrap();
        let server = FortuneServer::bind("127.0.0.1:0", AppState::new(temp_dir.path())).unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_bind_failure_is_server_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = FortuneServer::bind("not-an-address", AppState::new(temp_dir.path()))
            .err()
            .unwrap();
        assert!(matches!(err, FortuneError::ServerError { .. }));
    }

    #[tokio::test]
    async fn test_run_until_signal_stops_server() {
        let temp_dir = TempDir::new().unwrap();
        let server = FortuneServer::bind("127.0.0.1:0", AppState::new(temp_dir.path())).unwrap();

        let result = server.run_until(async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_keeps_serving() {
        let temp_dir = TempDir::new().unwrap();
        let server = FortuneServer::bind("127.0.0.1:0", AppState::new(temp_dir.path()))
            .unwrap()
            .with_workers(2);
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle();

        let running = tokio::spawn(
            server.run_until(async { Err(std::io::Error::other("no signal handler")) }),
        );
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(!running.is_finished());

        let response = reqwest::Client::new()
            .post(format!("http://{}/game_clear", addr))
            .body(r#"{"colors": ["yellow", "yellow", "yellow", "yellow", "yellow"]}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        handle.shutdown();
        running.await.unwrap().unwrap();
    }

    #[test]
    fn test_shutdown_stops_serve() {
        let temp_dir = TempDir::new().unwrap();
        let server = FortuneServer::bind("127.0.0.1:0", AppState::new(temp_dir.path()))
            .unwrap()
            .with_workers(3);
        let handle = server.shutdown_handle();

        let serving = std::thread::spawn(move || server.serve());
        std::thread::sleep(std::time::Duration::from_millis(50));
        handle.shutdown();

        serving.join().unwrap();
    }
}
