//! Test server harness for integration testing
//!
//! Provides `TestBotServer` for serving a [`MockBotServer`] over real gRPC.

use crate::mock_bot::MockBotServer;
use proto_gen::bot::bot_service_server::BotServiceServer;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

/// Test harness serving a mock bot service on a random localhost port.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_join_flow() -> Result<()> {
///     let server = TestBotServer::start(MockBotServer::joining()).await?;
///
///     let config = Config {
///         bot_service_url: server.url(),
///         ..Config::default()
///     };
///     let client = BotClient::connect(config).await?;
///     // ...
///     Ok(())
/// }
/// ```
pub struct TestBotServer {
    addr: SocketAddr,
    mock: MockBotServer,
    shutdown: CancellationToken,
    _handle: JoinHandle<()>,
}

impl TestBotServer {
    /// Start serving `mock`.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Serve gRPC in the background until dropped or shut down
    ///
    /// # Returns
    /// * `Ok(TestBotServer)` - Running server instance
    /// * `Err(anyhow::Error)` - If the listener cannot be bound
    pub async fn start(mock: MockBotServer) -> Result<Self, anyhow::Error> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let shutdown = CancellationToken::new();
        let shutdown_signal = shutdown.clone();
        let incoming = TcpListenerStream::new(listener);
        let service = BotServiceServer::new(mock.clone());

        let handle = tokio::spawn(async move {
            let result = Server::builder()
                .add_service(service)
                .serve_with_incoming_shutdown(incoming, async move {
                    shutdown_signal.cancelled().await;
                })
                .await;
            if let Err(e) = result {
                eprintln!("Test bot server error: {}", e);
            }
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(Self {
            addr,
            mock,
            shutdown,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The mock being served (shares counters with the server).
    pub fn mock(&self) -> &MockBotServer {
        &self.mock
    }

    /// Stop accepting calls and close open streams.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for TestBotServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
