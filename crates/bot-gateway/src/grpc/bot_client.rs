//! Bot service gRPC client.
//!
//! `BotClient` is the transport handle for the meeting bot service. It owns
//! one tonic `Channel` and exposes the three bot RPCs:
//! - `JoinMeeting` (server streaming, bridged into a [`JoinStream`])
//! - `GetMeetingDetails` (unary)
//! - `LeaveMeeting` (unary)
//!
//! # Connection Pattern
//!
//! The tonic `Channel` is designed to be cloned cheaply and used concurrently,
//! so each call clones it and no locking is needed beyond the open/closed
//! check. The channel is lazy by default: connection failures surface on the
//! first call as `BotError::Connection`. With `eager_connect` they surface
//! from [`BotClient::connect`] instead.
//!
//! # Errors
//!
//! Nothing is retried here. Every failure is returned to the caller as a
//! typed [`BotError`] and never poisons the handle for later calls.

use crate::config::Config;
use crate::errors::BotError;
use crate::grpc::context::CallContext;
use crate::grpc::join_stream::JoinStream;
use crate::grpc::service::BotService;
use crate::models::{JoinRequest, LeaveResult, MeetingDetails};
use crate::observability::metrics;
use async_trait::async_trait;
use proto_gen::bot::bot_service_client::BotServiceClient;
use proto_gen::bot::{JoinMeetingRequest, LeaveMeetingRequest, MeetingDetailsRequest};
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::Request;
use tracing::{debug, error, info, instrument, warn};

/// TCP keepalive for the bot service connection.
const BOT_TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// HTTP/2 keepalive ping interval; join streams can idle for minutes between events.
const BOT_HTTP2_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(20);

/// Bot service client.
///
/// Safe to share between tasks (`&self` everywhere). Must be closed with
/// [`BotClient::close`] when no longer needed.
pub struct BotClient {
    /// gRPC channel to the bot service; `None` once closed.
    channel: RwLock<Option<Channel>>,
    /// Client configuration.
    config: Config,
}

impl BotClient {
    /// Create a client for `config.bot_service_url`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if the endpoint or TLS settings are invalid.
    /// Returns `BotError::Connection` if `eager_connect` is set and the
    /// initial connection fails.
    pub async fn connect(config: Config) -> Result<Self, BotError> {
        let endpoint = build_endpoint(&config).await?;

        let channel = if config.eager_connect {
            endpoint.connect().await.map_err(|e| {
                warn!(
                    target: "bot.grpc.client",
                    error = %e,
                    endpoint = %config.bot_service_url,
                    "Failed to connect to bot service"
                );
                BotError::Connection(format!("Failed to connect to bot service: {e}"))
            })?
        } else {
            endpoint.connect_lazy()
        };

        info!(
            target: "bot.grpc.client",
            endpoint = %config.bot_service_url,
            eager = config.eager_connect,
            tls = config.tls.is_some(),
            "Bot service client created"
        );

        Ok(Self::from_channel(channel, config))
    }

    /// Wrap an existing channel (custom transports, tests).
    #[must_use]
    pub fn from_channel(channel: Channel, config: Config) -> Self {
        Self {
            channel: RwLock::new(Some(channel)),
            config,
        }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether [`BotClient::close`] has been called.
    pub async fn is_closed(&self) -> bool {
        self.channel.read().await.is_none()
    }

    /// Clone the channel (cheap operation) into a client for one call.
    async fn client(&self) -> Result<BotServiceClient<Channel>, BotError> {
        self.channel
            .read()
            .await
            .as_ref()
            .map(|channel| BotServiceClient::new(channel.clone()))
            .ok_or_else(|| BotError::Connection("client is closed".to_string()))
    }

    /// Start joining a meeting and stream its progress.
    ///
    /// Returns once the bot service has accepted the call; progress events
    /// are read from the returned [`JoinStream`]. `ctx` governs the whole
    /// stream: cancelling it or reaching its deadline ends the stream.
    ///
    /// Acceptance means the response headers have arrived. Servers that hold
    /// initial metadata back until the first message (gRPC-python's default)
    /// therefore only return here once the first progress event is sent.
    ///
    /// # Errors
    ///
    /// - `BotError::Cancelled` / `DeadlineExceeded` - `ctx` already done
    /// - `BotError::InvalidArgument` - bot service rejected an empty field
    /// - `BotError::AlreadyExists` - the bot is already in a session
    /// - `BotError::Connection` - bot service unreachable or client closed
    #[instrument(skip_all, fields(meepo_id = %request.meepo_id, bot_id = %request.bot_id))]
    pub async fn join_meeting(
        &self,
        ctx: &CallContext,
        request: JoinRequest,
    ) -> Result<JoinStream, BotError> {
        const METHOD: &str = "join_meeting";

        if let Some(reason) = ctx.done_reason() {
            debug!(target: "bot.grpc.client", "Context already done, not calling JoinMeeting");
            metrics::record_rpc(METHOD, reason.label(), Duration::ZERO);
            return Err(reason);
        }

        let mut client = self.client().await?;
        let bot_id = request.bot_id.clone();
        let grpc_request = timed_request(ctx, JoinMeetingRequest::from(request));

        let started = Instant::now();
        let response = race_context(ctx, client.join_meeting(grpc_request)).await;
        let streaming = record_outcome(METHOD, started, response)?.into_inner();

        debug!(target: "bot.grpc.client", "JoinMeeting stream opened");

        Ok(JoinStream::spawn(
            ctx,
            bot_id,
            streaming,
            self.config.join_buffer_size,
        ))
    }

    /// Fetch a snapshot of the meeting the bot is in.
    ///
    /// # Errors
    ///
    /// - `BotError::Cancelled` / `DeadlineExceeded` - `ctx` done before or during the call
    /// - `BotError::InvalidArgument` - empty `meepo_id` or `bot_id`
    /// - `BotError::NotFound` - no active session for this bot
    /// - `BotError::Connection` - bot service unreachable or client closed
    #[instrument(skip_all, fields(meepo_id = %meepo_id, bot_id = %bot_id))]
    pub async fn get_meeting_details(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<MeetingDetails, BotError> {
        const METHOD: &str = "get_meeting_details";

        let ctx = self.unary_context(ctx);
        if let Some(reason) = ctx.done_reason() {
            metrics::record_rpc(METHOD, reason.label(), Duration::ZERO);
            return Err(reason);
        }

        let mut client = self.client().await?;
        let grpc_request = timed_request(
            &ctx,
            MeetingDetailsRequest {
                bot_id: bot_id.to_string(),
                meepo_id: meepo_id.to_string(),
            },
        );

        let started = Instant::now();
        let response = race_context(&ctx, client.get_meeting_details(grpc_request)).await;
        let details = MeetingDetails::from(record_outcome(METHOD, started, response)?.into_inner());

        debug!(
            target: "bot.grpc.client",
            participants = details.participants.len(),
            "Meeting details received"
        );

        Ok(details)
    }

    /// Ask the bot to leave its meeting.
    ///
    /// A `LeaveResult` with state `Failed` is a successful call: the bot
    /// answered but could not leave (e.g. no such session).
    ///
    /// # Errors
    ///
    /// - `BotError::Cancelled` / `DeadlineExceeded` - `ctx` done before or during the call
    /// - `BotError::InvalidArgument` - empty `meepo_id` or `bot_id`
    /// - `BotError::Connection` - bot service unreachable or client closed
    #[instrument(skip_all, fields(meepo_id = %meepo_id, bot_id = %bot_id))]
    pub async fn leave_meeting(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<LeaveResult, BotError> {
        const METHOD: &str = "leave_meeting";

        let ctx = self.unary_context(ctx);
        if let Some(reason) = ctx.done_reason() {
            metrics::record_rpc(METHOD, reason.label(), Duration::ZERO);
            return Err(reason);
        }

        let mut client = self.client().await?;
        let grpc_request = timed_request(
            &ctx,
            LeaveMeetingRequest {
                bot_id: bot_id.to_string(),
                meepo_id: meepo_id.to_string(),
            },
        );

        let started = Instant::now();
        let response = race_context(&ctx, client.leave_meeting(grpc_request)).await;
        let result = LeaveResult::from(record_outcome(METHOD, started, response)?.into_inner());

        if result.is_done() {
            info!(target: "bot.grpc.client", message = %result.message, "Bot left meeting");
        } else {
            warn!(
                target: "bot.grpc.client",
                state = %result.state,
                message = %result.message,
                "Bot did not confirm leaving"
            );
        }

        Ok(result)
    }

    /// Release the channel.
    ///
    /// Idempotent. Calls started afterwards fail with `BotError::Connection`;
    /// calls already in flight hold their own channel clone and finish normally.
    pub async fn close(&self) -> Result<(), BotError> {
        if self.channel.write().await.take().is_some() {
            info!(
                target: "bot.grpc.client",
                endpoint = %self.config.bot_service_url,
                "Bot service client closed"
            );
        }
        Ok(())
    }

    /// Unary calls get the configured default deadline when `ctx` has none.
    fn unary_context(&self, ctx: &CallContext) -> CallContext {
        match ctx.deadline() {
            Some(_) => ctx.clone(),
            None => ctx.clone().with_timeout(self.config.rpc_timeout()),
        }
    }
}

#[async_trait]
impl BotService for BotClient {
    async fn join_meeting(
        &self,
        ctx: &CallContext,
        request: JoinRequest,
    ) -> Result<JoinStream, BotError> {
        BotClient::join_meeting(self, ctx, request).await
    }

    async fn get_meeting_details(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<MeetingDetails, BotError> {
        BotClient::get_meeting_details(self, ctx, meepo_id, bot_id).await
    }

    async fn leave_meeting(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<LeaveResult, BotError> {
        BotClient::leave_meeting(self, ctx, meepo_id, bot_id).await
    }

    async fn close(&self) -> Result<(), BotError> {
        BotClient::close(self).await
    }
}

/// Build the endpoint from config: URL, timeouts, keepalive and TLS.
async fn build_endpoint(config: &Config) -> Result<Endpoint, BotError> {
    let mut endpoint = Endpoint::from_shared(config.bot_service_url.clone())
        .map_err(|e| {
            error!(
                target: "bot.grpc.client",
                error = %e,
                endpoint = %config.bot_service_url,
                "Invalid bot service endpoint"
            );
            BotError::Config(format!("Invalid bot service endpoint: {e}"))
        })?
        .connect_timeout(config.connect_timeout())
        .tcp_keepalive(Some(BOT_TCP_KEEPALIVE))
        .http2_keep_alive_interval(BOT_HTTP2_KEEPALIVE_INTERVAL)
        .keep_alive_while_idle(true);

    if let Some(tls) = &config.tls {
        let mut tls_config = match &tls.ca_cert_path {
            Some(path) => {
                let pem = tokio::fs::read(path).await.map_err(|e| {
                    error!(
                        target: "bot.grpc.client",
                        error = %e,
                        path = %path,
                        "Failed to read bot service CA certificate"
                    );
                    BotError::Config(format!("Failed to read CA certificate {path}: {e}"))
                })?;
                ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem))
            }
            None => ClientTlsConfig::new().with_native_roots(),
        };
        if let Some(domain) = &tls.domain {
            tls_config = tls_config.domain_name(domain.clone());
        }
        endpoint = endpoint.tls_config(tls_config).map_err(|e| {
            error!(target: "bot.grpc.client", error = %e, "Invalid TLS configuration");
            BotError::Config(format!("Invalid TLS configuration: {e}"))
        })?;
    }

    Ok(endpoint)
}

/// Wrap a message in a request carrying the context's remaining time as `grpc-timeout`.
fn timed_request<T>(ctx: &CallContext, message: T) -> Request<T> {
    let mut request = Request::new(message);
    if let Some(remaining) = ctx.remaining() {
        request.set_timeout(remaining);
    }
    request
}

/// Run a call until it completes or the context is done, whichever is first.
async fn race_context<T, F>(ctx: &CallContext, call: F) -> Result<T, BotError>
where
    F: Future<Output = Result<T, tonic::Status>>,
{
    tokio::select! {
        biased;
        reason = ctx.done() => Err(reason),
        result = call => result.map_err(BotError::from),
    }
}

/// Log and record the outcome of one call.
fn record_outcome<T>(
    method: &'static str,
    started: Instant,
    result: Result<T, BotError>,
) -> Result<T, BotError> {
    let elapsed = started.elapsed();
    match &result {
        Ok(_) => metrics::record_rpc(method, "ok", elapsed),
        Err(e) => {
            warn!(
                target: "bot.grpc.client",
                method = method,
                error = %e,
                "Bot service call failed"
            );
            metrics::record_rpc(method, e.label(), elapsed);
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::TlsConfig;
    use crate::errors::ErrorKind;

    fn test_config(url: &str) -> Config {
        Config {
            bot_service_url: url.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_keepalive_constants() {
        assert_eq!(BOT_TCP_KEEPALIVE, Duration::from_secs(30));
        assert!(BOT_HTTP2_KEEPALIVE_INTERVAL < BOT_TCP_KEEPALIVE);
    }

    #[tokio::test]
    async fn test_connect_with_invalid_endpoint() {
        let result = BotClient::connect(test_config("not a uri\n")).await;
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[tokio::test]
    async fn test_lazy_connect_succeeds_without_server() {
        // Lazy channel: nothing is dialled until the first call
        let client = BotClient::connect(test_config("http://127.0.0.1:59998"))
            .await
            .unwrap();
        assert!(!client.is_closed().await);
    }

    #[tokio::test]
    async fn test_eager_connect_with_unreachable_endpoint() {
        let config = Config {
            eager_connect: true,
            connect_timeout_seconds: 1,
            ..test_config("http://127.0.0.1:59999")
        };

        let result = BotClient::connect(config).await;

        assert!(matches!(
            &result,
            Err(BotError::Connection(msg)) if msg.contains("Failed to connect to bot service")
        ));
    }

    #[tokio::test]
    async fn test_lazy_connect_surfaces_on_first_call() {
        let client = BotClient::connect(test_config("http://127.0.0.1:59997"))
            .await
            .unwrap();
        let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

        let err = client
            .get_meeting_details(&ctx, "m1", "b1")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_missing_ca_certificate_is_config_error() {
        let config = Config {
            tls: Some(TlsConfig {
                ca_cert_path: Some("/nonexistent/meepo-ca.pem".to_string()),
                domain: None,
            }),
            ..test_config("https://127.0.0.1:59996")
        };

        let result = BotClient::connect(config).await;
        assert!(matches!(result, Err(BotError::Config(msg)) if msg.contains("CA certificate")));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let client = BotClient::connect(test_config("http://127.0.0.1:59995"))
            .await
            .unwrap();

        client.close().await.unwrap();
        client.close().await.unwrap();

        assert!(client.is_closed().await);
    }

    #[tokio::test]
    async fn test_calls_after_close_fail_with_connection_error() {
        let client = BotClient::connect(test_config("http://127.0.0.1:59994"))
            .await
            .unwrap();
        client.close().await.unwrap();
        let ctx = CallContext::new();

        let err = client.leave_meeting(&ctx, "m1", "b1").await.unwrap_err();
        assert!(matches!(err, BotError::Connection(msg) if msg == "client is closed"));

        let err = client
            .join_meeting(&ctx, JoinRequest::new("m1", "b1", "http://x", "Bot"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_cancelled_context_fails_fast() {
        let client = BotClient::connect(test_config("http://127.0.0.1:59993"))
            .await
            .unwrap();
        let ctx = CallContext::new();
        ctx.cancel();

        let err = client.get_meeting_details(&ctx, "m1", "b1").await.unwrap_err();
        assert!(matches!(err, BotError::Cancelled));

        let err = client
            .join_meeting(&ctx, JoinRequest::new("m1", "b1", "http://x", "Bot"))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Cancelled));
    }

    #[tokio::test]
    async fn test_unary_context_applies_default_deadline() {
        let client = BotClient::connect(test_config("http://127.0.0.1:59992"))
            .await
            .unwrap();

        let ctx = client.unary_context(&CallContext::new());
        let remaining = ctx.remaining().unwrap();
        assert!(remaining <= client.config().rpc_timeout());
        assert!(remaining > Duration::from_secs(1));

        // An explicit caller deadline is kept as-is
        let explicit = CallContext::new().with_timeout(Duration::from_secs(60));
        let ctx = client.unary_context(&explicit);
        assert_eq!(ctx.deadline(), explicit.deadline());
    }
}
