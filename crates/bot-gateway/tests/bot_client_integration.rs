//! Integration tests for the bot service client.
//!
//! Runs `BotClient` against a mock bot service over real gRPC on localhost
//! and covers the join, details and leave flows plus cancellation, stream
//! failure and client lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use bot_gateway::config::Config;
use bot_gateway::errors::{BotError, ErrorKind};
use bot_gateway::grpc::{BotClient, BotService, CallContext, JoinStream};
use bot_gateway::models::{JoinProgress, JoinRequest, JoinState, LeaveState};
use bot_test_utils::{
    MockBotServer, TestBotServer, MOCK_PARTICIPANTS, TEST_BOT_ID, TEST_BOT_NAME, TEST_MEEPO_ID,
    TEST_MEETING_URL,
};
use proto_gen::bot::join_meeting_response::State as WireJoinState;
use proto_gen::bot::leave_meeting_response::State as WireLeaveState;
use tokio_stream::StreamExt;
use tonic::Status;

// ============================================================================
// Helpers
// ============================================================================

fn test_config(url: &str) -> Config {
    Config {
        bot_service_url: url.to_string(),
        ..Config::default()
    }
}

async fn connect(server: &TestBotServer) -> BotClient {
    BotClient::connect(test_config(&server.url())).await.unwrap()
}

fn test_join_request() -> JoinRequest {
    JoinRequest::new(TEST_MEEPO_ID, TEST_BOT_ID, TEST_MEETING_URL, TEST_BOT_NAME)
}

/// Drain a join stream: all events, then the terminal error if there was one.
async fn drain(mut stream: JoinStream) -> (Vec<JoinProgress>, Option<BotError>) {
    let mut events = Vec::new();
    let mut error = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(progress) => {
                assert!(error.is_none(), "event received after terminal error");
                events.push(progress);
            }
            Err(e) => {
                assert!(error.is_none(), "more than one terminal error");
                error = Some(e);
            }
        }
    }
    (events, error)
}

/// The error a join attempt ends with, whether the call or the stream reports it.
async fn join_error(client: &BotClient, request: JoinRequest) -> BotError {
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));
    match client.join_meeting(&ctx, request).await {
        Err(e) => e,
        Ok(stream) => {
            let (events, error) = drain(stream).await;
            assert!(events.is_empty());
            error.expect("join stream should end with an error")
        }
    }
}

/// Poll `condition` until it holds or two seconds pass.
async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

fn states(events: &[JoinProgress]) -> Vec<JoinState> {
    events.iter().map(|e| e.state).collect()
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_join_details_leave_flow() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let (events, error) = drain(stream).await;

    assert!(error.is_none(), "clean end of stream expected: {error:?}");
    assert_eq!(
        states(&events),
        vec![JoinState::Received, JoinState::Pending, JoinState::Joined]
    );
    assert!(events.iter().all(|e| e.bot_id == TEST_BOT_ID));

    let details = client
        .get_meeting_details(&ctx, TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap();
    let names: Vec<&str> = details.participant_names().collect();
    assert_eq!(names, MOCK_PARTICIPANTS.to_vec());

    let left = client
        .leave_meeting(&ctx, TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap();
    assert_eq!(left.state, LeaveState::Done);
    assert_eq!(left.message, "Mock left");

    client.close().await.unwrap();

    let sent = server.mock().last_join_request().unwrap();
    assert_eq!(sent.meepo_id, TEST_MEEPO_ID);
    assert_eq!(sent.url, TEST_MEETING_URL);
    assert_eq!(sent.name, TEST_BOT_NAME);
}

#[tokio::test]
async fn test_empty_name_is_accepted() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let request = JoinRequest::new(TEST_MEEPO_ID, TEST_BOT_ID, TEST_MEETING_URL, "");
    let (events, error) = drain(client.join_meeting(&ctx, request).await.unwrap()).await;

    assert!(error.is_none());
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_eager_connect_to_live_server() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let config = Config {
        eager_connect: true,
        ..test_config(&server.url())
    };

    let client = BotClient::connect(config).await.unwrap();
    let details = client
        .get_meeting_details(&CallContext::new(), TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap();

    assert_eq!(details.participants.len(), 2);
}

// ============================================================================
// Remote errors
// ============================================================================

#[tokio::test]
async fn test_join_with_missing_fields_is_invalid_argument() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;

    for request in [
        JoinRequest::new("", TEST_BOT_ID, TEST_MEETING_URL, TEST_BOT_NAME),
        JoinRequest::new(TEST_MEEPO_ID, "", TEST_MEETING_URL, TEST_BOT_NAME),
        JoinRequest::new(TEST_MEEPO_ID, TEST_BOT_ID, "", TEST_BOT_NAME),
    ] {
        let err = join_error(&client, request).await;
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "got {err:?}");
    }

    // The remote side is the authority: every request reached it
    assert_eq!(server.mock().join_requests(), 3);
}

#[tokio::test]
async fn test_unary_calls_with_missing_ids_are_invalid_argument() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new();

    let err = client
        .get_meeting_details(&ctx, "", TEST_BOT_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::InvalidArgument(msg) if msg == "missing IDs"));

    let err = client
        .leave_meeting(&ctx, TEST_MEEPO_ID, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_join_rejected_when_bot_already_active() {
    let mock = MockBotServer::builder()
        .reject_join(Status::already_exists("Bot b1 is already active."))
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;

    let err = join_error(&client, test_join_request()).await;

    assert!(matches!(err, BotError::AlreadyExists(_)), "got {err:?}");
}

#[tokio::test]
async fn test_active_bot_reports_failed_then_already_exists() {
    let mock = MockBotServer::builder()
        .frame(
            WireJoinState::Failed,
            "Bot b1 is already active.",
            Duration::ZERO,
        )
        .fail_join_with(Status::already_exists(
            "Bot session with ID b1 is already active.",
        ))
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let (events, error) = drain(stream).await;

    assert_eq!(states(&events), vec![JoinState::Failed]);
    assert_eq!(events.first().unwrap().bot_id, TEST_BOT_ID);
    let error = error.expect("already-active join must end with an error");
    assert!(matches!(error, BotError::AlreadyExists(_)), "got {error:?}");
}

#[tokio::test]
async fn test_details_for_unknown_session_is_not_found() {
    let mock = MockBotServer::builder()
        .fail_details_with(Status::not_found("No active session for bot b1."))
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;

    let err = client
        .get_meeting_details(&CallContext::new(), TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, BotError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::Remote);
}

#[tokio::test]
async fn test_failed_leave_is_not_an_error() {
    let mock = MockBotServer::builder()
        .leave_result(WireLeaveState::Failed, "Bot b1 not found or already left.")
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;

    let result = client
        .leave_meeting(&CallContext::new(), TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap();

    assert_eq!(result.state, LeaveState::Failed);
    assert!(!result.is_done());
}

// ============================================================================
// Join stream termination
// ============================================================================

#[tokio::test]
async fn test_mid_stream_failure_yields_events_then_error() {
    let mock = MockBotServer::builder()
        .frame(WireJoinState::Received, "received", Duration::ZERO)
        .frame(WireJoinState::Pending, "pending", Duration::from_millis(5))
        .fail_join_with(Status::internal("browser crashed"))
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let (events, error) = drain(stream).await;

    assert_eq!(
        states(&events),
        vec![JoinState::Received, JoinState::Pending]
    );
    let error = error.expect("stream failure must be reported");
    assert_eq!(error.kind(), ErrorKind::Stream);
    assert!(error.to_string().contains("browser crashed"));
}

#[tokio::test]
async fn test_cancel_before_join_does_not_contact_server() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new();
    ctx.cancel();

    let err = client
        .join_meeting(&ctx, test_join_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BotError::Cancelled));
    assert_eq!(server.mock().total_requests(), 0);
}

#[tokio::test]
async fn test_cancel_during_join_ends_stream() {
    let mock = MockBotServer::builder()
        .frame(WireJoinState::Received, "received", Duration::ZERO)
        .hang_after_frames()
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new();

    let mut stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let first = stream.recv().await.unwrap().unwrap();
    assert_eq!(first.state, JoinState::Received);

    ctx.cancel();

    let end = tokio::time::timeout(Duration::from_secs(2), stream.recv())
        .await
        .expect("stream should end promptly after cancellation");
    assert!(matches!(end, Some(Err(BotError::Cancelled))));
    assert!(stream.recv().await.is_none());

    // The underlying call is torn down, so the server sees the client go away
    let mock = server.mock().clone();
    assert!(eventually(|| mock.abandoned_streams() == 1).await);
}

#[tokio::test]
async fn test_deadline_ends_stream() {
    let mock = MockBotServer::builder()
        .frame(WireJoinState::Received, "received", Duration::ZERO)
        .hang_after_frames()
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_millis(300));

    let stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let (events, error) = tokio::time::timeout(Duration::from_secs(5), drain(stream))
        .await
        .unwrap();

    assert_eq!(states(&events), vec![JoinState::Received]);
    let error = error.unwrap();
    assert_eq!(error.kind(), ErrorKind::Cancellation, "got {error:?}");
}

#[tokio::test]
async fn test_dropping_stream_stops_remote_call() {
    let mock = MockBotServer::builder()
        .frame(WireJoinState::Received, "received", Duration::ZERO)
        .hang_after_frames()
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let client = connect(&server).await;

    let mut stream = client
        .join_meeting(&CallContext::new(), test_join_request())
        .await
        .unwrap();
    assert!(stream.recv().await.unwrap().is_ok());

    drop(stream);

    let mock = server.mock().clone();
    assert!(eventually(|| mock.abandoned_streams() == 1).await);
}

#[tokio::test]
async fn test_slow_consumer_receives_every_event_in_order() {
    let mock = MockBotServer::builder()
        .pending_frames(50)
        .frame(WireJoinState::Joined, "joined", Duration::ZERO)
        .build();
    let server = TestBotServer::start(mock).await.unwrap();
    let config = Config {
        join_buffer_size: 2,
        ..test_config(&server.url())
    };
    let client = BotClient::connect(config).await.unwrap();
    let ctx = CallContext::new().with_timeout(Duration::from_secs(10));

    let mut stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    let mut events = Vec::new();
    while let Some(item) = stream.recv().await {
        events.push(item.unwrap());
        if events.len() % 10 == 0 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    assert_eq!(events.len(), 51);
    for (i, event) in events.iter().take(50).enumerate() {
        assert_eq!(event.state, JoinState::Pending);
        assert_eq!(event.message, format!("progress {i}"));
    }
    assert_eq!(events.last().unwrap().state, JoinState::Joined);
}

// ============================================================================
// Client lifecycle
// ============================================================================

#[tokio::test]
async fn test_cancelled_context_unary_does_not_contact_server() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new();
    ctx.cancel();

    let details = client
        .get_meeting_details(&ctx, TEST_MEEPO_ID, TEST_BOT_ID)
        .await;
    let leave = client.leave_meeting(&ctx, TEST_MEEPO_ID, TEST_BOT_ID).await;

    assert!(matches!(details, Err(BotError::Cancelled)));
    assert!(matches!(leave, Err(BotError::Cancelled)));
    assert_eq!(server.mock().total_requests(), 0);
}

#[tokio::test]
async fn test_close_is_idempotent_and_rejects_new_calls() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;

    client.close().await.unwrap();
    client.close().await.unwrap();

    let err = client
        .get_meeting_details(&CallContext::new(), TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(server.mock().total_requests(), 0);
}

#[tokio::test]
async fn test_stream_outlives_close() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = connect(&server).await;
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let stream = client.join_meeting(&ctx, test_join_request()).await.unwrap();
    client.close().await.unwrap();

    let (events, error) = drain(stream).await;
    assert!(error.is_none());
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let client = Arc::new(connect(&server).await);

    let mut handles = Vec::new();
    for i in 0..10 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let ctx = CallContext::new().with_timeout(Duration::from_secs(5));
            if i % 2 == 0 {
                client
                    .get_meeting_details(&ctx, TEST_MEEPO_ID, TEST_BOT_ID)
                    .await
                    .map(|_| ())
            } else {
                let request = JoinRequest::new(
                    TEST_MEEPO_ID,
                    format!("bot-{i}"),
                    TEST_MEETING_URL,
                    TEST_BOT_NAME,
                );
                let stream = client.join_meeting(&ctx, request).await?;
                let (events, error) = drain(stream).await;
                assert_eq!(events.len(), 3);
                assert!(events.iter().all(|e| e.bot_id == format!("bot-{i}")));
                error.map_or(Ok(()), Err)
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(server.mock().details_requests(), 5);
    assert_eq!(server.mock().join_requests(), 5);
}

#[tokio::test]
async fn test_client_usable_through_trait_object() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let service: Arc<dyn BotService> = Arc::new(connect(&server).await);
    let ctx = CallContext::new().with_timeout(Duration::from_secs(5));

    let stream = service.join_meeting(&ctx, test_join_request()).await.unwrap();
    let (events, _) = drain(stream).await;
    assert_eq!(events.last().unwrap().state, JoinState::Joined);

    let left = service
        .leave_meeting(&ctx, TEST_MEEPO_ID, TEST_BOT_ID)
        .await
        .unwrap();
    assert!(left.is_done());

    service.close().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_surfaces_on_first_call() {
    let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
    let url = server.url();
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = BotClient::connect(test_config(&url)).await.unwrap();
    let err = client
        .leave_meeting(
            &CallContext::new().with_timeout(Duration::from_secs(5)),
            TEST_MEEPO_ID,
            TEST_BOT_ID,
        )
        .await
        .unwrap_err();

    assert!(err.kind() == ErrorKind::Connection, "got {err:?}");
}
