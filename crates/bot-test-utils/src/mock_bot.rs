//! Mock bot service for gateway testing.
//!
//! Provides a scriptable `BotService` implementation that can be configured to:
//! - Stream a fixed sequence of join progress frames with per-frame delays
//! - Fail the join stream with a status after the scripted frames
//! - Keep the join stream open indefinitely (for cancellation tests)
//! - Reject calls up front or report a failed leave
//!
//! Like the real bot service, the mock rejects empty `meepo_id`, `bot_id` or
//! `url` with `INVALID_ARGUMENT`. Every call is counted, including rejected
//! ones, so tests can assert whether the server was contacted at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use bot_test_utils::MockBotServer;
//! use tonic::Status;
//!
//! let mock = MockBotServer::builder()
//!     .frame(State::Received, "Bot received the request.", Duration::ZERO)
//!     .fail_join_with(Status::internal("browser crashed"))
//!     .build();
//! ```

use proto_gen::bot::bot_service_server::BotService;
use proto_gen::bot::join_meeting_response::State as JoinState;
use proto_gen::bot::leave_meeting_response::State as LeaveState;
use proto_gen::bot::{
    JoinMeetingRequest, JoinMeetingResponse, LeaveMeetingRequest, LeaveMeetingResponse,
    MeetingDetailsRequest, MeetingDetailsResponse, Participant,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

/// Server-side queue between the frame task and tonic.
const SERVER_STREAM_CAPACITY: usize = 4;

/// Delay between frames in the default join script.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(10);

/// One scripted join progress frame.
#[derive(Debug, Clone)]
pub struct ScriptedFrame {
    pub state: JoinState,
    pub message: String,
    /// Sleep before sending this frame.
    pub delay: Duration,
}

#[derive(Debug, Default)]
struct Counters {
    join_requests: AtomicU32,
    details_requests: AtomicU32,
    leave_requests: AtomicU32,
    frames_sent: AtomicU32,
    abandoned_streams: AtomicU32,
}

#[derive(Debug)]
struct MockConfig {
    frames: Vec<ScriptedFrame>,
    join_failure: Option<Status>,
    join_rejection: Option<Status>,
    hang_after_frames: bool,
    participants: Vec<String>,
    details_error: Option<Status>,
    leave_state: LeaveState,
    leave_message: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            join_failure: None,
            join_rejection: None,
            hang_after_frames: false,
            participants: Vec::new(),
            details_error: None,
            leave_state: LeaveState::Done,
            leave_message: "Mock left".to_string(),
        }
    }
}

/// Mock bot service. Cheap to clone; clones share configuration and counters.
#[derive(Debug, Clone)]
pub struct MockBotServer {
    config: Arc<MockConfig>,
    counters: Arc<Counters>,
    last_join: Arc<Mutex<Option<JoinMeetingRequest>>>,
}

impl MockBotServer {
    /// Create a new MockBotServer builder.
    #[must_use]
    pub fn builder() -> MockBotServerBuilder {
        MockBotServerBuilder::default()
    }

    /// A mock that behaves like a healthy bot: RECEIVED, PENDING, JOINED
    /// 10ms apart, two participants, and a successful leave.
    #[must_use]
    pub fn joining() -> Self {
        Self::builder()
            .frame(
                JoinState::Received,
                "Bot received the request.",
                DEFAULT_FRAME_DELAY,
            )
            .frame(
                JoinState::Pending,
                "Bot is attempting to join the meeting...",
                DEFAULT_FRAME_DELAY,
            )
            .frame(
                JoinState::Joined,
                "Bot has joined the meeting.",
                DEFAULT_FRAME_DELAY,
            )
            .participants(crate::fixtures::MOCK_PARTICIPANTS)
            .build()
    }

    /// Number of `JoinMeeting` calls received (including rejected ones).
    #[must_use]
    pub fn join_requests(&self) -> u32 {
        self.counters.join_requests.load(Ordering::SeqCst)
    }

    /// Number of `GetMeetingDetails` calls received.
    #[must_use]
    pub fn details_requests(&self) -> u32 {
        self.counters.details_requests.load(Ordering::SeqCst)
    }

    /// Number of `LeaveMeeting` calls received.
    #[must_use]
    pub fn leave_requests(&self) -> u32 {
        self.counters.leave_requests.load(Ordering::SeqCst)
    }

    /// Total calls received across all three methods.
    #[must_use]
    pub fn total_requests(&self) -> u32 {
        self.join_requests() + self.details_requests() + self.leave_requests()
    }

    /// Join frames handed to tonic so far, across all streams.
    #[must_use]
    pub fn frames_sent(&self) -> u32 {
        self.counters.frames_sent.load(Ordering::SeqCst)
    }

    /// Join streams the client went away from before the script finished.
    #[must_use]
    pub fn abandoned_streams(&self) -> u32 {
        self.counters.abandoned_streams.load(Ordering::SeqCst)
    }

    /// The most recent `JoinMeeting` request, if any.
    #[must_use]
    pub fn last_join_request(&self) -> Option<JoinMeetingRequest> {
        self.last_join.lock().unwrap().clone()
    }

    async fn play_script(
        config: Arc<MockConfig>,
        counters: Arc<Counters>,
        bot_id: String,
        tx: mpsc::Sender<Result<JoinMeetingResponse, Status>>,
    ) {
        for frame in &config.frames {
            if !frame.delay.is_zero() {
                tokio::time::sleep(frame.delay).await;
            }
            let response = JoinMeetingResponse {
                state: frame.state as i32,
                message: frame.message.clone(),
                bot_id: bot_id.clone(),
            };
            if tx.send(Ok(response)).await.is_err() {
                counters.abandoned_streams.fetch_add(1, Ordering::SeqCst);
                return;
            }
            counters.frames_sent.fetch_add(1, Ordering::SeqCst);
        }

        if let Some(status) = &config.join_failure {
            let _ = tx.send(Err(status.clone())).await;
        } else if config.hang_after_frames {
            tx.closed().await;
            counters.abandoned_streams.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tonic::async_trait]
impl BotService for MockBotServer {
    type JoinMeetingStream = ReceiverStream<Result<JoinMeetingResponse, Status>>;

    async fn join_meeting(
        &self,
        request: Request<JoinMeetingRequest>,
    ) -> Result<Response<Self::JoinMeetingStream>, Status> {
        self.counters.join_requests.fetch_add(1, Ordering::SeqCst);
        let req = request.into_inner();
        *self.last_join.lock().unwrap() = Some(req.clone());

        if req.meepo_id.is_empty() || req.bot_id.is_empty() || req.url.is_empty() {
            return Err(Status::invalid_argument("missing required fields"));
        }
        if let Some(status) = &self.config.join_rejection {
            return Err(status.clone());
        }

        let (tx, rx) = mpsc::channel(SERVER_STREAM_CAPACITY);
        tokio::spawn(Self::play_script(
            Arc::clone(&self.config),
            Arc::clone(&self.counters),
            req.bot_id,
            tx,
        ));

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    async fn get_meeting_details(
        &self,
        request: Request<MeetingDetailsRequest>,
    ) -> Result<Response<MeetingDetailsResponse>, Status> {
        self.counters.details_requests.fetch_add(1, Ordering::SeqCst);
        let req = request.into_inner();

        if req.meepo_id.is_empty() || req.bot_id.is_empty() {
            return Err(Status::invalid_argument("missing IDs"));
        }
        if let Some(status) = &self.config.details_error {
            return Err(status.clone());
        }

        Ok(Response::new(MeetingDetailsResponse {
            participants: self
                .config
                .participants
                .iter()
                .map(|name| Participant { name: name.clone() })
                .collect(),
        }))
    }

    async fn leave_meeting(
        &self,
        request: Request<LeaveMeetingRequest>,
    ) -> Result<Response<LeaveMeetingResponse>, Status> {
        self.counters.leave_requests.fetch_add(1, Ordering::SeqCst);
        let req = request.into_inner();

        if req.meepo_id.is_empty() || req.bot_id.is_empty() {
            return Err(Status::invalid_argument("missing IDs"));
        }

        Ok(Response::new(LeaveMeetingResponse {
            state: self.config.leave_state as i32,
            message: self.config.leave_message.clone(),
        }))
    }
}

/// Builder for MockBotServer configuration.
#[derive(Debug, Default)]
pub struct MockBotServerBuilder {
    config: MockConfig,
}

impl MockBotServerBuilder {
    /// Append a join progress frame sent after `delay`.
    #[must_use]
    pub fn frame(mut self, state: JoinState, message: impl Into<String>, delay: Duration) -> Self {
        self.config.frames.push(ScriptedFrame {
            state,
            message: message.into(),
            delay,
        });
        self
    }

    /// Append `count` PENDING frames with no delay.
    #[must_use]
    pub fn pending_frames(mut self, count: usize) -> Self {
        for i in 0..count {
            self.config.frames.push(ScriptedFrame {
                state: JoinState::Pending,
                message: format!("progress {i}"),
                delay: Duration::ZERO,
            });
        }
        self
    }

    /// End the join stream with `status` after the scripted frames.
    #[must_use]
    pub fn fail_join_with(mut self, status: Status) -> Self {
        self.config.join_failure = Some(status);
        self
    }

    /// Reject `JoinMeeting` before any stream is opened.
    #[must_use]
    pub fn reject_join(mut self, status: Status) -> Self {
        self.config.join_rejection = Some(status);
        self
    }

    /// Keep the join stream open after the scripted frames until the client goes away.
    #[must_use]
    pub fn hang_after_frames(mut self) -> Self {
        self.config.hang_after_frames = true;
        self
    }

    /// Participants returned by `GetMeetingDetails`.
    #[must_use]
    pub fn participants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.participants = names.into_iter().map(Into::into).collect();
        self
    }

    /// Fail `GetMeetingDetails` with `status` (e.g. NOT_FOUND for no session).
    #[must_use]
    pub fn fail_details_with(mut self, status: Status) -> Self {
        self.config.details_error = Some(status);
        self
    }

    /// State and message returned by `LeaveMeeting`.
    #[must_use]
    pub fn leave_result(mut self, state: LeaveState, message: impl Into<String>) -> Self {
        self.config.leave_state = state;
        self.config.leave_message = message.into();
        self
    }

    /// Build the MockBotServer.
    #[must_use]
    pub fn build(self) -> MockBotServer {
        MockBotServer {
            config: Arc::new(self.config),
            counters: Arc::new(Counters::default()),
            last_join: Arc::new(Mutex::new(None)),
        }
    }
}
