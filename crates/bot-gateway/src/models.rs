//! Domain types exchanged with the bot service.
//!
//! These mirror the protobuf messages in `proto-gen` but keep the enum
//! states typed, so callers never handle raw `i32` wire values.

use proto_gen::bot::{
    join_meeting_response, leave_meeting_response, JoinMeetingRequest, JoinMeetingResponse,
    LeaveMeetingResponse, MeetingDetailsResponse,
};
use std::fmt;

/// One join attempt. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub meepo_id: String,
    pub bot_id: String,
    pub url: String,
    pub name: String,
}

impl JoinRequest {
    pub fn new(
        meepo_id: impl Into<String>,
        bot_id: impl Into<String>,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            meepo_id: meepo_id.into(),
            bot_id: bot_id.into(),
            url: url.into(),
            name: name.into(),
        }
    }
}

impl From<JoinRequest> for JoinMeetingRequest {
    fn from(request: JoinRequest) -> Self {
        JoinMeetingRequest {
            meepo_id: request.meepo_id,
            bot_id: request.bot_id,
            url: request.url,
            name: request.name,
        }
    }
}

/// Join progress state reported by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinState {
    Received,
    Pending,
    Joined,
    Failed,
    /// A state this client does not know yet; carries the raw wire value.
    Unknown(i32),
}

impl JoinState {
    /// Whether no further progress events are expected after this state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, JoinState::Joined | JoinState::Failed)
    }

    /// Protocol name of the state (bounded, usable as a metric label).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JoinState::Received => "RECEIVED",
            JoinState::Pending => "PENDING",
            JoinState::Joined => "JOINED",
            JoinState::Failed => "FAILED",
            JoinState::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<i32> for JoinState {
    fn from(value: i32) -> Self {
        match join_meeting_response::State::try_from(value) {
            Ok(join_meeting_response::State::Received) => JoinState::Received,
            Ok(join_meeting_response::State::Pending) => JoinState::Pending,
            Ok(join_meeting_response::State::Joined) => JoinState::Joined,
            Ok(join_meeting_response::State::Failed) => JoinState::Failed,
            Err(_) => JoinState::Unknown(value),
        }
    }
}

impl fmt::Display for JoinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinState::Unknown(value) => write!(f, "UNKNOWN({value})"),
            state => f.write_str(state.as_str()),
        }
    }
}

/// One progress update from a join stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinProgress {
    pub state: JoinState,
    pub message: String,
    /// Echo of the bot ID from the request.
    pub bot_id: String,
}

impl From<JoinMeetingResponse> for JoinProgress {
    fn from(response: JoinMeetingResponse) -> Self {
        JoinProgress {
            state: JoinState::from(response.state),
            message: response.message,
            bot_id: response.bot_id,
        }
    }
}

/// A meeting participant as seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
}

/// Snapshot of the meeting the bot is in. Not live-updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingDetails {
    pub participants: Vec<Participant>,
}

impl MeetingDetails {
    /// Participant display names, in the order the bot reported them.
    pub fn participant_names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }
}

impl From<MeetingDetailsResponse> for MeetingDetails {
    fn from(response: MeetingDetailsResponse) -> Self {
        MeetingDetails {
            participants: response
                .participants
                .into_iter()
                .map(|p| Participant { name: p.name })
                .collect(),
        }
    }
}

/// State reported by `LeaveMeeting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveState {
    Received,
    Done,
    Failed,
    Unknown(i32),
}

impl From<i32> for LeaveState {
    fn from(value: i32) -> Self {
        match leave_meeting_response::State::try_from(value) {
            Ok(leave_meeting_response::State::Received) => LeaveState::Received,
            Ok(leave_meeting_response::State::Done) => LeaveState::Done,
            Ok(leave_meeting_response::State::Failed) => LeaveState::Failed,
            Err(_) => LeaveState::Unknown(value),
        }
    }
}

impl fmt::Display for LeaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveState::Received => f.write_str("RECEIVED"),
            LeaveState::Done => f.write_str("DONE"),
            LeaveState::Failed => f.write_str("FAILED"),
            LeaveState::Unknown(value) => write!(f, "UNKNOWN({value})"),
        }
    }
}

/// Result of a leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveResult {
    pub state: LeaveState,
    pub message: String,
}

impl LeaveResult {
    /// Whether the bot confirmed it left.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == LeaveState::Done
    }
}

impl From<LeaveMeetingResponse> for LeaveResult {
    fn from(response: LeaveMeetingResponse) -> Self {
        LeaveResult {
            state: LeaveState::from(response.state),
            message: response.message,
        }
    }
}
