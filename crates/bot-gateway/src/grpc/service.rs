//! The bot service contract.
//!
//! Consumers hold an `Arc<dyn BotService>` so the gRPC client can be swapped
//! for a test double without touching calling code.

use crate::errors::BotError;
use crate::grpc::context::CallContext;
use crate::grpc::join_stream::JoinStream;
use crate::models::{JoinRequest, LeaveResult, MeetingDetails};
use async_trait::async_trait;

/// Operations offered by the meeting bot service.
#[async_trait]
pub trait BotService: Send + Sync {
    /// Ask a bot to join a meeting; progress arrives on the returned stream.
    ///
    /// The stream ends after a terminal state, when the bot service closes it,
    /// or when `ctx` is done. Abnormal termination is reported as a final
    /// `Err` item.
    async fn join_meeting(
        &self,
        ctx: &CallContext,
        request: JoinRequest,
    ) -> Result<JoinStream, BotError>;

    /// Participants of the meeting the bot is currently in.
    async fn get_meeting_details(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<MeetingDetails, BotError>;

    /// Ask the bot to leave its meeting.
    async fn leave_meeting(
        &self,
        ctx: &CallContext,
        meepo_id: &str,
        bot_id: &str,
    ) -> Result<LeaveResult, BotError>;

    /// Release the underlying connection. Idempotent.
    async fn close(&self) -> Result<(), BotError>;
}
