//! Fixed test data for bot gateway tests.

use proto_gen::bot::JoinMeetingRequest;

/// Meepo (meeting) ID used across tests.
pub const TEST_MEEPO_ID: &str = "m1";

/// Bot ID used across tests.
pub const TEST_BOT_ID: &str = "b1";

/// Meeting URL used across tests.
pub const TEST_MEETING_URL: &str = "http://x";

/// Bot display name used across tests.
pub const TEST_BOT_NAME: &str = "Bot";

/// Participant names reported by the default mock.
pub const MOCK_PARTICIPANTS: [&str; 2] = ["Mock User 1", "Mock User 2"];

/// A fresh bot ID, for tests that must not collide with each other.
#[must_use]
pub fn unique_bot_id() -> String {
    format!("bot-{}", uuid::Uuid::new_v4())
}

/// Wire-level join request with the fixed test IDs.
#[must_use]
pub fn test_join_request() -> JoinMeetingRequest {
    JoinMeetingRequest {
        meepo_id: TEST_MEEPO_ID.to_string(),
        bot_id: TEST_BOT_ID.to_string(),
        url: TEST_MEETING_URL.to_string(),
        name: TEST_BOT_NAME.to_string(),
    }
}
