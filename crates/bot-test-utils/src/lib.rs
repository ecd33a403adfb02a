//! # Bot Test Utilities
//!
//! Shared test utilities for the bot gateway.
//!
//! ## Modules
//!
//! - `mock_bot` - Scriptable in-process bot service (`MockBotServer`)
//! - `server_harness` - Runs a mock on a random localhost port (`TestBotServer`)
//! - `fixtures` - Fixed meeting/bot IDs and request builders
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bot_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let server = TestBotServer::start(MockBotServer::joining()).await.unwrap();
//!
//!     let config = Config {
//!         bot_service_url: server.url(),
//!         ..Config::default()
//!     };
//!     let client = BotClient::connect(config).await.unwrap();
//!
//!     // Run your test...
//!     assert_eq!(server.mock().join_requests(), 1);
//! }
//! ```

pub mod fixtures;
pub mod mock_bot;
pub mod server_harness;

pub use fixtures::*;
pub use mock_bot::{MockBotServer, MockBotServerBuilder, ScriptedFrame};
pub use server_harness::TestBotServer;
