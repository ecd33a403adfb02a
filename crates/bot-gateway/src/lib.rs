//! Bot Gateway Library
//!
//! Client side of the Meepo meeting bot service. The gateway asks a bot to
//! join a video meeting, follows the join progress as it is streamed back,
//! queries who is in the meeting, and tells the bot to leave.
//!
//! # Architecture
//!
//! ```text
//! caller ──> BotService (trait) ──> BotClient ──gRPC──> bot service
//!                                       │
//!                                       └── JoinStream (receive task + bounded queue)
//! ```
//!
//! Every call takes a [`grpc::CallContext`] carrying a cancellation token and
//! an optional deadline. A join stream keeps its context for its whole
//! lifetime, so cancelling it stops both the consumer and the network read.
//!
//! # Modules
//!
//! - [`config`] - Client configuration from environment
//! - [`errors`] - Error taxonomy with typed remote failures
//! - [`grpc`] - `BotClient`, `JoinStream`, `CallContext`, `BotService`
//! - [`models`] - Typed requests, progress events and results
//! - [`observability`] - Metrics emitted by the client

pub mod config;
pub mod errors;
pub mod grpc;
pub mod models;
pub mod observability;

pub use errors::{BotError, ErrorKind};
pub use grpc::{BotClient, BotService, CallContext, JoinStream};
