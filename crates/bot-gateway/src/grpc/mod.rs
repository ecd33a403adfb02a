//! gRPC client side of the bot service.
//!
//! # Components
//!
//! - [`bot_client`] - `BotClient`, the transport handle owning the channel
//! - [`join_stream`] - bridges the server-streaming `JoinMeeting` call into a
//!   bounded, cancellable stream of progress events
//! - [`context`] - per-call cancellation and deadline scope
//! - [`service`] - the `BotService` trait consumers depend on

pub mod bot_client;
pub mod context;
pub mod join_stream;
pub mod service;

pub use bot_client::BotClient;
pub use context::CallContext;
pub use join_stream::{BridgeState, JoinStream};
pub use service::BotService;
