//! Generated Protocol Buffer code for the meeting bot service.
//!
//! This crate contains the compiled `proto/bot.proto` definitions: the
//! request/response messages plus the tonic client and server stubs for
//! `BotService`. The output is committed under `src/generated`; enable the
//! `regenerate` feature to rebuild it with `tonic-build`.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)] // Generated code has various doc formatting
#![allow(clippy::default_trait_access)]

// Re-export prost traits for convenience
pub use prost::Message;

pub mod bot {
    //! Gateway <-> bot service messages and stubs
    include!("generated/bot.rs");
}
