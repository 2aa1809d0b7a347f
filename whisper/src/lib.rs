//! Client core for the whisper anonymous inbox.
//!
//! The [`Controller`] holds all page state and turns user [`Command`]s into
//! [`Task`]s; the embedding event loop performs those with [`perform`] and
//! feeds the [`Outcome`]s back. Rendering reads a [`Screen`] snapshot.

mod age;
mod config;
mod controller;
mod error;
mod link;
mod mode;
mod screen;
mod session;
mod task;
mod types;

/// retrieve the version from Cargo.toml, note that this will yield an error
/// when compiling without cargo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use age::RelativeAge;
pub use config::{Config, COPY_STATUS_TTL, STORAGE_KEY};
pub use controller::{Command, Controller};
pub use error::{Error, Result};
pub use link::{share_link, PageLocation, RECIPIENT_PARAM};
pub use mode::ViewMode;
pub use screen::{Entry, InboxView, MessageList, Screen, SendView, SignupView, Status, Tone};
pub use session::{MemoryStore, SessionStore};
pub use task::{perform, Api, Browser, Outcome, Task};
pub use types::{
    Delivery, DeliveryReply, DeliveryRequest, Identity, Message, SignupReply, SignupRequest,
};
