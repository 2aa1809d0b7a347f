//! Side effects requested by the controller and the outcomes fed back to it.
//!
//! The controller never awaits anything itself. Each [`Task`] is handed to
//! [`perform`] by whoever owns the event loop (the Yew component in the
//! browser, a plain executor in tests) and produces exactly one [`Outcome`].

use std::time::Duration;

use tracing::debug;

use crate::{
    error::Result,
    types::{Delivery, Identity, Message},
};

/// the remote HTTP API
#[allow(async_fn_in_trait)]
pub trait Api {
    async fn signup(&self, username: &str) -> Result<Identity>;
    async fn messages(&self, user_id: &str) -> Result<Vec<Message>>;
    async fn deliver(&self, recipient: &str, message: &str) -> Result<Delivery>;
}

/// browser capabilities that are asynchronous
#[allow(async_fn_in_trait)]
pub trait Browser {
    async fn copy_text(&self, text: &str) -> Result<()>;
    async fn sleep(&self, duration: Duration);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Signup { username: String },
    FetchMessages { user_id: String },
    Deliver { recipient: String, message: String },
    CopyToClipboard { link: String, generation: u32 },
    ClearCopyStatus { generation: u32, after: Duration },
}

#[derive(Debug)]
pub enum Outcome {
    SignedUp(Result<Identity>),
    MessagesLoaded {
        user_id: String,
        result: Result<Vec<Message>>,
    },
    Delivered(Result<Delivery>),
    Copied {
        generation: u32,
        result: Result<()>,
    },
    CopyStatusExpired {
        generation: u32,
    },
}

pub async fn perform<A: Api, B: Browser>(task: Task, api: &A, browser: &B) -> Outcome {
    debug!(?task, "performing task");

    match task {
        Task::Signup { username } => Outcome::SignedUp(api.signup(&username).await),
        Task::FetchMessages { user_id } => {
            let result = api.messages(&user_id).await;
            Outcome::MessagesLoaded { user_id, result }
        }
        Task::Deliver { recipient, message } => {
            Outcome::Delivered(api.deliver(&recipient, &message).await)
        }
        Task::CopyToClipboard { link, generation } => Outcome::Copied {
            generation,
            result: browser.copy_text(&link).await,
        },
        Task::ClearCopyStatus { generation, after } => {
            browser.sleep(after).await;
            Outcome::CopyStatusExpired { generation }
        }
    }
}
