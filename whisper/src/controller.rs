use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    age::RelativeAge,
    config::Config,
    error::Error,
    link::PageLocation,
    mode::ViewMode,
    screen::{Entry, InboxView, MessageList, Screen, SendView, SignupView, Status},
    session::SessionStore,
    task::{Outcome, Task},
    types::{sort_newest_first, Delivery, Identity, Message},
};

/// one variant per user action on the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    EditUsername(String),
    EditMessage(String),
    Register(String),
    RefreshInbox,
    SendMessage(String),
    CopyShareLink,
    Logout,
}

pub struct Controller<S: SessionStore> {
    config: Config,
    location: PageLocation,
    store: S,
    mode: ViewMode,
    identity: Option<Identity>,
    messages: Vec<Message>,
    username_draft: String,
    message_draft: String,
    signup_status: Status,
    copy_status: Status,
    send_status: Status,
    copy_generation: u32,
}

impl<S: SessionStore> Controller<S> {
    /// Decide the initial mode from the page URL and the stored session.
    ///
    /// A restored inbox comes with the task that loads its messages.
    pub fn init(config: Config, location: PageLocation, store: S) -> (Self, Vec<Task>) {
        let recipient = location.recipient();
        let identity = store.restore_identity();
        let mode = ViewMode::initial(recipient, identity.as_ref());

        info!(mode = mode.name(), "whisper client started");

        let mut controller = Controller {
            config,
            location,
            store,
            mode,
            identity,
            messages: Vec::new(),
            username_draft: String::new(),
            message_draft: String::new(),
            signup_status: Status::default(),
            copy_status: Status::default(),
            send_status: Status::default(),
            copy_generation: 0,
        };

        let tasks = if controller.mode == ViewMode::Inbox {
            controller.refresh_inbox()
        } else {
            Vec::new()
        };

        (controller, tasks)
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_draft(&self) -> &str {
        &self.message_draft
    }

    pub fn username_draft(&self) -> &str {
        &self.username_draft
    }

    pub fn signup_status(&self) -> &Status {
        &self.signup_status
    }

    pub fn copy_status(&self) -> &Status {
        &self.copy_status
    }

    pub fn send_status(&self) -> &Status {
        &self.send_status
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Task> {
        debug!(?command, mode = self.mode.name(), "dispatch");

        match command {
            Command::EditUsername(value) => {
                self.username_draft = value;
                Vec::new()
            }
            Command::EditMessage(value) => {
                self.message_draft = value;
                Vec::new()
            }
            Command::Register(username) => self.register(&username),
            Command::RefreshInbox => self.refresh_inbox(),
            Command::SendMessage(message) => self.send_message(&message),
            Command::CopyShareLink => self.copy_share_link(),
            Command::Logout => {
                self.logout();
                Vec::new()
            }
        }
    }

    pub fn complete(&mut self, outcome: Outcome) -> Vec<Task> {
        match outcome {
            Outcome::SignedUp(result) => self.signed_up(result),
            Outcome::MessagesLoaded { user_id, result } => {
                self.messages_loaded(&user_id, result);
                Vec::new()
            }
            Outcome::Delivered(result) => {
                self.delivered(result);
                Vec::new()
            }
            Outcome::Copied { generation, result } => self.copied(generation, result),
            Outcome::CopyStatusExpired { generation } => {
                if generation == self.copy_generation {
                    self.copy_status = Status::default();
                }
                Vec::new()
            }
        }
    }

    fn register(&mut self, raw: &str) -> Vec<Task> {
        if self.mode.signed_in().is_none() {
            warn!(mode = self.mode.name(), "{}", Error::Unavailable("signup"));
            return Vec::new();
        }

        let username = raw.trim().to_lowercase();
        if username.is_empty() {
            self.signup_status = error_status(&Error::Validation("Username required"));
            return Vec::new();
        }

        self.signup_status = Status::neutral("Creating...");

        vec![Task::Signup { username }]
    }

    fn signed_up(&mut self, result: crate::Result<Identity>) -> Vec<Task> {
        let identity = match result {
            Ok(identity) => identity,
            Err(e) => {
                self.signup_status = error_status(&e);
                return Vec::new();
            }
        };

        let Some(next) = self.mode.signed_in() else {
            warn!(mode = self.mode.name(), "ignoring signup reply");
            return Vec::new();
        };

        if let Err(e) = self.store.persist_identity(&identity) {
            warn!("could not persist identity: {e}");
        }

        info!(username = %identity.username, "signed up");

        self.mode = next;
        self.identity = Some(identity);
        self.username_draft.clear();
        self.signup_status = Status::success("Signup successful! 🎉");

        self.refresh_inbox()
    }

    fn refresh_inbox(&mut self) -> Vec<Task> {
        match &self.identity {
            Some(identity) => vec![Task::FetchMessages {
                user_id: identity.id.clone(),
            }],
            None => Vec::new(),
        }
    }

    /// failures keep the current list, stale messages beat an empty inbox
    fn messages_loaded(&mut self, user_id: &str, result: crate::Result<Vec<Message>>) {
        if self.identity.as_ref().map(|i| i.id.as_str()) != Some(user_id) {
            debug!(user_id, "dropping messages for another session");
            return;
        }

        match result {
            Ok(mut messages) => {
                sort_newest_first(&mut messages);
                debug!(count = messages.len(), "inbox loaded");
                self.messages = messages;
            }
            Err(e) => warn!("could not load inbox: {e}"),
        }
    }

    fn send_message(&mut self, raw: &str) -> Vec<Task> {
        let message = raw.trim();
        if message.is_empty() {
            self.send_status = error_status(&Error::Validation("Message required"));
            return Vec::new();
        }

        let Some(recipient) = self.mode.recipient().filter(|r| !r.is_empty()) else {
            self.send_status = error_status(&Error::Validation("Recipient missing"));
            return Vec::new();
        };

        let task = Task::Deliver {
            recipient: recipient.to_owned(),
            message: message.to_owned(),
        };
        self.send_status = Status::neutral("Sending...");

        vec![task]
    }

    fn delivered(&mut self, result: crate::Result<Delivery>) {
        self.send_status = match result {
            Ok(Delivery::Stored) => {
                self.message_draft.clear();
                Status::success("Message sent ✅")
            }
            Ok(Delivery::UnknownRecipient) => Status::error("Recipient not found"),
            Ok(Delivery::Unexpected(reply)) => {
                warn!(?reply, "unexpected delivery reply");
                Status::error("Error sending message")
            }
            Err(e) => error_status(&e),
        };
    }

    /// `<origin>/?to=<username>`, empty without an identity
    pub fn share_link(&self) -> String {
        let Some(identity) = &self.identity else {
            return String::new();
        };

        self.location
            .share_link(&identity.username)
            .unwrap_or_else(|e| {
                warn!("could not build share link: {e}");
                String::new()
            })
    }

    fn copy_share_link(&mut self) -> Vec<Task> {
        let link = self.share_link();
        if link.is_empty() {
            return Vec::new();
        }

        self.copy_generation = self.copy_generation.wrapping_add(1);

        vec![Task::CopyToClipboard {
            link,
            generation: self.copy_generation,
        }]
    }

    fn copied(&mut self, generation: u32, result: crate::Result<()>) -> Vec<Task> {
        if generation != self.copy_generation {
            return Vec::new();
        }

        match result {
            Ok(()) => {
                self.copy_status = Status::success("Copied ✅");
                vec![Task::ClearCopyStatus {
                    generation,
                    after: self.config.copy_status_ttl,
                }]
            }
            Err(e) => {
                self.copy_status = error_status(&e);
                Vec::new()
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("could not clear stored identity: {e}");
        }

        if self.identity.is_some() {
            info!("signed out");
        }

        self.mode = self.mode.signed_out();
        self.identity = None;
        self.messages.clear();
        self.username_draft.clear();
        self.message_draft.clear();
        self.signup_status = Status::default();
        self.copy_status = Status::default();
        self.send_status = Status::default();
        // pending copy replies and timers belong to the old session
        self.copy_generation = self.copy_generation.wrapping_add(1);
    }

    /// the visible region for the current mode, ages relative to `now`
    pub fn screen(&self, now: DateTime<Utc>) -> Screen {
        match &self.mode {
            ViewMode::Signup => Screen::Signup(SignupView {
                username: self.username_draft.clone(),
                status: self.signup_status.clone(),
            }),
            ViewMode::Inbox => Screen::Inbox(InboxView {
                handle: self
                    .identity
                    .as_ref()
                    .map(|i| format!("@{}", i.username))
                    .unwrap_or_default(),
                share_link: self.share_link(),
                copy_status: self.copy_status.clone(),
                list: self.message_list(now),
            }),
            ViewMode::Send { recipient } => Screen::Send(SendView {
                recipient_label: format!("Sending to @{recipient}"),
                tagline: format!("Leave an anonymous message for @{recipient}"),
                draft: self.message_draft.clone(),
                status: self.send_status.clone(),
            }),
        }
    }

    pub fn message_list(&self, now: DateTime<Utc>) -> MessageList {
        MessageList {
            entries: self
                .messages
                .iter()
                .map(|m| Entry {
                    text: m.message.clone(),
                    created_at: m.created_at,
                    age: RelativeAge::between(m.created_at, now),
                })
                .collect(),
        }
    }
}

fn error_status(error: &Error) -> Status {
    match error {
        Error::Validation(text) => Status::error(*text),
        Error::Rejected(text) => Status::error(text.clone()),
        Error::Network(detail) => {
            debug!("network failure: {detail}");
            Status::error("Network error")
        }
        Error::Clipboard(_) => Status::error("Unable to copy"),
        other => Status::error(other.to_string()),
    }
}
