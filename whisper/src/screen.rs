use chrono::{DateTime, Utc};

use crate::age::RelativeAge;

pub const SIGNUP_TAGLINE: &str = "Receive anonymous messages from anyone";
pub const INBOX_TAGLINE: &str = "Your anonymous inbox";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Error,
}

/// inline status line below a form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub tone: Tone,
}

impl Status {
    pub fn neutral(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn class(&self) -> &'static str {
        match self.tone {
            Tone::Neutral => "status",
            Tone::Success => "status success",
            Tone::Error => "status error",
        }
    }
}

/// What the page shows; exactly one region per mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Signup(SignupView),
    Inbox(InboxView),
    Send(SendView),
}

impl Screen {
    pub fn tagline(&self) -> &str {
        match self {
            Screen::Signup(_) => SIGNUP_TAGLINE,
            Screen::Inbox(_) => INBOX_TAGLINE,
            Screen::Send(view) => &view.tagline,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupView {
    pub username: String,
    pub status: Status,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboxView {
    pub handle: String,
    pub share_link: String,
    pub copy_status: Status,
    pub list: MessageList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendView {
    pub recipient_label: String,
    pub tagline: String,
    pub draft: String,
    pub status: Status,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageList {
    pub entries: Vec<Entry>,
}

impl MessageList {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// the empty-state placeholder is shown instead of entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub age: RelativeAge,
}
