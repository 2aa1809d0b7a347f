//! View mode state machine.
//!
//! ```text
//! initial ──> Signup ──signed_in──> Inbox
//!    │          ^                     │
//!    │          └─────signed_out──────┘
//!    └──────> Send { recipient } ──signed_out──> Signup
//! ```
//!
//! `Send` can only be entered from [`ViewMode::initial`], i.e. once per page
//! load.

use crate::types::Identity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Signup,
    Inbox,
    Send { recipient: String },
}

impl ViewMode {
    /// a recipient from the page URL wins over a stored identity
    pub fn initial(recipient: Option<String>, identity: Option<&Identity>) -> Self {
        match (recipient, identity) {
            (Some(recipient), _) => ViewMode::Send { recipient },
            (None, Some(_)) => ViewMode::Inbox,
            (None, None) => ViewMode::Signup,
        }
    }

    /// transition after a successful signup, only legal from `Signup`
    pub fn signed_in(&self) -> Option<ViewMode> {
        match self {
            ViewMode::Signup => Some(ViewMode::Inbox),
            _ => None,
        }
    }

    pub fn signed_out(&self) -> ViewMode {
        ViewMode::Signup
    }

    pub fn recipient(&self) -> Option<&str> {
        match self {
            ViewMode::Send { recipient } => Some(recipient),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Signup => "signup",
            ViewMode::Inbox => "inbox",
            ViewMode::Send { .. } => "send",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> Identity {
        Identity {
            id: "1".to_owned(),
            username: "bob".to_owned(),
        }
    }

    #[test]
    fn recipient_takes_precedence() {
        let mode = ViewMode::initial(Some("alice".to_owned()), Some(&bob()));

        assert_eq!(
            mode,
            ViewMode::Send {
                recipient: "alice".to_owned()
            }
        );
        assert_eq!(mode.recipient(), Some("alice"));
    }

    #[test]
    fn identity_opens_inbox() {
        assert_eq!(ViewMode::initial(None, Some(&bob())), ViewMode::Inbox);
        assert_eq!(ViewMode::initial(None, None), ViewMode::Signup);
    }

    #[test]
    fn transitions() {
        assert_eq!(ViewMode::Signup.signed_in(), Some(ViewMode::Inbox));
        assert_eq!(ViewMode::Inbox.signed_in(), None);
        assert_eq!(
            ViewMode::Send {
                recipient: "alice".to_owned()
            }
            .signed_in(),
            None
        );
        assert_eq!(ViewMode::Inbox.signed_out(), ViewMode::Signup);
        assert_eq!(ViewMode::Signup.signed_out(), ViewMode::Signup);
    }
}
