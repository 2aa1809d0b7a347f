use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// server reply that marks a message as delivered, the spelling is part of the
/// backend protocol
pub const DELIVERY_STORED: &str = "messaged stored";
pub const DELIVERY_UNKNOWN_RECIPIENT: &str = "cannot find user";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

impl Identity {
    /// parse a persisted identity, anything malformed or incomplete counts as
    /// no identity at all
    pub fn restore(raw: &str) -> Option<Identity> {
        let identity: Identity = serde_json::from_str(raw).ok()?;

        if identity.id.is_empty() || identity.username.is_empty() {
            return None;
        }

        Some(identity)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Storage(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message: String,
    #[serde(rename = "createdAt", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Message {
            message: message.into(),
            created_at,
        }
    }

    /// Decode a `GET /messages` reply.
    ///
    /// The body has to be a JSON array; single entries that fail to decode are
    /// skipped so one bad record does not hide the rest of the inbox.
    pub fn parse_batch(body: &str) -> Result<Vec<Message>> {
        let values: Vec<serde_json::Value> = serde_json::from_str(body)?;
        let total = values.len();

        let messages: Vec<Message> = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(message) => Some(message),
                Err(e) => {
                    warn!("skipping undecodable message: {e}");
                    None
                }
            })
            .collect();

        if messages.len() < total {
            warn!(
                skipped = total - messages.len(),
                total,
                "inbox reply was partially decoded"
            );
        }

        Ok(messages)
    }
}

/// newest first, equal timestamps keep their received order
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Serialize, Debug)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
}

#[derive(Deserialize, Debug, Default)]
pub struct SignupReply {
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SignupReply {
    pub fn into_identity(self) -> Result<Identity> {
        match self.user {
            Some(user) => Ok(user),
            None => Err(Error::Rejected(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Unable to sign up".to_owned()),
            )),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DeliveryRequest<'a> {
    pub username: &'a str,
    pub message: &'a str,
}

#[derive(Deserialize, Debug, Default)]
pub struct DeliveryReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Stored,
    UnknownRecipient,
    Unexpected(Option<String>),
}

impl From<DeliveryReply> for Delivery {
    fn from(reply: DeliveryReply) -> Self {
        match reply.message.as_deref() {
            Some(DELIVERY_STORED) => Delivery::Stored,
            Some(DELIVERY_UNKNOWN_RECIPIENT) => Delivery::UnknownRecipient,
            _ => Delivery::Unexpected(reply.message),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range {millis}"))),
            Raw::Text(text) => {
                parse(&text).ok_or_else(|| D::Error::custom(format!("invalid timestamp {text}")))
            }
        }
    }

    pub(super) fn parse(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();

        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Some(date.with_timezone(&Utc));
        }

        // without an offset the timestamp is taken as UTC
        if let Ok(date) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(date.and_utc());
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn restore_identity() {
        let identity = Identity::restore(r#"{"id":"1","username":"bob"}"#);

        assert_eq!(
            identity,
            Some(Identity {
                id: "1".to_owned(),
                username: "bob".to_owned()
            })
        );
    }

    #[test]
    fn restore_rejects_malformed() {
        assert_eq!(Identity::restore("{not json"), None);
        assert_eq!(Identity::restore("null"), None);
        assert_eq!(Identity::restore(r#"{"id":"1"}"#), None);
        assert_eq!(Identity::restore(r#"{"id":"","username":"bob"}"#), None);
        assert_eq!(Identity::restore(r#"{"id":1,"username":"bob"}"#), None);
    }

    #[test]
    fn identity_survives_storage() {
        let identity = Identity {
            id: "65a1".to_owned(),
            username: "alice".to_owned(),
        };
        let stored = identity.to_json().unwrap();

        assert_eq!(Identity::restore(&stored), Some(identity));
    }

    #[test]
    fn message_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let messages: Vec<Message> = serde_json::from_str(
            r#"[
                {"message":"a","createdAt":"2024-03-01T12:30:00.000Z"},
                {"message":"b","createdAt":"2024-03-01T14:30:00+02:00"},
                {"message":"c","createdAt":"2024-03-01T12:30:00"},
                {"message":"d","createdAt":1709296200000}
            ]"#,
        )
        .unwrap();

        assert!(messages.iter().all(|m| m.created_at == expected));
    }

    #[test]
    fn message_without_timestamp_fails() {
        assert!(serde_json::from_str::<Message>(r#"{"message":"a"}"#).is_err());
        assert!(serde_json::from_str::<Message>(r#"{"message":"a","createdAt":"yesterday"}"#).is_err());
    }

    #[test]
    fn batch_skips_bad_entries() {
        let messages = Message::parse_batch(
            r#"[
                {"message":"kept","createdAt":"2024-03-01T12:30:00Z"},
                {"message":"no date","createdAt":null},
                {"message":"bad date","createdAt":"soon"},
                {"createdAt":"2024-03-01T12:30:00Z"},
                {"message":"also kept","createdAt":1709296200000}
            ]"#,
        )
        .unwrap();

        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, ["kept", "also kept"]);
    }

    #[test]
    fn batch_requires_array() {
        assert!(matches!(
            Message::parse_batch(r#"{"message":"user not found"}"#),
            Err(Error::Network(_))
        ));
        assert!(matches!(Message::parse_batch("<html>"), Err(Error::Network(_))));
        assert_eq!(Message::parse_batch("[]"), Ok(Vec::new()));
    }

    #[test]
    fn signup_reply() {
        let reply: SignupReply =
            serde_json::from_str(r#"{"user":{"id":"7","username":"carol"}}"#).unwrap();
        assert_eq!(reply.into_identity().unwrap().username, "carol");

        let reply: SignupReply = serde_json::from_str(r#"{"message":"user exists"}"#).unwrap();
        assert_eq!(
            reply.into_identity(),
            Err(Error::Rejected("user exists".to_owned()))
        );

        let reply: SignupReply = serde_json::from_str("{}").unwrap();
        assert_eq!(
            reply.into_identity(),
            Err(Error::Rejected("Unable to sign up".to_owned()))
        );
    }

    #[test]
    fn delivery_reply() {
        let parse = |json: &str| Delivery::from(serde_json::from_str::<DeliveryReply>(json).unwrap());

        assert_eq!(parse(r#"{"message":"messaged stored"}"#), Delivery::Stored);
        assert_eq!(parse(r#"{"message":"cannot find user"}"#), Delivery::UnknownRecipient);
        assert_eq!(
            parse(r#"{"message":"message stored"}"#),
            Delivery::Unexpected(Some("message stored".to_owned()))
        );
        assert_eq!(parse("{}"), Delivery::Unexpected(None));
    }
}
