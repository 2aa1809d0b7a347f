use url::{form_urlencoded, Url};

use crate::error::Result;

/// query parameter that addresses a message to a user
pub const RECIPIENT_PARAM: &str = "to";

/// the parts of `window.location` the client cares about
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub search: String,
}

impl PageLocation {
    pub fn new(origin: impl Into<String>, search: impl Into<String>) -> Self {
        PageLocation {
            origin: origin.into(),
            search: search.into(),
        }
    }

    /// trimmed, lower-cased `to` parameter; only an empty raw value counts as
    /// absent, whitespace still addresses a (blank) recipient
    pub fn recipient(&self) -> Option<String> {
        let query = self.search.trim_start_matches('?');

        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == RECIPIENT_PARAM)
            .filter(|(_, value)| !value.is_empty())
            .map(|(_, value)| value.trim().to_lowercase())
    }

    pub fn share_link(&self, username: &str) -> Result<String> {
        share_link(&self.origin, username)
    }
}

/// `<origin>/?to=<username>`
pub fn share_link(origin: &str, username: &str) -> Result<String> {
    let origin = Url::parse(origin)?.origin().ascii_serialization();

    Ok(format!(
        "{origin}/?{RECIPIENT_PARAM}={}",
        encode_component(username)
    ))
}

/// percent-encode like `encodeURIComponent`: spaces become `%20` and
/// `!'()~` stay literal
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%7E", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_is_normalized() {
        let location = PageLocation::new("https://whisper.example", "?to=%20%20Alice%20");
        assert_eq!(location.recipient(), Some("alice".to_owned()));

        let location = PageLocation::new("https://whisper.example", "?ref=x&to=+BOB+");
        assert_eq!(location.recipient(), Some("bob".to_owned()));
    }

    #[test]
    fn missing_recipient() {
        for search in ["", "?", "?from=bob", "?to=", "?from=bob&to="] {
            let location = PageLocation::new("https://whisper.example", search);
            assert_eq!(location.recipient(), None, "{search}");
        }
    }

    #[test]
    fn blank_recipient_is_still_a_recipient() {
        let location = PageLocation::new("https://whisper.example", "?to=%20%20");
        assert_eq!(location.recipient(), Some(String::new()));
    }

    #[test]
    fn link_for_username() {
        assert_eq!(
            share_link("https://whisper.example", "bob").unwrap(),
            "https://whisper.example/?to=bob"
        );
        assert_eq!(
            share_link("http://localhost:8080", "bob").unwrap(),
            "http://localhost:8080/?to=bob"
        );
        assert_eq!(
            share_link("https://whisper.example:443/inbox?x=1", "bob").unwrap(),
            "https://whisper.example/?to=bob"
        );
    }

    #[test]
    fn link_is_encoded() {
        let link = share_link("https://whisper.example", "a&b=c").unwrap();
        assert_eq!(link, "https://whisper.example/?to=a%26b%3Dc");

        let link = share_link("https://whisper.example", "o'neil x+(1)~!").unwrap();
        assert_eq!(link, "https://whisper.example/?to=o'neil%20x%2B(1)~!");

        let location = PageLocation::new("https://whisper.example", "?to=o'neil%20x%2B(1)~!");
        assert_eq!(location.recipient(), Some("o'neil x+(1)~!".to_owned()));

        let location = PageLocation::new("https://whisper.example", "?to=a%26b%3Dc");
        assert_eq!(location.recipient(), Some("a&b=c".to_owned()));
    }

    #[test]
    fn link_requires_origin() {
        assert!(share_link("null", "bob").is_err());
    }
}
