use std::time::Duration;

use chrono::{DateTime, Utc};
use gloo_console::error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Storage;
use whisper::{Browser, Error, MemoryStore, PageLocation, Result, SessionStore};

/// clipboard and timers of the current window
pub struct WebBrowser;

impl Browser for WebBrowser {
    async fn copy_text(&self, text: &str) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| Error::Clipboard("no window".to_owned()))?;
        let promise = window.navigator().clipboard().write_text(text);

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| Error::Clipboard(describe(&e)))
    }

    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });

            if !matches!(scheduled, Some(Ok(_))) {
                error!("Error scheduling timer");
                let _ = resolve.call0(&JsValue::NULL);
            }
        });

        let _ = JsFuture::from(promise).await;
    }
}

/// localStorage, or memory when the browser denies access to it (e.g. storage
/// disabled for the site)
pub enum PageSession {
    Local { storage: Storage, key: &'static str },
    Memory(MemoryStore),
}

impl PageSession {
    pub fn open(key: &'static str) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => PageSession::Local { storage, key },
            None => {
                error!("localStorage is unavailable, the session will not survive a reload");
                PageSession::Memory(MemoryStore::default())
            }
        }
    }
}

impl SessionStore for PageSession {
    fn load(&self) -> Option<String> {
        match self {
            PageSession::Local { storage, key } => storage.get_item(key).ok().flatten(),
            PageSession::Memory(memory) => memory.load(),
        }
    }

    fn save(&self, value: &str) -> Result<()> {
        match self {
            PageSession::Local { storage, key } => storage
                .set_item(key, value)
                .map_err(|e| Error::Storage(describe(&e))),
            PageSession::Memory(memory) => memory.save(value),
        }
    }

    fn clear(&self) -> Result<()> {
        match self {
            PageSession::Local { storage, key } => storage
                .remove_item(key)
                .map_err(|e| Error::Storage(describe(&e))),
            PageSession::Memory(memory) => memory.clear(),
        }
    }
}

pub fn page_location() -> PageLocation {
    let location = web_sys::window().map(|w| w.location());

    match location {
        Some(location) => PageLocation::new(
            location.origin().unwrap_or_default(),
            location.search().unwrap_or_default(),
        ),
        None => {
            error!("Error reading the page location");
            PageLocation::default()
        }
    }
}

pub fn now() -> DateTime<Utc> {
    to_utc(js_sys::Date::now())
}

fn to_utc(millis: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis as i64).unwrap_or_default()
}

/// calendar date in the user's locale
pub fn locale_date(date: DateTime<Utc>) -> String {
    js_sys::Date::new(&JsValue::from_f64(date.timestamp_millis() as f64))
        .to_locale_date_string("default", &JsValue::UNDEFINED)
        .into()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::to_utc;

    #[test]
    fn millis_to_utc() {
        assert_eq!(to_utc(1_709_296_200_000.0).to_rfc3339(), "2024-03-01T12:30:00+00:00");
        assert_eq!(to_utc(f64::NAN).timestamp(), 0);
    }
}
