//! Browser storage backends (wasm32 only)

use wasm_bindgen::JsCast;

use super::{KeyValueStore, StorageError, StorageResult};

fn local_storage() -> StorageResult<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

fn html_document() -> StorageResult<web_sys::HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable)
}

fn js_err(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

/// `window.localStorage`
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_err)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        local_storage()?.set_item(key, value).map_err(js_err)
    }
}

/// `document.cookie`, one cookie per key
pub struct CookieStore {
    /// Cookie lifetime
    pub max_age_days: u32,
}

impl Default for CookieStore {
    fn default() -> Self {
        Self { max_age_days: 365 }
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let cookies = html_document()?.cookie().map_err(js_err)?;
        let prefix = format!("{key}=");
        Ok(cookies
            .split(';')
            .map(str::trim_start)
            .find_map(|c| c.strip_prefix(&prefix))
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let max_age = u64::from(self.max_age_days) * 24 * 60 * 60;
        html_document()?
            .set_cookie(&format!("{key}={value};max-age={max_age};path=/"))
            .map_err(js_err)
    }
}
