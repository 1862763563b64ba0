//! JavaScript bindings. Everything crosses the boundary as JSON strings.

mod local_storage;

use wasm_bindgen::prelude::*;

use abricos_core::catalog;
use abricos_core::config::AppConfig;
use abricos_core::dataset;
use abricos_runtime::{App, Message};

pub use local_storage::LocalStorage;

fn encode<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// JSON for JS; a failed encode is a thrown error, never `null`.
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    encode(value).map_err(js_error)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Catalog search without any page state, for quick lookups from JS.
#[wasm_bindgen]
pub fn filter_catalog(query: &str, genre: Option<String>) -> Result<String, JsValue> {
    let entries = dataset::catalog();
    to_json(&catalog::filter(&entries, query, genre.as_deref()))
}

/// The app, backed by `window.localStorage`.
#[wasm_bindgen]
pub struct AbricosApp {
    inner: App<LocalStorage>,
}

#[wasm_bindgen]
impl AbricosApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AbricosApp, JsValue> {
        let store = LocalStorage::open().map_err(js_error)?;
        let inner = App::new(AppConfig::default(), store).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Apply one JSON-encoded message, e.g. `{"Home":{"QueryChanged":"нар"}}`.
    pub fn dispatch(&mut self, message: &str) -> Result<(), JsValue> {
        let msg: Message = serde_json::from_str(message).map_err(js_error)?;
        self.inner.update(msg);
        Ok(())
    }

    pub fn page(&self) -> Result<String, JsValue> {
        to_json(self.inner.page())
    }

    pub fn home_view(&self) -> Result<String, JsValue> {
        to_json(&self.inner.home_view())
    }

    /// `null` unless the detail page is open.
    pub fn detail_view(&self) -> Result<String, JsValue> {
        to_json(&self.inner.detail_view())
    }

    pub fn auth_view(&self) -> Result<String, JsValue> {
        to_json(self.inner.auth())
    }

    /// Pending notices as a JSON array; drains them.
    pub fn take_notices(&mut self) -> Result<String, JsValue> {
        to_json(&self.inner.take_notices())
    }

    /// `{"to":{...},"afterMs":n}` or `null`. The caller sets a timer and
    /// dispatches `"ScheduledNavigationDue"` when it fires.
    pub fn scheduled_navigation(&self) -> Result<String, JsValue> {
        to_json(&self.inner.scheduled_navigation())
    }

    pub fn current_user(&self) -> Result<String, JsValue> {
        let user = self.inner.current_user().map_err(js_error)?;
        to_json(&user)
    }
}
