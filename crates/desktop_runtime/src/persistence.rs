//! Desktop layout and preference persistence.
//!
//! Layout snapshots go to localStorage by default. With the experimental query-state preference
//! the layout is mirrored into the page URL (`?layout=`) instead, so a link reproduces the desktop.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{DesktopPreferences, DesktopSnapshot, DesktopState, DESKTOP_LAYOUT_SCHEMA_VERSION};

#[cfg(target_arch = "wasm32")]
const SNAPSHOT_KEY: &str = "retrodesk.layout.v1";
#[cfg(target_arch = "wasm32")]
const PREFERENCES_KEY: &str = "retrodesk.preferences.v1";
/// URL query parameter carrying the layout when query-state layout is enabled.
pub const LAYOUT_QUERY_PARAM: &str = "layout";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("browser storage is unavailable")]
    StorageUnavailable,
    #[error("layout schema {found} is not supported (expected {expected})")]
    SchemaMismatch { expected: u32, found: u32 },
    #[error("invalid persisted payload: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("browser rejected the write: {0}")]
    Browser(String),
}

/// Where the window layout is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBackend {
    LocalStorage,
    QueryString,
}

impl LayoutBackend {
    pub fn for_preferences(preferences: &DesktopPreferences) -> Self {
        if preferences.query_state_layout {
            Self::QueryString
        } else {
            Self::LocalStorage
        }
    }
}

#[derive(Deserialize)]
struct SchemaHeader {
    schema_version: u32,
}

pub fn encode_snapshot(snapshot: &DesktopSnapshot) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Parses a snapshot, rejecting payloads written under a different schema version.
pub fn decode_snapshot(raw: &str) -> Result<DesktopSnapshot, PersistenceError> {
    let header: SchemaHeader = serde_json::from_str(raw)?;
    if header.schema_version != DESKTOP_LAYOUT_SCHEMA_VERSION {
        return Err(PersistenceError::SchemaMismatch {
            expected: DESKTOP_LAYOUT_SCHEMA_VERSION,
            found: header.schema_version,
        });
    }
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_preferences(preferences: &DesktopPreferences) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(preferences)?)
}

pub fn decode_preferences(raw: &str) -> Result<DesktopPreferences, PersistenceError> {
    Ok(serde_json::from_str(raw)?)
}

/// Loads stored preferences, falling back to defaults.
pub fn load_preferences() -> DesktopPreferences {
    #[cfg(target_arch = "wasm32")]
    {
        let raw = local_storage().and_then(|storage| storage.get_item(PREFERENCES_KEY).ok().flatten());
        match raw.as_deref().map(decode_preferences) {
            Some(Ok(preferences)) => preferences,
            Some(Err(err)) => {
                leptos::logging::warn!("stored preferences ignored: {err}");
                DesktopPreferences::default()
            }
            None => DesktopPreferences::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        DesktopPreferences::default()
    }
}

pub fn persist_preferences(preferences: &DesktopPreferences) -> Result<(), PersistenceError> {
    let raw = encode_preferences(preferences)?;

    #[cfg(target_arch = "wasm32")]
    {
        let storage = local_storage().ok_or(PersistenceError::StorageUnavailable)?;
        storage
            .set_item(PREFERENCES_KEY, &raw)
            .map_err(|err| PersistenceError::Browser(format!("{err:?}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = raw;
        Ok(())
    }
}

/// Loads the boot snapshot from `backend`, logging and discarding unreadable payloads.
pub fn load_layout_snapshot(backend: LayoutBackend) -> Option<DesktopSnapshot> {
    #[cfg(target_arch = "wasm32")]
    {
        let raw = match backend {
            LayoutBackend::LocalStorage => {
                local_storage().and_then(|storage| storage.get_item(SNAPSHOT_KEY).ok().flatten())
            }
            LayoutBackend::QueryString => query_param(LAYOUT_QUERY_PARAM),
        }?;
        match decode_snapshot(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                leptos::logging::warn!("persisted layout ignored: {err}");
                None
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = backend;
        None
    }
}

/// Writes the current window layout to the backend chosen by the state's preferences.
pub fn persist_layout_snapshot(state: &DesktopState) -> Result<(), PersistenceError> {
    let raw = encode_snapshot(&state.snapshot())?;
    let backend = LayoutBackend::for_preferences(&state.preferences);

    #[cfg(target_arch = "wasm32")]
    {
        match backend {
            LayoutBackend::LocalStorage => {
                let storage = local_storage().ok_or(PersistenceError::StorageUnavailable)?;
                storage
                    .set_item(SNAPSHOT_KEY, &raw)
                    .map_err(|err| PersistenceError::Browser(format!("{err:?}")))?;
                // Leaving query mode drops the stale URL copy.
                replace_query_param(LAYOUT_QUERY_PARAM, None)
            }
            LayoutBackend::QueryString => replace_query_param(LAYOUT_QUERY_PARAM, Some(&raw)),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (raw, backend);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn replace_query_param(name: &str, value: Option<&str>) -> Result<(), PersistenceError> {
    let browser_err = |err: wasm_bindgen::JsValue| PersistenceError::Browser(format!("{err:?}"));
    let window = web_sys::window().ok_or(PersistenceError::StorageUnavailable)?;
    let url = web_sys::Url::new(&window.location().href().map_err(browser_err)?).map_err(browser_err)?;
    let params = url.search_params();
    match value {
        Some(value) => params.set(name, value),
        None => {
            if params.get(name).is_none() {
                return Ok(());
            }
            params.delete(name);
        }
    }
    window
        .history()
        .map_err(browser_err)?
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url.href()))
        .map_err(browser_err)
}
