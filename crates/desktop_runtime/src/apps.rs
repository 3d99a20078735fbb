//! Static app registry and mini-app renderers.
//!
//! Descriptors come from the TOML manifests under `manifests/`, which `build.rs` validates and
//! embeds as JSON.

mod arena;
mod placeholders;
mod settings;
mod tictactoe;

use std::sync::OnceLock;

use leptos::*;
use serde::Deserialize;

use crate::model::{AppId, WindowFlags, WindowRect};

pub use arena::ArenaApp;
pub use placeholders::{MarketplaceApp, UnknownApp, WalletApp};
pub use settings::SettingsApp;
pub use tictactoe::TicTacToeApp;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowDefaults {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub fixed_size: bool,
    pub grow_only: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub disabled: bool,
    pub show_in_launcher: bool,
    pub show_on_desktop: bool,
    pub window_defaults: WindowDefaults,
}

impl AppDescriptor {
    pub fn default_rect(&self) -> WindowRect {
        let defaults = self.window_defaults;
        WindowRect {
            x: defaults.x,
            y: defaults.y,
            w: defaults.width,
            h: defaults.height,
        }
    }

    pub fn flags(&self) -> WindowFlags {
        let defaults = self.window_defaults;
        WindowFlags {
            fixed_size: defaults.fixed_size,
            grow_only: defaults.grow_only,
            minimizable: defaults.minimizable,
            maximizable: defaults.maximizable && !defaults.fixed_size,
        }
    }
}

pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        serde_json::from_str(APP_MANIFEST_CATALOG_JSON)
            .expect("build-time app catalog matches AppDescriptor")
    })
}

pub fn app_descriptor(app_id: AppId) -> &'static AppDescriptor {
    app_registry()
        .iter()
        .find(|entry| entry.app_id == app_id)
        .expect("app descriptor exists")
}

pub fn launcher_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

pub fn desktop_icon_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Renders the mini-app for `app_id`.
pub fn render_app(app_id: AppId) -> View {
    match app_id {
        AppId::Wallet => view! { <WalletApp /> }.into_view(),
        AppId::Arena => view! { <ArenaApp /> }.into_view(),
        AppId::TicTacToe => view! { <TicTacToeApp /> }.into_view(),
        AppId::Settings => view! { <SettingsApp /> }.into_view(),
        AppId::Marketplace => view! { <MarketplaceApp /> }.into_view(),
    }
}

/// What a manifest key from a link or persisted state resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLaunch {
    Open(AppId),
    Unknown(String),
}

pub fn resolve_app_key(key: &str) -> AppLaunch {
    let key = key.trim();
    match AppId::from_key(key) {
        Some(app_id) => AppLaunch::Open(app_id),
        None => AppLaunch::Unknown(key.to_string()),
    }
}

/// Renders by manifest key, falling back to a placeholder for keys with no registered app.
pub fn render_app_by_key(key: &str) -> View {
    match resolve_app_key(key) {
        AppLaunch::Open(app_id) => render_app(app_id),
        AppLaunch::Unknown(key) => {
            logging::warn!("no renderer registered for app `{key}`");
            view! { <UnknownApp app_key=key /> }.into_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_app_id_has_a_manifest() {
        let registered = app_registry()
            .iter()
            .map(|entry| entry.app_id)
            .collect::<Vec<_>>();
        for app_id in AppId::ALL {
            assert!(registered.contains(&app_id), "missing manifest for {app_id:?}");
        }
        assert_eq!(registered.len(), AppId::ALL.len());
    }

    #[test]
    fn manifest_keys_round_trip_through_app_id() {
        for app_id in AppId::ALL {
            assert_eq!(AppId::from_key(app_id.key()), Some(app_id));
        }
        assert_eq!(AppId::from_key("calculator"), None);
    }

    #[test]
    fn linked_keys_resolve_to_apps_or_placeholder() {
        assert_eq!(resolve_app_key(" tic-tac-toe "), AppLaunch::Open(AppId::TicTacToe));
        assert_eq!(resolve_app_key("arena"), AppLaunch::Open(AppId::Arena));
        assert_eq!(
            resolve_app_key("solitaire"),
            AppLaunch::Unknown("solitaire".to_string())
        );
    }

    #[test]
    fn marketplace_is_disabled_but_listed() {
        let descriptor = app_descriptor(AppId::Marketplace);

        assert!(descriptor.disabled);
        assert!(launcher_apps()
            .iter()
            .any(|entry| entry.app_id == AppId::Marketplace));
    }

    #[test]
    fn fixed_size_apps_are_never_maximizable() {
        for entry in app_registry() {
            if entry.window_defaults.fixed_size {
                assert!(!entry.flags().maximizable, "{:?}", entry.app_id);
            }
        }
    }

    #[test]
    fn desktop_icons_follow_manifest_flag() {
        let icons = desktop_icon_apps()
            .iter()
            .map(|entry| entry.app_id)
            .collect::<Vec<_>>();

        assert!(icons.contains(&AppId::Arena));
        assert!(!icons.contains(&AppId::Settings));
    }
}
