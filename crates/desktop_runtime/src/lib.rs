//! Retro desktop runtime: the outer window manager, app registry, persistence, and shell UI.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use model::*;
pub use persistence::{decode_snapshot, encode_snapshot, LayoutBackend, PersistenceError};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
