//! Shared contract between the desktop shell and hosted mini-apps.
//!
//! Mini-apps switch screens through the in-app router ([`router`], [`router_view`]) and open
//! short-lived overlay panels through dispatch windows ([`dispatch`], [`dispatch_view`]). Both
//! come as a headless core plus a thin Leptos provider layer, so state stays instance-scoped per
//! provider mount.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dispatch;
pub mod dispatch_view;
pub mod gesture;
pub mod router;
pub mod router_view;

use serde::{Deserialize, Serialize};

pub use dispatch::{
    DispatchWindow, DispatchWindowConfig, DispatchWindowId, DispatchWindowManager, OnClose,
};
pub use dispatch_view::{
    use_dispatch_windows, DispatchContent, DispatchWindowProvider, DispatchWindowsContext,
};
pub use gesture::{pointer_from_mouse_event, PointerGesture};
pub use router::{InternalAppRouter, Route, RouteParams, RoutePattern, RouterState, SubscriptionId};
pub use router_view::{
    use_app_router, use_app_routes, AppRouteDefinition, AppRouterContext, AppRouterProvider,
    RouteComponent, RouteRenderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Pointer location in client (viewport) pixels.
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Top-left origin of a window in desktop pixels.
pub struct Position {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Window dimensions in pixels.
pub struct Size {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}
