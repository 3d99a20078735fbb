use serde::{Deserialize, Serialize};

pub use desktop_app_contract::PointerPosition;

pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_BACKGROUND_IMAGE: &str = "/backgrounds/teal-grid.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    Wallet,
    Arena,
    TicTacToe,
    Settings,
    Marketplace,
}

impl AppId {
    pub const ALL: [AppId; 5] = [
        Self::Wallet,
        Self::Arena,
        Self::TicTacToe,
        Self::Settings,
        Self::Marketplace,
    ];

    /// Stable key used by manifests, persisted layouts, and DOM ids.
    pub fn key(self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::Arena => "arena",
            Self::TicTacToe => "tic-tac-toe",
            Self::Settings => "settings",
            Self::Marketplace => "marketplace",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|app_id| app_id.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFlags {
    /// Resize gestures are ignored entirely.
    pub fixed_size: bool,
    /// The window may grow but never shrink below the size it opened with.
    pub grow_only: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            fixed_size: false,
            grow_only: false,
            minimizable: true,
            maximizable: true,
        }
    }
}

/// An open mini-app window.
///
/// `minimized` and `maximized` are independent: a maximized window can be minimized and comes
/// back maximized on restore. Minimized windows stay mounted and are only hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    /// Geometry the window opened with; resize floor for `grow_only` windows.
    pub original_rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub flags: WindowFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopPreferences {
    pub restore_on_boot: bool,
    pub max_restore_windows: usize,
    /// Experimental: mirror the window layout into the page URL instead of local storage.
    pub query_state_layout: bool,
    pub background_image: String,
}

impl Default for DesktopPreferences {
    fn default() -> Self {
        Self {
            restore_on_boot: true,
            max_restore_windows: 6,
            query_state_layout: false,
            background_image: DEFAULT_BACKGROUND_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub windows: Vec<WindowRecord>,
    pub active_window: Option<WindowId>,
    pub start_menu_open: bool,
    pub preferences: DesktopPreferences,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            active_window: None,
            start_menu_open: false,
            preferences: DesktopPreferences::default(),
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            windows: self.windows.clone(),
            active_window: self.active_window,
        }
    }

    /// Replaces the window layout with `snapshot`, keeping preferences.
    pub fn apply_snapshot(&mut self, snapshot: DesktopSnapshot) {
        self.windows = snapshot.windows;
        self.active_window = snapshot
            .active_window
            .filter(|id| self.windows.iter().any(|w| w.id == *id));
        self.next_window_id = self
            .windows
            .iter()
            .map(|w| w.id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
            .max(self.next_window_id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub windows: Vec<WindowRecord>,
    pub active_window: Option<WindowId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::North => "edge-n",
            Self::South => "edge-s",
            Self::East => "edge-e",
            Self::West => "edge-w",
            Self::NorthEast => "edge-ne",
            Self::NorthWest => "edge-nw",
            Self::SouthEast => "edge-se",
            Self::SouthWest => "edge-sw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}
