//! # agency-devtools
//!
//! Headless core of the design-QA overlay that ships with the agency site in
//! development builds. The browser shell (`site/`) binds these types to real
//! DOM events; everything here runs natively so it can be tested without a
//! browser.
//!
//! ## Pieces
//!
//! - [`state`] - toggle store (overlay on/off, outline flags, animation speed)
//! - [`attributes`] - mirrors the store onto `data-dev-*` root attributes
//! - [`events`] - subscribe/unsubscribe plumbing for host events
//! - [`errors`] - newest-first log of page errors, capped at 20
//! - [`keyboard`] - shortcut table
//! - [`inspector`] - element-under-cursor resolution, breadcrumb, panel placement
//! - [`viewport`] - breakpoint / environment / route reporters
//! - [`liveness`] - quick-links reachability poller
//! - [`overlay`] - [`DevOverlay`], the pieces wired together
//!
//! ## Example
//!
//! ```rust
//! use agency_devtools::{DevOverlay, FocusTarget, KeyPress, MemoryRoot, OverlayConfig};
//!
//! let mut overlay = DevOverlay::new(MemoryRoot::new(), OverlayConfig::default());
//! overlay.mount();
//!
//! let chord = KeyPress::key("g").with_ctrl().with_shift();
//! overlay.handle_key(&chord, FocusTarget::None);
//! assert!(overlay.state().is_active);
//! overlay.with_root(|root| assert_eq!(root.get("data-dev-mode"), Some("active")));
//!
//! overlay.unmount();
//! overlay.with_root(|root| assert!(root.dev_attributes().is_empty()));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod attributes;
pub mod errors;
pub mod events;
pub mod inspector;
pub mod keyboard;
pub mod liveness;
pub mod overlay;
pub mod state;
pub mod viewport;

// ============================================================================
// Re-exports
// ============================================================================

pub use attributes::{AttributeSync, MemoryRoot, RootAttributes};
pub use errors::{ERROR_LOG_CAPACITY, ErrorCollector, ErrorEvent, ErrorRecord};
pub use events::{Broadcast, Subscription};
pub use inspector::{BoxMetrics, Edges, InspectNode, InspectedElement, Rect};
pub use keyboard::{FocusTarget, KeyPress, dispatch_key};
pub use liveness::{LinkReport, LinkStatus, PollSettings, QuickLink};
pub use overlay::{DevOverlay, OverlayConfig};
pub use state::{Action, AnimationState, Flag, ToggleState, ToggleStore};
pub use viewport::{Breakpoint, Environment, RouteInfo, StatusBar};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
