//! The overlay as one explicitly-owned value.
//!
//! [`DevOverlay`] wires the toggle store to the attribute synchronizer and the
//! error broadcast to the collector for as long as it is mounted. The host
//! (browser shell or test) forwards raw events into it; nothing here reaches
//! for globals.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeSync, RootAttributes};
use crate::errors::{ErrorCollector, ErrorEvent, ErrorRecord};
use crate::events::{Broadcast, Subscription};
use crate::inspector::{self, InspectNode, InspectedElement};
use crate::keyboard::{FocusTarget, KeyPress, dispatch_key};
use crate::liveness::{QuickLink, default_links};
use crate::state::{Action, ToggleState, ToggleStore};

/// Host-provided settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// URI scheme registered by the editor (`vscode`, `cursor`, `zed`).
    pub editor_scheme: String,
    /// Absolute checkout path, prefixed to `data-dev-source` hints.
    pub project_root: String,
    pub links: Vec<QuickLink>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            editor_scheme: "vscode".to_string(),
            project_root: String::new(),
            links: default_links(),
        }
    }
}

pub struct DevOverlay<R: RootAttributes + 'static> {
    config: OverlayConfig,
    store: ToggleStore,
    sync: Rc<RefCell<AttributeSync<R>>>,
    errors: Rc<RefCell<ErrorCollector>>,
    error_events: Broadcast<ErrorEvent>,
    /// Live only between `mount` and `unmount`.
    subscriptions: Vec<Subscription>,
}

impl<R: RootAttributes + 'static> DevOverlay<R> {
    pub fn new(root: R, config: OverlayConfig) -> Self {
        Self {
            config,
            store: ToggleStore::new(),
            sync: Rc::new(RefCell::new(AttributeSync::new(root))),
            errors: Rc::new(RefCell::new(ErrorCollector::new())),
            error_events: Broadcast::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Start mirroring state onto the root and collecting errors.
    /// Calling it twice is a no-op.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }

        self.sync.borrow_mut().apply(self.store.state());

        let sync = Rc::clone(&self.sync);
        self.subscriptions.push(
            self.store
                .subscribe(move |state| sync.borrow_mut().apply(state)),
        );

        let errors = Rc::clone(&self.errors);
        self.subscriptions
            .push(self.error_events.subscribe(move |event| {
                errors.borrow_mut().record(event);
            }));

        tracing::debug!("dev overlay mounted");
    }

    /// Stop listening, strip every `data-dev-*` attribute from the root and
    /// drop the toggle state back to its defaults. The error log is kept.
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.subscriptions.clear();
        self.store.reset();
        self.sync.borrow_mut().clear();
        tracing::debug!("dev overlay unmounted");
    }

    pub fn state(&self) -> &ToggleState {
        self.store.state()
    }

    /// State changes for UI layers that render from the store.
    pub fn changes(&self) -> &Broadcast<ToggleState> {
        self.store.changes()
    }

    /// Where the host pushes `error` / `unhandledrejection` signals.
    pub fn error_events(&self) -> &Broadcast<ErrorEvent> {
        &self.error_events
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Apply an action. Returns whether anything visible changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if action == Action::ClearErrors {
            let mut errors = self.errors.borrow_mut();
            let had_any = !errors.is_empty();
            errors.clear();
            return had_any;
        }
        self.store.dispatch(action)
    }

    /// Run a keydown through the shortcut table and apply the result.
    /// Returns the action taken so the host can `preventDefault`.
    pub fn handle_key(&mut self, press: &KeyPress, focus: FocusTarget) -> Option<Action> {
        let action = dispatch_key(press, focus, self.store.state())?;
        self.dispatch(action);
        Some(action)
    }

    /// Forward a runtime error. Ignored while unmounted.
    pub fn record_error(&self, event: ErrorEvent) -> bool {
        self.error_events.emit(&event) > 0
    }

    /// Newest first.
    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.errors.borrow().snapshot()
    }

    pub fn error_total(&self) -> u64 {
        self.errors.borrow().total()
    }

    /// Hover inspection runs only with the overlay on and labels enabled.
    pub fn should_inspect(&self) -> bool {
        let state = self.store.state();
        state.is_active && state.show_labels
    }

    pub fn inspect<N: InspectNode>(&self, hovered: N) -> Option<InspectedElement> {
        if !self.should_inspect() {
            return None;
        }
        inspector::inspect(hovered)
    }

    /// Editor URI for the inspected element, when it carries a source hint.
    pub fn editor_link(&self, element: &InspectedElement) -> Option<String> {
        let source = element.source.as_deref()?;
        Some(inspector::editor_uri(
            &self.config.editor_scheme,
            &self.config.project_root,
            source,
        ))
    }

    pub fn with_root<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(self.sync.borrow().root())
    }
}

impl<R: RootAttributes + 'static> Drop for DevOverlay<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
