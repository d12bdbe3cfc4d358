//! Toggle state for the design-QA overlay.
//!
//! [`ToggleStore`] is the single owner of [`ToggleState`]. Nothing mutates the
//! state except [`ToggleStore::dispatch`]; every effective change is announced
//! on [`ToggleStore::changes`] so the attribute synchronizer and UI can follow.

use serde::{Deserialize, Serialize};

use crate::events::{Broadcast, Subscription};

/// Animation playback override applied through `data-dev-animation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    #[default]
    Normal,
    Paused,
    Slow,
}

impl AnimationState {
    /// `normal -> paused -> slow -> normal`
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Paused,
            Self::Paused => Self::Slow,
            Self::Slow => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Paused => "paused",
            Self::Slow => "slow",
        }
    }
}

/// Boolean overlay flags that can be toggled individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Sections,
    Components,
    Unstandardized,
    Labels,
    Images,
    A11y,
    Errors,
}

impl Flag {
    pub const ALL: [Flag; 7] = [
        Flag::Sections,
        Flag::Components,
        Flag::Unstandardized,
        Flag::Labels,
        Flag::Images,
        Flag::A11y,
        Flag::Errors,
    ];

    /// Flag bound to a digit shortcut (`1`..=`6`).
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Flag::Sections),
            '2' => Some(Flag::Components),
            '3' => Some(Flag::Unstandardized),
            '4' => Some(Flag::Labels),
            '5' => Some(Flag::Images),
            '6' => Some(Flag::A11y),
            _ => None,
        }
    }

    /// Short human label used by the control panel.
    pub fn label(self) -> &'static str {
        match self {
            Flag::Sections => "Sections",
            Flag::Components => "Components",
            Flag::Unstandardized => "Unstandardized",
            Flag::Labels => "Labels",
            Flag::Images => "Images",
            Flag::A11y => "A11y",
            Flag::Errors => "Errors",
        }
    }

    /// Suffix of the root `data-dev-*` attribute that mirrors this flag.
    pub fn attribute_suffix(self) -> &'static str {
        match self {
            Flag::Sections => "sections",
            Flag::Components => "components",
            Flag::Unstandardized => "unstandardized",
            Flag::Labels => "labels",
            Flag::Images => "images",
            Flag::A11y => "a11y",
            Flag::Errors => "errors",
        }
    }
}

/// Every overlay switch. Created with fixed defaults at mount; never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub is_active: bool,
    pub show_sections: bool,
    pub show_components: bool,
    pub show_unstandardized: bool,
    pub show_labels: bool,
    pub show_images: bool,
    pub show_a11y: bool,
    pub show_errors: bool,
    pub animation: AnimationState,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            is_active: false,
            show_sections: false,
            show_components: false,
            show_unstandardized: false,
            show_labels: true,
            show_images: false,
            show_a11y: false,
            show_errors: false,
            animation: AnimationState::Normal,
        }
    }
}

impl ToggleState {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Sections => self.show_sections,
            Flag::Components => self.show_components,
            Flag::Unstandardized => self.show_unstandardized,
            Flag::Labels => self.show_labels,
            Flag::Images => self.show_images,
            Flag::A11y => self.show_a11y,
            Flag::Errors => self.show_errors,
        }
    }

    fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Sections => &mut self.show_sections,
            Flag::Components => &mut self.show_components,
            Flag::Unstandardized => &mut self.show_unstandardized,
            Flag::Labels => &mut self.show_labels,
            Flag::Images => &mut self.show_images,
            Flag::A11y => &mut self.show_a11y,
            Flag::Errors => &mut self.show_errors,
        }
    }
}

/// Mutations accepted by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Activate,
    Deactivate,
    ToggleActive,
    Toggle(Flag),
    SetAnimation(AnimationState),
    CycleAnimation,
    /// Empties the error log. The store itself has nothing to change; the
    /// overlay facade routes it to the collector.
    ClearErrors,
}

/// Explicitly-owned state container for the overlay.
pub struct ToggleStore {
    state: ToggleState,
    changes: Broadcast<ToggleState>,
}

impl Default for ToggleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleStore {
    pub fn new() -> Self {
        Self::with_state(ToggleState::default())
    }

    pub fn with_state(state: ToggleState) -> Self {
        Self {
            state,
            changes: Broadcast::new(),
        }
    }

    pub fn state(&self) -> &ToggleState {
        &self.state
    }

    /// Apply `action`. Returns `true` when the state actually changed, in
    /// which case subscribers have already been notified.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.state.clone();
        let state = &mut self.state;
        match action {
            Action::Activate => state.is_active = true,
            Action::Deactivate => state.is_active = false,
            Action::ToggleActive => state.is_active = !state.is_active,
            Action::Toggle(flag) => {
                let slot = state.flag_mut(flag);
                *slot = !*slot;
            }
            Action::SetAnimation(next) => state.animation = next,
            Action::CycleAnimation => state.animation = state.animation.next(),
            Action::ClearErrors => {}
        }

        let changed = self.state != before;
        if changed {
            tracing::debug!(?action, "overlay state changed");
            self.changes.emit(&self.state);
        }
        changed
    }

    /// Return to the mount-time defaults. Subscribers hear it like any other
    /// change; listeners stay registered.
    pub fn reset(&mut self) -> bool {
        let fresh = ToggleState::default();
        if self.state == fresh {
            return false;
        }
        self.state = fresh;
        tracing::debug!("overlay state reset");
        self.changes.emit(&self.state);
        true
    }

    /// Listen for committed state changes.
    pub fn subscribe(&self, listener: impl FnMut(&ToggleState) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }

    pub fn changes(&self) -> &Broadcast<ToggleState> {
        &self.changes
    }
}
