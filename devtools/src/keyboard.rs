//! Global shortcut table for the overlay.
//!
//! | Keys | When | Action |
//! |---|---|---|
//! | Ctrl/Cmd+Shift+G | always | toggle overlay |
//! | Escape | overlay active | close overlay |
//! | `1`..`6` | active, focus outside text entry | toggle flag |
//! | `p` | active, focus outside text entry | cycle animation |
//! | `e` | active, focus outside text entry | toggle error panel |

use crate::state::{Action, Flag, ToggleState};

/// A keydown, reduced to what the table needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key` (`"g"`, `"G"`, `"Escape"`, `"1"`, ...).
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    fn single_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    /// No Ctrl/Cmd/Alt held (Shift is fine: it only changes case).
    fn is_bare(&self) -> bool {
        !self.ctrl && !self.meta && !self.alt
    }
}

/// What currently holds keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    None,
    TextInput,
    TextArea,
    ContentEditable,
    Other,
}

impl FocusTarget {
    /// Classify from the focused element's tag, `type` attribute and
    /// contenteditable state.
    pub fn classify(tag: &str, input_type: Option<&str>, content_editable: bool) -> Self {
        if content_editable {
            return Self::ContentEditable;
        }
        match tag.to_ascii_lowercase().as_str() {
            "textarea" => Self::TextArea,
            "input" => {
                let ty = input_type.unwrap_or("text").to_ascii_lowercase();
                match ty.as_str() {
                    "checkbox" | "radio" | "button" | "submit" | "reset" | "range" | "color"
                    | "file" | "image" => Self::Other,
                    _ => Self::TextInput,
                }
            }
            "select" => Self::Other,
            _ => Self::None,
        }
    }

    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            Self::TextInput | Self::TextArea | Self::ContentEditable
        )
    }
}

/// Map a key press to an overlay action. `None` means the page keeps the key.
pub fn dispatch_key(press: &KeyPress, focus: FocusTarget, state: &ToggleState) -> Option<Action> {
    let c = press.single_char();

    if (press.ctrl || press.meta)
        && press.shift
        && c.is_some_and(|c| c.eq_ignore_ascii_case(&'g'))
    {
        return Some(Action::ToggleActive);
    }

    if !state.is_active {
        return None;
    }

    if press.key == "Escape" {
        return Some(Action::Deactivate);
    }

    if !press.is_bare() || focus.is_text_entry() {
        return None;
    }

    match c? {
        d @ '1'..='6' => Flag::from_digit(d).map(Action::Toggle),
        'p' | 'P' => Some(Action::CycleAnimation),
        'e' | 'E' => Some(Action::Toggle(Flag::Errors)),
        _ => None,
    }
}
