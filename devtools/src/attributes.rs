//! Mirror overlay state onto `data-dev-*` attributes of the document root.
//!
//! CSS elsewhere keys outlines and animation overrides off these attributes,
//! so the page never re-renders when a switch flips.

use std::collections::BTreeMap;

use crate::state::{AnimationState, Flag, ToggleState};

/// Prefix shared by every attribute the synchronizer owns.
pub const ATTR_PREFIX: &str = "data-dev-";
pub const ATTR_MODE: &str = "data-dev-mode";
pub const ATTR_ANIMATION: &str = "data-dev-animation";

/// Whatever element plays the document root (`<html>` in the browser).
pub trait RootAttributes {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn remove_attribute(&mut self, name: &str);
}

/// Full attribute name for a flag, e.g. `data-dev-sections`.
pub fn flag_attribute(flag: Flag) -> String {
    format!("{ATTR_PREFIX}{}", flag.attribute_suffix())
}

/// Every attribute name the synchronizer may ever write.
pub fn managed_attributes() -> Vec<String> {
    let mut names = vec![ATTR_MODE.to_string(), ATTR_ANIMATION.to_string()];
    names.extend(Flag::ALL.iter().map(|f| flag_attribute(*f)));
    names
}

/// Attributes that should be present for `state`, as `(name, value)` pairs.
/// An inactive overlay owns no attributes at all.
pub fn desired_attributes(state: &ToggleState) -> Vec<(String, String)> {
    if !state.is_active {
        return Vec::new();
    }

    let mut attrs = vec![(ATTR_MODE.to_string(), "active".to_string())];
    for flag in Flag::ALL {
        if state.flag(flag) {
            attrs.push((flag_attribute(flag), "true".to_string()));
        }
    }
    if state.animation != AnimationState::Normal {
        attrs.push((
            ATTR_ANIMATION.to_string(),
            state.animation.as_str().to_string(),
        ));
    }
    attrs
}

/// Writes [`desired_attributes`] onto a root and removes everything else it owns.
pub struct AttributeSync<R: RootAttributes> {
    root: R,
}

impl<R: RootAttributes> AttributeSync<R> {
    pub fn new(root: R) -> Self {
        Self { root }
    }

    /// Commit `state` to the root. Attributes the state does not call for are
    /// removed, so presence always matches the latest commit.
    pub fn apply(&mut self, state: &ToggleState) {
        let desired = desired_attributes(state);
        for name in managed_attributes() {
            match desired.iter().find(|(n, _)| *n == name) {
                Some((_, value)) => self.root.set_attribute(&name, value),
                None => self.root.remove_attribute(&name),
            }
        }
    }

    /// Remove every managed attribute (unmount).
    pub fn clear(&mut self) {
        for name in managed_attributes() {
            self.root.remove_attribute(&name);
        }
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }
}

/// In-memory root used by tests and headless hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRoot {
    attrs: BTreeMap<String, String>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Names of all present `data-dev-*` attributes.
    pub fn dev_attributes(&self) -> Vec<&str> {
        self.attrs
            .keys()
            .filter(|k| k.starts_with(ATTR_PREFIX))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl RootAttributes for MemoryRoot {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attrs.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn active() -> ToggleState {
        ToggleState {
            is_active: true,
            ..ToggleState::default()
        }
    }

    #[test]
    fn inactive_state_writes_nothing() {
        assert!(desired_attributes(&ToggleState::default()).is_empty());
    }

    #[test]
    fn active_state_mirrors_flags() {
        let state = ToggleState {
            show_sections: true,
            animation: AnimationState::Paused,
            ..active()
        };
        let mut sync = AttributeSync::new(MemoryRoot::new());
        sync.apply(&state);

        let root = sync.root();
        assert_eq!(root.get(ATTR_MODE), Some("active"));
        assert_eq!(root.get("data-dev-sections"), Some("true"));
        assert_eq!(root.get("data-dev-labels"), Some("true"));
        assert_eq!(root.get("data-dev-images"), None);
        assert_eq!(root.get(ATTR_ANIMATION), Some("paused"));
    }

    #[test]
    fn turning_a_flag_off_removes_its_attribute() {
        let mut sync = AttributeSync::new(MemoryRoot::new());
        let mut state = ToggleState {
            show_images: true,
            ..active()
        };
        sync.apply(&state);
        assert_eq!(sync.root().get("data-dev-images"), Some("true"));

        state.show_images = false;
        state.animation = AnimationState::Normal;
        sync.apply(&state);
        assert_eq!(sync.root().get("data-dev-images"), None);
        assert_eq!(sync.root().get(ATTR_ANIMATION), None);
    }

    #[test]
    fn deactivation_leaves_no_dev_attributes() {
        let mut sync = AttributeSync::new(MemoryRoot::new());
        sync.root_mut().set_attribute("lang", "en");
        let mut state = ToggleState {
            show_sections: true,
            show_components: true,
            show_a11y: true,
            animation: AnimationState::Slow,
            ..active()
        };
        sync.apply(&state);
        assert!(sync.root().dev_attributes().len() > 3);

        state.is_active = false;
        sync.apply(&state);
        assert_eq!(sync.root().dev_attributes(), Vec::<&str>::new());
        assert_eq!(sync.root().get("lang"), Some("en"));
    }

    #[test]
    fn clear_removes_everything_owned() {
        let mut sync = AttributeSync::new(MemoryRoot::new());
        sync.apply(&ToggleState {
            show_errors: true,
            ..active()
        });
        sync.clear();
        assert!(sync.root().is_empty());
    }

    #[test]
    fn managed_names_are_all_prefixed() {
        for name in managed_attributes() {
            assert!(name.starts_with(ATTR_PREFIX), "{name}");
        }
    }
}
