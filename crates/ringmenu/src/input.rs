use derive_more::{AsRef, Deref, Display, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Name of a physical key as reported by the host toolkit, lowercased.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, Into, AsRef,
)]
#[serde(from = "String", into = "String")]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(s: impl Into<String>) -> Self {
        Self::from(s.into())
    }
}

impl From<String> for KeyCode {
    fn from(s: String) -> Self {
        Self(s.to_ascii_lowercase())
    }
}

impl From<&str> for KeyCode {
    fn from(s: &str) -> Self {
        Self(s.to_ascii_lowercase())
    }
}

/// Logical actions the menu reacts to. Each one is bound to a [`KeyCode`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Open,
    Close,
    Confirm,
    #[strum(to_string = "rotate_cw", serialize = "cw")]
    RotateCw,
    #[strum(to_string = "rotate_ccw", serialize = "ccw")]
    RotateCcw,
}

/// Edge-triggered key polling.
pub trait Input {
    /// True only on the frame the key went down.
    fn is_key_pressed(&self, key: &KeyCode) -> bool;
}

impl<F> Input for F
where
    F: Fn(&KeyCode) -> bool,
{
    fn is_key_pressed(&self, key: &KeyCode) -> bool {
        self(key)
    }
}

/// Collects key events between two frames.
///
/// Hosts that receive key events as callbacks feed them through [`KeyLatch::press`] and
/// [`KeyLatch::release`], hand the latch to the menu as its [`Input`] and call
/// [`KeyLatch::end_frame`] after drawing. Auto-repeat presses of a key that is still held
/// are ignored.
#[derive(Debug, Clone, Default)]
pub struct KeyLatch {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the key was already held.
    pub fn press(&mut self, key: KeyCode) -> bool {
        if !self.held.insert(key.clone()) {
            return false;
        }
        self.pressed.insert(key);
        true
    }

    pub fn release(&mut self, key: &KeyCode) {
        self.held.remove(key);
    }

    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Forgets held keys too, e.g. after the window lost focus.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

impl Input for KeyLatch {
    fn is_key_pressed(&self, key: &KeyCode) -> bool {
        self.pressed.contains(key)
    }
}
