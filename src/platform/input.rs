//! Input adaptation
//!
//! Physical key names and touch buttons are resolved to [`Action`]s here and
//! nowhere else. The tracker keeps a held table for level-triggered actions
//! and latches one press notification for edge-triggered ones.

use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    PauseToggle,
    Confirm,
    Menu,
}

impl Action {
    pub const COUNT: usize = 6;

    /// Resolve a `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowleft" | "left" | "a" => Some(Action::MoveLeft),
            "arrowright" | "right" | "d" => Some(Action::MoveRight),
            " " | "space" | "spacebar" | "arrowup" | "w" => Some(Action::Fire),
            "p" | "escape" | "esc" => Some(Action::PauseToggle),
            "enter" => Some(Action::Confirm),
            "m" => Some(Action::Menu),
            _ => None,
        }
    }

    /// Resolve an on-screen button element id
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "btn-left" => Some(Action::MoveLeft),
            "btn-right" => Some(Action::MoveRight),
            "btn-fire" => Some(Action::Fire),
            "btn-pause" | "resume-btn" => Some(Action::PauseToggle),
            "start-btn" | "restart-btn" => Some(Action::Confirm),
            "menu-btn" => Some(Action::Menu),
            _ => None,
        }
    }

    /// Acts once per press rather than while held
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Action::PauseToggle | Action::Confirm | Action::Menu)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held/pressed state for every logical action
///
/// Keys are tracked individually so that releasing one of several keys
/// bound to the same action keeps the action held.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Physical keys currently down, lower-cased
    held_keys: Vec<String>,
    /// Actions held through on-screen buttons
    held_buttons: [bool; Action::COUNT],
    pressed: [bool; Action::COUNT],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a press edge unless the action is already held
    fn latch(&mut self, action: Action) {
        if !self.is_held(action) {
            self.pressed[action.index()] = true;
        }
    }

    /// Key down; auto-repeat of a key already down is ignored
    ///
    /// Returns the bound action so the caller can swallow the event.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        let action = Action::from_key(key)?;
        let key = key.to_lowercase();
        if !self.held_keys.contains(&key) {
            self.latch(action);
            self.held_keys.push(key);
        }
        Some(action)
    }

    /// Key up
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        let action = Action::from_key(key)?;
        let key = key.to_lowercase();
        self.held_keys.retain(|k| *k != key);
        Some(action)
    }

    /// On-screen button pressed; one-shot actions fire once and are not held
    pub fn button_down(&mut self, action: Action) {
        if action.is_one_shot() {
            self.tap(action);
        } else {
            self.latch(action);
            self.held_buttons[action.index()] = true;
        }
    }

    /// On-screen button released
    pub fn button_up(&mut self, action: Action) {
        self.held_buttons[action.index()] = false;
    }

    /// A discrete tap (button click) with no matching release
    pub fn tap(&mut self, action: Action) {
        self.pressed[action.index()] = true;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held_buttons[action.index()]
            || self
                .held_keys
                .iter()
                .any(|k| Action::from_key(k) == Some(action))
    }

    /// Drop everything, e.g. when the window loses focus mid-press
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        self.held_buttons = Default::default();
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Snapshot for the next tick; pending one-shots are consumed
    pub fn take_input(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.is_held(Action::MoveLeft),
            move_right: self.is_held(Action::MoveRight),
            fire: self.is_held(Action::Fire),
            pause: self.was_pressed(Action::PauseToggle),
            confirm: self.was_pressed(Action::Confirm),
            menu: self.was_pressed(Action::Menu),
        };
        self.pressed = Default::default();
        input
    }
}
