// src/engine/mode.rs
//
// Per-slot interaction mode and its transition table.
//
//   Idle --click--> Resizing --double click--> Cropping
//    ^                 |  ^                       |
//    |                 |  +-----double click------+
//    +--outside/Esc----+                          |
//    +------------outside/Esc/confirm-------------+
//
// The table only says what should happen. Carrying out the side effects
// (snapshots, commits, discards) is the slot's job.

use crate::ops::InputEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Idle,
    /// Selected; corner handles resize proportionally
    Resizing,
    /// Side handles move single crop edges; image is dimmed by the host
    Cropping,
}

impl Mode {
    pub fn is_active(self) -> bool {
        !matches!(self, Mode::Idle)
    }
}

/// Discrete events that can change the mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    SingleClick,
    DoubleClick,
    ExternalClick,
    Escape,
    Confirm,
}

impl Trigger {
    /// Mode trigger carried by an input event, if any (pointer events are not triggers)
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match event {
            InputEvent::Click => Some(Trigger::SingleClick),
            InputEvent::DoubleClick => Some(Trigger::DoubleClick),
            InputEvent::ExternalClick => Some(Trigger::ExternalClick),
            InputEvent::Escape => Some(Trigger::Escape),
            InputEvent::Confirm => Some(Trigger::Confirm),
            InputEvent::PointerDown { .. }
            | InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::PointerLeave
            | InputEvent::PointerCancel => None,
        }
    }
}

/// Side effect required by a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Nothing changes
    Stay,
    /// Idle -> Resizing
    Select,
    /// Resizing -> Cropping: snapshot the crop anchor
    EnterCrop,
    /// Cropping -> Resizing: commit the tentative crop, keep the selection
    LeaveCrop,
    /// Resizing -> Idle: nothing to recompute, resizes commit per gesture
    Deselect,
    /// Cropping -> Idle: commit the tentative crop
    CommitCrop,
    /// Cropping -> Idle via Escape: drop the tentative crop, host not called
    DiscardCrop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub action: Action,
}

impl Transition {
    pub fn changes_mode(&self) -> bool {
        self.from != self.to
    }
}

/// Transition table
pub fn transition(mode: Mode, trigger: Trigger) -> Transition {
    let (to, action) = match (mode, trigger) {
        (Mode::Idle, Trigger::SingleClick) => (Mode::Resizing, Action::Select),
        (Mode::Idle, _) => (Mode::Idle, Action::Stay),

        (Mode::Resizing, Trigger::DoubleClick) => (Mode::Cropping, Action::EnterCrop),
        (Mode::Resizing, Trigger::SingleClick) => (Mode::Resizing, Action::Stay),
        (Mode::Resizing, Trigger::ExternalClick | Trigger::Escape | Trigger::Confirm) => {
            (Mode::Idle, Action::Deselect)
        }

        (Mode::Cropping, Trigger::DoubleClick) => (Mode::Resizing, Action::LeaveCrop),
        (Mode::Cropping, Trigger::SingleClick) => (Mode::Cropping, Action::Stay),
        (Mode::Cropping, Trigger::ExternalClick | Trigger::Confirm) => {
            (Mode::Idle, Action::CommitCrop)
        }
        (Mode::Cropping, Trigger::Escape) => (Mode::Idle, Action::DiscardCrop),
    };
    Transition {
        from: mode,
        to,
        action,
    }
}
