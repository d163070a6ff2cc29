//! Per-frame button snapshot
//!
//! The host pumps its key events into an [`InputSnapshot`] and hands it to the
//! session once per frame. Edge detection (press/release) comes from the
//! `changed` flag, which the host clears with [`InputSnapshot::begin_frame`].

/// Logical buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Player 1 paddle up
    P1Up,
    /// Player 1 paddle down
    P1Down,
    /// Player 2 paddle up
    P2Up,
    /// Player 2 paddle down
    P2Down,
    NavUp,
    NavDown,
    NavLeft,
    NavRight,
    Confirm,
    /// Opens and closes the pause modal
    Cancel,
}

impl Button {
    pub const COUNT: usize = 10;

    pub const ALL: [Button; Button::COUNT] = [
        Button::P1Up,
        Button::P1Down,
        Button::P2Up,
        Button::P2Down,
        Button::NavUp,
        Button::NavDown,
        Button::NavLeft,
        Button::NavRight,
        Button::Confirm,
        Button::Cancel,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Held state of one button plus whether it flipped this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub is_down: bool,
    pub changed: bool,
}

/// Snapshot of every logical button for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    buttons: [ButtonState; Button::COUNT],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, button: Button) -> ButtonState {
        self.buttons[button.index()]
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.state(button).is_down
    }

    pub fn is_changed(&self, button: Button) -> bool {
        self.state(button).changed
    }

    /// Went down this frame
    pub fn is_pressed(&self, button: Button) -> bool {
        let s = self.state(button);
        s.is_down && s.changed
    }

    /// Went up this frame
    pub fn is_released(&self, button: Button) -> bool {
        let s = self.state(button);
        !s.is_down && s.changed
    }

    /// Clear edge flags; call before pumping the next frame's events
    pub fn begin_frame(&mut self) {
        for state in &mut self.buttons {
            state.changed = false;
        }
    }

    /// Record a key event for a button
    ///
    /// Key repeat (down while already down) still counts as a change, matching
    /// how window systems deliver auto-repeat.
    pub fn set(&mut self, button: Button, is_down: bool) {
        let state = &mut self.buttons[button.index()];
        state.is_down = is_down;
        state.changed = true;
    }

    pub fn press(&mut self, button: Button) {
        self.set(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.set(button, false);
    }

    /// Snapshot with a single button freshly pressed
    pub fn pressed(button: Button) -> Self {
        let mut input = Self::new();
        input.press(button);
        input
    }
}
