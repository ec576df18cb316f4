//! Per-tick input snapshots
//!
//! The simulation reads input once per tick through an [`InputSnapshot`].
//! [`InputTracker`] folds raw key-down/key-up events into snapshots and
//! does the press-edge detection used by the title screen.

use bitflags::bitflags;

bitflags! {
    /// Digital keys the game reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        /// Hold to shoot
        const FIRE = 1 << 4;
        /// Press to leave the title screen
        const CONFIRM = 1 << 5;
    }
}

/// Input state for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Keys currently held
    pub held: Keys,
    /// Keys that went down since the previous tick
    pub pressed: Keys,
}

impl InputSnapshot {
    /// Snapshot with `keys` held but no fresh presses
    pub fn holding(keys: Keys) -> Self {
        Self {
            held: keys,
            pressed: Keys::empty(),
        }
    }

    /// Snapshot with `keys` pressed this tick (and therefore held)
    pub fn pressing(keys: Keys) -> Self {
        Self {
            held: keys,
            pressed: keys,
        }
    }

    #[inline]
    pub fn is_held(&self, key: Keys) -> bool {
        self.held.contains(key)
    }

    #[inline]
    pub fn is_pressed(&self, key: Keys) -> bool {
        self.pressed.contains(key)
    }
}

/// Folds key events into per-tick snapshots
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: Keys,
    pressed: Keys,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down; repeats of an already held key are not presses
    pub fn key_down(&mut self, keys: Keys) {
        self.pressed |= keys - self.held;
        self.held |= keys;
    }

    pub fn key_up(&mut self, keys: Keys) {
        self.held -= keys;
    }

    /// Take the snapshot for the next tick and clear the press edges
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            held: self.held,
            pressed: self.pressed,
        };
        self.pressed = Keys::empty();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_triggered() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Keys::CONFIRM);
        let first = tracker.snapshot();
        assert!(first.is_pressed(Keys::CONFIRM));
        assert!(first.is_held(Keys::CONFIRM));

        // Still held, no new edge
        tracker.key_down(Keys::CONFIRM);
        let second = tracker.snapshot();
        assert!(!second.is_pressed(Keys::CONFIRM));
        assert!(second.is_held(Keys::CONFIRM));
    }

    #[test]
    fn test_tap_within_one_tick_still_presses() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Keys::CONFIRM);
        tracker.key_up(Keys::CONFIRM);
        let snapshot = tracker.snapshot();
        assert!(snapshot.is_pressed(Keys::CONFIRM));
        assert!(!snapshot.is_held(Keys::CONFIRM));
    }

    #[test]
    fn test_release_then_press_again() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Keys::FIRE | Keys::LEFT);
        tracker.snapshot();
        tracker.key_up(Keys::FIRE);
        let released = tracker.snapshot();
        assert!(!released.is_held(Keys::FIRE));
        assert!(released.is_held(Keys::LEFT));

        tracker.key_down(Keys::FIRE);
        assert!(tracker.snapshot().is_pressed(Keys::FIRE));
    }
}
