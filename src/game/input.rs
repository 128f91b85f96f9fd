//! Input Events
//!
//! Discrete events from the outside world, consumed once per tick by the
//! coordinator before the compute gate. Polling the OS is someone else's
//! job; this module only defines what arrives and how it is folded.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::actor::Side;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Four-way steering direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up the screen
    Up,
    /// Down the screen
    Down,
    /// Towards the left goal
    Left,
    /// Towards the right goal
    Right,
}

impl Direction {
    /// Unit vector for this direction (screen coordinates).
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::UP,
            Direction::Down => Vec2::DOWN,
            Direction::Left => Vec2::LEFT,
            Direction::Right => Vec2::RIGHT,
        }
    }
}

/// Pointer buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Take / let go of the ball
    Primary,
    /// Wind up / release a kick
    Secondary,
}

/// One discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Stop the simulation
    Quit,
    /// Nudge every member of a team
    Move {
        /// Team to steer
        team: Side,
        /// Direction of the nudge
        direction: Direction,
    },
    /// Pointer moved to a field position
    PointerMoved(Vec2),
    /// Pointer button pressed
    PointerDown(PointerButton),
    /// Pointer button released
    PointerUp(PointerButton),
}

/// Ball-control intent derived from pointer buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    /// Primary down: try to take the ball
    Grab,
    /// Primary up: let go of the ball
    Drop,
    /// Secondary down: start winding up a kick
    WindUp,
    /// Secondary up: release the kick
    Kick,
}

impl PointerAction {
    fn from_button(button: PointerButton, pressed: bool) -> Self {
        match (button, pressed) {
            (PointerButton::Primary, true) => PointerAction::Grab,
            (PointerButton::Primary, false) => PointerAction::Drop,
            (PointerButton::Secondary, true) => PointerAction::WindUp,
            (PointerButton::Secondary, false) => PointerAction::Kick,
        }
    }
}

// =============================================================================
// PER-TICK FOLD
// =============================================================================

/// Everything the coordinator needs from one tick's worth of events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    /// A quit event arrived
    pub quit: bool,
    /// Summed steering direction per team (unscaled)
    pub steering: [Vec2; 2],
    /// Latest pointer position reported this tick, if any
    pub pointer: Option<Vec2>,
    /// Ball-control actions in arrival order
    pub actions: Vec<PointerAction>,
}

impl TickInput {
    /// Fold a batch of events.
    pub fn collect<'a>(events: impl IntoIterator<Item = &'a InputEvent>) -> Self {
        let mut input = TickInput::default();
        for event in events {
            match *event {
                InputEvent::Quit => input.quit = true,
                InputEvent::Move { team, direction } => {
                    input.steering[team.index()] += direction.unit();
                }
                InputEvent::PointerMoved(position) => input.pointer = Some(position),
                InputEvent::PointerDown(button) => {
                    input.actions.push(PointerAction::from_button(button, true));
                }
                InputEvent::PointerUp(button) => {
                    input.actions.push(PointerAction::from_button(button, false));
                }
            }
        }
        input
    }
}

// =============================================================================
// INPUT SOURCES
// =============================================================================

/// Where input events come from.
pub trait InputSource: Send {
    /// Append every event available for `tick` to `out`. Never blocks.
    fn drain(&mut self, tick: u64, out: &mut Vec<InputEvent>);
}

impl InputSource for crossbeam_channel::Receiver<InputEvent> {
    fn drain(&mut self, _tick: u64, out: &mut Vec<InputEvent>) {
        out.extend(self.try_iter());
    }
}

/// Pre-recorded events keyed by tick number.
///
/// Used for headless runs and for replaying a recorded session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScriptedInput {
    script: BTreeMap<u64, Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` for `tick` (after anything already scheduled there).
    pub fn at(mut self, tick: u64, event: InputEvent) -> Self {
        self.push(tick, event);
        self
    }

    /// Schedule `event` for `tick`.
    pub fn push(&mut self, tick: u64, event: InputEvent) {
        self.script.entry(tick).or_default().push(event);
    }

    /// Number of ticks that carry at least one event.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Check whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn drain(&mut self, tick: u64, out: &mut Vec<InputEvent>) {
        // Anything scheduled for a tick we already passed is delivered late
        // rather than dropped.
        let due: Vec<u64> = self.script.range(..=tick).map(|(t, _)| *t).collect();
        for t in due {
            if let Some(events) = self.script.remove(&t) {
                out.extend(events);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_folds_events() {
        let events = [
            InputEvent::Move { team: Side::Left, direction: Direction::Right },
            InputEvent::Move { team: Side::Left, direction: Direction::Up },
            InputEvent::Move { team: Side::Right, direction: Direction::Left },
            InputEvent::PointerMoved(Vec2::new(10.0, 20.0)),
            InputEvent::PointerDown(PointerButton::Primary),
            InputEvent::PointerMoved(Vec2::new(30.0, 40.0)),
            InputEvent::PointerDown(PointerButton::Secondary),
            InputEvent::PointerUp(PointerButton::Secondary),
        ];
        let input = TickInput::collect(&events);

        assert!(!input.quit);
        assert_eq!(input.steering[0], Vec2::new(1.0, -1.0));
        assert_eq!(input.steering[1], Vec2::new(-1.0, 0.0));
        assert_eq!(input.pointer, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(
            input.actions,
            vec![PointerAction::Grab, PointerAction::WindUp, PointerAction::Kick]
        );
    }

    #[test]
    fn test_collect_quit() {
        let input = TickInput::collect(&[InputEvent::Quit]);
        assert!(input.quit);
        assert!(input.actions.is_empty());
    }

    #[test]
    fn test_scripted_input_delivers_by_tick() {
        let mut script = ScriptedInput::new()
            .at(0, InputEvent::PointerDown(PointerButton::Primary))
            .at(2, InputEvent::Quit);
        assert_eq!(script.len(), 2);

        let mut out = Vec::new();
        script.drain(0, &mut out);
        assert_eq!(out, vec![InputEvent::PointerDown(PointerButton::Primary)]);

        out.clear();
        script.drain(1, &mut out);
        assert!(out.is_empty());

        // Skipped ticks still deliver
        script.drain(5, &mut out);
        assert_eq!(out, vec![InputEvent::Quit]);
        assert!(script.is_empty());
    }

    #[test]
    fn test_channel_input_drains_without_blocking() {
        let (tx, mut rx) = crossbeam_channel::unbounded();
        tx.send(InputEvent::Quit).unwrap();
        tx.send(InputEvent::PointerUp(PointerButton::Primary)).unwrap();

        let mut out = Vec::new();
        rx.drain(0, &mut out);
        assert_eq!(out.len(), 2);

        out.clear();
        rx.drain(1, &mut out);
        assert!(out.is_empty());
    }
}
