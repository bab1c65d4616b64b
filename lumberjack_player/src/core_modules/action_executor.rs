// THEORY:
// The `ActionExecutor` is the only stateful part of decision making. It turns a
// planned `Action` into an arrow-key tap and remembers which way the character
// last moved, so that a frame with no obstacle keeps the character going the
// same way instead of standing still.
//
// State machine, keyed on the recorded side (none, Left, Right):
// - MoveLeft / MoveRight: tap that arrow and record the side.
// - Continue: tap the recorded side again. With nothing recorded yet, tap left
//   and record Left.
//
// Reversals are damped: when a move points opposite to the recorded side, the
// executor taps first and then waits `nap_if_change_direction` before handing
// control back, mirroring a human's hesitation when switching sides.

use crate::core_modules::action_planner::Action;
use crate::core_modules::clock::Clock;
use crate::core_modules::scan_region::Side;
use crate::error::{PlayerError, Result};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::{debug, info};

/// Sends a momentary arrow-key press to whatever window has focus.
pub trait KeyEmitter {
    fn tap(&mut self, side: Side) -> Result<()>;
}

impl<K: KeyEmitter + ?Sized> KeyEmitter for &mut K {
    fn tap(&mut self, side: Side) -> Result<()> {
        (**self).tap(side)
    }
}

/// Real keyboard backed by the platform input APIs.
pub struct EnigoKeyboard {
    enigo: Enigo,
}

impl EnigoKeyboard {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|err| PlayerError::Input(err.to_string()))?;
        Ok(Self { enigo })
    }
}

impl KeyEmitter for EnigoKeyboard {
    fn tap(&mut self, side: Side) -> Result<()> {
        let key = match side {
            Side::Left => Key::LeftArrow,
            Side::Right => Key::RightArrow,
        };
        self.enigo
            .key(key, Direction::Click)
            .map_err(|err| PlayerError::Input(format!("{side} arrow: {err}")))
    }
}

/// Which way the character was last sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlannerState {
    last_side: Option<Side>,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_action_taken(&self) -> Option<Action> {
        self.last_side.map(Action::toward)
    }
}

/// The outcome of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    pub action: Action,
    /// The arrow that was actually tapped.
    pub emitted: Side,
    /// True when this action reversed the recorded direction.
    pub reversed: bool,
}

/// True exactly when `action` is a move opposite to the recorded side.
pub fn is_reversal(last_side: Option<Side>, action: Action) -> bool {
    match (last_side, action.side()) {
        (Some(last), Some(next)) => last != next,
        _ => false,
    }
}

pub struct ActionExecutor<K, C> {
    keys: K,
    clock: C,
    nap_if_change_direction: u64,
    state: PlannerState,
}

impl<K: KeyEmitter, C: Clock> ActionExecutor<K, C> {
    pub fn new(keys: K, clock: C, nap_if_change_direction: u64) -> Self {
        Self {
            keys,
            clock,
            nap_if_change_direction,
            state: PlannerState::new(),
        }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn execute(&mut self, action: Action) -> Result<Execution> {
        let reversed = is_reversal(self.state.last_side, action);

        let side = match (action.side(), self.state.last_side) {
            (Some(side), _) => side,
            (None, Some(last)) => last,
            (None, None) => {
                debug!("no direction recorded yet, heading left");
                Side::Left
            }
        };

        debug!(%side, %action, "tap");
        self.keys.tap(side)?;
        self.state.last_side = Some(side);

        if reversed && self.nap_if_change_direction > 0 {
            info!(
                nap_ms = self.nap_if_change_direction,
                "change direction, waiting"
            );
            self.clock.sleep(self.nap_if_change_direction);
        }

        Ok(Execution {
            action,
            emitted: side,
            reversed,
        })
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }
}
