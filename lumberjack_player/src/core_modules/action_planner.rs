use crate::core_modules::obstacle_detector::Detection;
use crate::core_modules::scan_region::Side;

/// What the player should do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// No obstacle this frame: repeat the previous movement.
    Continue,
}

impl Action {
    /// The movement side for an explicit move, `None` for `Continue`.
    pub fn side(self) -> Option<Side> {
        match self {
            Action::MoveLeft => Some(Side::Left),
            Action::MoveRight => Some(Side::Right),
            Action::Continue => None,
        }
    }

    pub fn toward(side: Side) -> Action {
        match side {
            Side::Left => Action::MoveLeft,
            Side::Right => Action::MoveRight,
        }
    }

    /// Label used in trace file names.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveLeft => "LEFT",
            Action::MoveRight => "RIGHT",
            Action::Continue => "CONTINUE",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps the two obstacle signals to an action. The left check runs first, so
/// when both bands see wood the player still dodges right.
pub fn plan(obstacle_left: bool, obstacle_right: bool) -> Action {
    if obstacle_left {
        return Action::MoveRight;
    }
    if obstacle_right {
        return Action::MoveLeft;
    }
    Action::Continue
}

pub fn plan_for(detection: &Detection) -> Action {
    plan(detection.obstacle_left(), detection.obstacle_right())
}
