use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything the player can do, always applied at the cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ToggleFlag,
    ToggleQuestion,
    Reveal,
    Quit,
}

/// Outcome of applying an action
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    CursorMoved,
    MarkChanged,
    Revealed,
    HitMine,
    Won,
    Forfeited,
}

impl ActionOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use ActionOutcome::*;
        match self {
            NoChange => false,
            CursorMoved => true,
            MarkChanged => true,
            Revealed => true,
            HitMine => true,
            Won => true,
            Forfeited => true,
        }
    }

    /// Whether this outcome ended the game
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won | Self::Forfeited)
    }
}
