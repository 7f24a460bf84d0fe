//! Core engine data types shared by the board, the game session and observers.

use serde::{Deserialize, Serialize};

use crate::games::peg_solitaire::types::{PegColor, SlotId};

/// Outbound notification for presentation-layer collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    BoardCreated { base_row_size: usize, slot_count: usize },
    PegAdded { slot: SlotId, color: PegColor },
    PegRemoved { slot: SlotId },
    PegSelected { slot: SlotId },
    PegDeselected { slot: SlotId },
    GameOver { remaining: usize, verdict: Verdict },
}

impl GameEvent {
    /// Occupancy-changed event for a slot's new payload.
    pub fn occupancy(slot: SlotId, color: Option<PegColor>) -> Self {
        match color {
            Some(color) => GameEvent::PegAdded { slot, color },
            None => GameEvent::PegRemoved { slot },
        }
    }

    pub fn is_occupancy_change(&self) -> bool {
        matches!(self, GameEvent::PegAdded { .. } | GameEvent::PegRemoved { .. })
    }
}

/// Final rating of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Win,
    Lose,
}

impl Verdict {
    /// A single remaining peg wins; anything else loses.
    pub fn from_remaining(remaining: usize) -> Self {
        if remaining == 1 {
            Verdict::Win
        } else {
            Verdict::Lose
        }
    }

    pub fn message(self, remaining: usize) -> String {
        match self {
            Verdict::Win => "You Win!".to_string(),
            Verdict::Lose => format!("You Lose.\nYou had {remaining} pegs remaining."),
        }
    }
}
