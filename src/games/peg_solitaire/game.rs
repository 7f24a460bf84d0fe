//! Game session: owns one board at a time, drives selections through the
//! controller, runs the terminal check after every play action and forwards
//! events to observers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::board::{Board, BoardSnapshot};
use super::coloring::ColoringStyle;
use super::controller::{Controller, DirectionResolver, InputMode, SelectOutcome, Selection};
use super::types::{Coord, Jump, SlotId};
use crate::engine::error::BoardError;
use crate::engine::models::{GameEvent, Verdict};
use crate::engine::observer::{Observer, ObserverList};

/// Which slot starts empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartHole {
    /// The top slot of the triangle.
    #[default]
    Apex,
    /// The player's first selection picks it.
    Choose,
    /// A uniformly random slot.
    Random,
    At(Coord),
}

impl StartHole {
    /// Slot to empty on `board`. `Choose` has none until the player picks.
    pub fn resolve<R: Rng + ?Sized>(self, board: &Board, rng: &mut R) -> Result<Option<SlotId>, BoardError> {
        match self {
            StartHole::Choose => Ok(None),
            StartHole::Apex => Ok(Some(board.apex())),
            StartHole::Random => Ok(Some(rng.gen_range(0..board.len()))),
            StartHole::At(coord) => board.try_slot_id(coord).map(Some),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub base_row_size: usize,
    #[serde(default)]
    pub coloring: ColoringStyle,
    #[serde(default)]
    pub start_hole: StartHole,
    #[serde(default)]
    pub input_mode: InputMode,
    #[serde(default)]
    pub resolver: DirectionResolver,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            base_row_size: 5,
            coloring: ColoringStyle::default(),
            start_hole: StartHole::default(),
            input_mode: InputMode::default(),
            resolver: DirectionResolver::default(),
            seed: None,
        }
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finish {
    pub remaining: usize,
    pub verdict: Verdict,
}

pub struct Game {
    settings: GameSettings,
    board: Board,
    controller: Controller,
    observers: ObserverList,
    rng: StdRng,
    finish: Option<Finish>,
}

impl Game {
    pub fn new(settings: GameSettings) -> Result<Self, BoardError> {
        let rng = seeded_rng(settings.seed);
        let (board, controller) = build(&settings)?;
        let mut game = Self {
            settings,
            board,
            controller,
            observers: ObserverList::new(),
            rng,
            finish: None,
        };
        game.seed_start_hole()?;
        game.board.take_events();
        game.settle();
        Ok(game)
    }

    /// Resume a saved position. The start-hole policy is skipped: the
    /// snapshot already has its holes.
    pub fn restore(settings: GameSettings, snapshot: &BoardSnapshot) -> Result<Self, BoardError> {
        let board = Board::from_snapshot(snapshot)?;
        let rng = seeded_rng(settings.seed);
        let controller = Controller::new(settings.input_mode, settings.resolver, false);
        let mut game = Self {
            settings: GameSettings {
                base_row_size: snapshot.base_row_size,
                ..settings
            },
            board,
            controller,
            observers: ObserverList::new(),
            rng,
            finish: None,
        };
        game.settle();
        tracing::debug!(
            base_row_size = snapshot.base_row_size,
            remaining = game.board.remaining_peg_count(),
            "game restored"
        );
        Ok(game)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.to_snapshot()
    }

    /// Register an observer. The subscription lasts as long as the game.
    ///
    /// The observer first receives the current board: a `BoardCreated` event
    /// followed by the occupancy of every slot, and `GameOver` if the game has
    /// already ended.
    pub fn subscribe(&mut self, mut observer: Box<dyn Observer>) {
        for event in self.replay_events() {
            observer.on_event(&event);
        }
        self.observers.subscribe(observer);
    }

    fn replay_events(&self) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::BoardCreated {
            base_row_size: self.board.base_row_size(),
            slot_count: self.board.len(),
        }];
        events.extend(
            self.board
                .slots()
                .iter()
                .enumerate()
                .map(|(id, slot)| GameEvent::occupancy(id, slot.peg())),
        );
        if let Some(Finish { remaining, verdict }) = self.finish {
            events.push(GameEvent::GameOver { remaining, verdict });
        }
        events
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Selection {
        self.controller.selection()
    }

    pub fn finish(&self) -> Option<Finish> {
        self.finish
    }

    pub fn is_over(&self) -> bool {
        self.finish.is_some()
    }

    /// Empty `slot` as the starting hole.
    ///
    /// Allowed only while the game waits for the player to pick it.
    pub fn choose_start_hole(&mut self, slot: SlotId) -> SelectOutcome {
        if self.controller.selection() != Selection::AwaitingStartHole {
            return SelectOutcome::Ignored;
        }
        self.try_select(slot)
    }

    /// Feed one slot selection through the state machine.
    pub fn try_select(&mut self, slot: SlotId) -> SelectOutcome {
        let outcome = self.controller.try_select(&mut self.board, slot);
        match outcome {
            SelectOutcome::StartHoleChosen { slot } => {
                tracing::debug!(slot, "start hole chosen");
            }
            SelectOutcome::Jumped { jump } => {
                tracing::debug!(
                    from = jump.from,
                    over = jump.over,
                    to = jump.to,
                    direction = %jump.direction,
                    "jump"
                );
            }
            _ => {}
        }
        self.flush();

        let acted = self.board.take_dirty()
            || matches!(outcome, SelectOutcome::StartHoleChosen { .. });
        if acted && !self.board.can_any_peg_move() {
            let jump = match outcome {
                SelectOutcome::Jumped { jump } => Some(jump),
                _ => None,
            };
            return self.end(jump);
        }
        outcome
    }

    /// Discard the board and build a fresh one from the same settings.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        let (board, controller) = build(&self.settings)?;
        // Release a held peg on the old board before it goes away.
        self.controller.finish();
        self.flush();
        self.board = board;
        self.controller = controller;
        self.finish = None;
        self.seed_start_hole()?;
        self.board.take_events();
        self.settle();
        let replay = self.replay_events();
        self.observers.notify_all(replay);
        tracing::info!(base_row_size = self.settings.base_row_size, "board reset");
        Ok(())
    }

    fn seed_start_hole(&mut self) -> Result<(), BoardError> {
        let Some(slot) = self.settings.start_hole.resolve(&self.board, &mut self.rng)? else {
            return Ok(());
        };
        self.board.choose_start_hole(slot)?;
        tracing::debug!(slot, "start hole placed");
        Ok(())
    }

    // A fresh or restored board can already have no legal jump.
    fn settle(&mut self) {
        if self.controller.selection() == Selection::Idle && !self.board.can_any_peg_move() {
            let remaining = self.board.remaining_peg_count();
            self.controller.finish();
            self.controller.take_events();
            self.finish = Some(Finish {
                remaining,
                verdict: Verdict::from_remaining(remaining),
            });
            tracing::info!(remaining, "board starts without a legal jump");
        }
    }

    fn end(&mut self, jump: Option<Jump>) -> SelectOutcome {
        let remaining = self.board.remaining_peg_count();
        let verdict = Verdict::from_remaining(remaining);
        self.controller.finish();
        self.finish = Some(Finish { remaining, verdict });
        self.flush();
        self.observers
            .notify(&GameEvent::GameOver { remaining, verdict });
        tracing::info!(remaining, ?verdict, "game over");
        SelectOutcome::GameOver {
            jump,
            remaining,
            verdict,
        }
    }

    fn flush(&mut self) {
        let board_events = self.board.take_events();
        self.observers.notify_all(board_events);
        let selection_events = self.controller.take_events();
        self.observers.notify_all(selection_events);
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn build(settings: &GameSettings) -> Result<(Board, Controller), BoardError> {
    let mut board = Board::new(settings.base_row_size)?;
    settings.coloring.assign(&mut board);
    let controller = Controller::new(
        settings.input_mode,
        settings.resolver,
        settings.start_hole == StartHole::Choose,
    );
    tracing::debug!(
        base_row_size = settings.base_row_size,
        slots = board.len(),
        coloring = settings.coloring.name(),
        "board built"
    );
    Ok((board, controller))
}
