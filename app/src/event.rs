use minado_core::{Coord2, Difficulty, GameError, GameState, Result};
use serde::{Deserialize, Serialize};

use crate::records::RecordStore;
use crate::session::Session;
use crate::view::Snapshot;

/// Discrete player actions handed over by the host input layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    RevealCell(Coord2),
    ToggleMark(Coord2),
    RequestHint,
    Restart,
    SelectDifficulty(u8),
}

/// Reactive driver owned by the host loop. Routes input events into the
/// session, settles the record store exactly once per finished game, and
/// produces the per-frame render feed.
#[derive(Debug)]
pub struct GameShell {
    session: Session,
    records: RecordStore,
    recorded: bool,
    new_record: bool,
}

impl GameShell {
    pub fn new(difficulty: Difficulty, records: RecordStore) -> Self {
        Self::with_session(Session::new(difficulty), records)
    }

    /// Start from an existing session, e.g. one restored by the host.
    pub fn with_session(session: Session, records: RecordStore) -> Self {
        Self {
            session,
            records,
            recorded: false,
            new_record: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn handle(&mut self, event: InputEvent) {
        use InputEvent::*;

        match event {
            RevealCell(coords) => self.apply(|session| session.reveal(coords).map(drop)),
            ToggleMark(coords) => self.apply(|session| session.toggle_mark(coords).map(drop)),
            RequestHint => self.apply(|session| session.hint().map(drop)),
            Restart => {
                self.session.restart();
                self.reset_record_latch();
            }
            SelectDifficulty(key) => match Difficulty::from_key(key) {
                Some(difficulty) => {
                    self.session.change_difficulty(difficulty);
                    self.reset_record_latch();
                }
                None => log::debug!("ignoring difficulty key {key}"),
            },
        }
        self.settle_records();
    }

    /// Host clock tick, once per second.
    pub fn tick(&mut self) {
        self.session.tick();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.session,
            self.records.best_for(self.session.difficulty()),
            self.new_record,
        )
    }

    fn apply(&mut self, action: impl FnOnce(&mut Session) -> Result<()>) {
        match action(&mut self.session) {
            Ok(()) => {}
            // the input layer only produces in-bounds coordinates; anything
            // else is a wiring bug worth hearing about
            Err(err @ (GameError::InvalidCoordinate | GameError::InvalidConfiguration)) => {
                log::warn!("rejected input: {err}");
            }
            Err(GameError::AlreadyEnded) => log::debug!("input after game end ignored"),
        }
    }

    fn reset_record_latch(&mut self) {
        self.recorded = false;
        self.new_record = false;
    }

    /// Hand the finished session to the record store, once per session.
    fn settle_records(&mut self) {
        let state = self.session.state();
        if self.recorded || !state.is_final() {
            return;
        }
        self.new_record = self.records.report_result(
            self.session.difficulty(),
            self.session.elapsed_secs(),
            matches!(state, GameState::Won),
        );
        self.recorded = true;
    }
}
