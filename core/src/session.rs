use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Initial -> Initial (reset)
/// - Initial -> Loading
/// - Loading -> InProgress
/// - Loading -> Initial (generation failed)
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - InProgress | Won | Lost -> Initial (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board yet, waiting for the first coordinate
    #[default]
    Initial,
    /// Board being generated
    Loading,
    /// Game started
    InProgress,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Indicates the game has ended and only a reset is accepted.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn accepts(self, action: Action) -> bool {
        use Action::*;
        match action {
            Start => self.is_initial(),
            Reveal | ChordReveal | ToggleFlag | Tick => self.is_playing(),
            Reset => true,
        }
    }

    pub const fn can_transition(self, to: Self) -> bool {
        use GameStatus::*;
        matches!(
            (self, to),
            (Initial, Initial | Loading)
                | (Loading, InProgress | Initial)
                | (InProgress, InProgress | Won | Lost | Initial)
                | (Won | Lost, Initial)
        )
    }
}

/// Intents the presentation layer can send to a [`GameSession`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Start,
    Reveal,
    ChordReveal,
    ToggleFlag,
    Reset,
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Board {
    grid: Grid,
    flags: FlagTracker,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase {
    Initial,
    Loading,
    InProgress(Board),
    Won(Board),
    Lost(Board),
}

impl Phase {
    const fn status(&self) -> GameStatus {
        match self {
            Self::Initial => GameStatus::Initial,
            Self::Loading => GameStatus::Loading,
            Self::InProgress(_) => GameStatus::InProgress,
            Self::Won(_) => GameStatus::Won,
            Self::Lost(_) => GameStatus::Lost,
        }
    }

    fn board(&self) -> Option<&Board> {
        match self {
            Self::Initial | Self::Loading => None,
            Self::InProgress(board) | Self::Won(board) | Self::Lost(board) => Some(board),
        }
    }
}

/// One game from the first click to a win or loss, and back again after a reset.
///
/// Mines are placed only once the first coordinate is known, so that coordinate is always safe.
/// Every operation replaces the grid as a whole. Intents that do not fit the current status (a
/// flag after the game ended, a late tick) are ignored rather than reported as errors.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    phase: Phase,
    elapsed_secs: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomBoardGenerator::new(seed))
    }
}

impl<G: BoardGenerator> GameSession<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            phase: Phase::Initial,
            elapsed_secs: 0,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn status(&self) -> GameStatus {
        self.phase.status()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Current board, absent until the game has started.
    pub fn grid(&self) -> Option<&Grid> {
        self.phase.board().map(|board| &board.grid)
    }

    pub fn flag_count(&self) -> CellCount {
        self.phase.board().map_or(0, |board| board.flags.count())
    }

    /// How many flags can still be placed, never negative.
    pub fn remaining_flags(&self) -> CellCount {
        self.phase
            .board()
            .map_or(self.config.mine_count(), |board| board.flags.remaining())
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        match &self.phase {
            Phase::Lost(board) => board.grid.revealed_mines().next(),
            _ => None,
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        self.grid()
            .map_or(Ok(CellView::Hidden), |grid| grid.cell_view(coords))
    }

    /// Switches to a new configuration and resets.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Drops the board and goes back to waiting for the first coordinate.
    pub fn reset(&mut self) {
        log::debug!("{:?}: {:?} -> {:?}", Action::Reset, self.status(), GameStatus::Initial);
        self.phase = Phase::Initial;
        self.elapsed_secs = 0;
    }

    /// Generates the board around `coords` and reveals it.
    pub fn start_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        ignore_stale(self.try_start_at(coords), RevealOutcome::NoChange)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        ignore_stale(
            self.play(Action::Reveal, |grid| reveal(grid, coords)),
            RevealOutcome::NoChange,
        )
    }

    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        ignore_stale(
            self.play(Action::ChordReveal, |grid| chord_reveal(grid, coords)),
            RevealOutcome::NoChange,
        )
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        ignore_stale(self.mark(coords), MarkOutcome::NoChange)
    }

    /// Advances the clock by one second while the game is in progress.
    pub fn tick(&mut self) -> u32 {
        if self.status().accepts(Action::Tick) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        } else {
            log::trace!("Tick ignored while {:?}", self.status());
        }
        self.elapsed_secs
    }

    fn try_start_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_accepts(Action::Start)?;
        self.enter(Action::Start, Phase::Loading)?;

        let generated = self
            .generator
            .generate(self.config, coords)
            .and_then(|grid| check_generated(self.config, grid));
        let grid = match generated {
            Ok(grid) => grid,
            Err(err) => {
                log::warn!("Board generation failed: {}", err);
                self.enter(Action::Start, Phase::Initial)?;
                return Err(err);
            }
        };
        let board = Board {
            grid,
            flags: FlagTracker::new(self.config.mine_count()),
        };
        self.enter(Action::Start, Phase::InProgress(board))?;

        self.play(Action::Start, |grid| reveal(grid, coords))
    }

    /// Applies a reveal-like operation and settles the status from its outcome.
    fn play(
        &mut self,
        action: Action,
        op: impl FnOnce(&Grid) -> Result<(Grid, RevealOutcome)>,
    ) -> Result<RevealOutcome> {
        let Phase::InProgress(board) = &self.phase else {
            return Err(GameError::IllegalTransition {
                action,
                status: self.status(),
            });
        };

        let (grid, outcome) = op(&board.grid)?;
        let board = Board {
            grid,
            flags: board.flags,
        };
        let next = if outcome == RevealOutcome::HitMine {
            Phase::Lost(board)
        } else if board.grid.is_cleared() {
            Phase::Won(board)
        } else {
            Phase::InProgress(board)
        };

        self.enter(action, next)?;
        Ok(outcome)
    }

    fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let status = self.status();
        let Phase::InProgress(board) = &mut self.phase else {
            return Err(GameError::IllegalTransition {
                action: Action::ToggleFlag,
                status,
            });
        };

        let mut flags = board.flags;
        let (grid, outcome) = flags.toggle(&board.grid, coords)?;
        *board = Board { grid, flags };
        Ok(outcome)
    }

    fn check_accepts(&self, action: Action) -> Result<()> {
        let status = self.status();
        if status.accepts(action) {
            Ok(())
        } else {
            Err(GameError::IllegalTransition { action, status })
        }
    }

    fn enter(&mut self, action: Action, next: Phase) -> Result<()> {
        let (from, to) = (self.status(), next.status());
        if !from.can_transition(to) {
            return Err(GameError::IllegalTransition {
                action,
                status: from,
            });
        }

        if from != to {
            log::debug!("{:?}: {:?} -> {:?}", action, from, to);
        }
        self.phase = next;
        Ok(())
    }
}

/// Rejects a board whose size or mine count differs from the configuration it was made for.
fn check_generated(config: GameConfig, grid: Grid) -> Result<Grid> {
    if grid.map_size() == config.map_size() && grid.mine_count() == config.mine_count() {
        Ok(grid)
    } else {
        Err(GameError::InvalidConfiguration {
            map_size: grid.map_size(),
            mine_count: grid.mine_count(),
        })
    }
}

/// Turns an intent the current status does not accept into a no-op.
fn ignore_stale<T>(result: Result<T>, no_op: T) -> Result<T> {
    match result {
        Err(GameError::IllegalTransition { action, status }) => {
            log::debug!("Ignoring {:?} while {:?}", action, status);
            Ok(no_op)
        }
        result => result,
    }
}
