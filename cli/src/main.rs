use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sapper_core::{
    BoardGenerator, CellCount, Coord, GameConfig, GameError, GameSession, RandomBoardGenerator,
    StartPolicy,
};
use web_time::Instant;

use intent::{HELP, Intent};

mod intent;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 8x8 with 10 mines
    Beginner,
    /// 16x16 with 40 mines
    Intermediate,
}

impl Preset {
    const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Clear the minefield without stepping on a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    /// Override the side length of the board
    #[arg(long)]
    size: Option<Coord>,

    /// Override the number of mines
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the whole neighborhood of the first cell clear
    #[arg(long)]
    safe_zone: bool,
}

impl Args {
    fn config(&self) -> Result<GameConfig, GameError> {
        let preset = self.preset.config();
        GameConfig::new(
            self.size.unwrap_or(preset.map_size()),
            self.mines.unwrap_or(preset.mine_count()),
        )
    }

    fn start_policy(&self) -> StartPolicy {
        if self.safe_zone {
            StartPolicy::SafeZone
        } else {
            StartPolicy::SafeCell
        }
    }
}

/// Feeds the session one tick per elapsed second while a game is running.
#[derive(Debug, Default)]
struct Clock {
    started_at: Option<Instant>,
    ticks: u64,
}

impl Clock {
    fn catch_up<G: BoardGenerator>(&mut self, game: &mut GameSession<G>) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let due = started_at.elapsed().as_secs();
        while self.ticks < due {
            game.tick();
            self.ticks += 1;
        }
    }

    fn sync<G: BoardGenerator>(&mut self, game: &GameSession<G>) {
        match (game.status().is_playing(), self.started_at) {
            (true, None) => {
                self.started_at = Some(Instant::now());
                self.ticks = 0;
            }
            (false, Some(_)) => self.started_at = None,
            _ => {}
        }
    }
}

fn apply<G: BoardGenerator>(game: &mut GameSession<G>, intent: Intent) -> Result<(), GameError> {
    match intent {
        Intent::Open(coords) if game.status().is_initial() => {
            game.start_at(coords)?;
        }
        Intent::Open(coords) => {
            game.reveal(coords)?;
        }
        Intent::Flag(coords) => {
            game.toggle_flag(coords)?;
        }
        Intent::Chord(coords) => {
            game.chord_reveal(coords)?;
        }
        Intent::Reset => game.reset(),
        Intent::Help | Intent::Quit => {}
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = args.config().context("Invalid board settings")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let generator = RandomBoardGenerator::new(seed).with_start_policy(args.start_policy());
    let mut game = GameSession::with_generator(config, generator)?;
    let mut clock = Clock::default();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", HELP)?;
    render::render(&mut stdout, &game)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        clock.catch_up(&mut game);

        let intent = match line.parse::<Intent>() {
            Ok(intent) => intent,
            Err(err) => {
                writeln!(stdout, "{}", err)?;
                continue;
            }
        };
        log::trace!("intent: {:?}", intent);

        match intent {
            Intent::Quit => break,
            Intent::Help => writeln!(stdout, "{}", HELP)?,
            _ => {
                if let Err(err) = apply(&mut game, intent) {
                    writeln!(stdout, "{}", err)?;
                }
            }
        }

        clock.sync(&game);
        render::render(&mut stdout, &game)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{FixedBoardGenerator, GameStatus};

    #[test]
    fn args_override_preset() {
        let args = Args::parse_from(["sapper", "--preset", "intermediate", "--mines", "20"]);

        assert_eq!(args.config(), GameConfig::new(16, 20));
        assert_eq!(args.start_policy(), StartPolicy::SafeCell);
    }

    #[test]
    fn args_reject_overfull_board() {
        let args = Args::parse_from(["sapper", "--size", "2", "--mines", "4", "--safe-zone"]);

        assert!(args.config().is_err());
        assert_eq!(args.start_policy(), StartPolicy::SafeZone);
    }

    #[test]
    fn first_open_starts_the_game() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut game =
            GameSession::with_generator(config, FixedBoardGenerator::new(&[(2, 2)])).unwrap();

        apply(&mut game, Intent::Flag((0, 0))).unwrap();
        assert_eq!(game.status(), GameStatus::Initial);

        apply(&mut game, Intent::Open((0, 0))).unwrap();
        assert_eq!(game.status(), GameStatus::Won);

        apply(&mut game, Intent::Reset).unwrap();
        assert_eq!(game.status(), GameStatus::Initial);
    }

    #[test]
    fn out_of_bounds_intent_is_reported() {
        let mut game = GameSession::new(GameConfig::beginner(), 1).unwrap();

        assert_eq!(
            apply(&mut game, Intent::Open((9, 9))),
            Err(GameError::InvalidCoordinate((9, 9)))
        );
    }

    #[test]
    fn clock_stops_when_game_leaves_progress() {
        let config = GameConfig::new(3, 1).unwrap();
        let mut game =
            GameSession::with_generator(config, FixedBoardGenerator::new(&[(2, 2)])).unwrap();
        let mut clock = Clock::default();

        apply(&mut game, Intent::Open((0, 0))).unwrap();
        clock.sync(&game);
        clock.catch_up(&mut game);

        assert!(clock.started_at.is_none());
        assert_eq!(game.elapsed_secs(), 0);
    }
}
