use std::io::{self, Write};

use sapper_core::{BoardGenerator, CellView, GameSession, GameStatus};

/// Three digit counter like the classic LCD displays.
pub fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

fn status_line(status: GameStatus) -> &'static str {
    use GameStatus::*;
    match status {
        Initial => "pick a cell to start",
        Loading => "loading...",
        InProgress => "playing",
        Won => "you won! (n for a new game)",
        Lost => "you lost! (n to retry)",
    }
}

pub fn render<G: BoardGenerator>(out: &mut impl Write, game: &GameSession<G>) -> io::Result<()> {
    let map_size = game.config().map_size();

    writeln!(
        out,
        "flags {}  time {}  {}",
        format_for_counter(game.remaining_flags().into()),
        format_for_counter(game.elapsed_secs()),
        status_line(game.status())
    )?;

    write!(out, "    ")?;
    for col in 0..map_size {
        write!(out, "{:>3}", col)?;
    }
    writeln!(out)?;

    for row in 0..map_size {
        write!(out, "{:>3} ", row)?;
        for col in 0..map_size {
            let view = game.cell_view((row, col)).unwrap_or(CellView::Hidden);
            write!(out, "{:>3}", view)?;
        }
        writeln!(out)?;
    }
    out.flush()
}
