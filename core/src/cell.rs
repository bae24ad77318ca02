use core::fmt;
use serde::{Deserialize, Serialize};

/// One square of the board.
///
/// `neighbor_mine_count` is computed once when the board is generated and is only meaningful when
/// `has_mine` is false. A flagged cell is never revealed by a reveal action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mine_count: u8,
}

impl Cell {
    /// Whether the player can still act on this cell by revealing it.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn view(self) -> CellView {
        match self {
            Self {
                is_flagged: true, ..
            } => CellView::Flagged,
            Self {
                is_revealed: true,
                has_mine: true,
                ..
            } => CellView::Mine,
            Self {
                is_revealed: true,
                neighbor_mine_count: 0,
                ..
            } => CellView::Blank,
            Self {
                is_revealed: true,
                neighbor_mine_count: count,
                ..
            } => CellView::Count(count),
            _ => CellView::Hidden,
        }
    }
}

/// What the player sees for a cell, derived from [`Cell`] and never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Mine,
    Count(u8),
    Blank,
}

impl CellView {
    pub const fn glyph(self) -> char {
        use CellView::*;
        match self {
            Hidden => '#',
            Flagged => 'F',
            Mine => '*',
            // counts never exceed 8
            Count(count) => (b'0' + count) as char,
            Blank => ' ',
        }
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; 4];
        f.pad(self.glyph().encode_utf8(&mut buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_priority_over_everything() {
        let cell = Cell {
            has_mine: true,
            is_flagged: true,
            ..Default::default()
        };

        assert_eq!(cell.view(), CellView::Flagged);
        assert!(!cell.is_revealable());
    }

    #[test]
    fn revealed_cells_show_mine_count_or_blank() {
        let numbered = Cell {
            is_revealed: true,
            neighbor_mine_count: 3,
            ..Default::default()
        };
        let empty = Cell {
            is_revealed: true,
            ..Default::default()
        };

        assert_eq!(numbered.view(), CellView::Count(3));
        assert_eq!(numbered.view().glyph(), '3');
        assert_eq!(empty.view(), CellView::Blank);
        assert_eq!(empty.view().glyph(), ' ');
    }

    #[test]
    fn revealed_mine_and_hidden_cells() {
        let mine = Cell {
            has_mine: true,
            is_revealed: true,
            ..Default::default()
        };

        assert_eq!(mine.view(), CellView::Mine);
        assert_eq!(Cell::default().view(), CellView::Hidden);
        assert!(Cell::default().is_revealable());
    }
}
