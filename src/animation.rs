use math::vec::Vec2;

use crate::board::{check_square, square_coords};
use crate::error::Result;

/// Squares per second.
pub const PIECE_MOVE_SPEED: f32 = 3.0;

/// A piece sliding from one square to another. Both axes advance at the
/// same rate and stop independently, so diagonal moves travel along the
/// diagonal and knight moves finish their short leg first.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceMove {
    source: usize,
    dest: usize,
    start_ms: u64,
    from: Vec2,
    to: Vec2,
    pos: Vec2,
    done: bool,
}

fn step(from: f32, to: f32, moved: f32) -> f32 {
    if to > from {
        (from + moved).min(to)
    } else if to < from {
        (from - moved).max(to)
    } else {
        from
    }
}

impl PieceMove {
    pub fn start(source: usize, dest: usize, now_ms: u64) -> Result<PieceMove> {
        check_square(source)?;
        check_square(dest)?;

        let from = square_coords(source);
        Ok(PieceMove {
            source,
            dest,
            start_ms: now_ms,
            from,
            to: square_coords(dest),
            pos: from,
            done: false,
        })
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn dest(&self) -> usize {
        self.dest
    }

    /// Board coordinates `(column, row)` of the moving piece.
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn advance(&mut self, now_ms: u64) {
        if self.done {
            return;
        }

        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        let moved = elapsed / (1000.0 / PIECE_MOVE_SPEED);

        self.pos = Vec2::new(
            step(self.from.x, self.to.x, moved),
            step(self.from.y, self.to.y, moved),
        );
        self.done = self.pos == self.to;
    }
}
