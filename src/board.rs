use math::vec::Vec2;

use crate::error::{Error, Result};

pub const SQUARES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Piece {
        Piece { kind, side }
    }

    /// Position of this piece's model in a piece set: white and black
    /// alternate, pawns first and kings last.
    pub fn model_index(self) -> usize {
        self.kind as usize * 2 + self.side as usize
    }

    pub fn is_black(self) -> bool {
        self.side == Side::Black
    }
}

/// Square occupancy, indexed `row * 8 + column` with a1 at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Board {
        Board { squares: [None; SQUARES] }
    }

    pub fn standard() -> Board {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[col] = Some(Piece::new(*kind, Side::White));
            board.squares[8 + col] = Some(Piece::new(Pawn, Side::White));
            board.squares[48 + col] = Some(Piece::new(Pawn, Side::Black));
            board.squares[56 + col] = Some(Piece::new(*kind, Side::Black));
        }
        board
    }

    pub fn get(&self, square: usize) -> Option<Piece> {
        self.squares.get(square).copied().flatten()
    }

    pub fn set(&mut self, square: usize, piece: Option<Piece>) -> Result<()> {
        let slot = self.squares.get_mut(square).ok_or(Error::InvalidSquare(square))?;
        *slot = piece;
        Ok(())
    }

    /// Moves whatever stands on `from` to `to`, capturing anything there.
    pub fn move_piece(&mut self, from: usize, to: usize) -> Result<()> {
        check_square(from)?;
        check_square(to)?;
        let piece = self.squares[from].take();
        self.squares[to] = piece;
        Ok(())
    }
}

pub(crate) fn check_square(square: usize) -> Result<()> {
    if square < SQUARES {
        Ok(())
    } else {
        Err(Error::InvalidSquare(square))
    }
}

/// `(column, row)` of a square.
pub fn square_coords(square: usize) -> Vec2 {
    Vec2::new((square % 8) as f32, (square / 8) as f32)
}

/// The square under a point on the board plane. The board spans `-4..4` on
/// both axes with a1 in the negative corner.
pub fn square_at(x: f32, y: f32) -> Option<usize> {
    if !(-4.0..4.0).contains(&x) || !(-4.0..4.0).contains(&y) {
        return None;
    }
    let col = (x.floor() + 4.0) as usize;
    let row = (y.floor() + 4.0) as usize;
    Some(row * 8 + col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_indices_interleave_sides() {
        assert_eq!(Piece::new(PieceKind::Pawn, Side::White).model_index(), 0);
        assert_eq!(Piece::new(PieceKind::Pawn, Side::Black).model_index(), 1);
        assert_eq!(Piece::new(PieceKind::Rook, Side::White).model_index(), 6);
        assert_eq!(Piece::new(PieceKind::King, Side::Black).model_index(), 11);
    }

    #[test]
    fn standard_setup() {
        let b = Board::standard();
        assert_eq!(b.get(4), Some(Piece::new(PieceKind::King, Side::White)));
        assert_eq!(b.get(59), Some(Piece::new(PieceKind::Queen, Side::Black)));
        assert_eq!(b.get(27), None);
        assert_eq!(b.get(64), None);
    }

    #[test]
    fn move_captures() {
        let mut b = Board::standard();
        b.move_piece(8, 48).unwrap();
        assert_eq!(b.get(8), None);
        assert_eq!(b.get(48), Some(Piece::new(PieceKind::Pawn, Side::White)));
        assert!(matches!(b.move_piece(0, 64), Err(Error::InvalidSquare(64))));
    }

    #[test]
    fn picking() {
        assert_eq!(square_at(-3.5, -3.5), Some(0));
        assert_eq!(square_at(3.9, 3.9), Some(63));
        assert_eq!(square_at(0.0, 0.0), Some(36));
        assert_eq!(square_at(-0.1, 0.2), Some(35));
        assert_eq!(square_at(4.0, 0.0), None);
        assert_eq!(square_at(0.0, -4.01), None);
        assert_eq!(square_at(f32::NAN, 0.0), None);
    }

    #[test]
    fn coords() {
        assert_eq!(square_coords(0), Vec2::new(0.0, 0.0));
        assert_eq!(square_coords(63), Vec2::new(7.0, 7.0));
        assert_eq!(square_coords(10), Vec2::new(2.0, 1.0));
    }
}
