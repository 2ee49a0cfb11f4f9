use crate::board::check_square;
use crate::error::Result;

/// Highest the selector fill rises before bouncing back.
pub const BOUNCE_HEIGHT: f32 = 0.25;

/// Selector moves as the player sees them on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// The highlight cursor, the picked square and the cursor's idle animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    highlight: usize,
    selected: Option<usize>,
    rotation: f32,
    bounce: f32,
    bounce_inc: f32,
}

impl Default for Selector {
    fn default() -> Self {
        Self { highlight: 0, selected: None, rotation: 0.0, bounce: 0.0, bounce_inc: 0.0 }
    }
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn bounce(&self) -> f32 {
        self.bounce
    }

    pub fn reset(&mut self) {
        self.highlight = 0;
        self.selected = None;
    }

    /// Moves the highlight one square. `quarter_turns` is how far the camera
    /// has spun the board, so that `Up` always heads away from the viewer.
    /// Moves off the edge are ignored.
    pub fn move_in(&mut self, direction: Direction, quarter_turns: u32) {
        let mut direction = direction;
        for _ in 0..quarter_turns {
            direction = direction.clockwise();
        }

        let sq = self.highlight;
        self.highlight = match direction {
            Direction::Up if sq < 56 => sq + 8,
            Direction::Right if sq % 8 < 7 => sq + 1,
            Direction::Down if sq > 7 => sq - 8,
            Direction::Left if sq % 8 > 0 => sq - 1,
            _ => sq,
        };
    }

    /// Picks `square` for a move, or clears the pick with `None`. Picking a
    /// square also moves the highlight there.
    pub fn select(&mut self, square: Option<usize>) -> Result<()> {
        if let Some(sq) = square {
            check_square(sq)?;
            self.highlight = sq;
        }
        self.selected = square;
        Ok(())
    }

    /// One frame of spin and bounce. Speeds are per frame.
    pub fn animate(&mut self, spin_speed: f32, bounce_speed: f32) {
        if spin_speed == 0.0 {
            self.rotation = 0.0;
        }
        self.rotation += spin_speed;

        if bounce_speed == 0.0 {
            self.bounce = 0.0;
            self.bounce_inc = 0.0;
            return;
        }

        if self.bounce == 0.0 {
            self.bounce_inc = bounce_speed;
        }
        if self.bounce > BOUNCE_HEIGHT || self.bounce < 0.0 {
            self.bounce_inc = -self.bounce_inc;
        }
        self.bounce += self.bounce_inc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(square: usize) -> Selector {
        let mut s = Selector::new();
        s.select(Some(square)).unwrap();
        s.select(None).unwrap();
        s
    }

    #[test]
    fn corners_block() {
        let mut s = at(0);
        s.move_in(Direction::Left, 0);
        s.move_in(Direction::Down, 0);
        assert_eq!(s.highlight(), 0);

        let mut s = at(63);
        s.move_in(Direction::Right, 0);
        s.move_in(Direction::Up, 0);
        assert_eq!(s.highlight(), 63);
    }

    #[test]
    fn no_wrap_between_rows() {
        let mut s = at(7);
        s.move_in(Direction::Right, 0);
        assert_eq!(s.highlight(), 7);

        let mut s = at(8);
        s.move_in(Direction::Left, 0);
        assert_eq!(s.highlight(), 8);
    }

    #[test]
    fn directions_follow_camera() {
        let mut s = at(27);
        s.move_in(Direction::Up, 0);
        assert_eq!(s.highlight(), 35);

        let mut s = at(27);
        s.move_in(Direction::Up, 1);
        assert_eq!(s.highlight(), 28);

        let mut s = at(27);
        s.move_in(Direction::Up, 2);
        assert_eq!(s.highlight(), 19);

        let mut s = at(27);
        s.move_in(Direction::Left, 3);
        assert_eq!(s.highlight(), 19);

        let mut s = at(27);
        s.move_in(Direction::Up, 4);
        assert_eq!(s.highlight(), 35);
    }

    #[test]
    fn select_moves_highlight() {
        let mut s = Selector::new();
        s.select(Some(42)).unwrap();
        assert_eq!(s.selected(), Some(42));
        assert_eq!(s.highlight(), 42);

        s.select(None).unwrap();
        assert_eq!(s.selected(), None);
        assert_eq!(s.highlight(), 42);

        assert!(s.select(Some(64)).is_err());
        assert_eq!(s.highlight(), 42);
    }

    #[test]
    fn spin_accumulates_and_stops() {
        let mut s = Selector::new();
        s.animate(2.0, 0.0);
        s.animate(2.0, 0.0);
        assert_eq!(s.rotation(), 4.0);

        s.animate(0.0, 0.0);
        assert_eq!(s.rotation(), 0.0);
    }

    #[test]
    fn bounce_stays_near_band() {
        let mut s = Selector::new();
        let mut peak: f32 = 0.0;
        let mut saw_fall = false;
        let mut last = 0.0;
        for _ in 0..200 {
            s.animate(0.0, 0.05);
            peak = peak.max(s.bounce());
            saw_fall |= s.bounce() < last;
            last = s.bounce();
            assert!(s.bounce() >= -0.05 - 1e-6 && s.bounce() <= BOUNCE_HEIGHT + 0.05 + 1e-6);
        }
        assert!(saw_fall);
        assert!(peak > BOUNCE_HEIGHT);

        s.animate(0.0, 0.0);
        assert_eq!(s.bounce(), 0.0);
    }
}
