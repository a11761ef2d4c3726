use std::fmt;

use crate::sample::Sample3;

/// The four reconstruction directions. Declaration order is the tie-break
/// order used when picking the best candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Diagonal from upper-left to lower-right.
    Left,
    /// Diagonal from upper-right to lower-left.
    Right,
    Vertical,
    /// Average of two row-wise kernels, one per adjacent known row.
    Horizontal,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Left,
        Strategy::Right,
        Strategy::Vertical,
        Strategy::Horizontal,
    ];

    /// Lower-case name, used for output folders.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }

    /// Value written into the label map. 0 is reserved for pixels that were not evaluated.
    pub fn label(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Vertical => 3,
            Self::Horizontal => 4,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value for each strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerStrategy<T> {
    pub left: T,
    pub right: T,
    pub vertical: T,
    pub horizontal: T,
}

impl<T> PerStrategy<T> {
    pub fn from_fn<F: FnMut(Strategy) -> T>(mut f: F) -> Self {
        Self {
            left: f(Strategy::Left),
            right: f(Strategy::Right),
            vertical: f(Strategy::Vertical),
            horizontal: f(Strategy::Horizontal),
        }
    }

    pub fn get(&self, strategy: Strategy) -> &T {
        match strategy {
            Strategy::Left => &self.left,
            Strategy::Right => &self.right,
            Strategy::Vertical => &self.vertical,
            Strategy::Horizontal => &self.horizontal,
        }
    }

    pub fn get_mut(&mut self, strategy: Strategy) -> &mut T {
        match strategy {
            Strategy::Left => &mut self.left,
            Strategy::Right => &mut self.right,
            Strategy::Vertical => &mut self.vertical,
            Strategy::Horizontal => &mut self.horizontal,
        }
    }
}

pub type Candidates = PerStrategy<Sample3>;
pub type Scores = PerStrategy<f32>;

impl Scores {
    /// Strategy with the smallest score. Ties go to the earliest strategy in
    /// [`Strategy::ALL`]. Returns `None` if any score is not finite.
    pub fn best(&self) -> Option<Strategy> {
        let mut best = Strategy::Left;
        for strategy in Strategy::ALL.iter().copied() {
            let score = *self.get(strategy);
            if !score.is_finite() {
                return None;
            }
            if score < *self.get(best) {
                best = strategy;
            }
        }
        Some(best)
    }
}
