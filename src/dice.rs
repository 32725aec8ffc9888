use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;

/// Fewest sides a die may have.
pub const MIN_SIDES: i32 = 4;

pub type Result<T> = std::result::Result<T, DieError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DieError {
    #[error("A die must have at least 4 sides, got {0}")]
    InvalidSides(i32),
}

///
/// A single die. Rolling produces one face value for a die
/// with the given number of `sides`.
///
pub trait Die: Send + Sync {
    ///
    /// Rolls the die once. Returns `DieError::InvalidSides` if `sides`
    /// is lower than `MIN_SIDES`.
    ///
    fn roll(&self, sides: i32) -> Result<i32>;

    ///
    /// Rolls `dice_no` dice of `sides` sides once each, and sums the faces
    ///
    fn roll_sum(&self, dice_no: i32, sides: i32) -> Result<i64> {
        (0..dice_no).map(|_| self.roll(sides).map(i64::from)).sum()
    }
}

///
/// Uniformly random die backed by its own `StdRng`.
///
/// Faces fall in `[1, sides - 1]`: zero is never produced and neither is
/// `sides` itself. Stored statistics depend on this range, so it must
/// not be widened to `[1, sides]`.
///
pub struct RandomDie {
    rng: Mutex<StdRng>,
}

impl RandomDie {
    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    ///
    /// Creates a die whose sequence of rolls is reproducible
    ///
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for RandomDie {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Die for RandomDie {
    fn roll(&self, sides: i32) -> Result<i32> {
        if sides < MIN_SIDES {
            return Err(DieError::InvalidSides(sides));
        }
        Ok(self.rng.lock().gen_range(1..sides))
    }

    fn roll_sum(&self, dice_no: i32, sides: i32) -> Result<i64> {
        if sides < MIN_SIDES {
            return Err(DieError::InvalidSides(sides));
        }
        // One lock for the whole set of dice
        let mut rng = self.rng.lock();
        Ok((0..dice_no).map(|_| i64::from(rng.gen_range(1..sides))).sum())
    }
}
