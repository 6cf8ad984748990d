//! Error module.

use std::error::Error;
use std::fmt;

/// Common result.
pub type CResult<T = ()> = Result<T, Box<dyn Error>>;

/// Source image has more distinct colors than the target screen mode
/// can hold, even after nearest-color quantization collapses duplicates.
#[derive(Debug)]
pub struct TooManyColorsError {
    /// Number of distinct colors found.
    pub found: usize,
    /// Colors the mode can hold.
    pub budget: usize,
}

impl Error for TooManyColorsError {}

impl fmt::Display for TooManyColorsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "too many colours ({}) for screen mode budget of {}",
            self.found, self.budget
        )
    }
}

/// A supplied CLUT has more entries than the mode budget allows.
#[derive(Debug)]
pub struct ClutOverflowError {
    /// Number of CLUT entries supplied.
    pub found: usize,
    /// Entries the mode can hold.
    pub budget: usize,
}

impl Error for ClutOverflowError {}

impl fmt::Display for ClutOverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clut has too many entries ({}) for mode budget of {}",
            self.found, self.budget
        )
    }
}

/// A user-supplied value failed validation (mode, crop, scale, tile
/// size, tile selection, routine name, shift).
#[derive(Debug)]
pub struct InvalidInputError(pub String);

impl Error for InvalidInputError {}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// No tiles fit the requested tile size within the source image.
#[derive(Debug)]
pub struct NoTilesError;

impl Error for NoTilesError {}

impl fmt::Display for NoTilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no tiles found for the requested tile size")
    }
}
