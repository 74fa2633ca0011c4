//! This module contains some error and result definitions used in this crate.

use std::num::ParseIntError;

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html) as well as the [game](crate::game) and
/// [generator](crate::generator) modules. This does not include errors that
/// occur when parsing grids, see [SudokuParseError](enum.SudokuParseError.html)
/// for that.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that some number is invalid for a cell. This is the case if
    /// it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the 9x9 grid. This is the case if either is greater than or equal to
    /// 9.
    OutOfBounds,

    /// An error that is raised whenever it is attempted to fill a grid whose
    /// present digits admit no completion under the classic rules.
    UnsatisfiableGrid,

    /// An error that is raised when a grid handed to a
    /// [Reducer](crate::generator::Reducer) contains fewer clues than the
    /// requested difficulty would remove.
    NotEnoughClues,

    /// Indicates that a player entry was attempted on a cell that is given by
    /// the puzzle and therefore fixed.
    FixedCell
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a `SudokuGrid`.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal 81.
    WrongNumberOfCells,

    /// Indicates that one of the cell contents could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid number (0 or more than
    /// 9).
    InvalidNumber
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;

impl From<ParseIntError> for SudokuParseError {
    fn from(_: ParseIntError) -> Self {
        SudokuParseError::NumberFormatError
    }
}
