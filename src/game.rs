//! This module contains the state of one running game.
//!
//! A [Game] bundles everything one new-game cycle produces: the solved board,
//! the puzzle derived from it, the player's entries, and the elapsed time.
//! The solution and puzzle are created once by a
//! [Generator](crate::generator::Generator) and
//! [Reducer](crate::generator::Reducer) and are read-only afterwards; only
//! the entries change while playing. Completion times can be recorded in a
//! [Leaderboard].

use crate::{block_anchor, Difficulty, SudokuGrid, SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::generator::{Generator, Reducer};

use rand::Rng;

use serde::{Deserialize, Serialize};

/// The state of one game: the solved board, the puzzle shown to the player,
/// the player's entries, and the elapsed time in seconds.
///
/// Cells that are filled in the puzzle are *given* and cannot be changed by
/// the player. All other cells accept entries, which are tracked separately
/// from the puzzle and can be validated against the retained solution.
pub struct Game {
    solution: SudokuGrid,
    puzzle: SudokuGrid,
    entries: SudokuGrid,
    difficulty: Difficulty,
    elapsed_seconds: u64
}

impl Game {

    /// Starts a new game at the given difficulty. The generator produces the
    /// solved board and the reducer derives the puzzle from it; the elapsed
    /// time starts at zero.
    ///
    /// # Errors
    ///
    /// Any error raised by [Reducer::reduce]. For the grids produced here
    /// that cannot happen, so this is only relevant for callers that treat
    /// all results uniformly.
    pub fn new<R1, R2>(generator: &mut Generator<R1>,
        reducer: &mut Reducer<R2>, difficulty: Difficulty)
        -> SudokuResult<Game>
    where
        R1: Rng,
        R2: Rng
    {
        let solution = generator.generate();
        let puzzle = reducer.reduce(&solution, difficulty)?;

        Ok(Game {
            solution,
            puzzle,
            entries: SudokuGrid::new(),
            difficulty,
            elapsed_seconds: 0
        })
    }

    /// Gets a reference to the solved board of this game.
    pub fn solution(&self) -> &SudokuGrid {
        &self.solution
    }

    /// Gets a reference to the puzzle of this game, i.e. the solved board
    /// with the removed cells empty. Non-empty cells are given and fixed.
    pub fn puzzle(&self) -> &SudokuGrid {
        &self.puzzle
    }

    /// Gets a reference to the grid holding the player's entries. Given cells
    /// are always empty in this grid.
    pub fn entries(&self) -> &SudokuGrid {
        &self.entries
    }

    /// Gets the difficulty at which this game was started.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Indicates whether the cell at the specified position is given by the
    /// puzzle and therefore fixed.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the range `[0, 9[`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn is_given(&self, column: usize, row: usize) -> SudokuResult<bool> {
        Ok(self.puzzle.get_cell(column, row)?.is_some())
    }

    /// Gets the digit visible at the specified position, that is, the given
    /// digit if the cell is given and the player's entry otherwise. `None` if
    /// the cell is neither given nor entered.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the range `[0, 9[`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn visible_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        if let Some(number) = self.puzzle.get_cell(column, row)? {
            Ok(Some(number))
        }
        else {
            self.entries.get_cell(column, row)
        }
    }

    /// Enters the given number into the cell at the specified position,
    /// overwriting any previous entry there.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 9[`.
    /// * `number`: The number to enter. Must be in the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `number` is not in the specified
    /// range.
    /// * `SudokuError::FixedCell` If the cell at the specified position is
    /// given by the puzzle.
    pub fn set_entry(&mut self, column: usize, row: usize, number: usize)
            -> SudokuResult<()> {
        if self.is_given(column, row)? {
            return Err(SudokuError::FixedCell);
        }

        self.entries.set_cell(column, row, number)
    }

    /// Removes the player's entry from the cell at the specified position,
    /// if there is one.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the range `[0, 9[`.
    /// * `SudokuError::FixedCell` If the cell at the specified position is
    /// given by the puzzle.
    pub fn clear_entry(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        if self.is_given(column, row)? {
            return Err(SudokuError::FixedCell);
        }

        self.entries.clear_cell(column, row)
    }

    /// Lists the positions of all other cells whose visible digit collides
    /// with the digit visible at the specified position, i.e. cells in the
    /// same row, column, or block showing the same digit. An empty cell has
    /// no conflicts.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the range `[0, 9[`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn conflicts(&self, column: usize, row: usize)
            -> SudokuResult<Vec<(usize, usize)>> {
        let number = match self.visible_cell(column, row)? {
            Some(number) => number,
            None => return Ok(Vec::new())
        };
        let mut conflicts = Vec::new();

        for other_row in 0..SIZE {
            for other_column in 0..SIZE {
                if other_column == column && other_row == row {
                    continue;
                }

                let shares_group = other_row == row ||
                    other_column == column ||
                    block_anchor(other_column, other_row) ==
                        block_anchor(column, row);

                if shares_group &&
                        self.visible_cell(other_column, other_row).unwrap() ==
                            Some(number) {
                    conflicts.push((other_column, other_row));
                }
            }
        }

        Ok(conflicts)
    }

    /// Indicates whether the digit visible at the specified position matches
    /// the classic rules, i.e. it has no [conflicts](Game::conflicts). An
    /// empty cell is always valid.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the range `[0, 9[`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn is_entry_valid(&self, column: usize, row: usize)
            -> SudokuResult<bool> {
        Ok(self.conflicts(column, row)?.is_empty())
    }

    /// Indicates whether the puzzle is solved, that is, every cell that is
    /// not given holds an entry equal to the corresponding cell of the
    /// retained solution.
    pub fn check(&self) -> bool {
        self.incorrect_cells().is_empty()
    }

    /// Lists the positions of all cells that are not given and whose entry is
    /// missing or differs from the retained solution. The puzzle is solved if
    /// and only if this list is empty.
    pub fn incorrect_cells(&self) -> Vec<(usize, usize)> {
        let mut incorrect = Vec::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if self.puzzle.get_cell(column, row).unwrap().is_some() {
                    continue;
                }

                let entry = self.entries.get_cell(column, row).unwrap();
                let expected = self.solution.get_cell(column, row).unwrap();

                if entry != expected {
                    incorrect.push((column, row));
                }
            }
        }

        incorrect
    }

    /// Fills one empty cell (neither given nor entered), chosen uniformly at
    /// random, with the digit from the retained solution. The digit is placed
    /// as an ordinary entry, so it can be cleared again. Returns the position
    /// and digit of the revealed cell, or `None` if no cell is empty.
    pub fn hint(&mut self, rng: &mut impl Rng) -> Option<(usize, usize, usize)> {
        let mut empty_cells = Vec::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if self.visible_cell(column, row).unwrap().is_none() {
                    empty_cells.push((column, row));
                }
            }
        }

        if empty_cells.is_empty() {
            return None;
        }

        let (column, row) = empty_cells[rng.gen_range(0..empty_cells.len())];
        let number = self.solution.get_cell(column, row).unwrap().unwrap();
        self.entries.set_cell(column, row, number).unwrap();
        Some((column, row, number))
    }

    /// Removes all entries the player has made so far. Given cells and the
    /// elapsed time are unaffected.
    pub fn reset_entries(&mut self) {
        self.entries = SudokuGrid::new();
    }

    /// Advances the elapsed time of this game by one second. The surrounding
    /// application is expected to call this once per second while the game is
    /// running.
    pub fn tick(&mut self) {
        self.elapsed_seconds += 1;
    }

    /// Gets the number of seconds this game has been running, i.e. the number
    /// of times [Game::tick] has been called.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}

/// Formats a duration given in seconds as `MM:SS` with zero-padded minutes
/// and seconds. Durations of an hour or more extend the minute part beyond
/// two digits rather than truncating.
///
/// ```
/// use sudoku_engine::game::format_time;
///
/// assert_eq!("01:02", format_time(62));
/// ```
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// The maximum number of times a [Leaderboard] retains.
pub const LEADERBOARD_CAPACITY: usize = 5;

/// A list of the best completion times in seconds, sorted ascending and
/// capped at [LEADERBOARD_CAPACITY] entries. There is no player identity; all
/// times belong to the single implicit player.
///
/// The leaderboard serializes as a plain sequence of seconds, which is the
/// shape exchanged with the persistence layer.
///
/// ```
/// use sudoku_engine::game::Leaderboard;
///
/// let mut leaderboard = Leaderboard::new();
/// leaderboard.record(90);
/// leaderboard.record(62);
///
/// assert_eq!(&[62, 90], leaderboard.times());
/// assert_eq!("[62,90]", serde_json::to_string(&leaderboard).unwrap());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    times: Vec<u64>
}

impl Leaderboard {

    /// Creates a new, empty leaderboard.
    pub fn new() -> Leaderboard {
        Leaderboard {
            times: Vec::new()
        }
    }

    /// Creates a leaderboard from previously recorded times, e.g. loaded from
    /// storage. The times are sorted and truncated to
    /// [LEADERBOARD_CAPACITY] entries.
    pub fn from_times(mut times: Vec<u64>) -> Leaderboard {
        times.sort_unstable();
        times.truncate(LEADERBOARD_CAPACITY);

        Leaderboard {
            times
        }
    }

    /// Records a completion time. The time is inserted in ascending order and
    /// the slowest time is dropped if the leaderboard exceeds its capacity.
    /// Returns `true` if the time made the leaderboard.
    pub fn record(&mut self, seconds: u64) -> bool {
        self.times.push(seconds);
        self.times.sort_unstable();
        self.times.truncate(LEADERBOARD_CAPACITY);
        self.times.contains(&seconds)
    }

    /// Gets the recorded times in ascending order.
    pub fn times(&self) -> &[u64] {
        &self.times
    }

    /// Gets the best (lowest) recorded time, or `None` if the leaderboard is
    /// empty.
    pub fn best(&self) -> Option<u64> {
        self.times.first().copied()
    }
}
