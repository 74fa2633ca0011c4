// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements the core of an interactive 9x9 Sudoku game. It
//! supports the following key features:
//!
//! * Parsing and printing Sudoku grids
//! * Checking validity of grids and individual entries according to the
//! classic rules (no repeated digit in any row, column, or 3x3 block)
//! * Generating fully solved boards using randomized backtracking
//! * Deriving playable puzzles from solved boards by removing cells according
//! to a difficulty level
//! * Tracking a running game, including player entries, elapsed time, hints,
//! and a best-times leaderboard
//!
//! # Parsing and printing grids
//!
//! See [SudokuGrid::parse] for the exact format of a grid code.
//!
//! Codes can be used to exchange grids, while pretty prints can be used to
//! display a grid in a clearer manner. An example of how to parse and display
//! a grid is provided below.
//!
//! ```
//! use sudoku_engine::SudokuGrid;
//!
//! let grid = SudokuGrid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Generating puzzles
//!
//! Generation is done in two steps: a [Generator](generator::Generator)
//! produces a fully solved board and a [Reducer](generator::Reducer) removes
//! a number of cells determined by the [Difficulty] to obtain the puzzle.
//! Both are generic over the random number generator to make deterministic
//! tests possible, with sensible defaults provided by `new_default`.
//!
//! ```
//! use sudoku_engine::Difficulty;
//! use sudoku_engine::generator::{Generator, Reducer};
//!
//! // new_default yields a generator/reducer backed by rand::thread_rng()
//! let mut generator = Generator::new_default();
//! let mut reducer = Reducer::new_default();
//!
//! let solution = generator.generate();
//! assert!(solution.is_solved());
//!
//! let puzzle = reducer.reduce(&solution, Difficulty::Medium).unwrap();
//! assert_eq!(81 - 45, puzzle.count_clues());
//! ```
//!
//! # Running a game
//!
//! A [Game](game::Game) owns the solution and puzzle of one new-game cycle
//! together with the player's entries and the elapsed time. It validates
//! entries, checks them against the retained solution, and hands completion
//! times to a [Leaderboard](game::Leaderboard).
//!
//! ```
//! use sudoku_engine::Difficulty;
//! use sudoku_engine::game::{Game, Leaderboard};
//! use sudoku_engine::generator::{Generator, Reducer};
//!
//! let mut generator = Generator::new_default();
//! let mut reducer = Reducer::new_default();
//! let mut game = Game::new(&mut generator, &mut reducer, Difficulty::Easy)
//!     .unwrap();
//!
//! // Play by entering digits into cells that are not given by the puzzle.
//! assert!(!game.check());
//!
//! let mut leaderboard = Leaderboard::new();
//! leaderboard.record(game.elapsed_seconds());
//! ```

pub mod error;
pub mod game;
pub mod generator;

use error::{SudokuError, SudokuParseError, SudokuParseResult, SudokuResult};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The width and height of one block of the grid. Classic Sudoku blocks are
/// 3x3.
pub const BLOCK_SIZE: usize = 3;

/// The number of rows and columns of the grid.
pub const SIZE: usize = BLOCK_SIZE * BLOCK_SIZE;

/// The total number of cells in the grid.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// The difficulty of a generated puzzle. It determines how many of the 81
/// cells of a solved board are removed by a [Reducer](generator::Reducer):
/// the more cells are missing, the harder the puzzle tends to be.
///
/// When a difficulty is obtained from an untrusted token, any unrecognized
/// token falls back to [Difficulty::Medium] (see [Difficulty::from_token]).
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {

    /// An easy puzzle, from which 35 cells are removed.
    Easy,

    /// A medium puzzle, from which 45 cells are removed. This is the default.
    Medium,

    /// A hard puzzle, from which 55 cells are removed.
    Hard
}

impl Difficulty {

    /// The number of cells a [Reducer](generator::Reducer) removes from a
    /// solved board at this difficulty. This is 35 for [Difficulty::Easy], 45
    /// for [Difficulty::Medium], and 55 for [Difficulty::Hard].
    pub fn cells_to_remove(self) -> usize {
        match self {
            Difficulty::Easy => 35,
            Difficulty::Medium => 45,
            Difficulty::Hard => 55
        }
    }

    /// Parses a difficulty from one of the tokens `"easy"`, `"medium"`, and
    /// `"hard"`. Any other token yields [Difficulty::Medium], so this cannot
    /// fail.
    ///
    /// ```
    /// use sudoku_engine::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy, Difficulty::from_token("easy"));
    /// assert_eq!(Difficulty::Medium, Difficulty::from_token("whatever"));
    /// ```
    pub fn from_token(token: &str) -> Difficulty {
        match token {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium
        }
    }
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::Medium
    }
}

/// A 9x9 Sudoku grid, organized in 9 rows, 9 columns, and 9 non-overlapping
/// 3x3 blocks. Each cell may or may not be occupied by a digit from 1 to 9.
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝
/// ```
///
/// The grid checks the classic Sudoku rules itself: [SudokuGrid::is_valid]
/// requires that no digit repeats within any row, column, or block, and
/// [SudokuGrid::is_valid_number] checks a potential new entry against the
/// same rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudokuGrid {
    cells: [Option<usize>; CELL_COUNT]
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(n) = cell {
        (b'0' + n as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.get_cell(x, y).unwrap()), ' ', '║',
        true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

fn to_string(cell: &Option<usize>) -> String {
    if let Some(number) = cell {
        number.to_string()
    }
    else {
        String::from("")
    }
}

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * SIZE + column
}

/// The column and row of the top-left cell of the block containing the cell
/// at the given coordinates.
pub(crate) fn block_anchor(column: usize, row: usize) -> (usize, usize) {
    (column / BLOCK_SIZE * BLOCK_SIZE, row / BLOCK_SIZE * BLOCK_SIZE)
}

impl SudokuGrid {

    /// Creates a new, empty 9x9 grid.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: [None; CELL_COUNT]
        }
    }

    /// Parses a code encoding a grid. The code is a comma-separated list of
    /// 81 entries, which are either empty or a digit from 1 to 9. The entries
    /// are assigned left-to-right, top-to-bottom, where each row is completed
    /// before the next one is started. Whitespace in the entries is ignored
    /// to allow for more intuitive formatting.
    ///
    /// As an example, an empty grid is obtained from 81 empty entries:
    ///
    /// ```
    /// use sudoku_engine::SudokuGrid;
    ///
    /// let grid = SudokuGrid::parse(",".repeat(80).as_str()).unwrap();
    /// assert!(grid.is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `SudokuParseError` (see that documentation).
    pub fn parse(code: &str) -> SudokuParseResult<SudokuGrid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != CELL_COUNT {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        let mut grid = SudokuGrid::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let number = entry.parse::<usize>()?;

            if number == 0 || number > SIZE {
                return Err(SudokuParseError::InvalidNumber);
            }

            grid.cells[i] = Some(number);
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [SudokuGrid::parse]. That is, a grid that is converted to a string and
    /// parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use sudoku_engine::SudokuGrid;
    ///
    /// let mut grid = SudokuGrid::new();
    ///
    /// // Just some arbitrary changes to create some content.
    /// grid.set_cell(1, 1, 4).unwrap();
    /// grid.set_cell(1, 2, 5).unwrap();
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = SudokuGrid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<usize>> {
        if column >= SIZE || row >= SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(self.cells[index(column, row)])
        }
    }

    /// Indicates whether the cell at the specified position has the given
    /// number. This will return `false` if there is a different number in
    /// that cell or it is empty.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 9[`.
    /// * `number`: The number to check whether it is in the specified cell.
    /// If it is *not* in the range `[1, 9]`, `false` will always be returned.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn has_number(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<bool> {
        if let Some(content) = self.get_cell(column, row)? {
            Ok(number == content)
        }
        else {
            Ok(false)
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// number. If the cell was not empty, the old number will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 9[`.
    /// * `number`: The number to assign to the specified cell. Must be in the
    /// range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `number` is not in the specified
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, number: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if number == 0 || number > SIZE {
            return Err(SudokuError::InvalidNumber);
        }

        self.cells[index(column, row)] = Some(number);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a number, that number is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        self.cells[index(column, row)] = None;
        Ok(())
    }

    /// Counts the number of clues given by this grid. This is the number of
    /// non-empty cells. While on average Sudoku with less clues are harder,
    /// this is *not* a reliable measure of difficulty.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// number. In this case, [SudokuGrid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c == &None)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// number. In this case, [SudokuGrid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c == &None)
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some number must be filled
    /// in `other` with the same number. If this condition is met, `true` is
    /// returned, and `false` otherwise.
    pub fn is_subset(&self, other: &SudokuGrid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| {
                match self_cell {
                    Some(self_number) =>
                        match other_cell {
                            Some(other_number) => self_number == other_number,
                            None => false
                        },
                    None => true
                }
            })
    }

    /// Indicates whether this grid configuration is a superset of another
    /// one. That is, all cells filled in the `other` grid with some number
    /// must be filled in this one with the same number. If this condition is
    /// met, `true` is returned, and `false` otherwise.
    pub fn is_superset(&self, other: &SudokuGrid) -> bool {
        other.is_subset(self)
    }

    /// Indicates whether the given number would be valid in the cell at the
    /// given location according to the classic rules. That is, if the same
    /// number is already present in another cell of the same row, column, or
    /// block, `false` is returned, and `true` otherwise. The content of the
    /// checked cell itself is ignored.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the checked cell. Must be in
    /// the range `[0, 9[`.
    /// * `row`: The row (y-coordinate) of the checked cell. Must be in the
    /// range `[0, 9[`.
    /// * `number`: The number to check whether it is valid in the given cell.
    /// Must be in the range `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `number` is not in the specified
    /// range.
    pub fn is_valid_number(&self, column: usize, row: usize, number: usize)
            -> SudokuResult<bool> {
        if column >= SIZE || row >= SIZE {
            return Err(SudokuError::OutOfBounds);
        }

        if number == 0 || number > SIZE {
            return Err(SudokuError::InvalidNumber);
        }

        for other_column in 0..SIZE {
            if other_column != column &&
                    self.has_number(other_column, row, number).unwrap() {
                return Ok(false);
            }
        }

        for other_row in 0..SIZE {
            if other_row != row &&
                    self.has_number(column, other_row, number).unwrap() {
                return Ok(false);
            }
        }

        let (block_column, block_row) = block_anchor(column, row);

        for other_row in block_row..(block_row + BLOCK_SIZE) {
            for other_column in block_column..(block_column + BLOCK_SIZE) {
                if (other_column != column || other_row != row) &&
                        self.has_number(other_column, other_row, number)
                            .unwrap() {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Indicates whether the cell at the given location matches the classic
    /// rules. That is, if the digit in the specified cell repeats elsewhere
    /// in its row, column, or block, `false` is returned, and `true`
    /// otherwise. An empty cell is always valid.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the range `[0, 9[`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn is_valid_cell(&self, column: usize, row: usize)
            -> SudokuResult<bool> {
        if let Some(number) = self.get_cell(column, row)? {
            self.is_valid_number(column, row, number)
        }
        else {
            Ok(true)
        }
    }

    /// Indicates whether the entire grid matches the classic rules, i.e. no
    /// digit repeats within any row, column, or block. Empty cells are
    /// permitted.
    pub fn is_valid(&self) -> bool {
        for row in 0..SIZE {
            for column in 0..SIZE {
                if !self.is_valid_cell(column, row).unwrap() {
                    return false;
                }
            }
        }

        true
    }

    /// Indicates whether this grid is a complete solution, i.e. it is full
    /// and matches the classic rules. In this case every row, column, and
    /// block contains each of the digits 1 to 9 exactly once.
    pub fn is_solved(&self) -> bool {
        self.is_full() && self.is_valid()
    }

    /// Indicates whether the given grid is a valid solution to this puzzle.
    /// That is the case if all digits from this grid can be found in the
    /// `solution`, it matches the classic rules, and it is full.
    pub fn is_valid_solution(&self, solution: &SudokuGrid) -> bool {
        self.is_subset(solution) && solution.is_solved()
    }

    /// Gets a reference to the slice which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &[Option<usize>] {
        &self.cells
    }
}

impl Default for SudokuGrid {
    fn default() -> SudokuGrid {
        SudokuGrid::new()
    }
}
