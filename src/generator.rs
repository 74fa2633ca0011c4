//! This module contains logic for generating random Sudoku puzzles.
//!
//! Generation is done by first producing a fully solved grid with a
//! [Generator] and then removing a difficulty-dependent number of cells using
//! a [Reducer]. The solved grid is retained by the caller, so entered digits
//! can later be checked against it.

use crate::{Difficulty, SudokuGrid, SIZE};
use crate::error::{SudokuError, SudokuResult};

use rand::Rng;
use rand::rngs::ThreadRng;

/// A generator randomly generates a fully solved [SudokuGrid], that is, a
/// grid with no missing digits. It uses a random number generator to decide
/// the content. For most cases, sensible defaults are provided by
/// [Generator::new_default].
pub struct Generator<R: Rng> {
    rng: R
}

impl Generator<ThreadRng> {

    /// Creates a new generator that uses a [ThreadRng] to generate the random
    /// digits.
    pub fn new_default() -> Generator<ThreadRng> {
        Generator::new(rand::thread_rng())
    }
}

pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..(len - 1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

impl<R: Rng> Generator<R> {

    /// Creates a new generator that uses the given random number generator to
    /// generate random digits.
    pub fn new(rng: R) -> Generator<R> {
        Generator {
            rng
        }
    }

    fn fill_rec(&mut self, grid: &mut SudokuGrid, column: usize, row: usize)
            -> bool {
        if row == SIZE {
            return true;
        }

        let next_column = (column + 1) % SIZE;
        let next_row =
            if next_column == 0 { row + 1 } else { row };

        if grid.get_cell(column, row).unwrap().is_some() {
            return self.fill_rec(grid, next_column, next_row);
        }

        for number in shuffle(&mut self.rng, 1..=SIZE) {
            if grid.is_valid_number(column, row, number).unwrap() {
                grid.set_cell(column, row, number).unwrap();

                if self.fill_rec(grid, next_column, next_row) {
                    return true;
                }

                grid.clear_cell(column, row).unwrap();
            }
        }

        false
    }

    /// Fills the given [SudokuGrid] with random digits that satisfy the
    /// classic rules and match all already present digits. If it is not
    /// possible, an error will be returned.
    ///
    /// If no error is returned, it is guaranteed that
    /// [SudokuGrid::is_solved] on `grid` returns `true` after this operation.
    /// Otherwise, it remains unchanged.
    ///
    /// # Arguments
    ///
    /// * `grid`: The grid to fill with random digits.
    ///
    /// # Errors
    ///
    /// * `SudokuError::UnsatisfiableGrid` If there are no sets of digits that
    /// can be entered into the grid that satisfy the classic rules without
    /// changing digits already present.
    pub fn fill(&mut self, grid: &mut SudokuGrid) -> SudokuResult<()> {
        if self.fill_rec(grid, 0, 0) {
            Ok(())
        }
        else {
            Err(SudokuError::UnsatisfiableGrid)
        }
    }

    /// Generates a new fully solved [SudokuGrid]. Digits are placed by
    /// backtracking over the cells in row-major order, trying the candidates
    /// for each cell in an order shuffled by the wrapped random number
    /// generator, so the resulting grid varies between calls.
    ///
    /// It is guaranteed that [SudokuGrid::is_solved] on the result returns
    /// `true`. Since an empty grid always has a completion, this operation
    /// cannot fail.
    pub fn generate(&mut self) -> SudokuGrid {
        let mut grid = SudokuGrid::new();
        let filled = self.fill_rec(&mut grid, 0, 0);

        // An empty grid is always completable.
        debug_assert!(filled);

        grid
    }
}

/// A reducer turns the output of a [Generator] into a playable puzzle by
/// clearing cells. The number of cleared cells is determined by the
/// [Difficulty]; which cells are cleared is decided by a random number
/// generator.
///
/// The input grid is not modified. The reducer makes no statement about
/// unique solvability of the produced puzzle, it only guarantees the exact
/// number of empty cells.
pub struct Reducer<R: Rng> {
    rng: R
}

impl Reducer<ThreadRng> {

    /// Creates a new reducer that uses a [ThreadRng] to decide which cells
    /// are cleared.
    pub fn new_default() -> Reducer<ThreadRng> {
        Reducer::new(rand::thread_rng())
    }
}

impl<R: Rng> Reducer<R> {

    /// Creates a new reducer that uses the given random number generator to
    /// decide which cells are cleared.
    pub fn new(rng: R) -> Reducer<R> {
        Reducer {
            rng
        }
    }

    /// Returns a copy of `grid` from which exactly
    /// [Difficulty::cells_to_remove] cells have been cleared. Cells are
    /// chosen by uniformly sampling (column, row) pairs, resampling whenever
    /// an already-empty cell is hit.
    ///
    /// # Arguments
    ///
    /// * `grid`: The solved grid from which the puzzle is derived. It is not
    /// modified by this operation.
    /// * `difficulty`: Determines the number of cells to clear.
    ///
    /// # Errors
    ///
    /// * `SudokuError::NotEnoughClues` If `grid` contains fewer filled cells
    /// than this difficulty would remove. This cannot happen for grids coming
    /// from a [Generator], which are always full.
    pub fn reduce(&mut self, grid: &SudokuGrid, difficulty: Difficulty)
            -> SudokuResult<SudokuGrid> {
        let mut cells_to_remove = difficulty.cells_to_remove();

        if grid.count_clues() < cells_to_remove {
            return Err(SudokuError::NotEnoughClues);
        }

        let mut puzzle = grid.clone();

        while cells_to_remove > 0 {
            let column = self.rng.gen_range(0..SIZE);
            let row = self.rng.gen_range(0..SIZE);

            if puzzle.get_cell(column, row).unwrap().is_some() {
                puzzle.clear_cell(column, row).unwrap();
                cells_to_remove -= 1;
            }
        }

        Ok(puzzle)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::{BLOCK_SIZE, CELL_COUNT};

    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;

    use rand_chacha::ChaCha8Rng;

    fn generate_default() -> SudokuGrid {
        let mut generator = Generator::new_default();
        generator.generate()
    }

    #[test]
    fn shuffling_uniformly_distributed() {
        // 18000 experiments, 6 options (3!), so if uniformly distributed:
        // p = 1/6, my = 3000, sigma = sqrt(18000 * 1/6 * 5/6) = 50
        // with a probability of the amount being in the range [2600, 3400]
        // is more than 99,9999999999999 %.

        let mut counts = [0; 6];
        let mut rng = rand::thread_rng();

        for _ in 0..18000 {
            let result = shuffle(&mut rng, 1..=3);

            if result == vec![1, 2, 3] {
                counts[0] += 1;
            }
            else if result == vec![1, 3, 2] {
                counts[1] += 1;
            }
            else if result == vec![2, 1, 3] {
                counts[2] += 1;
            }
            else if result == vec![2, 3, 1] {
                counts[3] += 1;
            }
            else if result == vec![3, 1, 2] {
                counts[4] += 1;
            }
            else if result == vec![3, 2, 1] {
                counts[5] += 1;
            }
        }

        for count in counts.iter() {
            assert!(*count >= 2600 && *count <= 3400,
                "Count is not in range [2600, 3400].");
        }
    }

    fn assert_group_complete(numbers: &[bool; SIZE + 1], description: &str,
            i: usize) {
        for number in 1..=SIZE {
            assert!(numbers[number],
                "{} {} is missing number {}.", description, i, number);
        }
    }

    #[test]
    fn generated_grid_satisfies_sudoku_invariant() {
        let grid = generate_default();

        for row in 0..SIZE {
            let mut numbers = [false; SIZE + 1];

            for column in 0..SIZE {
                if let Some(number) = grid.get_cell(column, row).unwrap() {
                    numbers[number] = true;
                }
            }

            assert_group_complete(&numbers, "Row", row);
        }

        for column in 0..SIZE {
            let mut numbers = [false; SIZE + 1];

            for row in 0..SIZE {
                if let Some(number) = grid.get_cell(column, row).unwrap() {
                    numbers[number] = true;
                }
            }

            assert_group_complete(&numbers, "Column", column);
        }

        for block in 0..SIZE {
            let block_column = block % BLOCK_SIZE * BLOCK_SIZE;
            let block_row = block / BLOCK_SIZE * BLOCK_SIZE;
            let mut numbers = [false; SIZE + 1];

            for row in block_row..(block_row + BLOCK_SIZE) {
                for column in block_column..(block_column + BLOCK_SIZE) {
                    if let Some(number) =
                            grid.get_cell(column, row).unwrap() {
                        numbers[number] = true;
                    }
                }
            }

            assert_group_complete(&numbers, "Block", block);
        }
    }

    #[test]
    fn generated_grid_full_and_valid() {
        for _ in 0..10 {
            let grid = generate_default();

            assert!(grid.is_solved(), "Generated grid is not solved.");
            assert_eq!(CELL_COUNT, grid.count_clues());
        }
    }

    #[test]
    fn filled_grid_keeps_digits() {
        let mut grid = SudokuGrid::new();
        grid.set_cell(1, 0, 1).unwrap();
        grid.set_cell(3, 0, 3).unwrap();
        grid.set_cell(0, 1, 2).unwrap();
        grid.set_cell(1, 2, 4).unwrap();

        let mut generator = Generator::new_default();
        generator.fill(&mut grid).unwrap();

        assert!(grid.is_solved());
        assert_eq!(Some(1), grid.get_cell(1, 0).unwrap());
        assert_eq!(Some(3), grid.get_cell(3, 0).unwrap());
        assert_eq!(Some(2), grid.get_cell(0, 1).unwrap());
        assert_eq!(Some(4), grid.get_cell(1, 2).unwrap());
    }

    #[test]
    fn unsatisfiable_grid_is_not_changed() {
        // The top-left block already holds 1..=8, and the remaining cell
        // (2, 2) sees the missing 9 in both its row and its column.

        let mut grid = SudokuGrid::new();
        grid.set_cell(0, 0, 1).unwrap();
        grid.set_cell(1, 0, 2).unwrap();
        grid.set_cell(2, 0, 3).unwrap();
        grid.set_cell(0, 1, 4).unwrap();
        grid.set_cell(1, 1, 5).unwrap();
        grid.set_cell(2, 1, 6).unwrap();
        grid.set_cell(0, 2, 7).unwrap();
        grid.set_cell(1, 2, 8).unwrap();
        grid.set_cell(8, 2, 9).unwrap();
        grid.set_cell(2, 8, 9).unwrap();

        let mut generator = Generator::new_default();
        let grid_before = grid.clone();
        let result = generator.fill(&mut grid);

        assert_eq!(Err(SudokuError::UnsatisfiableGrid), result);
        assert_eq!(grid_before, grid);
    }

    #[test]
    fn first_candidate_order_yields_canonical_grid() {
        // StepRng::new(0, 0) makes every gen_range(i..len) return i, so the
        // candidate shuffle is the identity and backtracking finds the
        // lexicographically first completion of the empty grid.

        let mut generator = Generator::new(StepRng::new(0, 0));
        let grid = generator.generate();
        let expected = SudokuGrid::parse("\
            1,2,3,4,5,6,7,8,9,\
            4,5,6,7,8,9,1,2,3,\
            7,8,9,1,2,3,4,5,6,\
            2,1,4,3,6,5,8,9,7,\
            3,6,5,8,9,7,2,1,4,\
            8,9,7,2,1,4,3,6,5,\
            5,3,1,6,4,2,9,7,8,\
            6,4,2,9,7,8,5,3,1,\
            9,7,8,5,3,1,6,4,2").unwrap();

        assert_eq!(expected, grid);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut generator_1 = Generator::new(ChaCha8Rng::seed_from_u64(42));
        let mut generator_2 = Generator::new(ChaCha8Rng::seed_from_u64(42));

        assert_eq!(generator_1.generate(), generator_2.generate());
    }

    #[test]
    fn reduced_grid_has_exact_removal_count() {
        let grid = generate_default();
        let mut reducer = Reducer::new_default();

        for &difficulty in
                &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let puzzle = reducer.reduce(&grid, difficulty).unwrap();
            let removed = difficulty.cells_to_remove();

            assert_eq!(CELL_COUNT - removed, puzzle.count_clues());
        }
    }

    #[test]
    fn reduced_grid_clue_counts_per_difficulty() {
        let grid = generate_default();
        let mut reducer = Reducer::new_default();

        let easy = reducer.reduce(&grid, Difficulty::Easy).unwrap();
        let hard = reducer.reduce(&grid, Difficulty::Hard).unwrap();

        assert_eq!(46, easy.count_clues());
        assert_eq!(26, hard.count_clues());
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let grid = generate_default();
        let grid_before = grid.clone();
        let mut reducer = Reducer::new_default();
        let puzzle = reducer.reduce(&grid, Difficulty::Medium).unwrap();

        assert_eq!(grid_before, grid);
        assert_ne!(puzzle, grid);
    }

    #[test]
    fn reduced_grid_is_subset_of_solution() {
        let grid = generate_default();
        let mut reducer = Reducer::new_default();
        let puzzle = reducer.reduce(&grid, Difficulty::Hard).unwrap();

        assert!(puzzle.is_subset(&grid),
            "Puzzle contains a digit that differs from the solution.");
        assert!(puzzle.is_valid_solution(&grid));
    }

    #[test]
    fn reduce_rejects_grid_with_too_few_clues() {
        let mut grid = SudokuGrid::new();
        grid.set_cell(0, 0, 1).unwrap();

        let mut reducer = Reducer::new_default();
        let result = reducer.reduce(&grid, Difficulty::Easy);

        assert_eq!(Err(SudokuError::NotEnoughClues), result);
    }

    #[test]
    fn reduce_accepts_partial_grid_with_enough_clues() {
        let grid = generate_default();
        let mut reducer = Reducer::new_default();
        let partial = reducer.reduce(&grid, Difficulty::Easy).unwrap();

        // 46 clues remain, easy removes 35 of them.
        let puzzle = reducer.reduce(&partial, Difficulty::Easy).unwrap();

        assert_eq!(46 - 35, puzzle.count_clues());
    }
}
