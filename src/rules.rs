//! Conway's B3/S23 rule on a toroidal board.

use crate::grid::Grid;

/// Counts the live neighbors of `(x, y)`.
///
/// The grid is treated as toroidal, meaning the edges wrap around to the
/// opposite side. On boards narrower than three cells the wrapped offsets land
/// on the same cells more than once, and every landing is counted.
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let cols = grid.cols() as i64;
    let rows = grid.rows() as i64;
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let nx = (x as i64 + dx).rem_euclid(cols) as usize;
            let ny = (y as i64 + dy).rem_euclid(rows) as usize;

            if grid.get(nx, ny) {
                count += 1;
            }
        }
    }
    count
}

/// Applies the rule to one cell:
///
/// * A dead cell with exactly three live neighbors is born
/// * A live cell with fewer than two or more than three live neighbors dies
/// * Anything else keeps its state
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (false, 3) => true,
        (true, n) if !(2..=3).contains(&n) => false,
        (otherwise, _) => otherwise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_isolated_cell() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, true);
        assert_eq!(count_live_neighbors(&grid, 2, 2), 0);
        assert_eq!(count_live_neighbors(&grid, 1, 1), 1);
        assert_eq!(count_live_neighbors(&grid, 4, 4), 0);
    }

    #[test]
    fn test_count_full_neighborhood() {
        let mut grid = Grid::new(5, 5);
        for x in 1..=3 {
            for y in 1..=3 {
                grid.set(x, y, true);
            }
        }
        assert_eq!(count_live_neighbors(&grid, 2, 2), 8);
    }

    #[test]
    fn test_count_wraps_corners() {
        let mut grid = Grid::new(6, 4);
        grid.set(0, 0, true);
        assert_eq!(count_live_neighbors(&grid, 5, 0), 1);
        assert_eq!(count_live_neighbors(&grid, 0, 3), 1);
        assert_eq!(count_live_neighbors(&grid, 5, 3), 1);
        assert_eq!(count_live_neighbors(&grid, 3, 2), 0);
    }

    #[test]
    fn test_count_bounds_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(11);
        for (cols, rows) in [(1, 1), (2, 3), (7, 1), (13, 9)] {
            let grid = Grid::new(cols, rows).randomize(&mut rng);
            for x in 0..cols {
                for y in 0..rows {
                    assert!(count_live_neighbors(&grid, x, y) <= 8);
                }
            }
        }
    }

    #[test]
    fn test_count_matches_include_then_subtract() {
        let mut rng = StdRng::seed_from_u64(5);
        for (cols, rows) in [(1, 1), (2, 2), (3, 2), (8, 8)] {
            let grid = Grid::new(cols, rows).randomize(&mut rng);
            for x in 0..cols {
                for y in 0..rows {
                    let mut sum = 0u8;
                    for i in -1i64..=1 {
                        for j in -1i64..=1 {
                            let c = ((x as i64 + i + cols as i64) % cols as i64) as usize;
                            let r = ((y as i64 + j + rows as i64) % rows as i64) as usize;
                            sum += grid.get(c, r) as u8;
                        }
                    }
                    sum -= grid.get(x, y) as u8;
                    assert_eq!(count_live_neighbors(&grid, x, y), sum);
                }
            }
        }
    }

    #[test]
    fn test_single_live_cell_board_sees_itself() {
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, true);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 8);
    }

    #[test]
    fn test_rule_table() {
        assert!(next_state(false, 3));
        for n in (0..=8).filter(|&n| n != 3) {
            assert!(!next_state(false, n), "dead with {n} stays dead");
        }
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!next_state(true, n), "alive with {n} dies");
        }
    }
}
