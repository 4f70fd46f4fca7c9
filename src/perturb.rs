//! Out-of-band mutations driven by pointer clicks and tracked hands.

use rand::Rng;

use crate::grid::Grid;

/// Extra cells scattered around an injection point.
pub const BURST_CELLS: usize = 15;
/// Half-width of the square the burst is drawn from (an 11x11 block).
pub const BURST_RADIUS: i64 = 5;

/// Brings `(x, y)` to life along with a burst of up to [`BURST_CELLS`] cells
/// around it. Draws that fall off the board are skipped, not wrapped.
///
/// Returns `false` and leaves the grid untouched when `(x, y)` is off the board.
pub fn inject_at<R: Rng + ?Sized>(grid: &mut Grid, x: i64, y: i64, rng: &mut R) -> bool {
    if !grid.contains(x, y) {
        return false;
    }
    grid.set(x as usize, y as usize, true);

    for _ in 0..BURST_CELLS {
        let nx = x + rng.gen_range(-BURST_RADIUS..=BURST_RADIUS);
        let ny = y + rng.gen_range(-BURST_RADIUS..=BURST_RADIUS);
        if grid.contains(nx, ny) {
            grid.set(nx as usize, ny as usize, true);
        }
    }
    true
}

/// Brings `count` uniformly chosen cells to life. Repeats are allowed.
pub fn inject_random<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) {
    for _ in 0..count {
        let x = rng.gen_range(0..grid.cols());
        let y = rng.gen_range(0..grid.rows());
        grid.set(x, y, true);
    }
}

/// Replaces the board with a fresh random fill of the same size.
pub fn reseed<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    grid.randomize(rng)
}
