use std::time::{Duration, Instant};

use rand::Rng;
use rayon::prelude::*;

use crate::grid::Grid;
use crate::motion::MotionEffect;
use crate::perturb;
use crate::rules::{count_live_neighbors, next_state};

/// Every this many ticks an active motion effect drops one random live cell.
pub const MOTION_INJECT_EVERY: u64 = 10;

/// Stores statistics about the simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Current generation number
    pub generation: u64,
    /// Total number of cells born since start
    pub cells_created: u64,
    /// Total number of cells that died since start
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

/// Births and deaths produced by one rule pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transitions {
    pub born: u64,
    pub died: u64,
}

/// Computes the next generation from the pre-step grid.
pub fn step(grid: &Grid) -> Grid {
    step_with_report(grid).0
}

/// Like [`step`], also counting how many cells changed state.
///
/// Columns are evaluated in parallel; every read goes to the untouched input,
/// so the result matches a sequential pass.
pub fn step_with_report(grid: &Grid) -> (Grid, Transitions) {
    let columns: Vec<(Vec<bool>, Transitions)> = (0..grid.cols())
        .into_par_iter()
        .map(|x| {
            let mut counts = Transitions::default();
            let column: Vec<bool> = (0..grid.rows())
                .map(|y| {
                    let cell = grid.get(x, y);
                    let next = next_state(cell, count_live_neighbors(grid, x, y));
                    match (cell, next) {
                        (false, true) => counts.born += 1,
                        (true, false) => counts.died += 1,
                        _ => {}
                    }
                    next
                })
                .collect();
            (column, counts)
        })
        .collect();

    let mut total = Transitions::default();
    let cells = columns
        .into_iter()
        .map(|(column, counts)| {
            total.born += counts.born;
            total.died += counts.died;
            column
        })
        .collect();
    (Grid::from_columns(cells), total)
}

/// Everything the frame loop advances: the board, the motion effect, the
/// global tick counter and running statistics.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    motion: MotionEffect,
    tick: u64,
    stats: Stats,
}

impl Simulation {
    pub fn new(grid: Grid, motion_duration: Duration) -> Self {
        let stats = Stats {
            current_population: grid.population(),
            ..Stats::default()
        };
        Self {
            grid,
            motion: MotionEffect::new(motion_duration),
            tick: 0,
            stats,
        }
    }

    /// Starts with a random fill of `cols x rows`.
    pub fn random<R: Rng + ?Sized>(
        cols: usize,
        rows: usize,
        motion_duration: Duration,
        rng: &mut R,
    ) -> Self {
        Self::new(Grid::new(cols, rows).randomize(rng), motion_duration)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn motion(&self) -> &MotionEffect {
        &self.motion
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Starts a new frame: bumps the tick counter and expires the motion
    /// effect if its window has passed. Returns the new tick.
    pub fn begin_frame(&mut self, now: Instant) -> u64 {
        self.tick += 1;
        self.motion.refresh(now);
        self.tick
    }

    /// Replaces the board with the next generation. While the motion effect is
    /// active, every [`MOTION_INJECT_EVERY`]th tick also forces one random cell
    /// of the new board alive.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (mut next, transitions) = step_with_report(&self.grid);

        if self.motion.is_active() && self.tick % MOTION_INJECT_EVERY == 0 {
            perturb::inject_random(&mut next, 1, rng);
        }

        self.grid = next;
        self.stats.generation += 1;
        self.stats.cells_created += transitions.born;
        self.stats.cells_destroyed += transitions.died;
        self.stats.current_population = self.grid.population();
    }

    /// Seeds activity around `(x, y)` and (re)starts the motion effect.
    ///
    /// The effect is refreshed even when the point is off the board; only the
    /// grid write is skipped.
    pub fn inject_at<R: Rng + ?Sized>(&mut self, x: i64, y: i64, now: Instant, rng: &mut R) -> bool {
        self.motion.trigger(now);
        let hit = perturb::inject_at(&mut self.grid, x, y, rng);
        self.sync_population();
        hit
    }

    /// Scatters `count` random live cells. The motion effect is left alone.
    pub fn inject_random<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        perturb::inject_random(&mut self.grid, count, rng);
        self.sync_population();
    }

    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid = perturb::reseed(&self.grid, rng);
        self.sync_population();
    }

    /// Resamples the board to new dimensions, keeping the overlapping region.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.grid = self.grid.resize(cols, rows);
        self.sync_population();
    }

    fn sync_population(&mut self) {
        self.stats.current_population = self.grid.population();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FIVE_SECONDS: Duration = Duration::from_millis(5000);

    fn grid_with(cols: usize, rows: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(cols, rows);
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        grid
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        assert_eq!(step(&grid), grid);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)]);
        let vertical = grid_with(7, 7, &[(3, 2), (3, 3), (3, 4)]);
        let once = step(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(step(&once), horizontal);
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(21);
        let grid = Grid::new(40, 25).randomize(&mut rng);
        let first = step(&grid);
        let second = step(&grid);
        assert_eq!(first, second);
        assert_eq!((first.cols(), first.rows()), (40, 25));
    }

    #[test]
    fn test_step_rule_outcomes() {
        // (1,1) dead with three neighbors, (4,4) alive with one
        let grid = grid_with(8, 8, &[(0, 1), (1, 0), (2, 1), (4, 4), (5, 4)]);
        let next = step(&grid);
        assert!(next.get(1, 1));
        assert!(!next.get(4, 4));
    }

    #[test]
    fn test_step_wraps_edges() {
        // a blinker straddling the left/right seam
        let grid = grid_with(5, 5, &[(4, 2), (0, 2), (1, 2)]);
        let next = step(&grid);
        assert_eq!(next, grid_with(5, 5, &[(0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_step_report_counts() {
        let horizontal = grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)]);
        let (_, report) = step_with_report(&horizontal);
        assert_eq!(report, Transitions { born: 2, died: 2 });
    }

    #[test]
    fn test_advance_updates_stats() {
        let grid = grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)]);
        let mut rng = StdRng::seed_from_u64(22);
        let mut sim = Simulation::new(grid, FIVE_SECONDS);
        sim.begin_frame(Instant::now());
        sim.advance(&mut rng);
        let stats = sim.stats();
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.cells_created, 2);
        assert_eq!(stats.cells_destroyed, 2);
        assert_eq!(stats.current_population, 3);
    }

    #[test]
    fn test_inject_at_activates_motion() {
        let mut rng = StdRng::seed_from_u64(23);
        let start = Instant::now();
        let mut sim = Simulation::new(Grid::new(30, 30), FIVE_SECONDS);
        assert!(sim.inject_at(15, 15, start, &mut rng));
        assert!(sim.grid().get(15, 15));
        assert!(sim.motion().is_active());
        assert!(sim.stats().current_population >= 1);

        sim.begin_frame(start + Duration::from_millis(4000));
        assert!(sim.motion().is_active());
        sim.begin_frame(start + Duration::from_millis(5001));
        assert!(!sim.motion().is_active());
    }

    #[test]
    fn test_inject_off_board_still_refreshes_motion() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut sim = Simulation::new(Grid::new(4, 4), FIVE_SECONDS);
        assert!(!sim.inject_at(9, 9, Instant::now(), &mut rng));
        assert_eq!(sim.grid().population(), 0);
        assert!(sim.motion().is_active());
    }

    #[test]
    fn test_motion_injects_on_cadence() {
        let mut rng = StdRng::seed_from_u64(25);
        let start = Instant::now();
        // an empty board stays empty unless the motion effect drops a cell
        let mut sim = Simulation::new(Grid::new(20, 20), FIVE_SECONDS);
        sim.inject_at(-1, -1, start, &mut rng);
        for tick in 1..=MOTION_INJECT_EVERY {
            sim.begin_frame(start);
            sim.advance(&mut rng);
            let expected = if tick == MOTION_INJECT_EVERY { 1 } else { 0 };
            assert_eq!(sim.grid().population(), expected, "tick {tick}");
        }
    }

    #[test]
    fn test_no_injection_without_motion() {
        let mut rng = StdRng::seed_from_u64(26);
        let mut sim = Simulation::new(Grid::new(20, 20), FIVE_SECONDS);
        for _ in 0..30 {
            sim.begin_frame(Instant::now());
            sim.advance(&mut rng);
        }
        assert_eq!(sim.grid().population(), 0);
        assert_eq!(sim.tick(), 30);
    }

    #[test]
    fn test_inject_random_leaves_motion_alone() {
        let mut rng = StdRng::seed_from_u64(27);
        let mut sim = Simulation::new(Grid::new(10, 10), FIVE_SECONDS);
        sim.inject_random(5, &mut rng);
        assert!(sim.grid().population() >= 1);
        assert!(!sim.motion().is_active());
    }

    #[test]
    fn test_resize_and_reseed() {
        let mut rng = StdRng::seed_from_u64(28);
        let mut sim = Simulation::random(10, 10, FIVE_SECONDS, &mut rng);
        let before = sim.grid().clone();
        sim.resize(5, 5);
        for x in 0..5 {
            for y in 0..5 {
                assert_eq!(sim.grid().get(x, y), before.get(x, y));
            }
        }
        sim.resize(0, 0);
        assert_eq!((sim.grid().cols(), sim.grid().rows()), (1, 1));

        sim.resize(12, 9);
        sim.reseed(&mut rng);
        assert_eq!((sim.grid().cols(), sim.grid().rows()), (12, 9));
        assert_eq!(sim.stats().current_population, sim.grid().population());
    }
}
