use rand::Rng;

/// The game board: `cols` columns of `rows` cells each, `true` meaning alive.
///
/// Cells are addressed as `(column, row)`. Both dimensions are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Allocates an all-dead grid. Zero dimensions are clamped to 1.
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![vec![false; rows]; cols],
        }
    }

    /// Builds a grid from explicit columns. Ragged or empty input is padded
    /// with dead cells up to the widest column.
    pub fn from_columns(columns: Vec<Vec<bool>>) -> Self {
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(columns.len(), rows);
        for (x, column) in columns.into_iter().enumerate() {
            for (y, alive) in column.into_iter().enumerate() {
                grid.cells[x][y] = alive;
            }
        }
        grid
    }

    /// Returns a fresh grid of the same dimensions where every cell is alive
    /// with probability one half.
    pub fn randomize<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let cells = (0..self.cols)
            .map(|_| (0..self.rows).map(|_| rng.gen_bool(0.5)).collect())
            .collect();
        Self {
            cols: self.cols,
            rows: self.rows,
            cells,
        }
    }

    /// Copies the overlapping top-left region into a new all-dead grid of the
    /// requested size. Cells past either old edge stay dead; cells past either
    /// new edge are dropped.
    pub fn resize(&self, cols: usize, rows: usize) -> Self {
        let mut resized = Self::new(cols, rows);
        let keep_rows = self.rows.min(resized.rows);
        for (dst, src) in resized.cells.iter_mut().zip(&self.cells) {
            dst[..keep_rows].copy_from_slice(&src[..keep_rows]);
        }
        resized
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Cell state, or `false` for coordinates off the board.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    /// Sets a cell. Off-board coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(cell) = self.cells.get_mut(x).and_then(|column| column.get_mut(y)) {
            *cell = alive;
        }
    }

    /// Number of living cells.
    pub fn population(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|column| column.iter())
            .filter(|&&cell| cell)
            .count() as u64
    }

    /// Iterates over the coordinates of every living cell.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(y, _)| (x, y))
        })
    }
}

/// Grid dimensions for a viewport measured in surface pixels.
pub fn dimensions_for(width: u32, height: u32, resolution: u32) -> (usize, usize) {
    let resolution = resolution.max(1);
    (
        ((width / resolution) as usize).max(1),
        ((height / resolution) as usize).max(1),
    )
}
