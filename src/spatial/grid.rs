use std::ops::Range;

/// Represents an axis-aligned rectangle in world space.
///
/// Both edges are inclusive; the grid only uses regions to decide which cells to visit, so
/// the exact edge convention never excludes a particle.
///
/// # Examples
///
/// ```
/// use particle_life::spatial::Region;
///
/// let region = Region::around((10.0, 10.0), 5.0);
/// assert!(region.contains((15.0, 5.0)));
/// assert!(!region.contains((15.1, 10.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub min: (f32, f32),
    pub max: (f32, f32),
}

impl Region {
    pub fn new(min: (f32, f32), max: (f32, f32)) -> Self {
        Region { min, max }
    }

    /// The square of half-side `reach` centred on `center`.
    pub fn around(center: (f32, f32), reach: f32) -> Self {
        Region {
            min: (center.0 - reach, center.1 - reach),
            max: (center.0 + reach, center.1 + reach),
        }
    }

    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.min.0 && point.0 <= self.max.0 && point.1 >= self.min.1 && point.1 <= self.max.1
    }
}

/// Geometry of the uniform grid laid over the world.
///
/// Cells are numbered row-major, `cell_y * resolution + cell_x`. A point on a cell boundary
/// belongs to the higher cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    bounds: (f32, f32),
    resolution: usize,
    cell_size: (f32, f32),
}

impl GridGeometry {
    /// # Examples
    ///
    /// ```
    /// use particle_life::spatial::GridGeometry;
    ///
    /// let grid = GridGeometry::new((200.0, 100.0), 10);
    /// assert_eq!(grid.cell_size(), (20.0, 10.0));
    /// assert_eq!(grid.cell_count(), 100);
    /// assert_eq!(grid.cell_of((45.0, 10.0)), Some(12)); // row 1, column 2
    /// assert_eq!(grid.cell_of((200.0, 10.0)), None);
    /// ```
    pub fn new(bounds: (f32, f32), resolution: usize) -> Self {
        debug_assert!(resolution > 0, "grid resolution must be at least 1");
        let resolution = resolution.max(1);
        GridGeometry {
            bounds,
            resolution,
            cell_size: (bounds.0 / resolution as f32, bounds.1 / resolution as f32),
        }
    }

    pub fn bounds(&self) -> (f32, f32) {
        self.bounds
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cell_size(&self) -> (f32, f32) {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.resolution * self.resolution
    }

    /// True if `position` lies in `[0, width) x [0, height)`.
    pub fn in_bounds(&self, position: (f32, f32)) -> bool {
        (0.0..self.bounds.0).contains(&position.0) && (0.0..self.bounds.1).contains(&position.1)
    }

    /// Column of `x`, clamped onto the grid.
    fn column(&self, x: f32) -> usize {
        axis_cell(x, self.cell_size.0, self.resolution)
    }

    fn row(&self, y: f32) -> usize {
        axis_cell(y, self.cell_size.1, self.resolution)
    }

    /// Cell index of an in-bounds position, `None` otherwise.
    pub fn cell_of(&self, position: (f32, f32)) -> Option<usize> {
        if !self.in_bounds(position) {
            return None;
        }
        Some(self.cell_key(position))
    }

    /// Cell index of any position, clamped onto the edge cells.
    ///
    /// Used as the sort key so that every particle, even one nudged past the edge by float
    /// rounding, lands in a valid cell.
    #[inline]
    pub fn cell_key(&self, position: (f32, f32)) -> usize {
        self.row(position.1) * self.resolution + self.column(position.0)
    }

    /// Columns and rows of the cells a region touches, or `None` if it misses the grid.
    pub fn cell_span(&self, region: &Region) -> Option<(Range<usize>, Range<usize>)> {
        let overlaps_x = region.max.0 >= 0.0 && region.min.0 < self.bounds.0 && region.min.0 <= region.max.0;
        let overlaps_y = region.max.1 >= 0.0 && region.min.1 < self.bounds.1 && region.min.1 <= region.max.1;
        if !(overlaps_x && overlaps_y) {
            return None;
        }
        let columns = self.column(region.min.0)..self.column(region.max.0) + 1;
        let rows = self.row(region.min.1)..self.row(region.max.1) + 1;
        Some((columns, rows))
    }
}

#[inline]
fn axis_cell(coordinate: f32, cell_size: f32, resolution: usize) -> usize {
    let cell = (coordinate / cell_size).floor();
    if cell >= 0.0 {
        (cell as usize).min(resolution - 1)
    } else {
        // negative or NaN
        0
    }
}
