//! Viewport metrics and the cell grid laid over them.

/// Viewport in logical (CSS) units plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_density: f64,
}

impl Viewport {
    /// Non-finite or negative sizes collapse to zero; a missing density
    /// falls back to 1 like `window.devicePixelRatio || 1`.
    pub fn new(width: f64, height: f64, pixel_density: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let pixel_density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density
        } else {
            1.0
        };
        Self {
            width: sanitize(width),
            height: sanitize(height),
            pixel_density,
        }
    }

    /// Backing store width in device pixels
    pub fn device_width(&self) -> u32 {
        (self.width * self.pixel_density) as u32
    }

    /// Backing store height in device pixels
    pub fn device_height(&self) -> u32 {
        (self.height * self.pixel_density) as u32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Grid coordinate of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GridDims {
    pub cols: u32,
    pub rows: u32,
}

impl GridDims {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// `cols = floor(width / cell)`, `rows = floor(height / cell)`
    pub fn for_viewport(viewport: &Viewport, cell_size: u32) -> Self {
        if cell_size == 0 {
            return Self::default();
        }
        let cell = cell_size as f64;
        Self {
            cols: (viewport.width / cell).floor() as u32,
            rows: (viewport.height / cell).floor() as u32,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// True when no spark can be placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    /// Row-major index; only meaningful when `contains(cell)`.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.cols as usize + cell.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_for_desktop_viewport() {
        let grid = GridDims::for_viewport(&Viewport::new(1024.0, 768.0, 2.0), 16);
        assert_eq!(grid, GridDims::new(64, 48));
        assert_eq!(grid.cell_count(), 64 * 48);
    }

    #[test]
    fn partial_cells_are_floored() {
        let grid = GridDims::for_viewport(&Viewport::new(375.0, 667.0, 3.0), 16);
        assert_eq!(grid, GridDims::new(23, 41));
    }

    #[test]
    fn degenerate_viewport_has_no_cells() {
        let grid = GridDims::for_viewport(&Viewport::new(10.0, 900.0, 1.0), 16);
        assert!(grid.is_empty());
        let vp = Viewport::new(f64::NAN, -4.0, 0.0);
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.height, 0.0);
        assert_eq!(vp.pixel_density, 1.0);
    }
}
