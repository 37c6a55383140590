//! Projected mesh: every grid cell with its east and south connections

use crate::geometry::ScreenPoint;
use crate::grid::Grid;
use crate::projection::project;
use crate::view::ViewState;

/// One projected grid cell and the positions of the neighbors it connects to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshVertex {
    pub x: usize,
    pub y: usize,
    pub elevation: i32,
    pub position: ScreenPoint,
    /// Cell `(x + 1, y)`, absent on the last column
    pub east: Option<ScreenPoint>,
    /// Cell `(x, y + 1)`, absent on the last row
    pub south: Option<ScreenPoint>,
}

/// Project the whole grid, one vertex per cell in row-major order
pub fn build(grid: &Grid, view: &ViewState) -> Vec<MeshVertex> {
    let (width, height) = (grid.width(), grid.height());
    let mut vertices = Vec::with_capacity(width * height);

    for (y, row) in grid.rows().enumerate() {
        let south_row = grid.row(y + 1);
        for (x, &elevation) in row.iter().enumerate() {
            let east = row.get(x + 1).map(|&z| project(x + 1, y, z, view));
            let south = south_row.map(|r| project(x, y + 1, r[x], view));
            vertices.push(MeshVertex {
                x,
                y,
                elevation,
                position: project(x, y, elevation, view),
                east,
                south,
            });
        }
    }

    vertices
}
