//! Full-frame redraw and key dispatch

use crate::config::{Config, Palette};
use crate::display::PixelBuffer;
use crate::error::AppError;
use crate::grid::Grid;
use crate::mesh;
use crate::view::ViewState;
use std::path::Path;
use tracing::{debug, info};

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

/// What a key press did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State changed and the frame was redrawn once
    Redrawn,
    /// Command hit a bound; nothing changed, nothing redrawn
    Unchanged,
    /// Caller should close the window
    Quit,
}

/// Clear `buf` and rasterize the whole mesh.
///
/// Vertices outside the buffer get no marker and no edges. An edge whose far end is
/// outside the buffer is skipped entirely rather than clipped.
pub fn redraw(grid: &Grid, view: &ViewState, palette: &Palette, buf: &mut PixelBuffer) {
    buf.clear(palette.background);

    let vertices = mesh::build(grid, view);
    let mut edges = 0usize;
    for v in &vertices {
        if !buf.contains(v.position) {
            continue;
        }
        buf.draw_circle(v.position, palette.marker_radius, palette.marker);
        for target in [v.east, v.south].into_iter().flatten() {
            if buf.contains(target) {
                buf.draw_line(v.position, target, palette.edge);
                edges += 1;
            }
        }
    }
    debug!(
        vertices = vertices.len(),
        edges,
        height_scale = view.height_scale(),
        "redraw"
    );
}

/// Read the map and fit a view for the configured window
pub fn initialize(path: impl AsRef<Path>, config: &Config) -> Result<(Grid, ViewState), AppError> {
    config.validate()?;
    let grid = Grid::load(path)?;
    let view = ViewState::fit(
        grid.width(),
        grid.height(),
        config.window.width,
        config.window.height,
        &config.view,
    );
    info!(
        offset_x = view.offset_x,
        offset_y = view.offset_y,
        height_scale = view.height_scale(),
        "view initialized"
    );
    Ok((grid, view))
}

/// Everything one viewer window needs: the map, the view, and the current frame
pub struct Session {
    grid: Grid,
    view: ViewState,
    palette: Palette,
    frame: PixelBuffer,
    redraws: u64,
}

impl Session {
    /// Create the session and render the first frame
    pub fn new(grid: Grid, view: ViewState, palette: Palette, width: u32, height: u32) -> Self {
        let mut session = Self {
            grid,
            view,
            palette,
            frame: PixelBuffer::with_size(width, height),
            redraws: 0,
        };
        session.redraw();
        session
    }

    pub fn redraw(&mut self) {
        redraw(&self.grid, &self.view, &self.palette, &mut self.frame);
        self.redraws += 1;
    }

    pub fn on_key(&mut self, key: Key) -> Dispatch {
        let changed = match key {
            Key::Up => self.view.increase_height_scale(),
            Key::Down => self.view.decrease_height_scale(),
            Key::Left => self.view.rotate_counter_clockwise(),
            Key::Right => self.view.rotate_clockwise(),
            Key::Escape => return Dispatch::Quit,
        };
        if changed {
            self.redraw();
            Dispatch::Redrawn
        } else {
            debug!(?key, "command at bound, ignored");
            Dispatch::Unchanged
        }
    }

    /// The most recently rendered frame
    pub fn current_frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Number of redraws since the session was created, including the first frame
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}
