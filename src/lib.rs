//! Isometric wireframe viewer for integer heightmaps.
//!
//! A map file is parsed into a [`Grid`], every cell is projected into screen space with
//! the current [`ViewState`], and the resulting mesh is rasterized into a
//! [`PixelBuffer`]. The SDL2 window that presents the buffer lives behind the `window`
//! feature.

pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mesh;
pub mod projection;
pub mod scene;
pub mod view;

pub use config::{Config, Palette};
pub use display::{Color, PixelBuffer};
pub use error::AppError;
pub use geometry::ScreenPoint;
pub use grid::{Grid, GridError};
pub use mesh::MeshVertex;
pub use scene::{Dispatch, Key, Session};
pub use view::ViewState;
