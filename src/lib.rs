//! # affine2d
//!
//! An interactive demonstration of 2D affine transformations.
//!
//! A square is drawn in the middle of the window; holding an arrow key
//! overlays a transformed copy, each transformation in its own color:
//!
//! | Key   | Transformation              | Color  |
//! |-------|-----------------------------|--------|
//! | Right | translate by (+0.6, 0, 0)   | blue   |
//! | Down  | rotate 45° about z          | red    |
//! | Left  | scale by (1.5, 1.5, 1.0)    | green  |
//! | Up    | shear (0.5, 0.2)            | purple |
//!
//! Escape quits. Every frame is computed from current input and constants
//! alone; transformations never accumulate.
//!
//! ```no_run
//! use affine2d::AppConfig;
//!
//! fn main() {
//!     affine2d::logging::init();
//!     let config = AppConfig::new().title("Linear Transformations").size(950, 950);
//!     if let Err(e) = affine2d::run(config) {
//!         log::error!("{e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod app;
mod color;
mod gpu;
mod input;
pub mod logging;
mod mesh;
mod square_pass;
mod transform;

pub use app::{AppConfig, AppError, run};
pub use color::Color;
pub use gpu::{GpuContext, GpuError};
pub use input::Input;
pub use mesh::{Mesh, Vertex, square_geometry};
pub use square_pass::{DrawCall, MAX_DRAWS, SquarePass};
pub use transform::{Transformation, shear};

// Re-export the math types and key codes used in the public API.
pub use glam::{Mat4, Vec3};
pub use winit::keyboard::KeyCode;
