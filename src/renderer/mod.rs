//! Canvas rendering module
//!
//! Everything is drawn with flat fills onto a [`Surface`]; there are no
//! image assets.

pub mod scene;
pub mod shapes;
pub mod surface;

pub use scene::draw_frame;
pub use surface::{Color, DrawCall, RecordingSurface, Surface};
