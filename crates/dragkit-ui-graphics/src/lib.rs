//! Pure math/data for dragkit
//!
//! Geometry primitives and pixel units shared by the tracker, the directive
//! and the platform hosts.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{BoundedRect, Point, Size};
    pub use crate::unit::Px;
}
