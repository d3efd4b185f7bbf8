//! Testing utilities and an in-memory host for dragkit

pub mod host;
pub mod robot;

pub use host::{FakeElement, FakeHost, FakeTarget, StyleWrite};
pub use robot::GestureRobot;

pub mod prelude {
    pub use crate::host::{FakeElement, FakeHost, FakeTarget, StyleWrite};
    pub use crate::robot::GestureRobot;
}
