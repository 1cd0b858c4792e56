pub mod driver;
pub mod input;
pub mod physics;
pub mod snapshot;
pub mod tick;
