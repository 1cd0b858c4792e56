pub mod food;
pub mod pond;
pub mod spawner;
