pub mod error;
pub mod models;
pub mod observer;
pub mod playout;
pub mod presets;
pub mod simulator;
pub mod strategy;
