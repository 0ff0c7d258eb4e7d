//! Configuration of the simulation

pub mod settings;

pub use settings::Settings;
