//! Configuration: where finboard keeps its files and the user's settings

pub mod paths;
pub mod settings;

pub use paths::FinboardPaths;
pub use settings::Settings;
