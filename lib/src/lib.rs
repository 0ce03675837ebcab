mod data;
mod engine;
mod knowledge;
mod puzzle;
mod results;
mod simulation;

pub use data::*;
pub use engine::*;
pub use knowledge::*;
pub use puzzle::*;
pub use results::*;
pub use simulation::*;
