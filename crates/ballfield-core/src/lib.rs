pub mod config;
pub mod constraints;
pub mod control;
pub mod forces;
pub mod integrator;
pub mod math;
pub mod output;
pub mod particle;
pub mod phase;
pub mod solver;
