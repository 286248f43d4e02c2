//! Cabinet Sim - Prime-Minister Political Strategy Simulation

pub mod core;
pub mod nation;
pub mod persistence;
