mod constraints;
mod driver;
mod objective;
mod prep;
mod reconstruct;
mod vars;

pub use driver::MilpSolver;
