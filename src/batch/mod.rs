mod runner;

pub use runner::{BatchJob, BatchRunner};
