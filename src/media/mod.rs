pub mod classifier;
pub mod naming;
pub mod probe;
pub mod scanner;
