pub mod invocation;
pub mod runner;
