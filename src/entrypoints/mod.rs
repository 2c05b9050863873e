// Shared modules
mod metadata;
mod run;

// Entry points
pub mod lib;
pub mod main;
