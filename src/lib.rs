// Core infrastructure modules
pub mod core;

// Shell modules
pub mod config;
pub mod repl;
pub mod results_grid;
pub mod session;
pub mod statements;

#[cfg(test)]
mod test_utils;
