pub mod config;
pub mod routes;
pub mod state;

// Re-export commonly used items
pub use state::*;
