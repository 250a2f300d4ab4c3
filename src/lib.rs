// Library interface for testing

// Declare all modules
pub mod config;
pub mod db;
pub mod distance;
pub mod error;
pub mod queries;
pub mod records;
pub mod schema;
pub mod serve;
pub mod sync;

// Re-export the distance calculator for convenience
pub use distance::distance_yards;
