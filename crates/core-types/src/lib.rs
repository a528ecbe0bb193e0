//! # Game Finder Core Types
//!
//! The shared vocabulary of the workspace: game records, the table that holds
//! them, the query a user builds against it, and the small enums in between.
//! This crate has no knowledge of files, configuration or rendering.

pub mod criteria;
pub mod enums;
pub mod error;
pub mod record;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use criteria::FilterCriteria;
pub use enums::{FavoriteStatus, GameResult, HomeAway, StreakKind};
pub use error::CoreError;
pub use record::{BettingLine, GameRecord};
pub use table::GameTable;
