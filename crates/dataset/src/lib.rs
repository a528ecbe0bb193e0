//! # Game Finder Dataset Crate
//!
//! The only place in the workspace that touches files. It reads the game table
//! from a header-row CSV file once per session and writes filtered tables back
//! out in the same schema.
//!
//! Loading is strict: a missing required column or a single malformed row
//! rejects the whole file, so the rest of the system only ever sees validated
//! records. Whether the optional betting columns exist is decided here, once.

pub mod error;
pub mod export;
pub mod loader;
pub mod schema;

pub use error::DatasetError;
pub use export::{export_games, write_games};
pub use loader::{load_games, read_games};
