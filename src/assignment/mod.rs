//! Greedy one-to-one assignment of queries to chunks.
//!
//! The engine walks candidate pairs in descending score order and commits to each pair
//! whose query and chunk are both still free. This is not an optimal bipartite matching:
//! an early commitment is never revisited.
//!
//! # Tie-break
//!
//! Equal scores keep enumeration order (query-major, then chunk). The lowest query
//! index wins, then the lowest chunk index.

pub mod engine;
pub mod error;
pub mod intent;
pub mod matrix;


pub use engine::{Assignment, AssignmentEngine, Candidate};
pub use error::{AssignmentError, AssignmentResult};
pub use intent::{IntentType, Query};
pub use matrix::ScoreMatrix;
