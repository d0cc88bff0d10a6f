//! Sequential batch optimization of coverage work items.
//!
//! Content generation lives behind the [`Optimizer`] trait; this module only drives
//! it one unit at a time with a pause between units.

pub mod error;
pub mod optimizer;


pub use error::{BatchError, BatchResult};
pub use optimizer::{
    BatchFailure, BatchOptimizer, BatchReport, CancelFlag, Optimization, Optimizer,
};
