//! Optimization pass handling
//!
//! This module provides:
//! - Case-insensitive pass identifiers and ordered pass lists
//! - The standard LLVM optimization levels
//! - A catalog of typical `-O2` / `-O3` pass sequences
//! - Set comparison of a predicted sequence against reference sequences

pub mod catalog;
pub mod comparator;
pub mod identifier;
pub mod level;

pub use comparator::{PassClassification, PassSetComparator, ReferenceBreakdown};
pub use identifier::{PassIdentifier, PassList};
pub use level::OptLevel;
