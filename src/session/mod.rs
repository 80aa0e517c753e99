//! Prediction-to-comparison handoff
//!
//! `optimize` saves a [`SessionRecord`]; `compare` loads it back through
//! [`SessionStore::load_context`], which only succeeds for a record younger
//! than [`SESSION_MAX_AGE_HOURS`].

pub mod context;
pub mod record;
pub mod store;

pub use context::HandoffContext;
pub use record::{SessionRecord, SessionRecordBuilder, SESSION_MAX_AGE_HOURS};
pub use store::{SessionStore, DEFAULT_SESSION_DIR};
