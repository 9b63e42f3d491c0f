//! Safety module root.
//!
//! Operator advisories for moves that cross another mechanism's envelope.

pub mod interference;
