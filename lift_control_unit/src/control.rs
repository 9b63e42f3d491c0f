//! Control engine root.
//!
//! Feedforward added to every motion-profile command. Closed-loop gains
//! live on the motor controller itself.

pub mod feedforward;
