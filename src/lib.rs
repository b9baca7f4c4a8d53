#![cfg_attr(not(test), no_std)]

//! Ultrasonic two-channel gesture sensing.
//!
//! [`sensing`] holds the ranging and classification core. [`protocol`] holds
//! the host line format.

pub mod protocol;
pub mod sensing;
