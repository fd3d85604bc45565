//! # Base types for neuroboard
//!
//! This is an auxiliary crate for `neuroboard`, which contains the plain value types of the board:
//! squares, colors, pieces, cells and sets of squares. It was split from the main crate, so these
//! types can be used without the rules.
//!
//! Normally you don't want to use this crate directly. Use `neuroboard` instead.

pub mod geometry;
pub mod squares;
pub mod types;
