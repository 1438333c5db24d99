//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types for the trellis
//! structure-chart compiler:
//!
//! - **Chart model**: the semantic entities of a structure chart
//!   ([`chart`] module)
//! - **Geometry**: basic geometric types ([`geometry`] module)
//! - **Draw**: SVG shape, text, and marker definitions ([`draw`] module)

pub mod chart;
pub mod draw;
pub mod geometry;
