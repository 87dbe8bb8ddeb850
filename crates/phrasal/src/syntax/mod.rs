//! # Source Locations
//!
//! Line/column cursors and the spans built from them. Every phrase, parsed
//! part and diagnostic carries a [`Position`].

pub mod position;

pub use position::*;
