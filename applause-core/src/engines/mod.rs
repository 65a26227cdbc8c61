// applause-core/src/engines/mod.rs
//! This module contains the substitution engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `SubstitutionEngine` trait.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod regex_engine;
