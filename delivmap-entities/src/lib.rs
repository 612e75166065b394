#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # delivmap-entities
//!
//! Reusable, agnostic domain entities for delivmap.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod address;
pub mod color;
pub mod geo;
pub mod order;
