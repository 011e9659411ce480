//! Core traits module
//!
//! Contains the abstract interfaces the router is written against

pub mod error_mapper;
pub mod provider;

pub use error_mapper::*;
pub use provider::*;
