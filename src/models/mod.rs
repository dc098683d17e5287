//! Data models for the Contact Manager application.
//!
//! Field names are serialized in camelCase to match the frontend contract.

mod contact;
mod page;

pub use contact::*;
pub use page::*;
