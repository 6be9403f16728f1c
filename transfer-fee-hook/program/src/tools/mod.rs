//! Utility functions

pub mod account;
