//! Crate defining a transfer hook program that collects a fee in a secondary
//! token and counts transfers.
//!
//! The token program calls into this program on every transfer of a mint
//! whose transfer-hook extension points here. The hook checks that it was
//! really called by the token program mid-transfer, re-resolves the extra
//! accounts from the mint's registry, pulls the fee from the sender's
//! secondary token account through a program-derived delegate, and bumps the
//! mint's counter.

#![allow(clippy::arithmetic_side_effects)]
#![deny(missing_docs)]
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod counter;
pub mod error;
pub mod fee;
pub mod instruction;
pub mod offchain;
pub mod processor;
pub mod registry;
pub mod resolver;
pub mod tools;
pub mod vault;

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;

// Export current sdk types for downstream users building with a different sdk
// version
pub use solana_program;
pub use spl_transfer_hook_interface::{
    get_extra_account_metas_address as get_registry_address,
    get_extra_account_metas_address_and_bump_seed as get_registry_address_and_bump_seed,
};

solana_program::declare_id!("D1m99p3Z7UoURmsBN6uER14LWtWu1edCDJ5gDTMoQ9W8");

/// Place the mint id that you want to target with your transfer hook program.
/// Any other mint will fail to create a registry or execute, so one deployment
/// of the program can only ever collect fees for that mint.
#[cfg(feature = "forbid-additional-mints")]
pub mod mint {
    solana_program::declare_id!("Mint111111111111111111111111111111111111111");
}
