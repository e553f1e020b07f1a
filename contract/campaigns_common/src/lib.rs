#![no_std]

//! Shared engine behind the `Campaigns` and `GaslessCampaigns` contracts.
//!
//! A creator escrows a pool (native asset or a token) that claimants redeem one
//! claim at a time, each claim gated by a signature from the trusted issuer.
//! Around every claim the engine runs the fee regime (gasless, sponsored or
//! fee-required), forwards collected fees to the reward ledger split between
//! platform, creator and referrer, and pays out the per-claim amount.
//!
//! The contract crates only declare entry points; everything they do goes
//! through [`engine`] and [`admin`].

pub mod accounting;
pub mod admin;
pub mod claim_auth;
pub mod engine;
pub mod errors;
pub mod events;
pub mod settlement;
pub mod storage;
pub mod storage_types;
pub mod typed_data;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use errors::CampaignError;
pub use storage_types::*;
