//! Shared types of the cNFT standard: errors, approvals, expirations,
//! on-chain metadata and the message a contract receives on `sendNft`.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{client::*, constants::*, errors::*, expiration::*, structs::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

pub mod test;

mod client;
mod constants;
mod errors;
mod expiration;
mod structs;
mod types;
