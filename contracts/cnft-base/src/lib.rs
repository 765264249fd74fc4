//! A cw721-style NFT smart contract.
//!
//! # Description
//! An instance of this smart contract holds one collection of unique tokens,
//! each identified by a token ID. A token is then globally identified by the
//! contract address together with the token ID.
//!
//! The contract is initialized with no tokens. Tokens can only be minted by
//! the minter set at init, and burnt by whoever may transfer them: the owner,
//! an address the owner approved for that token, or an operator of the owner.
//! Approvals and operator grants can carry an expiry.
//!
//! Tokens sent with `sendNft` are transferred to a contract which is then
//! invoked with a `NftReceiveMsg`, so it can react to the deposit.
//!
//! Next to the cw721 queries the contract answers the read-only CIS-2 views
//! (`balanceOf`, `operatorOf`, `tokenMetadata`, `supports`) so wallets and
//! indexers of the chain can display the collection.
//!
//! Note: The word 'address' refers to either an account address or a
//! contract address.

#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod helper;
mod state;
