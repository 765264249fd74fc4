//! Event tags 255..=251 are taken by the CIS-2 standard events, custom
//! events count down from there.

/// Tag for the Custom Approve event.
pub const APPROVE_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Revoke event.
pub const REVOKE_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Approve All event.
pub const APPROVE_ALL_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Revoke All event.
pub const REVOKE_ALL_TAG: u8 = u8::MAX - 8;

/// Tag for the Custom Update Minter event.
pub const UPDATE_MINTER_TAG: u8 = u8::MAX - 9;

/// Page size of list queries when no limit is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound on the page size of list queries.
pub const MAX_LIMIT: u32 = 100;
