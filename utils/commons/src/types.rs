use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Token IDs are arbitrary byte strings, the way collections name them.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type. Every token is unique, so balances are 0 or 1.
pub type ContractTokenAmount = TokenAmountU8;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

/// Optional on-chain metadata stored next to each token.
pub type Extension = Option<Metadata>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

/// Parameter type for the CIS-2 function `tokenMetadata`.
pub type ContractTokenMetadataQueryParams = TokenMetadataQueryParams<ContractTokenId>;
