use super::*;

/// Name and symbol of the collection, set once at init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct ContractInfo {
    pub name: String,
    pub symbol: String,
}

/// Contract name and crate version the instance was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct ContractVersion {
    pub contract: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct TokenParams {
    pub token_id: ContractTokenId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct OwnerOfParams {
    pub token_id: ContractTokenId,
    /// Also list approvals that already expired.
    pub include_expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct OwnerOfResponse {
    /// Owner of the token
    pub owner: Address,
    /// If set this address is approved to transfer/send the token as well
    pub approvals: Vec<Approval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct ApprovalParams {
    pub token_id: ContractTokenId,
    pub spender: Address,
    pub include_expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct ApprovalResponse {
    pub approval: Approval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct ApprovalsResponse {
    pub approvals: Vec<Approval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct AllOperatorsParams {
    pub owner: Address,
    pub include_expired: bool,
    pub start_after: Option<Address>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct OperatorsResponse {
    pub operators: Vec<Approval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct NumTokensResponse {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct NftInfoResponse {
    /// Universal resource identifier for this NFT
    pub token_uri: Option<String>,
    /// On-chain metadata
    pub extension: Extension,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct AllNftInfoResponse {
    /// Who can transfer the token
    pub access: OwnerOfResponse,
    /// Data on the token itself
    pub info: NftInfoResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct TokensParams {
    pub owner: Address,
    pub start_after: Option<ContractTokenId>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct AllTokensParams {
    pub start_after: Option<ContractTokenId>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct TokensResponse {
    /// Contains all token ids in storage order, at most `limit` of them.
    pub tokens: Vec<ContractTokenId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct MinterResponse {
    pub minter: Address,
}

/// Resolve a page size from an optional `limit`.
#[inline(always)]
pub fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_page_limit() {
        claim_eq!(page_limit(None), DEFAULT_LIMIT as usize);
        claim_eq!(page_limit(Some(3)), 3);
        claim_eq!(page_limit(Some(u32::MAX)), MAX_LIMIT as usize);
    }
}
