use super::*;

/// Minting Data.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct MintParams {
    /// Unique ID of the NFT
    pub token_id: ContractTokenId,
    /// The owner of the newly minted NFT
    pub owner: Address,
    /// Universal resource identifier for this NFT.
    /// Should point to a JSON file that conforms to the ERC721
    /// Metadata JSON Schema.
    pub token_uri: Option<String>,
    /// On-chain metadata
    pub extension: Extension,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct ApproveParams {
    pub spender: Address,
    pub token_id: ContractTokenId,
    /// Defaults to `Expiration::Never` when left out.
    pub expires: Option<Expiration>,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct RevokeParams {
    pub spender: Address,
    pub token_id: ContractTokenId,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct ApproveAllParams {
    pub operator: Address,
    pub expires: Option<Expiration>,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct RevokeAllParams {
    pub operator: Address,
}

#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TransferNftParams {
    pub recipient: Address,
    pub token_id: ContractTokenId,
}

/// Transfer a token to a contract and trigger an action on the receiving
/// contract.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct SendNftParams {
    /// Contract receiving the token.
    pub contract: ContractAddress,
    /// Entrypoint on `contract` that gets invoked with a `NftReceiveMsg`.
    pub entrypoint: OwnedEntrypointName,
    pub token_id: ContractTokenId,
    /// Forwarded as `NftReceiveMsg::msg`.
    pub msg: Vec<u8>,
}
