use super::*;

/// Parameter the receiving contract gets when a token is sent to it with
/// `sendNft`. The receiving entrypoint must be able to parse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct NftReceiveMsg {
    /// Address that sent the token, not necessarily its previous owner.
    pub sender: Address,
    /// Token that now belongs to the receiving contract.
    pub token_id: ContractTokenId,
    /// Free-form payload forwarded from the `sendNft` call.
    pub msg: Vec<u8>,
}
