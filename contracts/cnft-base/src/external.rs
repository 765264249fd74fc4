use concordium_std::*;

/// Parameter of the contract `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Name of the collection.
    pub name: String,
    /// Ticker symbol of the collection.
    pub symbol: String,
    /// The only address allowed to mint new tokens.
    pub minter: Address,
    /// Tokens minted without a `token_uri` get their metadata url from this
    /// base url, followed by the hex encoded token ID.
    pub metadata_base_url: String,
}
