use super::*;

/// A single attribute of a token, as shown by marketplaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SchemaType)]
pub struct Trait {
    pub display_type: Option<String>,
    pub trait_type: String,
    pub value: String,
}

/// On-chain metadata following the ERC721 metadata JSON layout.
/// Every field is optional so that collections only pay for what they store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SchemaType)]
pub struct Metadata {
    /// Link to the token image
    pub image: Option<String>,
    /// Raw SVG image data, when the image is stored inline
    pub image_data: Option<String>,
    pub external_url: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub attributes: Option<Vec<Trait>>,
    pub background_color: Option<String>,
    pub animation_url: Option<String>,
    pub youtube_url: Option<String>,
}
