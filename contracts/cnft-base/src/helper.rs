use commons::{ContractTokenAmount, ContractTokenId};
use concordium_cis2::{Cis2Event, MetadataUrl, TokenMetadataEvent};
use concordium_std::*;

use crate::state::TokenInfo;

/// Build a string from the base url appended with the token ID encoded as
/// hex.
pub fn build_token_metadata_url(base_url: &str, token_id: &ContractTokenId) -> String {
    let mut token_metadata_url = String::from(base_url);
    push_token_id(&mut token_metadata_url, token_id);
    token_metadata_url.push('/');
    token_metadata_url
}

pub fn push_token_id(string: &mut String, token_id: &ContractTokenId) {
    for byte in &token_id.0 {
        string.push(bits_to_hex_char(byte >> 4));
        string.push(bits_to_hex_char(byte & 0xF));
    }
}

pub fn bits_to_hex_char(bits: u8) -> char {
    match bits & 0xF {
        0x0..=0x9 => (bits + b'0') as char,
        0xA..=0xF => (bits - 10 + b'A') as char,
        _ => unreachable!(),
    }
}

/// Metadata location of a token. The `token_uri` given at mint wins over
/// the collection wide base url.
pub fn token_metadata_url(
    base_url: &str,
    token_id: &ContractTokenId,
    token: &TokenInfo,
) -> MetadataUrl {
    let url = match &token.token_uri {
        Some(uri) => uri.clone(),
        None => build_token_metadata_url(base_url, token_id),
    };
    MetadataUrl { url, hash: None }
}

pub fn token_metadata_event(
    base_url: &str,
    token_id: ContractTokenId,
    token: &TokenInfo,
) -> Cis2Event<ContractTokenId, ContractTokenAmount> {
    let metadata_url = token_metadata_url(base_url, &token_id, token);
    Cis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url,
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;

    const OWNER: Address = Address::Account(AccountAddress([0; 32]));
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    fn token(token_uri: Option<String>) -> TokenInfo {
        TokenInfo {
            owner: OWNER,
            approvals: Vec::new(),
            token_uri,
            extension: None,
        }
    }

    #[concordium_test]
    fn token_id_formatting() {
        for x in 0x00u8..0xFF {
            let mut counter = x;
            let token_bytes: Vec<u8> = core::iter::repeat_with(|| {
                let res = counter;
                counter = counter.wrapping_add(0x55);
                res
            })
            .take(x as usize % 10 + 1)
            .collect();

            let mut expected = String::new();
            for byte in &token_bytes {
                expected.push(HEX_DIGITS[(byte >> 4) as usize] as char);
                expected.push(HEX_DIGITS[(byte & 0xF) as usize] as char);
            }
            let token_id: ContractTokenId = TokenIdVec(token_bytes);

            let mut token_id_string = String::new();
            push_token_id(&mut token_id_string, &token_id);
            claim_eq!(token_id_string, expected);
        }
    }

    #[concordium_test]
    fn test_metadata_url_from_base() {
        let url = token_metadata_url(
            "https://cnft.example/metadata/",
            &TokenIdVec(vec![0x0A, 0xFF]),
            &token(None),
        );
        claim_eq!(url.url, "https://cnft.example/metadata/0AFF/");
        claim_eq!(url.hash, None);
    }

    #[concordium_test]
    fn test_metadata_url_from_token_uri() {
        let url = token_metadata_url(
            "https://cnft.example/metadata/",
            &TokenIdVec(vec![1]),
            &token(Some("ipfs://enterprise.json".into())),
        );
        claim_eq!(url.url, "ipfs://enterprise.json");
    }
}
