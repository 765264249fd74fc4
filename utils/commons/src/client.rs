use concordium_std::*;

use crate::{
    AllNftInfoResponse, ContractReadError, ContractTokenId, OwnerOfParams, OwnerOfResponse,
    SendNftParams, TransferNftParams,
};

/// Calls into a cNFT contract from another contract, e.g. a marketplace
/// holding tokens it was sent.
pub trait HostCnftExt<S>: HasHost<S> {
    fn cnft_transfer_nft(
        &mut self,
        contract: &ContractAddress,
        recipient: Address,
        token_id: ContractTokenId,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        self.invoke_contract(
            contract,
            &TransferNftParams {
                recipient,
                token_id,
            },
            EntrypointName::new_unchecked("transferNft"),
            Amount::zero(),
        )?;

        Ok(())
    }

    fn cnft_send_nft(
        &mut self,
        contract: &ContractAddress,
        params: &SendNftParams,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        self.invoke_contract(
            contract,
            params,
            EntrypointName::new_unchecked("sendNft"),
            Amount::zero(),
        )?;

        Ok(())
    }

    fn cnft_owner_of(
        &self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
    ) -> Result<OwnerOfResponse, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                contract,
                &OwnerOfParams {
                    token_id,
                    include_expired: false,
                },
                EntrypointName::new_unchecked("ownerOf"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        OwnerOfResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }

    fn cnft_all_nft_info(
        &self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
    ) -> Result<AllNftInfoResponse, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                contract,
                &OwnerOfParams {
                    token_id,
                    include_expired: false,
                },
                EntrypointName::new_unchecked("allNftInfo"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        AllNftInfoResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)
    }
}

impl<S, H: HasHost<S>> HostCnftExt<S> for H {}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::test::*;
    use crate::{Approval, Expiration, NftInfoResponse};
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    const NFT: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };
    const USER_1: Address = Address::Account(AccountAddress([16; 32]));
    const USER_2: Address = Address::Account(AccountAddress([17; 32]));

    fn token_0() -> ContractTokenId {
        TokenIdVec(vec![0, 1])
    }

    #[concordium_test]
    fn test_transfer_nft() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transferNft".into()),
            parse_and_check_mock::<TransferNftParams, _>(
                |params| params.recipient == USER_2 && params.token_id == token_0(),
                (),
            ),
        );

        let result = host.cnft_transfer_nft(&NFT, USER_2, token_0());
        claim!(result.is_ok());
    }

    #[concordium_test]
    fn test_owner_of() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("ownerOf".into()),
            parse_and_map_mock::<OwnerOfParams, _, _>(|params| {
                if params.include_expired {
                    return None;
                }
                Some(OwnerOfResponse {
                    owner: USER_1,
                    approvals: vec![Approval {
                        spender: USER_2,
                        expires: Expiration::Never,
                    }],
                })
            }),
        );

        let response = match host.cnft_owner_of(&NFT, token_0()) {
            Ok(response) => response,
            Err(_) => fail!("Unexpected error during 'ownerOf' call"),
        };
        claim_eq!(response.owner, USER_1);
        claim_eq!(response.approvals.len(), 1);
    }

    #[concordium_test]
    fn test_all_nft_info() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("allNftInfo".into()),
            parse_and_ok_mock::<OwnerOfParams, _>(AllNftInfoResponse {
                access: OwnerOfResponse {
                    owner: USER_1,
                    approvals: vec![],
                },
                info: NftInfoResponse {
                    token_uri: Some("ipfs://token".into()),
                    extension: None,
                },
            }),
        );

        let response = match host.cnft_all_nft_info(&NFT, token_0()) {
            Ok(response) => response,
            Err(_) => fail!("Unexpected error during 'allNftInfo' call"),
        };
        claim_eq!(response.access.owner, USER_1);
        claim_eq!(response.info.token_uri, Some(String::from("ipfs://token")));
    }
}
