use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::{events::CustomEvent, external::InitParams, helper::*, state::State};

/// Contract name stored in the version info of every instance.
const CONTRACT_NAME: &str = "crates.io:cnft-base";

const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// List of supported standards by this contract address.
const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];

/// Initialize contract instance with no tokens.
#[init(contract = "CnftBase", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    let version = ContractVersion {
        contract: CONTRACT_NAME.into(),
        version: CONTRACT_VERSION.into(),
    };

    Ok(State::new(state_builder, params, version))
}

/// Mint a new token with a given address as the owner.
/// Logs a `Mint` and a `TokenMetadata` event. The metadata url is the
/// `token_uri` of the token if given, otherwise the token ID encoded in hex
/// appended on the metadata base url.
///
/// It rejects if:
/// - The sender is not the minter.
/// - Fails to parse parameter.
/// - The token ID already exists.
/// - Fails to log Mint or TokenMetadata event.
#[receive(
    contract = "CnftBase",
    name = "mint",
    parameter = "MintParams",
    mutable,
    enable_logger
)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintParams = ctx.parameter_cursor().get()?;

    let (state, state_builder) = host.state_and_builder();
    ensure!(ctx.sender() == state.minter, ContractError::Unauthorized);

    let token_id = params.token_id.clone();
    let token = state.mint(params, state_builder)?;

    logger.log(&Cis2Event::Mint(MintEvent {
        token_id: token_id.clone(),
        amount: ContractTokenAmount::from(1),
        owner: token.owner,
    }))?;

    logger.log(&token_metadata_event(
        &state.metadata_base_url,
        token_id,
        &token,
    ))?;

    Ok(())
}

/// Allow `spender` to transfer or send a single token of the sender.
/// Logs an `Approve` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is neither the owner nor an operator of the owner.
/// - The expiry already passed.
#[receive(
    contract = "CnftBase",
    name = "approve",
    parameter = "ApproveParams",
    mutable,
    enable_logger
)]
fn approve<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ApproveParams = ctx.parameter_cursor().get()?;
    let slot_time = ctx.metadata().slot_time();

    let owner = host
        .state_mut()
        .approve(&ctx.sender(), &params, slot_time)?;

    logger.log(&CustomEvent::Approve {
        owner,
        spender: params.spender,
        token_id: params.token_id,
        expires: params.expires.unwrap_or_default(),
    })?;

    Ok(())
}

/// Remove the approval of `spender` on a single token. Logs a `Revoke`
/// event, even if there was no approval to remove.
#[receive(
    contract = "CnftBase",
    name = "revoke",
    parameter = "RevokeParams",
    mutable,
    enable_logger
)]
fn revoke<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: RevokeParams = ctx.parameter_cursor().get()?;
    let slot_time = ctx.metadata().slot_time();

    let owner = host
        .state_mut()
        .revoke(&ctx.sender(), &params, slot_time)?;

    logger.log(&CustomEvent::Revoke {
        owner,
        spender: params.spender,
        token_id: params.token_id,
    })?;

    Ok(())
}

/// Allow `operator` to move every token of the sender, including tokens the
/// sender receives later. Logs an `ApproveAll` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The expiry already passed.
#[receive(
    contract = "CnftBase",
    name = "approveAll",
    parameter = "ApproveAllParams",
    mutable,
    enable_logger
)]
fn approve_all<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ApproveAllParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    let expires = params.expires.unwrap_or_default();

    let (state, state_builder) = host.state_and_builder();
    state.add_operator(
        &sender,
        &params.operator,
        expires,
        ctx.metadata().slot_time(),
        state_builder,
    )?;

    logger.log(&CustomEvent::ApproveAll {
        owner: sender,
        operator: params.operator,
        expires,
    })?;

    Ok(())
}

/// Remove `operator` from the operators of the sender.
/// Succeeds even if it was no operator. Logs a `RevokeAll` event.
#[receive(
    contract = "CnftBase",
    name = "revokeAll",
    parameter = "RevokeAllParams",
    mutable,
    enable_logger
)]
fn revoke_all<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: RevokeAllParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    host.state_mut().remove_operator(&sender, &params.operator);

    logger.log(&CustomEvent::RevokeAll {
        owner: sender,
        operator: params.operator,
    })?;

    Ok(())
}

/// Transfer a token to `recipient`. All approvals of the token are dropped.
/// Logs a `Transfer` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is not the owner, an approved spender of the token, or an
///   operator of the owner.
/// - Fails to log event.
#[receive(
    contract = "CnftBase",
    name = "transferNft",
    parameter = "TransferNftParams",
    mutable,
    enable_logger
)]
fn transfer_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: TransferNftParams = ctx.parameter_cursor().get()?;
    let slot_time = ctx.metadata().slot_time();

    let (state, state_builder) = host.state_and_builder();
    let from = state.transfer(
        &ctx.sender(),
        &params.token_id,
        params.recipient,
        slot_time,
        state_builder,
    )?;

    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.token_id,
        amount: ContractTokenAmount::from(1),
        from,
        to: params.recipient,
    }))?;

    Ok(())
}

/// Transfer a token to a contract and invoke `entrypoint` on it with a
/// `NftReceiveMsg`. Logs a `Transfer` event.
///
/// It rejects if:
/// - Any of the `transferNft` conditions fail.
/// - The receiving contract rejects or cannot be invoked.
#[receive(
    contract = "CnftBase",
    name = "sendNft",
    parameter = "SendNftParams",
    mutable,
    enable_logger
)]
fn send_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: SendNftParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    let recipient = Address::Contract(params.contract);

    let (state, state_builder) = host.state_and_builder();
    let from = state.transfer(
        &sender,
        &params.token_id,
        recipient,
        ctx.metadata().slot_time(),
        state_builder,
    )?;

    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.token_id.clone(),
        amount: ContractTokenAmount::from(1),
        from,
        to: recipient,
    }))?;

    let msg = NftReceiveMsg {
        sender,
        token_id: params.token_id,
        msg: params.msg,
    };
    host.invoke_contract(
        &params.contract,
        &msg,
        params.entrypoint.as_entrypoint_name(),
        Amount::zero(),
    )?;

    Ok(())
}

/// Destroy a token. Logs a `Burn` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender could not transfer the token.
#[receive(
    contract = "CnftBase",
    name = "burn",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn burn<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    let slot_time = ctx.metadata().slot_time();

    let owner = host
        .state_mut()
        .burn(&ctx.sender(), &token_id, slot_time)?;

    logger.log(&Cis2Event::Burn(BurnEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        owner,
    }))?;

    Ok(())
}

/// Hand the minting rights over to another address.
/// Only the current minter can call this. Logs an `UpdateMinter` event.
#[receive(
    contract = "CnftBase",
    name = "updateMinter",
    parameter = "Address",
    mutable,
    enable_logger
)]
fn update_minter<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let new = Address::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();
    let previous = state.minter;

    ensure!(ctx.sender() == previous, ContractError::Unauthorized);
    state.minter = new;

    logger.log(&CustomEvent::UpdateMinter { previous, new })?;

    Ok(())
}

/// Owner of a token together with its approvals.
#[receive(
    contract = "CnftBase",
    name = "ownerOf",
    parameter = "OwnerOfParams",
    return_value = "OwnerOfResponse"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OwnerOfResponse> {
    let params: OwnerOfParams = ctx.parameter_cursor().get()?;
    host.state().owner_of(
        &params.token_id,
        params.include_expired,
        ctx.metadata().slot_time(),
    )
}

/// Approval of `spender` on a token. The owner always counts as approved.
///
/// It rejects with `NotFound` if there is no such approval, or if it
/// expired and `include_expired` is not set.
#[receive(
    contract = "CnftBase",
    name = "approval",
    parameter = "ApprovalParams",
    return_value = "ApprovalResponse"
)]
fn approval<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ApprovalResponse> {
    let params: ApprovalParams = ctx.parameter_cursor().get()?;
    let state = host.state();
    let token = state.token(&params.token_id)?;

    if token.owner == params.spender {
        return Ok(ApprovalResponse {
            approval: Approval {
                spender: params.spender,
                expires: Expiration::Never,
            },
        });
    }

    let approval = state
        .approvals(&token, params.include_expired, ctx.metadata().slot_time())
        .into_iter()
        .find(|approval| approval.spender == params.spender)
        .ok_or(CustomContractError::NotFound)?;

    Ok(ApprovalResponse { approval })
}

/// All approvals of a token.
#[receive(
    contract = "CnftBase",
    name = "approvals",
    parameter = "OwnerOfParams",
    return_value = "ApprovalsResponse"
)]
fn approvals<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ApprovalsResponse> {
    let params: OwnerOfParams = ctx.parameter_cursor().get()?;
    let state = host.state();
    let token = state.token(&params.token_id)?;

    Ok(ApprovalsResponse {
        approvals: state.approvals(&token, params.include_expired, ctx.metadata().slot_time()),
    })
}

/// A page of the operators of `owner`.
#[receive(
    contract = "CnftBase",
    name = "allOperators",
    parameter = "AllOperatorsParams",
    return_value = "OperatorsResponse"
)]
fn all_operators<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorsResponse> {
    let params: AllOperatorsParams = ctx.parameter_cursor().get()?;
    let operators = host
        .state()
        .operators_of(&params, ctx.metadata().slot_time());

    Ok(OperatorsResponse { operators })
}

#[receive(
    contract = "CnftBase",
    name = "numTokens",
    return_value = "NumTokensResponse"
)]
fn num_tokens<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<NumTokensResponse> {
    Ok(NumTokensResponse {
        count: host.state().token_count,
    })
}

#[receive(
    contract = "CnftBase",
    name = "contractInfo",
    return_value = "ContractInfo"
)]
fn contract_info<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractInfo> {
    Ok(host.state().contract_info.clone())
}

#[receive(
    contract = "CnftBase",
    name = "contractVersion",
    return_value = "ContractVersion"
)]
fn contract_version<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractVersion> {
    Ok(host.state().version.clone())
}

#[receive(contract = "CnftBase", name = "minter", return_value = "MinterResponse")]
fn minter<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<MinterResponse> {
    Ok(MinterResponse {
        minter: host.state().minter,
    })
}

/// Metadata stored with a token at mint.
#[receive(
    contract = "CnftBase",
    name = "nftInfo",
    parameter = "TokenParams",
    return_value = "NftInfoResponse"
)]
fn nft_info<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<NftInfoResponse> {
    let params: TokenParams = ctx.parameter_cursor().get()?;
    let token = host.state().token(&params.token_id)?;

    Ok(NftInfoResponse {
        token_uri: token.token_uri,
        extension: token.extension,
    })
}

/// `ownerOf` and `nftInfo` in one call.
#[receive(
    contract = "CnftBase",
    name = "allNftInfo",
    parameter = "OwnerOfParams",
    return_value = "AllNftInfoResponse"
)]
fn all_nft_info<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<AllNftInfoResponse> {
    let params: OwnerOfParams = ctx.parameter_cursor().get()?;
    let state = host.state();
    let token = state.token(&params.token_id)?;

    Ok(AllNftInfoResponse {
        access: OwnerOfResponse {
            owner: token.owner,
            approvals: state.approvals(&token, params.include_expired, ctx.metadata().slot_time()),
        },
        info: NftInfoResponse {
            token_uri: token.token_uri,
            extension: token.extension,
        },
    })
}

/// A page of the tokens held by `owner`.
#[receive(
    contract = "CnftBase",
    name = "tokens",
    parameter = "TokensParams",
    return_value = "TokensResponse"
)]
fn tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokensResponse> {
    let params: TokensParams = ctx.parameter_cursor().get()?;
    let tokens = host
        .state()
        .tokens_of(&params.owner, params.start_after.as_ref(), params.limit);

    Ok(TokensResponse { tokens })
}

/// A page of all tokens in the collection.
#[receive(
    contract = "CnftBase",
    name = "allTokens",
    parameter = "AllTokensParams",
    return_value = "TokensResponse"
)]
fn all_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokensResponse> {
    let params: AllTokensParams = ctx.parameter_cursor().get()?;
    let tokens = host
        .state()
        .all_tokens(params.start_after.as_ref(), params.limit);

    Ok(TokensResponse { tokens })
}

/// Get the balance of given token IDs and addresses. The balance is 1 for
/// the owner of a token and 0 for anyone else.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "CnftBase",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    let params = ContractBalanceOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();

    for query in params.queries {
        let token = state.token(&query.token_id)?;
        let amount = ContractTokenAmount::from(u8::from(token.owner == query.address));
        response.push(amount);
    }

    Ok(BalanceOfQueryResponse::from(response))
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address. An owner counts as its own
/// operator.
#[receive(
    contract = "CnftBase",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    let params = OperatorOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let slot_time = ctx.metadata().slot_time();
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();

    for query in params.queries {
        let is_operator = query.owner == query.address
            || state.is_operator(&query.owner, &query.address, slot_time);
        response.push(is_operator);
    }

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the metadata URLs of a list of tokens.
///
/// It rejects if any of the queried `token_id` does not exist.
#[receive(
    contract = "CnftBase",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    let params = ContractTokenMetadataQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();

    for token_id in params.queries {
        let token = state.token(&token_id)?;
        response.push(token_metadata_url(
            &state.metadata_base_url,
            &token_id,
            &token,
        ));
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Check which of the queried standards this contract supports.
#[receive(
    contract = "CnftBase",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    let params = SupportsQueryParams::deserial(&mut ctx.parameter_cursor())?;

    let response = params
        .queries
        .iter()
        .map(|std_id| {
            if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
                SupportResult::Support
            } else {
                SupportResult::NoSupport
            }
        })
        .collect::<Vec<_>>();

    Ok(SupportsQueryResponse::from(response))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use test_infrastructure::*;

    const MINTER: Address = Address::Account(AccountAddress([0; 32]));
    const ALICE: Address = Address::Account(AccountAddress([1; 32]));
    const BOB: Address = Address::Account(AccountAddress([2; 32]));
    const CAROL: Address = Address::Account(AccountAddress([3; 32]));
    const MARKET: ContractAddress = ContractAddress {
        index: 11,
        subindex: 0,
    };
    const BASE_URL: &str = "https://cnft.example/metadata/";
    const SLOT_TIME: u64 = 1_000;

    fn token_0() -> ContractTokenId {
        TokenIdVec(vec![0, 1])
    }

    fn token_1() -> ContractTokenId {
        TokenIdVec(vec![42, 84, 168])
    }

    fn init_params() -> InitParams {
        InitParams {
            name: "Magic Power".into(),
            symbol: "MGK".into(),
            minter: MINTER,
            metadata_base_url: BASE_URL.into(),
        }
    }

    fn receive_ctx(sender: Address, parameter: &[u8]) -> TestReceiveContext<'_> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_parameter(parameter);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(SLOT_TIME));
        ctx
    }

    /// Host with `token_0` owned by `ALICE` and `token_1` owned by `BOB`.
    /// `token_1` carries its own `token_uri`.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let version = ContractVersion {
            contract: CONTRACT_NAME.into(),
            version: CONTRACT_VERSION.into(),
        };
        let mut state = State::new(&mut state_builder, init_params(), version);

        state
            .mint(
                MintParams {
                    token_id: token_0(),
                    owner: ALICE,
                    token_uri: None,
                    extension: None,
                },
                &mut state_builder,
            )
            .expect_report("Failed to mint token_0");
        state
            .mint(
                MintParams {
                    token_id: token_1(),
                    owner: BOB,
                    token_uri: Some("ipfs://token_1.json".into()),
                    extension: Some(Metadata {
                        name: Some("Token 1".into()),
                        ..Default::default()
                    }),
                },
                &mut state_builder,
            )
            .expect_report("Failed to mint token_1");

        TestHost::new(state, state_builder)
    }

    fn owner_of_token(host: &TestHost<State<TestStateApi>>, token_id: ContractTokenId) -> Address {
        host.state()
            .token(&token_id)
            .expect_report("Token should exist")
            .owner
    }

    /// Test initialization succeeds and stores the collection info.
    #[concordium_test]
    fn test_init() {
        let parameter_bytes = to_bytes(&init_params());
        let mut ctx = TestInitContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let mut builder = TestStateBuilder::new();

        let state = init(&ctx, &mut builder).expect_report("Contract initialization failed");

        claim_eq!(state.token_count, 0);
        claim_eq!(state.minter, MINTER);
        claim_eq!(state.contract_info.symbol, "MGK");
        claim_eq!(state.version.contract, "crates.io:cnft-base");
        claim_eq!(state.tokens.iter().count(), 0, "No token should be initialized");
    }

    /// Test minting, ensuring the new token is owned by the given address and
    /// the appropriate events are logged.
    #[concordium_test]
    fn test_mint() {
        let token_id = TokenIdVec(vec![7]);
        let parameter_bytes = to_bytes(&MintParams {
            token_id: token_id.clone(),
            owner: CAROL,
            token_uri: None,
            extension: None,
        });
        let ctx = receive_ctx(MINTER, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = mint(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim_eq!(host.state().token_count, 3);
        claim_eq!(owner_of_token(&host, token_id.clone()), CAROL);

        claim_eq!(logger.logs.len(), 2);
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Mint(MintEvent {
                token_id: token_id.clone(),
                amount: ContractTokenAmount::from(1),
                owner: CAROL,
            }))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(
                TokenMetadataEvent {
                    token_id,
                    metadata_url: MetadataUrl {
                        url: "https://cnft.example/metadata/07/".into(),
                        hash: None,
                    },
                }
            ))
        );
    }

    #[concordium_test]
    fn test_mint_not_minter() {
        let parameter_bytes = to_bytes(&MintParams {
            token_id: TokenIdVec(vec![7]),
            owner: ALICE,
            token_uri: None,
            extension: None,
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = mint(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().token_count, 2);
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_claimed() {
        let parameter_bytes = to_bytes(&MintParams {
            token_id: token_0(),
            owner: CAROL,
            token_uri: None,
            extension: None,
        });
        let ctx = receive_ctx(MINTER, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = mint(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Claimed.into()));
        claim_eq!(owner_of_token(&host, token_0()), ALICE);
    }

    /// Test transfer succeeds, when the sender owns the token.
    #[concordium_test]
    fn test_transfer_nft() {
        let parameter_bytes = to_bytes(&TransferNftParams {
            recipient: CAROL,
            token_id: token_0(),
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = transfer_nft(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim_eq!(owner_of_token(&host, token_0()), CAROL);
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer(TransferEvent {
                token_id: token_0(),
                amount: ContractTokenAmount::from(1),
                from: ALICE,
                to: CAROL,
            })),
            "Incorrect event emitted"
        );
    }

    /// Test transfer fails, when the sender is neither the owner, an approved
    /// spender nor an operator.
    #[concordium_test]
    fn test_transfer_nft_not_authorized() {
        let parameter_bytes = to_bytes(&TransferNftParams {
            recipient: BOB,
            token_id: token_0(),
        });
        let ctx = receive_ctx(BOB, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = transfer_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(owner_of_token(&host, token_0()), ALICE);
    }

    #[concordium_test]
    fn test_transfer_nft_unknown_token() {
        let parameter_bytes = to_bytes(&TransferNftParams {
            recipient: BOB,
            token_id: TokenIdVec(vec![99]),
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = transfer_nft(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    /// Test an approved spender can transfer once, since the transfer drops
    /// every approval of the token.
    #[concordium_test]
    fn test_approve_then_transfer() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&ApproveParams {
            spender: CAROL,
            token_id: token_0(),
            expires: None,
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");

        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::Approve {
                owner: ALICE,
                spender: CAROL,
                token_id: token_0(),
                expires: Expiration::Never,
            })
        );

        let parameter_bytes = to_bytes(&TransferNftParams {
            recipient: CAROL,
            token_id: token_0(),
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        transfer_nft(&ctx, &mut host, &mut logger).expect_report("Transfer failed");

        let token = host.state().token(&token_0()).expect_report("Token missing");
        claim_eq!(token.owner, CAROL);
        claim!(token.approvals.is_empty(), "Approvals should be cleared");
    }

    #[concordium_test]
    fn test_approve_expired() {
        let parameter_bytes = to_bytes(&ApproveParams {
            spender: CAROL,
            token_id: token_0(),
            expires: Some(Expiration::AtTime(Timestamp::from_timestamp_millis(
                SLOT_TIME,
            ))),
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::Expired.into()));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_revoke() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&ApproveParams {
            spender: CAROL,
            token_id: token_0(),
            expires: None,
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");

        let parameter_bytes = to_bytes(&RevokeParams {
            spender: CAROL,
            token_id: token_0(),
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        revoke(&ctx, &mut host, &mut logger).expect_report("Revoke failed");

        claim_eq!(
            logger.logs[1],
            to_bytes(&CustomEvent::Revoke {
                owner: ALICE,
                spender: CAROL,
                token_id: token_0(),
            })
        );

        let parameter_bytes = to_bytes(&ApprovalParams {
            token_id: token_0(),
            spender: CAROL,
            include_expired: true,
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        claim_eq!(
            approval(&ctx, &host),
            Err(CustomContractError::NotFound.into())
        );
    }

    /// Test an operator can move every token of the owner until it is
    /// revoked.
    #[concordium_test]
    fn test_approve_all_and_revoke_all() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let parameter_bytes = to_bytes(&ApproveAllParams {
            operator: CAROL,
            expires: None,
        });
        let ctx = receive_ctx(BOB, &parameter_bytes);
        approve_all(&ctx, &mut host, &mut logger).expect_report("ApproveAll failed");

        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::ApproveAll {
                owner: BOB,
                operator: CAROL,
                expires: Expiration::Never,
            })
        );

        let parameter_bytes = to_bytes(&OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: BOB,
                    address: CAROL,
                },
                OperatorOfQuery {
                    owner: ALICE,
                    address: CAROL,
                },
                OperatorOfQuery {
                    owner: ALICE,
                    address: ALICE,
                },
            ],
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let response = operator_of(&ctx, &host).expect_report("operatorOf failed");
        claim_eq!(response.0, vec![true, false, true]);

        let parameter_bytes = to_bytes(&RevokeAllParams { operator: CAROL });
        let ctx = receive_ctx(BOB, &parameter_bytes);
        revoke_all(&ctx, &mut host, &mut logger).expect_report("RevokeAll failed");

        let parameter_bytes = to_bytes(&TransferNftParams {
            recipient: CAROL,
            token_id: token_1(),
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let result = transfer_nft(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    #[concordium_test]
    fn test_approve_all_expired() {
        let parameter_bytes = to_bytes(&ApproveAllParams {
            operator: CAROL,
            expires: Some(Expiration::AtTime(Timestamp::from_timestamp_millis(10))),
        });
        let ctx = receive_ctx(BOB, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = approve_all(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Expired.into()));
    }

    /// Test sending a token transfers it to the contract and invokes it with
    /// the receive message.
    #[concordium_test]
    fn test_send_nft() {
        let parameter_bytes = to_bytes(&SendNftParams {
            contract: MARKET,
            entrypoint: OwnedEntrypointName::new_unchecked("onNftReceived".into()),
            token_id: token_0(),
            msg: vec![1, 2, 3],
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();
        host.setup_mock_entrypoint(
            MARKET,
            OwnedEntrypointName::new_unchecked("onNftReceived".into()),
            parse_and_check_mock::<NftReceiveMsg, _>(
                |msg| msg.sender == ALICE && msg.token_id == token_0() && msg.msg == [1, 2, 3],
                (),
            ),
        );

        let result = send_nft(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim_eq!(owner_of_token(&host, token_0()), Address::Contract(MARKET));
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer(TransferEvent {
                token_id: token_0(),
                amount: ContractTokenAmount::from(1),
                from: ALICE,
                to: Address::Contract(MARKET),
            }))
        );
    }

    #[concordium_test]
    fn test_send_nft_receiver_rejects() {
        let parameter_bytes = to_bytes(&SendNftParams {
            contract: MARKET,
            entrypoint: OwnedEntrypointName::new_unchecked("onNftReceived".into()),
            token_id: token_0(),
            msg: Vec::new(),
        });
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();
        host.setup_mock_entrypoint(
            MARKET,
            OwnedEntrypointName::new_unchecked("onNftReceived".into()),
            reject_mock(),
        );

        let result = send_nft(&ctx, &mut host, &mut logger);
        claim_eq!(
            result,
            Err(CustomContractError::InvokeContractError.into())
        );
    }

    #[concordium_test]
    fn test_burn() {
        let parameter_bytes = to_bytes(&token_0());
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        burn(&ctx, &mut host, &mut logger).expect_report("Burn failed");

        claim_eq!(host.state().token_count, 1);
        claim_eq!(
            host.state().token(&token_0()),
            Err(ContractError::InvalidTokenId)
        );
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Burn(BurnEvent {
                token_id: token_0(),
                amount: ContractTokenAmount::from(1),
                owner: ALICE,
            }))
        );

        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let result = num_tokens(&ctx, &host).expect_report("numTokens failed");
        claim_eq!(result.count, 1);
    }

    #[concordium_test]
    fn test_burn_not_authorized() {
        let parameter_bytes = to_bytes(&token_1());
        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let result = burn(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().token_count, 2);
    }

    #[concordium_test]
    fn test_update_minter() {
        let parameter_bytes = to_bytes(&CAROL);
        let mut logger = TestLogger::init();
        let mut host = default_host();

        let ctx = receive_ctx(ALICE, &parameter_bytes);
        let result = update_minter(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(ContractError::Unauthorized));

        let ctx = receive_ctx(MINTER, &parameter_bytes);
        update_minter(&ctx, &mut host, &mut logger).expect_report("updateMinter failed");

        let response = minter(&ctx, &host).expect_report("minter failed");
        claim_eq!(response.minter, CAROL);
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::UpdateMinter {
                previous: MINTER,
                new: CAROL,
            })
        );
    }

    /// Test expired approvals are only listed when asked for.
    #[concordium_test]
    fn test_owner_of_filters_expired() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        for (spender, expires) in [(CAROL, SLOT_TIME + 10), (ALICE, SLOT_TIME + 500)] {
            let parameter_bytes = to_bytes(&ApproveParams {
                spender,
                token_id: token_1(),
                expires: Some(Expiration::AtTime(Timestamp::from_timestamp_millis(expires))),
            });
            let ctx = receive_ctx(BOB, &parameter_bytes);
            approve(&ctx, &mut host, &mut logger).expect_report("Approve failed");
        }

        let parameter_bytes = to_bytes(&OwnerOfParams {
            token_id: token_1(),
            include_expired: false,
        });
        let mut ctx = receive_ctx(BOB, &parameter_bytes);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(SLOT_TIME + 100));

        let response = owner_of(&ctx, &host).expect_report("ownerOf failed");
        claim_eq!(response.owner, BOB);
        claim_eq!(response.approvals.len(), 1);
        claim_eq!(response.approvals[0].spender, ALICE);

        let response = approvals(&ctx, &host).expect_report("approvals failed");
        claim_eq!(response.approvals.len(), 1);

        let parameter_bytes = to_bytes(&OwnerOfParams {
            token_id: token_1(),
            include_expired: true,
        });
        let mut ctx = receive_ctx(BOB, &parameter_bytes);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(SLOT_TIME + 100));

        let response = all_nft_info(&ctx, &host).expect_report("allNftInfo failed");
        claim_eq!(response.access.approvals.len(), 2);
        claim_eq!(
            response.info.token_uri,
            Some(String::from("ipfs://token_1.json"))
        );
    }

    #[concordium_test]
    fn test_approval_of_owner() {
        let parameter_bytes = to_bytes(&ApprovalParams {
            token_id: token_0(),
            spender: ALICE,
            include_expired: false,
        });
        let ctx = receive_ctx(BOB, &parameter_bytes);
        let host = default_host();

        let response = approval(&ctx, &host).expect_report("approval failed");
        claim_eq!(response.approval.expires, Expiration::Never);
    }

    #[concordium_test]
    fn test_collection_queries() {
        let host = default_host();
        let ctx = receive_ctx(CAROL, &[]);

        let info = contract_info(&ctx, &host).expect_report("contractInfo failed");
        claim_eq!(info.name, "Magic Power");
        let version = contract_version(&ctx, &host).expect_report("contractVersion failed");
        claim_eq!(version.version, CONTRACT_VERSION);

        let parameter_bytes = to_bytes(&TokenParams {
            token_id: token_1(),
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let response = nft_info(&ctx, &host).expect_report("nftInfo failed");
        claim_eq!(
            response.extension.and_then(|metadata| metadata.name),
            Some(String::from("Token 1"))
        );

        let parameter_bytes = to_bytes(&TokensParams {
            owner: BOB,
            start_after: None,
            limit: None,
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let response = tokens(&ctx, &host).expect_report("tokens failed");
        claim_eq!(response.tokens, vec![token_1()]);

        let parameter_bytes = to_bytes(&AllTokensParams {
            start_after: Some(token_0()),
            limit: Some(1),
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let response = all_tokens(&ctx, &host).expect_report("allTokens failed");
        claim_eq!(response.tokens, vec![token_1()]);

        let parameter_bytes = to_bytes(&AllOperatorsParams {
            owner: ALICE,
            include_expired: false,
            start_after: None,
            limit: None,
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let response = all_operators(&ctx, &host).expect_report("allOperators failed");
        claim!(response.operators.is_empty());
    }

    #[concordium_test]
    fn test_balance_of() {
        let parameter_bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: token_0(),
                    address: ALICE,
                },
                BalanceOfQuery {
                    token_id: token_0(),
                    address: BOB,
                },
            ],
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let host = default_host();

        let response = balance_of(&ctx, &host).expect_report("balanceOf failed");
        claim_eq!(
            response.0,
            vec![ContractTokenAmount::from(1), ContractTokenAmount::from(0)]
        );

        let parameter_bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TokenIdVec(vec![99]),
                address: ALICE,
            }],
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        claim_eq!(
            balance_of(&ctx, &host),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_token_metadata() {
        let parameter_bytes = to_bytes(&ContractTokenMetadataQueryParams {
            queries: vec![token_0(), token_1()],
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let host = default_host();

        let response = token_metadata(&ctx, &host).expect_report("tokenMetadata failed");
        claim_eq!(response.0[0].url, "https://cnft.example/metadata/0001/");
        claim_eq!(response.0[1].url, "ipfs://token_1.json");
    }

    #[concordium_test]
    fn test_supports() {
        let parameter_bytes = to_bytes(&SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".into()),
                StandardIdentifierOwned::new_unchecked("CIS-2".into()),
                StandardIdentifierOwned::new_unchecked("CIS-1".into()),
            ],
        });
        let ctx = receive_ctx(CAROL, &parameter_bytes);
        let host = default_host();

        let response = supports(&ctx, &host).expect_report("supports failed");
        claim!(matches!(response.results[0], SupportResult::Support));
        claim!(matches!(response.results[1], SupportResult::Support));
        claim!(matches!(response.results[2], SupportResult::NoSupport));
    }
}
