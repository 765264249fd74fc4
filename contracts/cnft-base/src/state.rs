use commons::*;
use concordium_std::*;
use core::ops::DerefMut;

use crate::external::InitParams;

/// Everything stored about a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    /// The owner of the token.
    pub owner: Address,
    /// Addresses that may transfer or send this token, cleared on every
    /// ownership change.
    pub approvals: Vec<Approval>,
    pub token_uri: Option<String>,
    pub extension: Extension,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    pub contract_info: ContractInfo,
    pub version: ContractVersion,
    /// The only address allowed to mint.
    pub minter: Address,
    /// Number of tokens currently in existence.
    pub token_count: u64,
    /// Prefix of the metadata url of tokens minted without a `token_uri`.
    pub metadata_base_url: String,
    pub tokens: StateMap<ContractTokenId, TokenInfo, S>,
    /// Index of the tokens each address owns.
    pub owned: StateMap<Address, StateSet<ContractTokenId, S>, S>,
    /// Operators of each owner together with the expiry of their grant.
    pub operators: StateMap<Address, StateMap<Address, Expiration, S>, S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no tokens.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        params: InitParams,
        version: ContractVersion,
    ) -> Self {
        Self {
            contract_info: ContractInfo {
                name: params.name,
                symbol: params.symbol,
            },
            version,
            minter: params.minter,
            token_count: 0,
            metadata_base_url: params.metadata_base_url,
            tokens: state_builder.new_map(),
            owned: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Mint a new token owned by `params.owner`.
    /// Results in an error if the token ID already exists.
    pub fn mint(
        &mut self,
        params: MintParams,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<TokenInfo> {
        ensure!(
            self.tokens.get(&params.token_id).is_none(),
            CustomContractError::Claimed.into()
        );

        let token = TokenInfo {
            owner: params.owner,
            approvals: Vec::new(),
            token_uri: params.token_uri,
            extension: params.extension,
        };
        self.tokens.insert(params.token_id.clone(), token.clone());
        self.owned
            .entry(params.owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(params.token_id);
        self.token_count += 1;

        Ok(token)
    }

    /// Get a copy of the token, or `InvalidTokenId` if it does not exist.
    pub fn token(&self, token_id: &ContractTokenId) -> ContractResult<TokenInfo> {
        self.tokens
            .get(token_id)
            .map(|token| token.clone())
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Check if `address` holds a non-expired operator grant from `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address, slot_time: Timestamp) -> bool {
        self.operators
            .get(owner)
            .and_then(|operators| {
                let expires = operators.get(address).map(|expires| *expires);
                expires
            })
            .map(|expires| !expires.is_expired(slot_time))
            .unwrap_or(false)
    }

    /// Only the owner or one of its operators may change token approvals.
    pub fn check_can_approve(
        &self,
        sender: &Address,
        token: &TokenInfo,
        slot_time: Timestamp,
    ) -> ContractResult<()> {
        ensure!(
            token.owner == *sender || self.is_operator(&token.owner, sender, slot_time),
            ContractError::Unauthorized
        );
        Ok(())
    }

    /// The owner, an approved spender of this token, or an operator of the
    /// owner may move the token.
    pub fn check_can_send(
        &self,
        sender: &Address,
        token: &TokenInfo,
        slot_time: Timestamp,
    ) -> ContractResult<()> {
        if token.owner == *sender {
            return Ok(());
        }

        let approved = token
            .approvals
            .iter()
            .any(|approval| approval.spender == *sender && !approval.is_expired(slot_time));
        ensure!(
            approved || self.is_operator(&token.owner, sender, slot_time),
            ContractError::Unauthorized
        );
        Ok(())
    }

    /// Move a token to `recipient` on behalf of `sender`, dropping all of its
    /// approvals. Returns the previous owner.
    pub fn transfer(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
        recipient: Address,
        slot_time: Timestamp,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<Address> {
        let token = self.token(token_id)?;
        self.check_can_send(sender, &token, slot_time)?;

        {
            let mut token = self
                .tokens
                .get_mut(token_id)
                .ok_or(ContractError::InvalidTokenId)?;
            token.owner = recipient;
            token.approvals.clear();
        }

        self.owned
            .get_mut(&token.owner)
            .map(|mut owned| owned.remove(token_id));
        self.owned
            .entry(recipient)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(token_id.clone());

        Ok(token.owner)
    }

    /// Grant `spender` the right to move the token, replacing any earlier
    /// approval of the same spender. Returns the owner of the token.
    pub fn approve(
        &mut self,
        sender: &Address,
        params: &ApproveParams,
        slot_time: Timestamp,
    ) -> ContractResult<Address> {
        let token = self.token(&params.token_id)?;
        self.check_can_approve(sender, &token, slot_time)?;

        let expires = params.expires.unwrap_or_default();
        ensure!(
            !expires.is_expired(slot_time),
            CustomContractError::Expired.into()
        );

        let mut token = self
            .tokens
            .get_mut(&params.token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        token
            .approvals
            .retain(|approval| approval.spender != params.spender);
        token.approvals.push(Approval {
            spender: params.spender,
            expires,
        });

        Ok(token.owner)
    }

    /// Drop the approval of `spender`, if any. Returns the owner of the token.
    pub fn revoke(
        &mut self,
        sender: &Address,
        params: &RevokeParams,
        slot_time: Timestamp,
    ) -> ContractResult<Address> {
        let token = self.token(&params.token_id)?;
        self.check_can_approve(sender, &token, slot_time)?;

        let mut token = self
            .tokens
            .get_mut(&params.token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        token
            .approvals
            .retain(|approval| approval.spender != params.spender);

        Ok(token.owner)
    }

    /// Add or refresh an operator of `owner`.
    /// Rejects grants that are already expired.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        expires: Expiration,
        slot_time: Timestamp,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<()> {
        ensure!(
            !expires.is_expired(slot_time),
            CustomContractError::Expired.into()
        );

        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_map())
            .deref_mut()
            .insert(*operator, expires);
        Ok(())
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `owner`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Destroy a token on behalf of `sender`. Returns the burnt token's owner.
    pub fn burn(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
        slot_time: Timestamp,
    ) -> ContractResult<Address> {
        let token = self.token(token_id)?;
        self.check_can_send(sender, &token, slot_time)?;

        self.tokens.remove(token_id);
        self.owned
            .get_mut(&token.owner)
            .map(|mut owned| owned.remove(token_id));
        self.token_count -= 1;

        Ok(token.owner)
    }

    /// Approvals of the token, with the expired ones filtered out unless
    /// `include_expired` is set.
    pub fn approvals(
        &self,
        token: &TokenInfo,
        include_expired: bool,
        slot_time: Timestamp,
    ) -> Vec<Approval> {
        token
            .approvals
            .iter()
            .filter(|approval| include_expired || !approval.is_expired(slot_time))
            .cloned()
            .collect()
    }

    pub fn owner_of(
        &self,
        token_id: &ContractTokenId,
        include_expired: bool,
        slot_time: Timestamp,
    ) -> ContractResult<OwnerOfResponse> {
        let token = self.token(token_id)?;
        Ok(OwnerOfResponse {
            owner: token.owner,
            approvals: self.approvals(&token, include_expired, slot_time),
        })
    }

    /// A page of operators of `owner`, ordered by their serialized address.
    pub fn operators_of(
        &self,
        params: &AllOperatorsParams,
        slot_time: Timestamp,
    ) -> Vec<Approval> {
        let start_after = params.start_after.as_ref().map(to_bytes);
        let limit = page_limit(params.limit);

        self.operators
            .get(&params.owner)
            .map(|operators| {
                let page: Vec<Approval> = operators
                    .iter()
                    .filter(|(operator, _)| after(&**operator, &start_after))
                    .filter(|(_, expires)| params.include_expired || !expires.is_expired(slot_time))
                    .take(limit)
                    .map(|(operator, expires)| Approval {
                        spender: *operator,
                        expires: *expires,
                    })
                    .collect();
                page
            })
            .unwrap_or_default()
    }

    /// A page of the tokens `owner` holds, ordered by their serialized ID.
    pub fn tokens_of(
        &self,
        owner: &Address,
        start_after: Option<&ContractTokenId>,
        limit: Option<u32>,
    ) -> Vec<ContractTokenId> {
        let start_after = start_after.map(to_bytes);
        let limit = page_limit(limit);

        self.owned
            .get(owner)
            .map(|owned| {
                let page: Vec<ContractTokenId> = owned
                    .iter()
                    .filter(|token_id| after(&**token_id, &start_after))
                    .take(limit)
                    .map(|token_id| token_id.clone())
                    .collect();
                page
            })
            .unwrap_or_default()
    }

    /// A page of all tokens, ordered by their serialized ID.
    pub fn all_tokens(
        &self,
        start_after: Option<&ContractTokenId>,
        limit: Option<u32>,
    ) -> Vec<ContractTokenId> {
        let start_after = start_after.map(to_bytes);

        self.tokens
            .iter()
            .filter(|(token_id, _)| after(&**token_id, &start_after))
            .take(page_limit(limit))
            .map(|(token_id, _)| token_id.clone())
            .collect()
    }
}

/// Whether `key` lies strictly after the serialized cursor `start_after`.
/// Keys are compared the way the state orders them, by their serialization.
#[inline(always)]
fn after<K: Serial>(key: &K, start_after: &Option<Vec<u8>>) -> bool {
    match start_after {
        Some(start) => to_bytes(key) > *start,
        None => true,
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;
    use test_infrastructure::*;

    const MINTER: Address = Address::Account(AccountAddress([0; 32]));
    const ALICE: Address = Address::Account(AccountAddress([1; 32]));
    const BOB: Address = Address::Account(AccountAddress([2; 32]));
    const CAROL: Address = Address::Account(AccountAddress([3; 32]));

    fn token_id(byte: u8) -> ContractTokenId {
        TokenIdVec(vec![byte])
    }

    fn time(millis: u64) -> Timestamp {
        Timestamp::from_timestamp_millis(millis)
    }

    fn new_state(state_builder: &mut TestStateBuilder) -> State<TestStateApi> {
        State::new(
            state_builder,
            InitParams {
                name: "Magic Power".into(),
                symbol: "MGK".into(),
                minter: MINTER,
                metadata_base_url: "https://cnft.example/".into(),
            },
            ContractVersion {
                contract: "crates.io:cnft-base".into(),
                version: "0.1.0".into(),
            },
        )
    }

    fn mint_params(byte: u8, owner: Address) -> MintParams {
        MintParams {
            token_id: token_id(byte),
            owner,
            token_uri: None,
            extension: None,
        }
    }

    /// State with tokens 1 and 2 owned by ALICE and token 3 owned by BOB.
    fn minted_state(state_builder: &mut TestStateBuilder) -> State<TestStateApi> {
        let mut state = new_state(state_builder);
        for (byte, owner) in [(1, ALICE), (2, ALICE), (3, BOB)] {
            state
                .mint(mint_params(byte, owner), state_builder)
                .expect_report("Failed to mint");
        }
        state
    }

    #[concordium_test]
    fn test_mint_indexes_owner() {
        let mut state_builder = TestStateBuilder::new();
        let state = minted_state(&mut state_builder);

        claim_eq!(state.token_count, 3);
        claim_eq!(state.tokens.iter().count(), 3);
        claim_eq!(
            state.tokens_of(&ALICE, None, None),
            vec![token_id(1), token_id(2)]
        );
        claim_eq!(state.tokens_of(&BOB, None, None), vec![token_id(3)]);
        claim_eq!(state.tokens_of(&CAROL, None, None), Vec::new());
    }

    #[concordium_test]
    fn test_mint_claimed() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        let result = state.mint(mint_params(1, BOB), &mut state_builder);
        claim_eq!(result, Err(CustomContractError::Claimed.into()));
        claim_eq!(state.token_count, 3);
        claim_eq!(
            state.token(&token_id(1)).map(|token| token.owner),
            Ok(ALICE)
        );
    }

    #[concordium_test]
    fn test_transfer_updates_index() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        let previous = state
            .transfer(&ALICE, &token_id(2), CAROL, time(0), &mut state_builder)
            .expect_report("Transfer failed");

        claim_eq!(previous, ALICE);
        claim_eq!(state.tokens_of(&ALICE, None, None), vec![token_id(1)]);
        claim_eq!(state.tokens_of(&CAROL, None, None), vec![token_id(2)]);
        claim_eq!(state.token_count, 3);
    }

    #[concordium_test]
    fn test_transfer_clears_approvals() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        state
            .approve(
                &ALICE,
                &ApproveParams {
                    spender: BOB,
                    token_id: token_id(1),
                    expires: None,
                },
                time(0),
            )
            .expect_report("Approve failed");

        state
            .transfer(&BOB, &token_id(1), CAROL, time(0), &mut state_builder)
            .expect_report("Approved spender should be able to transfer");

        let token = state.token(&token_id(1)).expect_report("Token missing");
        claim_eq!(token.owner, CAROL);
        claim!(token.approvals.is_empty());

        // Approval does not survive the change of owner
        let result = state.transfer(&BOB, &token_id(1), BOB, time(0), &mut state_builder);
        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    #[concordium_test]
    fn test_expired_approval_cannot_send() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        state
            .approve(
                &ALICE,
                &ApproveParams {
                    spender: BOB,
                    token_id: token_id(1),
                    expires: Some(Expiration::AtTime(time(100))),
                },
                time(0),
            )
            .expect_report("Approve failed");

        let token = state.token(&token_id(1)).expect_report("Token missing");
        claim!(state.check_can_send(&BOB, &token, time(99)).is_ok());
        claim_eq!(
            state.check_can_send(&BOB, &token, time(100)),
            Err(ContractError::Unauthorized)
        );

        claim_eq!(state.approvals(&token, false, time(100)), Vec::new());
        claim_eq!(state.approvals(&token, true, time(100)).len(), 1);
    }

    #[concordium_test]
    fn test_approve_replaces_previous_approval() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        for expires in [Expiration::AtTime(time(50)), Expiration::Never] {
            state
                .approve(
                    &ALICE,
                    &ApproveParams {
                        spender: BOB,
                        token_id: token_id(1),
                        expires: Some(expires),
                    },
                    time(0),
                )
                .expect_report("Approve failed");
        }

        let token = state.token(&token_id(1)).expect_report("Token missing");
        claim_eq!(
            token.approvals,
            vec![Approval {
                spender: BOB,
                expires: Expiration::Never,
            }]
        );
    }

    #[concordium_test]
    fn test_approve_rejects_expired() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        let result = state.approve(
            &ALICE,
            &ApproveParams {
                spender: BOB,
                token_id: token_id(1),
                expires: Some(Expiration::AtTime(time(10))),
            },
            time(10),
        );
        claim_eq!(result, Err(CustomContractError::Expired.into()));
    }

    #[concordium_test]
    fn test_operator_can_approve_and_send() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        state
            .add_operator(&ALICE, &CAROL, Expiration::Never, time(0), &mut state_builder)
            .expect_report("Adding operator failed");

        claim!(state
            .approve(
                &CAROL,
                &ApproveParams {
                    spender: BOB,
                    token_id: token_id(2),
                    expires: None,
                },
                time(0),
            )
            .is_ok());

        // An approved spender is no operator and cannot approve others
        let result = state.approve(
            &BOB,
            &ApproveParams {
                spender: BOB,
                token_id: token_id(1),
                expires: None,
            },
            time(0),
        );
        claim_eq!(result, Err(ContractError::Unauthorized));

        state
            .transfer(&CAROL, &token_id(1), CAROL, time(0), &mut state_builder)
            .expect_report("Operator transfer failed");

        state.remove_operator(&ALICE, &CAROL);
        claim!(!state.is_operator(&ALICE, &CAROL, time(0)));
    }

    #[concordium_test]
    fn test_operator_expiry() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        let result = state.add_operator(
            &ALICE,
            &BOB,
            Expiration::AtTime(time(5)),
            time(5),
            &mut state_builder,
        );
        claim_eq!(result, Err(CustomContractError::Expired.into()));

        state
            .add_operator(
                &ALICE,
                &BOB,
                Expiration::AtTime(time(20)),
                time(5),
                &mut state_builder,
            )
            .expect_report("Adding operator failed");

        claim!(state.is_operator(&ALICE, &BOB, time(19)));
        claim!(!state.is_operator(&ALICE, &BOB, time(20)));
        claim!(!state.is_operator(&BOB, &ALICE, time(0)));
    }

    #[concordium_test]
    fn test_burn() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        claim_eq!(
            state.burn(&BOB, &token_id(1), time(0)),
            Err(ContractError::Unauthorized)
        );

        let owner = state
            .burn(&ALICE, &token_id(1), time(0))
            .expect_report("Burn failed");
        claim_eq!(owner, ALICE);
        claim_eq!(state.token_count, 2);
        claim_eq!(state.tokens_of(&ALICE, None, None), vec![token_id(2)]);
        claim_eq!(
            state.token(&token_id(1)),
            Err(ContractError::InvalidTokenId)
        );
        claim_eq!(
            state.burn(&ALICE, &token_id(1), time(0)),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_token_pagination() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        for byte in 0..15 {
            state
                .mint(mint_params(byte, ALICE), &mut state_builder)
                .expect_report("Failed to mint");
        }

        let first = state.all_tokens(None, None);
        claim_eq!(first.len(), DEFAULT_LIMIT as usize);
        claim_eq!(first[0], token_id(0));

        let rest = state.all_tokens(first.last(), Some(50));
        claim_eq!(rest, (10..15).map(token_id).collect::<Vec<_>>());

        let page = state.tokens_of(&ALICE, Some(&token_id(3)), Some(2));
        claim_eq!(page, vec![token_id(4), token_id(5)]);
    }

    #[concordium_test]
    fn test_operators_of() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = minted_state(&mut state_builder);

        state
            .add_operator(&ALICE, &BOB, Expiration::Never, time(0), &mut state_builder)
            .expect_report("Adding operator failed");
        state
            .add_operator(
                &ALICE,
                &CAROL,
                Expiration::AtTime(time(10)),
                time(0),
                &mut state_builder,
            )
            .expect_report("Adding operator failed");

        let mut params = AllOperatorsParams {
            owner: ALICE,
            include_expired: false,
            start_after: None,
            limit: None,
        };
        claim_eq!(state.operators_of(&params, time(5)).len(), 2);
        claim_eq!(
            state.operators_of(&params, time(10)),
            vec![Approval {
                spender: BOB,
                expires: Expiration::Never,
            }]
        );

        params.include_expired = true;
        params.start_after = Some(BOB);
        claim_eq!(
            state.operators_of(&params, time(10)),
            vec![Approval {
                spender: CAROL,
                expires: Expiration::AtTime(time(10)),
            }]
        );
    }
}
