use commons::{
    ContractTokenId, Expiration, APPROVE_ALL_TAG, APPROVE_TAG, REVOKE_ALL_TAG, REVOKE_TAG,
    UPDATE_MINTER_TAG,
};
use concordium_std::*;

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    /// `spender` may now transfer `token_id` on behalf of `owner`.
    Approve {
        owner: Address,
        spender: Address,
        token_id: ContractTokenId,
        expires: Expiration,
    },
    Revoke {
        owner: Address,
        spender: Address,
        token_id: ContractTokenId,
    },
    /// `operator` may now move every token of `owner`.
    ApproveAll {
        owner: Address,
        operator: Address,
        expires: Expiration,
    },
    RevokeAll {
        owner: Address,
        operator: Address,
    },
    UpdateMinter {
        previous: Address,
        new: Address,
    },
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Approve {
                owner,
                spender,
                token_id,
                expires,
            } => {
                out.write_u8(APPROVE_TAG)?;
                owner.serial(out)?;
                spender.serial(out)?;
                token_id.serial(out)?;
                expires.serial(out)
            }
            CustomEvent::Revoke {
                owner,
                spender,
                token_id,
            } => {
                out.write_u8(REVOKE_TAG)?;
                owner.serial(out)?;
                spender.serial(out)?;
                token_id.serial(out)
            }
            CustomEvent::ApproveAll {
                owner,
                operator,
                expires,
            } => {
                out.write_u8(APPROVE_ALL_TAG)?;
                owner.serial(out)?;
                operator.serial(out)?;
                expires.serial(out)
            }
            CustomEvent::RevokeAll { owner, operator } => {
                out.write_u8(REVOKE_ALL_TAG)?;
                owner.serial(out)?;
                operator.serial(out)
            }
            CustomEvent::UpdateMinter { previous, new } => {
                out.write_u8(UPDATE_MINTER_TAG)?;
                previous.serial(out)?;
                new.serial(out)
            }
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const OWNER: Address = Address::Account(AccountAddress([1; 32]));
    const OPERATOR: Address = Address::Account(AccountAddress([2; 32]));

    #[concordium_test]
    fn test_event_tags() {
        let bytes = to_bytes(&CustomEvent::RevokeAll {
            owner: OWNER,
            operator: OPERATOR,
        });
        claim_eq!(bytes[0], REVOKE_ALL_TAG);
        claim_eq!(&bytes[1..], &to_bytes(&(OWNER, OPERATOR))[..]);

        let bytes = to_bytes(&CustomEvent::UpdateMinter {
            previous: OWNER,
            new: OPERATOR,
        });
        claim_eq!(bytes[0], UPDATE_MINTER_TAG);
    }

    #[concordium_test]
    fn test_tags_do_not_clash_with_cis2() {
        // CIS-2 claims tags 255 down to 251
        for tag in [
            APPROVE_TAG,
            REVOKE_TAG,
            APPROVE_ALL_TAG,
            REVOKE_ALL_TAG,
            UPDATE_MINTER_TAG,
        ] {
            claim!(tag < 251);
        }
    }
}
