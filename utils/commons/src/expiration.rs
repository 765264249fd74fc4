use super::*;

/// Point after which an approval or an operator grant stops being valid.
///
/// Contracts only see the slot time of the block they run in, so
/// expirations are expressed in time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum Expiration {
    /// Expires once the slot time reaches the given timestamp.
    AtTime(Timestamp),
    /// Never expires.
    Never,
}

impl Default for Expiration {
    fn default() -> Self {
        Expiration::Never
    }
}

impl Expiration {
    pub fn is_expired(&self, slot_time: Timestamp) -> bool {
        match self {
            Expiration::AtTime(time) => slot_time >= *time,
            Expiration::Never => false,
        }
    }
}

/// Account that can transfer or send a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Approval {
    /// Address allowed to move the token.
    pub spender: Address,
    /// When the approval expires (maybe `Expiration::Never`).
    pub expires: Expiration,
}

impl Approval {
    #[inline(always)]
    pub fn is_expired(&self, slot_time: Timestamp) -> bool {
        self.expires.is_expired(slot_time)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const USER: Address = Address::Account(AccountAddress([16; 32]));

    #[concordium_test]
    fn test_never_expires() {
        claim!(!Expiration::Never.is_expired(Timestamp::from_timestamp_millis(u64::MAX)));
        claim_eq!(Expiration::default(), Expiration::Never);
    }

    #[concordium_test]
    fn test_expires_at_time() {
        let expires = Expiration::AtTime(Timestamp::from_timestamp_millis(1_000));

        claim!(!expires.is_expired(Timestamp::from_timestamp_millis(999)));
        // The boundary itself already counts as expired
        claim!(expires.is_expired(Timestamp::from_timestamp_millis(1_000)));
        claim!(expires.is_expired(Timestamp::from_timestamp_millis(1_001)));
    }

    #[concordium_test]
    fn test_approval_expiry() {
        let approval = Approval {
            spender: USER,
            expires: Expiration::AtTime(Timestamp::from_timestamp_millis(10)),
        };

        claim!(!approval.is_expired(Timestamp::from_timestamp_millis(9)));
        claim!(approval.is_expired(Timestamp::from_timestamp_millis(10)));
    }
}
