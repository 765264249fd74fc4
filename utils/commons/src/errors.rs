use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Token ID is already minted (Error code: -4).
    Claimed,
    /// Approval or operator expiry lies in the past (Error code: -5).
    Expired,
    /// Requested approval does not exist (Error code: -6).
    NotFound,
    /// Failed to invoke a contract (Error code: -7).
    InvokeContractError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Failure to read a value from another cNFT contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    /// The contract returned nothing, so it does not implement the query.
    Compatibility,
    Parse,
}
