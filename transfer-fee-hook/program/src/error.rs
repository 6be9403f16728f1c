//! Error types

use {
    num_derive::FromPrimitive,
    solana_program::{
        decode_error::DecodeError,
        msg,
        program_error::{PrintProgramError, ProgramError},
    },
    thiserror::Error,
};

/// Errors that may be returned by the transfer fee hook program.
#[derive(Clone, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum TransferFeeHookError {
    // 0
    /// Invocation did not come from the token program during a transfer, or
    /// the registry is not bound to the mint
    #[error("Hook invoked outside of a sanctioned transfer")]
    Unauthorized,
    /// Provided account list does not match the resolved registry entries
    #[error("Provided accounts do not match the resolved registry")]
    Malformed,
    /// Registry or counter already exists for this mint
    #[error("Account already initialized")]
    AlreadyInitialized,
    /// Too many registry entries
    #[error("Registry capacity exceeded")]
    CapacityExceeded,
    /// Standing approval to the delegate authority is missing or too small
    #[error("Insufficient approval for the delegate authority")]
    InsufficientApproval,

    // 5
    /// A required fee or counter account does not exist or has the wrong shape
    #[error("Required account is not provisioned")]
    ProvisioningError,
    /// No registry has been created for this mint
    #[error("Registry not found")]
    NotFound,
    /// Mint has no mint authority
    #[error("Mint has no mint authority")]
    MintHasNoMintAuthority,
    /// Incorrect mint authority has signed the instruction
    #[error("Incorrect mint authority has signed the instruction")]
    IncorrectMintAuthority,
}
impl From<TransferFeeHookError> for ProgramError {
    fn from(e: TransferFeeHookError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
impl<T> DecodeError<T> for TransferFeeHookError {
    fn type_of() -> &'static str {
        "TransferFeeHookError"
    }
}

impl PrintProgramError for TransferFeeHookError {
    fn print<E>(&self)
    where
        E: 'static
            + std::error::Error
            + DecodeError<E>
            + PrintProgramError
            + num_traits::FromPrimitive,
    {
        match self {
            Self::Unauthorized => msg!("Error: Hook invoked outside of a sanctioned transfer"),
            Self::Malformed => msg!("Error: Provided accounts do not match the resolved registry"),
            Self::AlreadyInitialized => msg!("Error: Account already initialized"),
            Self::CapacityExceeded => msg!("Error: Registry capacity exceeded"),
            Self::InsufficientApproval => {
                msg!("Error: Insufficient approval for the delegate authority")
            }
            Self::ProvisioningError => msg!("Error: Required account is not provisioned"),
            Self::NotFound => msg!("Error: Registry not found"),
            Self::MintHasNoMintAuthority => msg!("Error: Mint has no mint authority"),
            Self::IncorrectMintAuthority => {
                msg!("Error: Incorrect mint authority has signed the instruction")
            }
        }
    }
}
