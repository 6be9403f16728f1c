//! Per-mint transfer counter

use {
    crate::error::TransferFeeHookError,
    bytemuck::{Pod, Zeroable},
    solana_program::{
        account_info::AccountInfo, msg, program_error::ProgramError, pubkey::Pubkey,
    },
    spl_pod::{bytemuck::pod_from_bytes_mut, primitives::PodU64},
};

/// Seed for the counter address
pub const COUNTER_SEED: &[u8] = b"counter";

/// Number of accepted hook invocations for a mint
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Counter {
    /// Current count
    pub count: PodU64,
}
impl Counter {
    /// Size of the counter account
    pub const LEN: usize = std::mem::size_of::<Self>();

    /// Adds one to the count, returning the new value
    pub fn increment(&mut self) -> Result<u64, ProgramError> {
        let count = u64::from(self.count)
            .checked_add(1)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        self.count = count.into();
        Ok(count)
    }
}

/// Get the counter address for a mint
pub fn get_counter_address(mint: &Pubkey, program_id: &Pubkey) -> Pubkey {
    get_counter_address_and_bump_seed(mint, program_id).0
}

/// Get the counter address and bump seed for a mint
pub fn get_counter_address_and_bump_seed(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&collect_counter_seeds(mint), program_id)
}

/// Get the seeds used to derive the counter address
pub fn collect_counter_seeds(mint: &Pubkey) -> [&[u8]; 2] {
    [COUNTER_SEED, mint.as_ref()]
}

/// Get the signer seeds used to create the counter account
pub fn collect_counter_signer_seeds<'a>(mint: &'a Pubkey, bump_seed: &'a [u8]) -> [&'a [u8]; 3] {
    [COUNTER_SEED, mint.as_ref(), bump_seed]
}

/// Increments the counter stored in `counter_info`, which must be an
/// initialized counter owned by the program
pub fn increment(counter_info: &AccountInfo, program_id: &Pubkey) -> Result<u64, ProgramError> {
    if counter_info.owner != program_id || counter_info.data_len() != Counter::LEN {
        msg!("Counter {} is not initialized", counter_info.key);
        return Err(TransferFeeHookError::ProvisioningError.into());
    }
    let mut data = counter_info.try_borrow_mut_data()?;
    let counter = pod_from_bytes_mut::<Counter>(&mut data)?;
    counter.increment()
}
