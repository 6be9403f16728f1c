//! Resolution of registry entries into concrete accounts
//!
//! The same function runs in clients, to build the transfer instruction, and
//! in the hook, to check the accounts it was given.

use {
    crate::{
        error::TransferFeeHookError,
        get_registry_address,
        registry::{self, AccountRef, DerivationProgram, EntryAddress, RegistryEntry, SeedFragment},
    },
    solana_program::{instruction::AccountMeta, program_error::ProgramError, pubkey::Pubkey},
};

/// Runtime parameters of the transfer being hooked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferParams {
    /// Source token account
    pub source: Pubkey,
    /// Mint being transferred
    pub mint: Pubkey,
    /// Destination token account
    pub destination: Pubkey,
    /// Source account's owner or delegate
    pub authority: Pubkey,
    /// Amount of tokens to transfer
    pub amount: u64,
}

struct Resolution<'a> {
    params: &'a TransferParams,
    registry: Pubkey,
    resolved: Vec<AccountMeta>,
}
impl Resolution<'_> {
    fn key(&self, account: &AccountRef) -> Result<Pubkey, ProgramError> {
        Ok(match account {
            AccountRef::Source => self.params.source,
            AccountRef::Mint => self.params.mint,
            AccountRef::Destination => self.params.destination,
            AccountRef::Authority => self.params.authority,
            AccountRef::Registry => self.registry,
            AccountRef::Extra(position) => self
                .resolved
                .get(*position as usize)
                .map(|meta| meta.pubkey)
                .ok_or(TransferFeeHookError::Malformed)?,
        })
    }

    fn seed_bytes(&self, seed: &SeedFragment) -> Result<Vec<u8>, ProgramError> {
        Ok(match seed {
            SeedFragment::Literal(bytes) => bytes.clone(),
            SeedFragment::Amount => self.params.amount.to_le_bytes().to_vec(),
            SeedFragment::Account(account) => self.key(account)?.to_bytes().to_vec(),
        })
    }

    fn address(&self, program_id: &Pubkey, address: &EntryAddress) -> Result<Pubkey, ProgramError> {
        match address {
            EntryAddress::Literal(address) => Ok(*address),
            EntryAddress::Derived { program, seeds } => {
                let program = match program {
                    DerivationProgram::Hook => *program_id,
                    DerivationProgram::Account(account) => self.key(account)?,
                };
                let seeds = seeds
                    .iter()
                    .map(|seed| self.seed_bytes(seed))
                    .collect::<Result<Vec<_>, _>>()?;
                let seeds = seeds.iter().map(Vec::as_slice).collect::<Vec<_>>();
                Ok(Pubkey::find_program_address(&seeds, &program).0)
            }
        }
    }
}

/// Resolves registry entries into the ordered list of extra accounts for a
/// transfer, in registry order.
///
/// The result depends only on the arguments.
pub fn resolve(
    program_id: &Pubkey,
    params: &TransferParams,
    entries: &[RegistryEntry],
) -> Result<Vec<AccountMeta>, ProgramError> {
    let mut resolution = Resolution {
        params,
        registry: get_registry_address(&params.mint, program_id),
        resolved: Vec::with_capacity(entries.len()),
    };
    for entry in entries {
        let pubkey = resolution.address(program_id, &entry.address)?;
        resolution.resolved.push(AccountMeta {
            pubkey,
            is_signer: entry.is_signer,
            is_writable: entry.is_writable,
        });
    }
    Ok(resolution.resolved)
}

/// Reads registry account data and resolves it for a transfer
pub fn resolve_registry_data(
    program_id: &Pubkey,
    params: &TransferParams,
    registry_data: &[u8],
) -> Result<Vec<AccountMeta>, ProgramError> {
    let entries = registry::read(registry_data)?;
    resolve(program_id, params, &entries)
}
