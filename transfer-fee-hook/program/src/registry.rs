//! Typed registry of extra account rules, stored per mint
//!
//! The registry is written in the `ExtraAccountMetaList` TLV format under the
//! transfer hook `Execute` discriminator, so the token program can read the
//! same bytes when it builds its CPI into the hook. This module exposes a
//! narrower, strongly typed view of those rules: every seed must be a literal,
//! the transfer amount, or the key of an account that is already known when
//! the rule is resolved.

use {
    crate::error::TransferFeeHookError,
    solana_program::{entrypoint::ProgramResult, program_error::ProgramError, pubkey::Pubkey},
    spl_discriminator::{ArrayDiscriminator, SplDiscriminate},
    spl_tlv_account_resolution::{
        account::ExtraAccountMeta, seeds::Seed, state::ExtraAccountMetaList,
    },
    spl_transfer_hook_interface::instruction::ExecuteInstruction,
    spl_type_length_value::state::TlvStateBorrowed,
};

/// Maximum number of entries a registry can hold
pub const MAX_REGISTRY_ENTRIES: usize = 16;

/// Number of fixed accounts in an `Execute` instruction before the extras:
/// source, mint, destination, authority and the registry itself
pub const EXECUTE_FIXED_ACCOUNTS: u8 = 5;

/// Offset of the amount in `Execute` instruction data, right after the
/// discriminator
const AMOUNT_OFFSET: u8 = ArrayDiscriminator::LENGTH as u8;
const AMOUNT_LENGTH: u8 = 8;

/// First discriminator value used for a PDA derived under another account
const EXTERNAL_PDA_DISCRIMINATOR: u8 = 1 << 7;

/// An account in the `Execute` account list, by role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRef {
    /// Source token account
    Source,
    /// Mint being transferred
    Mint,
    /// Destination token account
    Destination,
    /// Source account's owner or delegate
    Authority,
    /// The registry account
    Registry,
    /// The extra account resolved from the registry entry at this position
    Extra(u8),
}
impl AccountRef {
    /// Absolute index in the `Execute` account list
    pub fn index(&self) -> Result<u8, ProgramError> {
        Ok(match self {
            Self::Source => 0,
            Self::Mint => 1,
            Self::Destination => 2,
            Self::Authority => 3,
            Self::Registry => 4,
            Self::Extra(position) => position
                .checked_add(EXECUTE_FIXED_ACCOUNTS)
                .ok_or(TransferFeeHookError::Malformed)?,
        })
    }

    /// Role of the account at an absolute index
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Source,
            1 => Self::Mint,
            2 => Self::Destination,
            3 => Self::Authority,
            4 => Self::Registry,
            _ => Self::Extra(index - EXECUTE_FIXED_ACCOUNTS),
        }
    }
}

/// One fragment of a program-derived address seed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedFragment {
    /// Static bytes
    Literal(Vec<u8>),
    /// The transfer amount, as 8 little-endian bytes
    Amount,
    /// The key of an account
    Account(AccountRef),
}
impl SeedFragment {
    fn to_seed(&self) -> Result<Seed, ProgramError> {
        Ok(match self {
            Self::Literal(bytes) => Seed::Literal {
                bytes: bytes.clone(),
            },
            Self::Amount => Seed::InstructionData {
                index: AMOUNT_OFFSET,
                length: AMOUNT_LENGTH,
            },
            Self::Account(account) => Seed::AccountKey {
                index: account.index()?,
            },
        })
    }

    fn from_seed(seed: Seed) -> Result<Self, ProgramError> {
        match seed {
            Seed::Literal { bytes } => Ok(Self::Literal(bytes)),
            Seed::InstructionData { index, length }
                if index == AMOUNT_OFFSET && length == AMOUNT_LENGTH =>
            {
                Ok(Self::Amount)
            }
            Seed::AccountKey { index } => Ok(Self::Account(AccountRef::from_index(index))),
            _ => Err(TransferFeeHookError::Malformed.into()),
        }
    }
}

/// Program under which a derived address is computed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivationProgram {
    /// This hook program
    Hook,
    /// The program whose id is the key of the referenced account
    Account(AccountRef),
}

/// How the address of an entry is obtained
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryAddress {
    /// A fixed address
    Literal(Pubkey),
    /// A program-derived address built from the seeds, in order
    Derived {
        /// Program used for the derivation
        program: DerivationProgram,
        /// Seeds, concatenated in order
        seeds: Vec<SeedFragment>,
    },
}

/// A single rule in the registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Address rule
    pub address: EntryAddress,
    /// Whether the resolved account must sign
    pub is_signer: bool,
    /// Whether the resolved account must be writable
    pub is_writable: bool,
}
impl RegistryEntry {
    /// Entry for a fixed address
    pub fn literal(address: Pubkey, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address: EntryAddress::Literal(address),
            is_signer,
            is_writable,
        }
    }

    /// Entry for an address derived under this hook program
    pub fn derived(seeds: Vec<SeedFragment>, is_signer: bool, is_writable: bool) -> Self {
        Self {
            address: EntryAddress::Derived {
                program: DerivationProgram::Hook,
                seeds,
            },
            is_signer,
            is_writable,
        }
    }

    /// Entry for an address derived under the program found at `program`
    pub fn external(
        program: AccountRef,
        seeds: Vec<SeedFragment>,
        is_signer: bool,
        is_writable: bool,
    ) -> Self {
        Self {
            address: EntryAddress::Derived {
                program: DerivationProgram::Account(program),
                seeds,
            },
            is_signer,
            is_writable,
        }
    }

    /// Every account this entry needs to be resolved first
    fn references(&self) -> impl Iterator<Item = &AccountRef> {
        let (program, seeds): (Option<&AccountRef>, &[SeedFragment]) = match &self.address {
            EntryAddress::Literal(_) => (None, &[]),
            EntryAddress::Derived { program, seeds } => (
                match program {
                    DerivationProgram::Hook => None,
                    DerivationProgram::Account(account) => Some(account),
                },
                seeds,
            ),
        };
        program
            .into_iter()
            .chain(seeds.iter().filter_map(|seed| match seed {
                SeedFragment::Account(account) => Some(account),
                _ => None,
            }))
    }

    /// Fails if the entry at `position` refers to itself or a later entry,
    /// which could never be resolved
    fn check_references(&self, position: usize) -> ProgramResult {
        for account in self.references() {
            if let AccountRef::Extra(referenced) = account {
                if *referenced as usize >= position {
                    return Err(TransferFeeHookError::Malformed.into());
                }
            }
        }
        Ok(())
    }

    /// Converts the entry into its stored form
    pub fn to_extra_account_meta(&self) -> Result<ExtraAccountMeta, ProgramError> {
        match &self.address {
            EntryAddress::Literal(address) => {
                ExtraAccountMeta::new_with_pubkey(address, self.is_signer, self.is_writable)
            }
            EntryAddress::Derived { program, seeds } => {
                let seeds = seeds
                    .iter()
                    .map(SeedFragment::to_seed)
                    .collect::<Result<Vec<_>, _>>()?;
                match program {
                    DerivationProgram::Hook => {
                        ExtraAccountMeta::new_with_seeds(&seeds, self.is_signer, self.is_writable)
                    }
                    DerivationProgram::Account(account) => {
                        ExtraAccountMeta::new_external_pda_with_seeds(
                            account.index()?,
                            &seeds,
                            self.is_signer,
                            self.is_writable,
                        )
                    }
                }
            }
        }
    }
}

impl TryFrom<&ExtraAccountMeta> for RegistryEntry {
    type Error = ProgramError;

    fn try_from(meta: &ExtraAccountMeta) -> Result<Self, Self::Error> {
        let address = match meta.discriminator {
            0 => EntryAddress::Literal(Pubkey::new_from_array(meta.address_config)),
            1 => EntryAddress::Derived {
                program: DerivationProgram::Hook,
                seeds: unpack_seeds(&meta.address_config)?,
            },
            discriminator if discriminator >= EXTERNAL_PDA_DISCRIMINATOR => {
                EntryAddress::Derived {
                    program: DerivationProgram::Account(AccountRef::from_index(
                        discriminator - EXTERNAL_PDA_DISCRIMINATOR,
                    )),
                    seeds: unpack_seeds(&meta.address_config)?,
                }
            }
            _ => return Err(TransferFeeHookError::Malformed.into()),
        };
        Ok(Self {
            address,
            is_signer: meta.is_signer.into(),
            is_writable: meta.is_writable.into(),
        })
    }
}

fn unpack_seeds(address_config: &[u8; 32]) -> Result<Vec<SeedFragment>, ProgramError> {
    Seed::unpack_address_config(address_config)
        .map_err(|_| TransferFeeHookError::Malformed)?
        .into_iter()
        .map(SeedFragment::from_seed)
        .collect()
}

/// Validates a list of entries and converts them into their stored form
pub fn pack_entries(entries: &[RegistryEntry]) -> Result<Vec<ExtraAccountMeta>, ProgramError> {
    if entries.len() > MAX_REGISTRY_ENTRIES {
        return Err(TransferFeeHookError::CapacityExceeded.into());
    }
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            entry.check_references(position)?;
            entry.to_extra_account_meta()
        })
        .collect()
}

/// Validates stored metas, as received in an instruction, and converts them
/// into typed entries
pub fn unpack_entries(metas: &[ExtraAccountMeta]) -> Result<Vec<RegistryEntry>, ProgramError> {
    if metas.len() > MAX_REGISTRY_ENTRIES {
        return Err(TransferFeeHookError::CapacityExceeded.into());
    }
    metas
        .iter()
        .enumerate()
        .map(|(position, meta)| {
            let entry = RegistryEntry::try_from(meta)?;
            entry.check_references(position)?;
            Ok(entry)
        })
        .collect()
}

/// Size of a registry account holding `num_entries` entries
pub fn registry_size(num_entries: usize) -> Result<usize, ProgramError> {
    ExtraAccountMetaList::size_of(num_entries)
}

/// Whether a registry has already been written into the buffer
pub fn is_initialized(data: &[u8]) -> bool {
    data.get(..ArrayDiscriminator::LENGTH) == Some(ExecuteInstruction::SPL_DISCRIMINATOR_SLICE)
}

/// Writes a new registry into a zeroed buffer of `registry_size` bytes
pub fn create(data: &mut [u8], entries: &[RegistryEntry]) -> ProgramResult {
    if is_initialized(data) {
        return Err(TransferFeeHookError::AlreadyInitialized.into());
    }
    let metas = pack_entries(entries)?;
    if data.len() < registry_size(metas.len())? {
        return Err(TransferFeeHookError::CapacityExceeded.into());
    }
    ExtraAccountMetaList::init::<ExecuteInstruction>(data, &metas)
}

/// Reads the ordered entries out of registry account data
pub fn read(data: &[u8]) -> Result<Vec<RegistryEntry>, ProgramError> {
    if !is_initialized(data) {
        return Err(TransferFeeHookError::NotFound.into());
    }
    let state = TlvStateBorrowed::unpack(data)?;
    let metas = ExtraAccountMetaList::unpack_with_tlv_state::<ExecuteInstruction>(&state)?;
    metas.data().iter().map(RegistryEntry::try_from).collect()
}
