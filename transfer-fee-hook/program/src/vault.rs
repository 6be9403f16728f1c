//! Keyless delegate authority and the fee vault it owns
//!
//! Participants approve the delegate authority on their secondary token
//! account once. During a transfer the hook signs for the delegate with its
//! derivation seeds, so no per-transfer user signature is needed.

use {
    crate::{
        counter::{get_counter_address, COUNTER_SEED},
        error::TransferFeeHookError,
        registry::{AccountRef, EntryAddress, RegistryEntry, SeedFragment},
    },
    solana_program::{
        account_info::AccountInfo, entrypoint::ProgramResult, msg, program::invoke_signed,
        program_error::ProgramError, program_option::COption, pubkey::Pubkey,
    },
    spl_associated_token_account::get_associated_token_address_with_program_id,
    spl_token_2022::{
        extension::StateWithExtensions,
        state::{Account, Mint},
    },
};

/// Seed for the delegate authority address
pub const DELEGATE_SEED: &[u8] = b"delegate";

/// Positions of the fee accounts at the start of a fee-collecting registry
pub mod fee_layout {
    /// Secondary token mint
    pub const SECONDARY_MINT: usize = 0;
    /// Token program owning the secondary mint
    pub const SECONDARY_TOKEN_PROGRAM: usize = 1;
    /// Associated token account program
    pub const ASSOCIATED_TOKEN_PROGRAM: usize = 2;
    /// Delegate authority
    pub const DELEGATE: usize = 3;
    /// Fee vault, owned by the delegate authority
    pub const VAULT: usize = 4;
    /// Sender's secondary token account
    pub const SOURCE_HOLDING: usize = 5;
    /// Counter for the mint
    pub const COUNTER: usize = 6;
    /// Number of entries in the layout
    pub const LEN: usize = 7;
}

/// Get the delegate authority address
pub fn get_delegate_authority_address(program_id: &Pubkey) -> Pubkey {
    get_delegate_authority_address_and_bump_seed(program_id).0
}

/// Get the delegate authority address and bump seed
pub fn get_delegate_authority_address_and_bump_seed(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[DELEGATE_SEED], program_id)
}

/// Get the signer seeds for the delegate authority
pub fn collect_delegate_authority_signer_seeds(bump_seed: &[u8]) -> [&[u8]; 2] {
    [DELEGATE_SEED, bump_seed]
}

/// Get the fee vault address for a secondary mint
pub fn get_fee_vault_address(
    program_id: &Pubkey,
    secondary_mint: &Pubkey,
    secondary_token_program: &Pubkey,
) -> Pubkey {
    get_associated_token_address_with_program_id(
        &get_delegate_authority_address(program_id),
        secondary_mint,
        secondary_token_program,
    )
}

/// Capability to sign as the delegate authority of a program
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelegateAuthority {
    address: Pubkey,
    bump_seed: [u8; 1],
}
impl DelegateAuthority {
    /// Derives the delegate authority of `program_id`
    pub fn derive(program_id: &Pubkey) -> Self {
        let (address, bump_seed) = get_delegate_authority_address_and_bump_seed(program_id);
        Self {
            address,
            bump_seed: [bump_seed],
        }
    }

    /// Address of the delegate authority
    pub fn address(&self) -> &Pubkey {
        &self.address
    }

    /// Seeds to pass to `invoke_signed`
    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        collect_delegate_authority_signer_seeds(&self.bump_seed)
    }
}

/// Registry entries for fee collection in `secondary_mint`. Additional entries
/// may be appended after these.
pub fn fee_registry_entries(
    secondary_mint: &Pubkey,
    secondary_token_program: &Pubkey,
) -> Vec<RegistryEntry> {
    let secondary_mint_ref = AccountRef::Extra(fee_layout::SECONDARY_MINT as u8);
    let token_program_ref = AccountRef::Extra(fee_layout::SECONDARY_TOKEN_PROGRAM as u8);
    let associated_program_ref = AccountRef::Extra(fee_layout::ASSOCIATED_TOKEN_PROGRAM as u8);
    vec![
        RegistryEntry::literal(*secondary_mint, false, false),
        RegistryEntry::literal(*secondary_token_program, false, false),
        RegistryEntry::literal(spl_associated_token_account::id(), false, false),
        RegistryEntry::derived(
            vec![SeedFragment::Literal(DELEGATE_SEED.to_vec())],
            false,
            false,
        ),
        RegistryEntry::external(
            associated_program_ref,
            vec![
                SeedFragment::Account(AccountRef::Extra(fee_layout::DELEGATE as u8)),
                SeedFragment::Account(token_program_ref),
                SeedFragment::Account(secondary_mint_ref),
            ],
            false,
            true,
        ),
        RegistryEntry::external(
            associated_program_ref,
            vec![
                SeedFragment::Account(AccountRef::Authority),
                SeedFragment::Account(token_program_ref),
                SeedFragment::Account(secondary_mint_ref),
            ],
            false,
            true,
        ),
        RegistryEntry::derived(
            vec![
                SeedFragment::Literal(COUNTER_SEED.to_vec()),
                SeedFragment::Account(AccountRef::Mint),
            ],
            false,
            true,
        ),
    ]
}

/// Checks that `entries` start with the fee layout of some secondary mint,
/// since `Execute` cannot collect fees through any other registry
pub fn check_fee_layout(entries: &[RegistryEntry]) -> ProgramResult {
    let literal_at = |position: usize| match entries.get(position) {
        Some(RegistryEntry {
            address: EntryAddress::Literal(address),
            ..
        }) => Some(*address),
        _ => None,
    };
    let expected = match (
        literal_at(fee_layout::SECONDARY_MINT),
        literal_at(fee_layout::SECONDARY_TOKEN_PROGRAM),
    ) {
        (Some(secondary_mint), Some(secondary_token_program))
            if spl_token_2022::check_spl_token_program_account(&secondary_token_program)
                .is_ok() =>
        {
            fee_registry_entries(&secondary_mint, &secondary_token_program)
        }
        _ => {
            msg!("Registry must start with a secondary mint and its token program");
            return Err(TransferFeeHookError::Malformed.into());
        }
    };
    if entries.len() < fee_layout::LEN || entries[..fee_layout::LEN] != expected[..] {
        msg!(
            "Registry must start with the {} fee collection entries",
            fee_layout::LEN
        );
        return Err(TransferFeeHookError::Malformed.into());
    }
    Ok(())
}

/// Fee accounts picked out of the extra accounts of an `Execute` instruction
pub struct FeeAccounts<'a, 'info> {
    /// Secondary token mint
    pub secondary_mint: &'a AccountInfo<'info>,
    /// Token program owning the secondary mint
    pub secondary_token_program: &'a AccountInfo<'info>,
    /// Delegate authority
    pub delegate: &'a AccountInfo<'info>,
    /// Fee vault
    pub vault: &'a AccountInfo<'info>,
    /// Sender's secondary token account
    pub source_holding: &'a AccountInfo<'info>,
    /// Counter for the mint
    pub counter: &'a AccountInfo<'info>,
}
impl<'a, 'info> FeeAccounts<'a, 'info> {
    /// Picks the fee accounts out of `extra_account_infos` and checks that the
    /// derived ones are at their expected addresses
    pub fn load(
        program_id: &Pubkey,
        mint: &Pubkey,
        delegate_authority: &DelegateAuthority,
        extra_account_infos: &'a [AccountInfo<'info>],
    ) -> Result<Self, ProgramError> {
        if extra_account_infos.len() < fee_layout::LEN {
            msg!(
                "Registry has {} entries, fee collection needs at least {}",
                extra_account_infos.len(),
                fee_layout::LEN
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        let accounts = Self {
            secondary_mint: &extra_account_infos[fee_layout::SECONDARY_MINT],
            secondary_token_program: &extra_account_infos[fee_layout::SECONDARY_TOKEN_PROGRAM],
            delegate: &extra_account_infos[fee_layout::DELEGATE],
            vault: &extra_account_infos[fee_layout::VAULT],
            source_holding: &extra_account_infos[fee_layout::SOURCE_HOLDING],
            counter: &extra_account_infos[fee_layout::COUNTER],
        };

        if spl_token_2022::check_spl_token_program_account(accounts.secondary_token_program.key)
            .is_err()
        {
            msg!(
                "Secondary token program {} is not a token program",
                accounts.secondary_token_program.key
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        if accounts.delegate.key != delegate_authority.address() {
            msg!(
                "Expected delegate authority {}, received {}",
                delegate_authority.address(),
                accounts.delegate.key
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        let expected_vault = get_associated_token_address_with_program_id(
            delegate_authority.address(),
            accounts.secondary_mint.key,
            accounts.secondary_token_program.key,
        );
        if *accounts.vault.key != expected_vault {
            msg!(
                "Expected fee vault {}, received {}",
                expected_vault,
                accounts.vault.key
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        let expected_counter = get_counter_address(mint, program_id);
        if *accounts.counter.key != expected_counter {
            msg!(
                "Expected counter {}, received {}",
                expected_counter,
                accounts.counter.key
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        Ok(accounts)
    }
}

fn unpack_holding<'d>(
    account_info: &AccountInfo,
    data: &'d [u8],
    token_program: &Pubkey,
    mint: &Pubkey,
) -> Result<StateWithExtensions<'d, Account>, ProgramError> {
    if account_info.owner != token_program {
        msg!("Token account {} does not exist", account_info.key);
        return Err(TransferFeeHookError::ProvisioningError.into());
    }
    let holding = StateWithExtensions::<Account>::unpack(data)
        .map_err(|_| TransferFeeHookError::ProvisioningError)?;
    if holding.base.mint != *mint {
        msg!(
            "Token account {} is not for mint {}",
            account_info.key,
            mint
        );
        return Err(TransferFeeHookError::ProvisioningError.into());
    }
    Ok(holding)
}

/// Checks that `holding` has a standing approval to `delegate` covering `fee`
pub fn check_approval(holding: &Account, delegate: &Pubkey, fee: u64) -> ProgramResult {
    match holding.delegate {
        COption::Some(approved) if approved == *delegate => {
            if holding.delegated_amount < fee {
                msg!(
                    "Approval of {} does not cover fee of {}",
                    holding.delegated_amount,
                    fee
                );
                return Err(TransferFeeHookError::InsufficientApproval.into());
            }
            Ok(())
        }
        _ => {
            msg!("Delegate authority {} is not approved", delegate);
            Err(TransferFeeHookError::InsufficientApproval.into())
        }
    }
}

/// Moves `fee` from the sender's secondary token account into the vault,
/// signing as the delegate authority.
///
/// The secondary token account must belong to `authority`, the signer of the
/// transfer, which is either the source owner or its delegate.
pub fn debit_fee(
    accounts: &FeeAccounts,
    delegate_authority: &DelegateAuthority,
    authority: &Pubkey,
    fee: u64,
) -> ProgramResult {
    let token_program = accounts.secondary_token_program.key;

    // pull out these values in a block to drop all data before performing CPIs
    let decimals = {
        if accounts.secondary_mint.owner != token_program {
            msg!("Secondary mint {} does not exist", accounts.secondary_mint.key);
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        let mint_data = accounts.secondary_mint.try_borrow_data()?;
        let mint = StateWithExtensions::<Mint>::unpack(&mint_data)
            .map_err(|_| TransferFeeHookError::ProvisioningError)?;

        let vault_data = accounts.vault.try_borrow_data()?;
        let vault = unpack_holding(
            accounts.vault,
            &vault_data,
            token_program,
            accounts.secondary_mint.key,
        )?;
        if vault.base.owner != *delegate_authority.address() {
            msg!("Fee vault is not owned by the delegate authority");
            return Err(TransferFeeHookError::ProvisioningError.into());
        }

        let holding_data = accounts.source_holding.try_borrow_data()?;
        let holding = unpack_holding(
            accounts.source_holding,
            &holding_data,
            token_program,
            accounts.secondary_mint.key,
        )?;
        if holding.base.owner != *authority {
            msg!(
                "Secondary token account is owned by {}, expected transfer authority {}",
                holding.base.owner,
                authority
            );
            return Err(TransferFeeHookError::ProvisioningError.into());
        }
        check_approval(&holding.base, delegate_authority.address(), fee)?;

        mint.base.decimals
    };

    let ix = spl_token_2022::instruction::transfer_checked(
        token_program,
        accounts.source_holding.key,
        accounts.secondary_mint.key,
        accounts.vault.key,
        delegate_authority.address(),
        &[],
        fee,
        decimals,
    )?;
    invoke_signed(
        &ix,
        &[
            accounts.source_holding.clone(),
            accounts.secondary_mint.clone(),
            accounts.vault.clone(),
            accounts.delegate.clone(),
            accounts.secondary_token_program.clone(),
        ],
        &[&delegate_authority.signer_seeds()],
    )
}
