//! Instruction types

use {
    crate::registry::{pack_entries, RegistryEntry},
    solana_program::{
        instruction::{AccountMeta, Instruction},
        program_error::ProgramError,
        pubkey::Pubkey,
        system_program,
    },
    spl_discriminator::{ArrayDiscriminator, SplDiscriminate},
    spl_pod::{bytemuck::pod_slice_to_bytes, slice::PodSlice},
    spl_tlv_account_resolution::account::ExtraAccountMeta,
    spl_transfer_hook_interface::instruction::ExecuteInstruction,
    std::convert::TryInto,
};

/// Instructions supported by the transfer fee hook program.
#[repr(C)]
#[derive(Clone, Debug, PartialEq)]
pub enum TransferFeeHookInstruction {
    /// Runs the hook for a transfer. Only succeeds when invoked by the token
    /// program during a transfer.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[]` Source account
    ///   1. `[]` Token mint
    ///   2. `[]` Destination account
    ///   3. `[]` Source account's owner/delegate
    ///   4. `[]` Registry account
    ///   5..5+M `[]` `M` additional accounts, resolved from the registry
    Execute {
        /// Amount of tokens to transfer
        amount: u64,
    },

    /// Creates the registry of extra accounts for a mint. The list can never
    /// be changed afterwards, and must start with the fee collection entries
    /// from `vault::fee_registry_entries`.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[w]` Registry account
    ///   1. `[]` Mint
    ///   2. `[s]` Mint authority
    ///   3. `[ws]` Payer
    ///   4. `[]` System program
    CreateRegistry {
        /// Ordered list of `ExtraAccountMeta`s to write into the registry
        extra_account_metas: Vec<ExtraAccountMeta>,
    },

    /// Creates the transfer counter for a mint, starting at zero.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[w]` Counter account
    ///   1. `[]` Mint
    ///   2. `[ws]` Payer
    ///   3. `[]` System program
    CreateCounter,
}

/// Instruction type used to define the `CreateRegistry` discriminator
#[derive(SplDiscriminate)]
#[discriminator_hash_input("spl-transfer-fee-hook:create-registry")]
pub struct CreateRegistryInstruction;

/// Instruction type used to define the `CreateCounter` discriminator
#[derive(SplDiscriminate)]
#[discriminator_hash_input("spl-transfer-fee-hook:create-counter")]
pub struct CreateCounterInstruction;

impl TransferFeeHookInstruction {
    /// Unpacks a byte buffer into a
    /// [TransferFeeHookInstruction](enum.TransferFeeHookInstruction.html).
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < ArrayDiscriminator::LENGTH {
            return Err(ProgramError::InvalidInstructionData);
        }
        let (discriminator, rest) = input.split_at(ArrayDiscriminator::LENGTH);
        Ok(match discriminator {
            ExecuteInstruction::SPL_DISCRIMINATOR_SLICE => {
                let amount = rest
                    .get(..8)
                    .and_then(|slice| slice.try_into().ok())
                    .map(u64::from_le_bytes)
                    .ok_or(ProgramError::InvalidInstructionData)?;
                Self::Execute { amount }
            }
            CreateRegistryInstruction::SPL_DISCRIMINATOR_SLICE => {
                let pod_slice = PodSlice::<ExtraAccountMeta>::unpack(rest)?;
                let extra_account_metas = pod_slice.data().to_vec();
                Self::CreateRegistry {
                    extra_account_metas,
                }
            }
            CreateCounterInstruction::SPL_DISCRIMINATOR_SLICE => Self::CreateCounter,
            _ => return Err(ProgramError::InvalidInstructionData),
        })
    }

    /// Packs a [TransferFeeHookInstruction](enum.TransferFeeHookInstruction.html)
    /// into a byte buffer.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = vec![];
        match self {
            Self::Execute { amount } => {
                buf.extend_from_slice(ExecuteInstruction::SPL_DISCRIMINATOR_SLICE);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            Self::CreateRegistry {
                extra_account_metas,
            } => {
                buf.extend_from_slice(CreateRegistryInstruction::SPL_DISCRIMINATOR_SLICE);
                buf.extend_from_slice(&(extra_account_metas.len() as u32).to_le_bytes());
                buf.extend_from_slice(pod_slice_to_bytes(extra_account_metas));
            }
            Self::CreateCounter => {
                buf.extend_from_slice(CreateCounterInstruction::SPL_DISCRIMINATOR_SLICE);
            }
        };
        buf
    }
}

/// Creates a `CreateRegistry` instruction.
pub fn create_registry(
    program_id: &Pubkey,
    registry_pubkey: &Pubkey,
    mint_pubkey: &Pubkey,
    mint_authority_pubkey: &Pubkey,
    payer_pubkey: &Pubkey,
    entries: &[RegistryEntry],
) -> Result<Instruction, ProgramError> {
    let data = TransferFeeHookInstruction::CreateRegistry {
        extra_account_metas: pack_entries(entries)?,
    }
    .pack();

    let accounts = vec![
        AccountMeta::new(*registry_pubkey, false),
        AccountMeta::new_readonly(*mint_pubkey, false),
        AccountMeta::new_readonly(*mint_authority_pubkey, true),
        AccountMeta::new(*payer_pubkey, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Creates a `CreateCounter` instruction.
pub fn create_counter(
    program_id: &Pubkey,
    counter_pubkey: &Pubkey,
    mint_pubkey: &Pubkey,
    payer_pubkey: &Pubkey,
) -> Instruction {
    let data = TransferFeeHookInstruction::CreateCounter.pack();

    let accounts = vec![
        AccountMeta::new(*counter_pubkey, false),
        AccountMeta::new_readonly(*mint_pubkey, false),
        AccountMeta::new(*payer_pubkey, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data,
    }
}
