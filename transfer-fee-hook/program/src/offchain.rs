//! Offchain helpers for planning transfers of a hooked mint

pub use spl_tlv_account_resolution::state::{AccountDataResult, AccountFetchError};
use {
    crate::{
        error::TransferFeeHookError,
        get_registry_address,
        registry::{self, RegistryEntry},
        resolver::{resolve, TransferParams},
    },
    solana_program::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
    },
    std::future::Future,
};

/// Fetches the ordered registry entries of a mint.
///
/// Fails with `NotFound` if no registry exists for the mint.
pub async fn read_registry<F, Fut>(
    program_id: &Pubkey,
    mint_pubkey: &Pubkey,
    fetch_account_data_fn: F,
) -> Result<Vec<RegistryEntry>, AccountFetchError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = AccountDataResult>,
{
    let registry_pubkey = get_registry_address(mint_pubkey, program_id);
    let registry_data = fetch_account_data_fn(registry_pubkey)
        .await?
        .ok_or(TransferFeeHookError::NotFound)?;
    Ok(registry::read(&registry_data)?)
}

/// Fetches the registry for `params.mint` and resolves the extra accounts the
/// hook expects for this transfer, in order.
pub async fn resolve_extra_account_metas<F, Fut>(
    program_id: &Pubkey,
    params: &TransferParams,
    fetch_account_data_fn: F,
) -> Result<Vec<AccountMeta>, AccountFetchError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = AccountDataResult>,
{
    let entries = read_registry(program_id, &params.mint, fetch_account_data_fn).await?;
    Ok(resolve(program_id, params, &entries)?)
}

/// Offchain helper to add everything the hook needs to a token transfer
/// instruction: the resolved extra accounts, then the hook program id, then
/// the registry account.
///
/// The instruction must already contain the source, mint, destination and
/// authority of the transfer.
///
/// Like the transfer hook interface helpers, this takes a function that
/// returns account data for an address, so any client can be used:
///
/// ```rust,ignore
/// add_extra_account_metas_for_transfer(
///     &mut instruction,
///     &program_id,
///     &params,
///     |address| self.client.get_account(&address).map_ok(|opt| opt.map(|acc| acc.data)),
/// )
/// .await?;
/// ```
pub async fn add_extra_account_metas_for_transfer<F, Fut>(
    instruction: &mut Instruction,
    program_id: &Pubkey,
    params: &TransferParams,
    fetch_account_data_fn: F,
) -> Result<(), AccountFetchError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = AccountDataResult>,
{
    if [
        &params.source,
        &params.mint,
        &params.destination,
        &params.authority,
    ]
    .iter()
    .any(|&key| !instruction.accounts.iter().any(|meta| meta.pubkey == *key))
    {
        Err(TransferFeeHookError::Malformed)?;
    }

    let extra_account_metas =
        resolve_extra_account_metas(program_id, params, fetch_account_data_fn).await?;
    instruction.accounts.extend(extra_account_metas);

    instruction
        .accounts
        .push(AccountMeta::new_readonly(*program_id, false));
    instruction.accounts.push(AccountMeta::new_readonly(
        get_registry_address(&params.mint, program_id),
        false,
    ));

    Ok(())
}
