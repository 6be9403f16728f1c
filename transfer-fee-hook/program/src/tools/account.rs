//! Account utility functions

use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
};

/// Creates a program-owned account at a program-derived address for the given
/// seeds, topping up an address that was already funded
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    rent: &Rent,
    space: usize,
    owner: &Pubkey,
    system_program: &AccountInfo<'a>,
    new_pda_account: &AccountInfo<'a>,
    new_pda_signer_seeds: &[&[u8]],
) -> ProgramResult {
    let lamports = rent.minimum_balance(space).max(1);
    if new_pda_account.lamports() == 0 {
        return invoke_signed(
            &system_instruction::create_account(
                payer.key,
                new_pda_account.key,
                lamports,
                space as u64,
                owner,
            ),
            &[
                payer.clone(),
                new_pda_account.clone(),
                system_program.clone(),
            ],
            &[new_pda_signer_seeds],
        );
    }

    // create_account fails on funded addresses, so fund, allocate and assign
    // one step at a time
    let required_lamports = lamports.saturating_sub(new_pda_account.lamports());
    if required_lamports > 0 {
        invoke(
            &system_instruction::transfer(payer.key, new_pda_account.key, required_lamports),
            &[
                payer.clone(),
                new_pda_account.clone(),
                system_program.clone(),
            ],
        )?;
    }
    invoke_signed(
        &system_instruction::allocate(new_pda_account.key, space as u64),
        &[new_pda_account.clone(), system_program.clone()],
        &[new_pda_signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(new_pda_account.key, owner),
        &[new_pda_account.clone(), system_program.clone()],
        &[new_pda_signer_seeds],
    )
}
