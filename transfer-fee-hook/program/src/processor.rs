//! Program state processor

use {
    crate::{
        counter::{self, collect_counter_signer_seeds, get_counter_address_and_bump_seed, Counter},
        error::TransferFeeHookError,
        fee::fee_for_amount,
        get_registry_address, get_registry_address_and_bump_seed,
        instruction::TransferFeeHookInstruction,
        registry,
        resolver::{resolve_registry_data, TransferParams},
        tools::account::create_pda_account,
        vault::{check_fee_layout, debit_fee, DelegateAuthority, FeeAccounts},
    },
    solana_program::{
        account_info::{next_account_info, AccountInfo},
        entrypoint::ProgramResult,
        instruction::AccountMeta,
        msg,
        program_error::ProgramError,
        pubkey::Pubkey,
        rent::Rent,
        sysvar::Sysvar,
    },
    spl_tlv_account_resolution::account::ExtraAccountMeta,
    spl_token_2022::{
        extension::{
            transfer_hook::TransferHookAccount, BaseStateWithExtensions, StateWithExtensions,
        },
        state::{Account, Mint},
    },
    spl_transfer_hook_interface::collect_extra_account_metas_signer_seeds,
};

/// Checks that a token account of `mint` is owned by the token program and is
/// in the middle of a transfer
fn check_token_account_is_transferring(
    account_info: &AccountInfo,
    mint: &Pubkey,
) -> ProgramResult {
    if account_info.owner != &spl_token_2022::id() {
        msg!(
            "Token account {} is not owned by the token program",
            account_info.key
        );
        return Err(TransferFeeHookError::Unauthorized.into());
    }
    let account_data = account_info.try_borrow_data()?;
    let token_account = StateWithExtensions::<Account>::unpack(&account_data)
        .map_err(|_| TransferFeeHookError::Unauthorized)?;
    if token_account.base.mint != *mint {
        msg!(
            "Token account {} is for mint {}, not {}",
            account_info.key,
            token_account.base.mint,
            mint
        );
        return Err(TransferFeeHookError::Unauthorized.into());
    }
    let extension = token_account
        .get_extension::<TransferHookAccount>()
        .map_err(|_| TransferFeeHookError::Unauthorized)?;
    if bool::from(extension.transferring) {
        Ok(())
    } else {
        msg!("Token account {} is not transferring", account_info.key);
        Err(TransferFeeHookError::Unauthorized.into())
    }
}

/// Checks that the registry account is the one bound to the mint
fn check_asset_binding(
    program_id: &Pubkey,
    mint_info: &AccountInfo,
    registry_info: &AccountInfo,
) -> ProgramResult {
    #[cfg(feature = "forbid-additional-mints")]
    if *mint_info.key != crate::mint::id() {
        msg!("Mint {} is not served by this program", mint_info.key);
        return Err(TransferFeeHookError::Unauthorized.into());
    }

    let expected_registry_address = get_registry_address(mint_info.key, program_id);
    if expected_registry_address != *registry_info.key || registry_info.owner != program_id {
        msg!(
            "Expected registry {}, received {}",
            expected_registry_address,
            registry_info.key
        );
        return Err(TransferFeeHookError::Unauthorized.into());
    }
    Ok(())
}

/// Checks that the provided extra accounts are exactly the resolved ones, in
/// order, with at least the resolved privileges
fn check_extra_accounts(
    expected: &[AccountMeta],
    account_infos: &[AccountInfo],
) -> ProgramResult {
    if expected.len() != account_infos.len() {
        msg!(
            "Expected {} extra accounts, received {}",
            expected.len(),
            account_infos.len()
        );
        return Err(TransferFeeHookError::Malformed.into());
    }
    for (position, (meta, account_info)) in expected.iter().zip(account_infos).enumerate() {
        if meta.pubkey != *account_info.key {
            msg!(
                "Extra account {}: expected {}, received {}",
                position,
                meta.pubkey,
                account_info.key
            );
            return Err(TransferFeeHookError::Malformed.into());
        }
        if (meta.is_writable && !account_info.is_writable)
            || (meta.is_signer && !account_info.is_signer)
        {
            msg!("Extra account {} is missing a privilege", position);
            return Err(TransferFeeHookError::Malformed.into());
        }
    }
    Ok(())
}

/// Processes an [Execute](enum.TransferFeeHookInstruction.html) instruction.
pub fn process_execute(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let source_account_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let destination_account_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;
    let registry_info = next_account_info(account_info_iter)?;
    let extra_account_infos = account_info_iter.as_slice();

    // Only the token program, mid-transfer, may run the hook
    if mint_info.owner != &spl_token_2022::id() {
        msg!("Mint {} is not owned by the token program", mint_info.key);
        return Err(TransferFeeHookError::Unauthorized.into());
    }
    check_token_account_is_transferring(source_account_info, mint_info.key)?;
    check_token_account_is_transferring(destination_account_info, mint_info.key)?;

    check_asset_binding(program_id, mint_info, registry_info)?;

    let params = TransferParams {
        source: *source_account_info.key,
        mint: *mint_info.key,
        destination: *destination_account_info.key,
        authority: *authority_info.key,
        amount,
    };
    let expected = {
        let data = registry_info.try_borrow_data()?;
        resolve_registry_data(program_id, &params, &data)?
    };
    check_extra_accounts(&expected, extra_account_infos)?;

    let delegate_authority = DelegateAuthority::derive(program_id);
    let fee_accounts = FeeAccounts::load(
        program_id,
        mint_info.key,
        &delegate_authority,
        extra_account_infos,
    )?;

    match fee_for_amount(amount) {
        Some(fee) => {
            debit_fee(&fee_accounts, &delegate_authority, authority_info.key, fee)?;
            msg!("Collected fee of {}", fee);
        }
        None => msg!("No fee for a transfer of {}", amount),
    }

    let count = counter::increment(fee_accounts.counter, program_id)?;
    msg!("Transfer count: {}", count);

    Ok(())
}

/// Processes a [CreateRegistry](enum.TransferFeeHookInstruction.html)
/// instruction.
pub fn process_create_registry(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    extra_account_metas: &[ExtraAccountMeta],
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let registry_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let authority_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    // check that the one mint we want to target is trying to create a registry
    #[cfg(feature = "forbid-additional-mints")]
    if *mint_info.key != crate::mint::id() {
        msg!("Mint {} is not served by this program", mint_info.key);
        return Err(ProgramError::InvalidArgument);
    }

    // check that the mint authority is valid without fully deserializing
    {
        let mint_data = mint_info.try_borrow_data()?;
        let mint = StateWithExtensions::<Mint>::unpack(&mint_data)?;
        let mint_authority = mint
            .base
            .mint_authority
            .ok_or(TransferFeeHookError::MintHasNoMintAuthority)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }
        if *authority_info.key != mint_authority {
            return Err(TransferFeeHookError::IncorrectMintAuthority.into());
        }
    }

    let (expected_registry_address, bump_seed) =
        get_registry_address_and_bump_seed(mint_info.key, program_id);
    if expected_registry_address != *registry_info.key {
        return Err(ProgramError::InvalidSeeds);
    }
    if registry_info.owner == program_id
        || registry::is_initialized(&registry_info.try_borrow_data()?)
    {
        msg!("Registry {} already exists", registry_info.key);
        return Err(TransferFeeHookError::AlreadyInitialized.into());
    }

    let entries = registry::unpack_entries(extra_account_metas)?;
    check_fee_layout(&entries)?;

    let bump_seed = [bump_seed];
    let signer_seeds = collect_extra_account_metas_signer_seeds(mint_info.key, &bump_seed);
    create_pda_account(
        payer_info,
        &Rent::get()?,
        registry::registry_size(entries.len())?,
        program_id,
        system_program_info,
        registry_info,
        &signer_seeds,
    )?;

    let mut data = registry_info.try_borrow_mut_data()?;
    registry::create(&mut data, &entries)?;
    msg!("Registry created with {} entries", entries.len());

    Ok(())
}

/// Processes a [CreateCounter](enum.TransferFeeHookInstruction.html)
/// instruction.
pub fn process_create_counter(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let counter_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let payer_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    #[cfg(feature = "forbid-additional-mints")]
    if *mint_info.key != crate::mint::id() {
        msg!("Mint {} is not served by this program", mint_info.key);
        return Err(ProgramError::InvalidArgument);
    }

    if mint_info.owner != &spl_token_2022::id() {
        return Err(ProgramError::IncorrectProgramId);
    }

    let (expected_counter_address, bump_seed) =
        get_counter_address_and_bump_seed(mint_info.key, program_id);
    if expected_counter_address != *counter_info.key {
        return Err(ProgramError::InvalidSeeds);
    }
    if counter_info.owner == program_id {
        msg!("Counter {} already exists", counter_info.key);
        return Err(TransferFeeHookError::AlreadyInitialized.into());
    }

    let bump_seed = [bump_seed];
    let signer_seeds = collect_counter_signer_seeds(mint_info.key, &bump_seed);
    create_pda_account(
        payer_info,
        &Rent::get()?,
        Counter::LEN,
        program_id,
        system_program_info,
        counter_info,
        &signer_seeds,
    )
}

/// Processes an [Instruction](enum.Instruction.html).
pub fn process(program_id: &Pubkey, accounts: &[AccountInfo], input: &[u8]) -> ProgramResult {
    let instruction = TransferFeeHookInstruction::unpack(input)?;

    match instruction {
        TransferFeeHookInstruction::Execute { amount } => {
            msg!("Instruction: Execute");
            process_execute(program_id, accounts, amount)
        }
        TransferFeeHookInstruction::CreateRegistry {
            extra_account_metas,
        } => {
            msg!("Instruction: CreateRegistry");
            process_create_registry(program_id, accounts, &extra_account_metas)
        }
        TransferFeeHookInstruction::CreateCounter => {
            msg!("Instruction: CreateCounter");
            process_create_counter(program_id, accounts)
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            counter::get_counter_address,
            resolver::resolve,
            vault::{fee_layout, fee_registry_entries},
        },
        solana_program::{program_option::COption, program_pack::Pack, system_program},
        spl_pod::bytemuck::pod_from_bytes,
        spl_token_2022::{
            extension::{BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut},
            state::AccountState,
        },
    };

    const PROGRAM_ID: Pubkey = crate::ID;

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
        is_signer: bool,
        is_writable: bool,
    }
    impl TestAccount {
        fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
            Self {
                key,
                owner,
                lamports: 1_000_000_000,
                data,
                is_signer: false,
                is_writable: false,
            }
        }

        fn info(&mut self) -> AccountInfo {
            AccountInfo::new(
                &self.key,
                self.is_signer,
                self.is_writable,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn token_account_data(mint: &Pubkey, owner: &Pubkey, transferring: bool) -> Vec<u8> {
        let account_size = ExtensionType::try_calculate_account_len::<Account>(&[
            ExtensionType::TransferHookAccount,
        ])
        .unwrap();
        let mut account_data = vec![0; account_size];
        let mut state =
            StateWithExtensionsMut::<Account>::unpack_uninitialized(&mut account_data).unwrap();
        let extension = state.init_extension::<TransferHookAccount>(true).unwrap();
        extension.transferring = transferring.into();
        state.base = Account {
            mint: *mint,
            owner: *owner,
            amount: 1_000_000_000_000,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        };
        state.pack_base();
        state.init_account_type().unwrap();
        account_data
    }

    /// Accounts of an `Execute` instruction whose registry holds the fee
    /// layout, with everything but the secondary token accounts in place
    struct ExecuteSetup {
        accounts: Vec<TestAccount>,
    }
    impl ExecuteSetup {
        fn new(amount: u64) -> Self {
            let owner = Pubkey::new_unique();
            Self::with_authority(amount, owner, owner)
        }

        fn with_authority(amount: u64, owner: Pubkey, authority: Pubkey) -> Self {
            let mint = Pubkey::new_unique();
            let source = Pubkey::new_unique();
            let destination = Pubkey::new_unique();
            let secondary_mint = Pubkey::new_unique();

            let entries = fee_registry_entries(&secondary_mint, &spl_token_2022::id());
            let mut registry_data = vec![0; registry::registry_size(entries.len()).unwrap()];
            registry::create(&mut registry_data, &entries).unwrap();

            let params = TransferParams {
                source,
                mint,
                destination,
                authority,
                amount,
            };
            let extras = resolve(&PROGRAM_ID, &params, &entries).unwrap();

            let mut accounts = vec![
                TestAccount::new(
                    source,
                    spl_token_2022::id(),
                    token_account_data(&mint, &owner, true),
                ),
                TestAccount::new(mint, spl_token_2022::id(), vec![0; Mint::LEN]),
                TestAccount::new(
                    destination,
                    spl_token_2022::id(),
                    token_account_data(&mint, &Pubkey::new_unique(), true),
                ),
                TestAccount::new(authority, system_program::id(), vec![]),
                TestAccount::new(
                    get_registry_address(&mint, &PROGRAM_ID),
                    PROGRAM_ID,
                    registry_data,
                ),
            ];
            for meta in extras {
                let mut account = if meta.pubkey == get_counter_address(&mint, &PROGRAM_ID) {
                    TestAccount::new(meta.pubkey, PROGRAM_ID, vec![0; Counter::LEN])
                } else {
                    TestAccount::new(meta.pubkey, system_program::id(), vec![])
                };
                account.is_signer = meta.is_signer;
                account.is_writable = meta.is_writable;
                accounts.push(account);
            }
            Self { accounts }
        }

        /// Fills in the secondary mint, the vault, and a secondary token
        /// account owned by `holder` that approves `approved` to the delegate
        fn fund_fee_accounts(&mut self, holder: Pubkey, approved: u64) {
            let secondary_mint = self.extra(fee_layout::SECONDARY_MINT).key;
            let delegate = self.extra(fee_layout::DELEGATE).key;

            let mut mint_data = vec![0; Mint::LEN];
            Mint::pack(
                Mint {
                    mint_authority: COption::None,
                    supply: 1_000_000,
                    decimals: 6,
                    is_initialized: true,
                    freeze_authority: COption::None,
                },
                &mut mint_data,
            )
            .unwrap();
            let mint = self.extra(fee_layout::SECONDARY_MINT);
            mint.owner = spl_token_2022::id();
            mint.data = mint_data;

            let token_account = |owner: Pubkey, amount: u64, approved: u64| {
                let mut data = vec![0; Account::LEN];
                Account::pack(
                    Account {
                        mint: secondary_mint,
                        owner,
                        amount,
                        delegate: if approved > 0 {
                            COption::Some(delegate)
                        } else {
                            COption::None
                        },
                        state: AccountState::Initialized,
                        is_native: COption::None,
                        delegated_amount: approved,
                        close_authority: COption::None,
                    },
                    &mut data,
                )
                .unwrap();
                data
            };
            let vault = self.extra(fee_layout::VAULT);
            vault.owner = spl_token_2022::id();
            vault.data = token_account(delegate, 0, 0);
            let holding = self.extra(fee_layout::SOURCE_HOLDING);
            holding.owner = spl_token_2022::id();
            holding.data = token_account(holder, 1_000_000, approved);
        }

        fn extra(&mut self, position: usize) -> &mut TestAccount {
            &mut self.accounts[registry::EXECUTE_FIXED_ACCOUNTS as usize + position]
        }

        fn execute(&mut self, amount: u64) -> ProgramResult {
            let infos = self
                .accounts
                .iter_mut()
                .map(TestAccount::info)
                .collect::<Vec<_>>();
            process_execute(&PROGRAM_ID, &infos, amount)
        }

        fn count(&mut self) -> u64 {
            let counter = &self.extra(fee_layout::COUNTER).data;
            u64::from(pod_from_bytes::<Counter>(counter).unwrap().count)
        }
    }

    #[test]
    fn zero_amount_counts_without_fee() {
        let mut setup = ExecuteSetup::new(0);
        setup.execute(0).unwrap();
        assert_eq!(setup.count(), 1);
        setup.execute(0).unwrap();
        assert_eq!(setup.count(), 2);
    }

    #[test]
    fn token_accounts_of_another_mint_are_unauthorized() {
        let mut setup = ExecuteSetup::new(0);
        let other_mint = Pubkey::new_unique();
        let owner = setup.accounts[3].key;
        setup.accounts[0].data = token_account_data(&other_mint, &owner, true);
        setup.accounts[2].data = token_account_data(&other_mint, &Pubkey::new_unique(), true);
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );
        assert_eq!(setup.count(), 0);

        // one account of the right mint is not enough
        let mut setup = ExecuteSetup::new(0);
        setup.accounts[2].data = token_account_data(&other_mint, &Pubkey::new_unique(), true);
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn fee_is_charged_to_the_owner_signing() {
        let amount = 10;
        let mut setup = ExecuteSetup::new(amount);
        let owner = setup.accounts[3].key;
        setup.fund_fee_accounts(owner, amount);
        setup.execute(amount).unwrap();
        assert_eq!(setup.count(), 1);
    }

    #[test]
    fn fee_is_charged_to_the_delegate_signing() {
        let amount = 10;
        let owner = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();
        let mut setup = ExecuteSetup::with_authority(amount, owner, delegate);
        setup.fund_fee_accounts(delegate, amount);
        setup.execute(amount).unwrap();
        assert_eq!(setup.count(), 1);

        // the holding at the delegate's address must also belong to it
        let mut setup = ExecuteSetup::with_authority(amount, owner, delegate);
        setup.fund_fee_accounts(owner, amount);
        assert_eq!(
            setup.execute(amount).unwrap_err(),
            TransferFeeHookError::ProvisioningError.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn unapproved_fee_is_rejected() {
        let amount = 10;
        let mut setup = ExecuteSetup::new(amount);
        let owner = setup.accounts[3].key;
        setup.fund_fee_accounts(owner, amount - 1);
        assert_eq!(
            setup.execute(amount).unwrap_err(),
            TransferFeeHookError::InsufficientApproval.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn not_transferring_is_unauthorized() {
        let mut setup = ExecuteSetup::new(0);
        let mint = setup.accounts[1].key;
        let owner = setup.accounts[3].key;
        setup.accounts[0].data = token_account_data(&mint, &owner, false);
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn accounts_outside_token_program_are_unauthorized() {
        let mut setup = ExecuteSetup::new(0);
        setup.accounts[2].owner = Pubkey::new_unique();
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );

        let mut setup = ExecuteSetup::new(0);
        setup.accounts[1].owner = Pubkey::new_unique();
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn registry_of_another_mint_is_unauthorized() {
        let mut setup = ExecuteSetup::new(0);
        setup.accounts[4].key = get_registry_address(&Pubkey::new_unique(), &PROGRAM_ID);
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );

        let mut setup = ExecuteSetup::new(0);
        setup.accounts[4].owner = system_program::id();
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Unauthorized.into()
        );
    }

    #[test]
    fn mismatched_extra_accounts_are_malformed() {
        // wrong address
        let mut setup = ExecuteSetup::new(0);
        setup.extra(fee_layout::VAULT).key = Pubkey::new_unique();
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Malformed.into()
        );

        // missing account
        let mut setup = ExecuteSetup::new(0);
        setup.accounts.pop();
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Malformed.into()
        );

        // additional account
        let mut setup = ExecuteSetup::new(0);
        setup.accounts.push(TestAccount::new(
            Pubkey::new_unique(),
            system_program::id(),
            vec![],
        ));
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Malformed.into()
        );

        // swapped order
        let mut setup = ExecuteSetup::new(0);
        let first = registry::EXECUTE_FIXED_ACCOUNTS as usize;
        setup.accounts.swap(first, first + 1);
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Malformed.into()
        );

        // readonly where the registry asks for writable
        let mut setup = ExecuteSetup::new(0);
        setup.extra(fee_layout::SOURCE_HOLDING).is_writable = false;
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::Malformed.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn amount_changes_nothing_for_the_fee_layout() {
        // the fee layout has no amount-seeded entry, so the same accounts
        // are valid for any amount
        let mut setup = ExecuteSetup::new(5);
        setup.execute(0).unwrap();
        assert_eq!(setup.count(), 1);
    }

    #[test]
    fn missing_secondary_accounts_are_not_provisioned() {
        let mut setup = ExecuteSetup::new(10);
        assert_eq!(
            setup.execute(10).unwrap_err(),
            TransferFeeHookError::ProvisioningError.into()
        );
        assert_eq!(setup.count(), 0);
    }

    #[test]
    fn uninitialized_counter_is_not_provisioned() {
        let mut setup = ExecuteSetup::new(0);
        let counter = setup.extra(fee_layout::COUNTER);
        counter.owner = system_program::id();
        counter.data = vec![];
        assert_eq!(
            setup.execute(0).unwrap_err(),
            TransferFeeHookError::ProvisioningError.into()
        );
    }

    #[cfg(feature = "forbid-additional-mints")]
    #[test]
    fn other_mints_cannot_create_accounts() {
        let mint = Pubkey::new_unique();
        let mut mint_account = TestAccount::new(mint, spl_token_2022::id(), vec![0; Mint::LEN]);
        let mut authority = TestAccount::new(Pubkey::new_unique(), system_program::id(), vec![]);
        authority.is_signer = true;
        let mut payer = TestAccount::new(Pubkey::new_unique(), system_program::id(), vec![]);
        let mut system = TestAccount::new(system_program::id(), Pubkey::default(), vec![]);

        let mut registry = TestAccount::new(
            get_registry_address(&mint, &PROGRAM_ID),
            system_program::id(),
            vec![],
        );
        let infos = [
            registry.info(),
            mint_account.info(),
            authority.info(),
            payer.info(),
            system.info(),
        ];
        assert_eq!(
            process_create_registry(&PROGRAM_ID, &infos, &[]),
            Err(ProgramError::InvalidArgument)
        );
        drop(infos);

        let mut counter = TestAccount::new(
            get_counter_address(&mint, &PROGRAM_ID),
            system_program::id(),
            vec![],
        );
        let infos = [
            counter.info(),
            mint_account.info(),
            payer.info(),
            system.info(),
        ];
        assert_eq!(
            process_create_counter(&PROGRAM_ID, &infos),
            Err(ProgramError::InvalidArgument)
        );
    }
}
