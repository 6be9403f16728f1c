//! Fee schedule applied to every hooked transfer

/// Fee charged in the secondary token, in basis points of the transferred
/// amount. At 10_000 one secondary base unit is charged per transferred base
/// unit.
pub const FEE_BASIS_POINTS: u16 = 10_000;

/// Denominator for `FEE_BASIS_POINTS`
pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

/// Fee to debit for a transfer of `amount`, or `None` if nothing should be
/// debited.
///
/// A zero-amount transfer is still an accepted hook invocation, so the
/// counter moves, but no fee is taken.
pub fn fee_for_amount(amount: u64) -> Option<u64> {
    if amount == 0 {
        return None;
    }
    let fee = (amount as u128)
        .checked_mul(FEE_BASIS_POINTS as u128)?
        .checked_div(MAX_FEE_BASIS_POINTS as u128)?;
    // fee <= amount since FEE_BASIS_POINTS <= MAX_FEE_BASIS_POINTS
    let fee = u64::try_from(fee).ok()?;
    (fee > 0).then_some(fee)
}
