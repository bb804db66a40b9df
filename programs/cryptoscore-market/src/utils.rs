use anchor_lang::prelude::*;

use crate::errors::MarketError;

/// Lamports a program-owned account can give away without dropping below
/// its rent-exempt reserve.
pub fn spendable(lamports: u64, rent_floor: u64) -> u64 {
    lamports.saturating_sub(rent_floor)
}

/// Move `amount` lamports out of a program-owned account, reading its rent
/// reserve from the `Rent` sysvar.
pub fn pay_out<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let rent_floor = Rent::get()?.minimum_balance(from.data_len());
    move_lamports(from, to, amount, rent_floor)
}

/// Debit `from` and credit `to` by `amount`, never taking `from` below
/// `rent_floor`. Anything beyond what it can spare is an accounting bug
/// and fails without touching either balance.
pub fn move_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
    rent_floor: u64,
) -> Result<()> {
    require!(
        amount <= spendable(from.lamports(), rent_floor),
        MarketError::InsufficientMarketBalance
    );

    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(MarketError::Underflow)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(MarketError::Overflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}
