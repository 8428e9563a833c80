//! Single charge logic: the time-gated billing state transition and the
//! fiat→token conversion behind it.
//!
//! **PRs that only change how one payment is charged should edit this file
//! only.**

use crate::token_ledger::TokenLedgerClient;
use crate::types::{Error, CONVERSION_SCALE};
use crate::{admin, rates, subscription};
use soroban_sdk::{Address, BytesN, Env, String, Symbol, U256};

/// Charge one payment for the record at (client, beneficiary).
///
/// A pending initial amount is collected first and bypasses the time gate
/// entirely; it never touches the recurring clock or counter. Otherwise one
/// recurring period is collected: the record must have payments remaining,
/// the period must have matured, and a cancelled record only pays out
/// periods that had already matured at cancellation time. Each successful
/// recurring charge advances `next_payment_time` by exactly one period, so
/// a caller that is N periods behind collects them with N calls.
///
/// The ledger transfer is the last fallible step; the record is only
/// written after the ledger reports success, so a failed call leaves
/// stored state untouched.
pub fn do_execute(
    env: &Env,
    executor: Address,
    client: BytesN<20>,
    beneficiary: BytesN<20>,
    payment_id: String,
) -> Result<i128, Error> {
    admin::require_executor(env, &executor)?;

    let mut record = subscription::load(env, &client, &beneficiary)?;
    if record.payment_id != payment_id {
        return Err(Error::NotFound);
    }

    let now = env.ledger().timestamp();
    let amount;
    if record.initial_amount_cents > 0 {
        amount = convert(env, record.initial_amount_cents, &record.currency)?;
        transfer(env, &client, &beneficiary, amount)?;
        record.initial_amount_cents = 0;
        record.last_payment_time = now;
    } else {
        if record.remaining_payments == 0 {
            return Err(Error::PaymentsExhausted);
        }
        if now < record.next_payment_time {
            return Err(Error::NotYetDue);
        }
        if record.cancel_time != 0 && record.next_payment_time > record.cancel_time {
            return Err(Error::CancelledNothingDue);
        }
        amount = convert(env, record.recurring_amount_cents, &record.currency)?;
        transfer(env, &client, &beneficiary, amount)?;
        record.last_payment_time = now;
        record.remaining_payments -= 1;
        record.next_payment_time = record
            .next_payment_time
            .checked_add(record.frequency_seconds)
            .ok_or(Error::AmountOverflow)?;
    }
    subscription::store(env, &client, &beneficiary, &record);

    env.events().publish(
        (Symbol::new(env, "executed"), client, beneficiary),
        (payment_id, amount),
    );
    Ok(amount)
}

/// Convert fiat cents into token units at the registry rate:
/// `cents * 10^26 / rate`, truncating.
///
/// The intermediate `cents * 10^26` overflows u128 for large cent volumes,
/// so the multiply and divide run over 256-bit host integers.
pub fn convert(env: &Env, amount_cents: u64, currency: &String) -> Result<i128, Error> {
    let rate = rates::get_rate(env, currency);
    if rate == 0 {
        return Err(Error::RateNotSet);
    }
    let scaled = U256::from_u128(env, amount_cents as u128)
        .mul(&U256::from_u128(env, CONVERSION_SCALE));
    let tokens = scaled.div(&U256::from_u128(env, rate as u128));
    let raw = tokens.to_u128().ok_or(Error::AmountOverflow)?;
    i128::try_from(raw).map_err(|_| Error::AmountOverflow)
}

fn transfer(env: &Env, from: &BytesN<20>, to: &BytesN<20>, amount: i128) -> Result<(), Error> {
    let ledger = admin::token_ledger(env)?;
    let ok = TokenLedgerClient::new(env, &ledger).transfer_from(from, to, &amount);
    if !ok {
        return Err(Error::TransferFailed);
    }
    Ok(())
}
