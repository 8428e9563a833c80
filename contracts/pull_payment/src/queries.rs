//! Read-only views.

use crate::subscription;
use crate::types::{DueInfo, Error, PullPayment};
use soroban_sdk::{BytesN, Env};

pub fn get_pull_payment(
    env: &Env,
    client: &BytesN<20>,
    beneficiary: &BytesN<20>,
) -> Result<PullPayment, Error> {
    subscription::load(env, client, beneficiary)
}

/// When the record is next chargeable, and whether a charge is expected at
/// all. A pending initial amount means a charge is always expected; an
/// exhausted record never charges again; a cancelled record only while a
/// matured period remains.
pub fn next_due(env: &Env, client: &BytesN<20>, beneficiary: &BytesN<20>) -> Result<DueInfo, Error> {
    let record = subscription::load(env, client, beneficiary)?;
    let expected = if record.initial_amount_cents > 0 {
        true
    } else if record.remaining_payments == 0 {
        false
    } else if record.cancel_time != 0 && record.next_payment_time > record.cancel_time {
        false
    } else {
        true
    };
    Ok(DueInfo {
        next_payment_time: record.next_payment_time,
        is_charge_expected: expected,
    })
}
