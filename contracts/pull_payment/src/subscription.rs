//! Pull-payment lifecycle: register, cancel.
//!
//! **PRs that only change registration or cancellation should edit this
//! file only.**

use crate::types::{DataKey, Error, PullPayment, RegistrationTerms, Signature};
use crate::{admin, consent};
use soroban_sdk::{Address, BytesN, Env, String, Symbol};

pub fn load(env: &Env, client: &BytesN<20>, beneficiary: &BytesN<20>) -> Result<PullPayment, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Payment(client.clone(), beneficiary.clone()))
        .ok_or(Error::NotFound)
}

pub fn store(env: &Env, client: &BytesN<20>, beneficiary: &BytesN<20>, record: &PullPayment) {
    env.storage()
        .persistent()
        .set(&DataKey::Payment(client.clone(), beneficiary.clone()), record);
}

/// Register a pull payment on behalf of a client who signed the terms
/// off-device.
///
/// The signature is recomputed over the supplied terms, so any tampered
/// field fails the signer-equality check with [`Error::ConsentMismatch`].
/// An existing record for the (client, beneficiary) pair — active or
/// cancelled — is replaced wholesale.
pub fn do_register(
    env: &Env,
    executor: Address,
    sig: Signature,
    terms: RegistrationTerms,
) -> Result<(), Error> {
    admin::require_executor(env, &executor)?;

    let digest = consent::registration_digest(env, &terms)?;
    let signer = consent::recover_signer(env, &digest, &sig)?;
    if signer != terms.client {
        return Err(Error::ConsentMismatch);
    }

    validate_terms(env, &terms)?;

    let record = PullPayment {
        merchant_id: terms.merchant_id,
        payment_id: terms.payment_id.clone(),
        currency: terms.currency,
        initial_amount_cents: terms.initial_amount_cents,
        recurring_amount_cents: terms.recurring_amount_cents,
        frequency_seconds: terms.frequency_seconds,
        remaining_payments: terms.remaining_payments,
        start_time: terms.start_time,
        next_payment_time: terms.start_time,
        last_payment_time: 0,
        cancel_time: 0,
    };
    store(env, &terms.client, &terms.beneficiary, &record);

    env.events().publish(
        (Symbol::new(env, "registered"), terms.client, terms.beneficiary),
        terms.payment_id,
    );
    Ok(())
}

/// Stamp `cancel_time` on the record for (client, beneficiary).
///
/// Cancellation requires the same consent path as registration, over the
/// `(payment_id, beneficiary)` message. The supplied payment id must match
/// the stored registration exactly, and an already-cancelled record cannot
/// be cancelled again. Periods that matured before the stamp stay
/// collectible; see the charge path.
pub fn do_cancel(
    env: &Env,
    executor: Address,
    sig: Signature,
    payment_id: String,
    client: BytesN<20>,
    beneficiary: BytesN<20>,
) -> Result<(), Error> {
    admin::require_executor(env, &executor)?;

    let digest = consent::cancellation_digest(env, &payment_id, &beneficiary)?;
    let signer = consent::recover_signer(env, &digest, &sig)?;
    if signer != client {
        return Err(Error::ConsentMismatch);
    }

    let mut record = load(env, &client, &beneficiary)?;
    if record.payment_id != payment_id {
        return Err(Error::IdMismatch);
    }
    if record.cancel_time != 0 {
        return Err(Error::AlreadyCancelled);
    }
    record.cancel_time = env.ledger().timestamp();
    store(env, &client, &beneficiary, &record);

    env.events().publish(
        (Symbol::new(env, "cancelled"), client, beneficiary),
        payment_id,
    );
    Ok(())
}

fn validate_terms(env: &Env, terms: &RegistrationTerms) -> Result<(), Error> {
    let null_id = BytesN::from_array(env, &[0u8; 20]);
    if terms.client == null_id || terms.beneficiary == null_id {
        return Err(Error::InvalidTerms);
    }
    if terms.frequency_seconds == 0 || terms.remaining_payments == 0 {
        return Err(Error::InvalidTerms);
    }
    Ok(())
}
