//! Rate registry: administrator-writable, world-readable exchange rates.

use crate::admin;
use crate::types::{DataKey, Error};
use soroban_sdk::{Address, Env, String, Symbol};

/// Overwrite the fixed-point rate for `currency`. A zero rate is never a
/// valid quote, so it is rejected rather than stored.
pub fn do_set_rate(env: &Env, admin: Address, currency: String, rate: u64) -> Result<(), Error> {
    admin::require_admin(env, &admin)?;
    if rate == 0 {
        return Err(Error::InvalidRate);
    }
    env.storage()
        .persistent()
        .set(&DataKey::Rate(currency.clone()), &rate);
    env.events()
        .publish((Symbol::new(env, "rate_set"), currency), rate);
    Ok(())
}

/// Returns 0 when the currency has never been quoted. Conversion treats
/// that as fatal, never as a free rate.
pub fn get_rate(env: &Env, currency: &String) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Rate(currency.clone()))
        .unwrap_or(0)
}
