#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod charge_core;
mod consent;
mod queries;
mod rates;
mod subscription;
mod token_ledger;
mod types;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String};

pub use token_ledger::{TokenLedger, TokenLedgerClient};
pub use types::{
    DueInfo, Error, PullPayment, RegistrationTerms, Signature, CENTS_DECIMALS, RATE_DECIMALS,
    TOKEN_DECIMALS,
};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PullPaymentEngine;

#[contractimpl]
impl PullPaymentEngine {
    // ── Admin / Config ───────────────────────────────────────────────────

    /// Initialize the engine: set the administrator and the token-ledger
    /// contract funds are pulled through. Callable once.
    pub fn init(env: Env, admin: Address, token_ledger: Address) -> Result<(), Error> {
        admin::do_init(&env, admin, token_ledger)
    }

    /// Get the current administrator address.
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::get_admin(&env)
    }

    /// Set the fixed-point exchange rate (scaled by `10^10`) for a fiat
    /// currency. Administrator only; a zero rate is rejected.
    pub fn set_rate(env: Env, admin: Address, currency: String, rate: u64) -> Result<(), Error> {
        rates::do_set_rate(&env, admin, currency, rate)
    }

    /// Read the rate for a currency; 0 when never set.
    pub fn get_rate(env: Env, currency: String) -> u64 {
        rates::get_rate(&env, &currency)
    }

    /// Allow-list an executor account. Administrator only; adding a present
    /// member fails.
    pub fn add_executor(env: Env, admin: Address, executor: Address) -> Result<(), Error> {
        admin::do_add_executor(&env, admin, executor)
    }

    /// Remove an executor account. Administrator only; removing a
    /// non-member is a no-op.
    pub fn remove_executor(env: Env, admin: Address, executor: Address) -> Result<(), Error> {
        admin::do_remove_executor(&env, admin, executor)
    }

    pub fn is_executor(env: Env, account: Address) -> bool {
        admin::is_executor(&env, &account)
    }

    // ── Pull-payment lifecycle ───────────────────────────────────────────

    /// Register a pull payment from client-signed terms, relayed by an
    /// executor.
    ///
    /// The detached signature must recover to `terms.client` over the
    /// canonical registration message; any tampered signed field fails with
    /// [`Error::ConsentMismatch`]. Overwrites any existing record for the
    /// (client, beneficiary) pair.
    pub fn register_pull_payment(
        env: Env,
        executor: Address,
        sig: Signature,
        terms: RegistrationTerms,
    ) -> Result<(), Error> {
        subscription::do_register(&env, executor, sig, terms)
    }

    /// Charge one payment for the record at (client, beneficiary) and pull
    /// the converted token amount through the ledger. Returns the token
    /// amount moved.
    ///
    /// A pending initial amount is collected first, regardless of the time
    /// gate. Otherwise one matured recurring period is collected per call;
    /// a caller behind by N periods calls N times.
    pub fn execute_pull_payment(
        env: Env,
        executor: Address,
        client: BytesN<20>,
        beneficiary: BytesN<20>,
        payment_id: String,
    ) -> Result<i128, Error> {
        charge_core::do_execute(&env, executor, client, beneficiary, payment_id)
    }

    /// Cancel the record at (client, beneficiary), with client consent over
    /// `(payment_id, beneficiary)`.
    ///
    /// Stamps `cancel_time` once; periods already matured at that stamp
    /// stay collectible through [`Self::execute_pull_payment`]. Cancelling
    /// an already-cancelled record fails.
    pub fn cancel_pull_payment(
        env: Env,
        executor: Address,
        sig: Signature,
        payment_id: String,
        client: BytesN<20>,
        beneficiary: BytesN<20>,
    ) -> Result<(), Error> {
        subscription::do_cancel(&env, executor, sig, payment_id, client, beneficiary)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Read the record for a (client, beneficiary) pair.
    pub fn get_pull_payment(
        env: Env,
        client: BytesN<20>,
        beneficiary: BytesN<20>,
    ) -> Result<PullPayment, Error> {
        queries::get_pull_payment(&env, &client, &beneficiary)
    }

    /// Next charge time and whether a charge is still expected.
    pub fn next_due(
        env: Env,
        client: BytesN<20>,
        beneficiary: BytesN<20>,
    ) -> Result<DueInfo, Error> {
        queries::next_due(&env, &client, &beneficiary)
    }
}
