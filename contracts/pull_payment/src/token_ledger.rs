//! Client interface of the external token ledger.
//!
//! The ledger holds client balances keyed by 20-byte account ids and is the
//! only component that moves funds. The engine is initialized with the
//! ledger contract's address and only ever pulls from client to beneficiary
//! against an allowance the client granted out of band; it never holds a
//! balance itself.

use soroban_sdk::{contractclient, BytesN, Env};

#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedger {
    /// Pull `amount` from `owner` to `recipient` against a prior allowance.
    /// Returns false (moving nothing) when the balance or allowance is short.
    fn transfer_from(env: Env, owner: BytesN<20>, recipient: BytesN<20>, amount: i128) -> bool;

    fn balance_of(env: Env, account: BytesN<20>) -> i128;
}
