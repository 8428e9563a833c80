//! Admin and config: init, administrator checks, executor allow-list.
//!
//! **PRs that only change admin or executor-set behavior should edit this
//! file only.**

use crate::types::{DataKey, Error};
use soroban_sdk::{Address, Env};

pub fn do_init(env: &Env, admin: Address, token_ledger: Address) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&DataKey::Admin, &admin);
    env.storage()
        .instance()
        .set(&DataKey::TokenLedger, &token_ledger);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn token_ledger(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::TokenLedger)
        .ok_or(Error::NotInitialized)
}

/// Authenticate `caller` and require it to be the stored administrator.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let stored = get_admin(env)?;
    if *caller != stored {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Authenticate `caller` and require current executor-set membership.
pub fn require_executor(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_executor(env, caller) {
        return Err(Error::NotExecutor);
    }
    Ok(())
}

pub fn is_executor(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Executor(account.clone()))
        .unwrap_or(false)
}

/// Adding a present member fails with [`Error::ExecutorExists`].
pub fn do_add_executor(env: &Env, admin: Address, executor: Address) -> Result<(), Error> {
    require_admin(env, &admin)?;
    if is_executor(env, &executor) {
        return Err(Error::ExecutorExists);
    }
    env.storage()
        .persistent()
        .set(&DataKey::Executor(executor), &true);
    Ok(())
}

/// Removing a non-member is a no-op.
pub fn do_remove_executor(env: &Env, admin: Address, executor: Address) -> Result<(), Error> {
    require_admin(env, &admin)?;
    env.storage()
        .persistent()
        .remove(&DataKey::Executor(executor));
    Ok(())
}
