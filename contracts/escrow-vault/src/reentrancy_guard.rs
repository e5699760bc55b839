//! Reentrancy guard for vault fund movements.
//!
//! The flag lives in instance storage under `DataKey::ReentrancyGuard`. Soroban rolls
//! back all state when an invocation returns `Err` or panics, so the flag cannot get
//! permanently stuck.

use soroban_sdk::Env;

use crate::types::{DataKey, Error};

/// Acquire the guard, failing with `ReentrantCall` if it is already held.
pub fn acquire(env: &Env) -> Result<(), Error> {
    let entered: bool = env
        .storage()
        .instance()
        .get(&DataKey::ReentrancyGuard)
        .unwrap_or(false);
    if entered {
        return Err(Error::ReentrantCall);
    }
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &true);
    Ok(())
}

pub fn release(env: &Env) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &false);
}

#[cfg(test)]
pub fn is_held(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::ReentrancyGuard)
        .unwrap_or(false)
}
