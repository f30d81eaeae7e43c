use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::rewards::PoolState;
use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const POOL: Symbol = symbol_short!("POOL");

// ~30 days / ~60 days at 5s ledgers.
pub(crate) const TTL_THRESHOLD: u32 = 518_400;
pub(crate) const TTL_EXTEND_TO: u32 = 1_036_800;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

/// Write the one-time configuration. Callers check `is_initialized` first.
pub fn init(env: &Env, admin: &Address, token: &Address, pool: &PoolState) {
    let instance = env.storage().instance();
    instance.set(&ADMIN, admin);
    instance.set(&TOKEN, token);
    instance.set(&POOL, pool);
    instance.set(&INITIALIZED, &true);
    extend_instance_ttl(env);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(ContractError::NotInitialized)
}

pub fn get_pool(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_pool(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&POOL, pool);
    extend_instance_ttl(env);
}
