use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// The token movements the pool needs from the external asset contract.
///
/// Both calls are fallible; a failure must leave the pool free to discard
/// its pending state changes.
pub trait TokenLedger {
    /// Pull `amount` from `from` into the pool.
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), ContractError>;

    /// Push `amount` from the pool to `to`.
    fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), ContractError>;
}

/// [`TokenLedger`] over a Soroban token contract, with the current contract
/// as the pool account.
pub struct TokenClientLedger<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> TokenClientLedger<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        TokenClientLedger {
            env,
            client: token::Client::new(env, token),
        }
    }

    fn transfer(&self, from: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
        match self.client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "token transfer rejected", from.clone(), to.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }
}

impl TokenLedger for TokenClientLedger<'_> {
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), ContractError> {
        let pool = self.env.current_contract_address();
        self.transfer(from, &pool, amount)
    }

    fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), ContractError> {
        let pool = self.env.current_contract_address();
        self.transfer(&pool, to, amount)
    }
}
