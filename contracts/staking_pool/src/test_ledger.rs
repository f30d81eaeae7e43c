use core::cell::{Cell, RefCell};

use soroban_sdk::{Address, Env, Map};

use crate::ledger::TokenLedger;
use crate::ContractError;

/// In-memory token ledger with a single pool account.
pub struct FakeLedger {
    balances: RefCell<Map<Address, i128>>,
    pool: Cell<i128>,
    failing: Cell<bool>,
}

impl FakeLedger {
    pub fn new(env: &Env) -> Self {
        FakeLedger {
            balances: RefCell::new(Map::new(env)),
            pool: Cell::new(0),
            failing: Cell::new(false),
        }
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        let current = self.balance(to);
        self.balances.borrow_mut().set(to.clone(), current + amount);
    }

    pub fn balance(&self, who: &Address) -> i128 {
        self.balances.borrow().get(who.clone()).unwrap_or(0)
    }

    pub fn pool_balance(&self) -> i128 {
        self.pool.get()
    }

    /// Make every subsequent transfer fail.
    pub fn fail_transfers(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl TokenLedger for FakeLedger {
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), ContractError> {
        let balance = self.balance(from);
        if self.failing.get() || balance < amount {
            return Err(ContractError::TransferFailed);
        }
        self.balances
            .borrow_mut()
            .set(from.clone(), balance - amount);
        self.pool.set(self.pool.get() + amount);
        Ok(())
    }

    fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), ContractError> {
        if self.failing.get() || self.pool.get() < amount {
            return Err(ContractError::TransferFailed);
        }
        self.pool.set(self.pool.get() - amount);
        let balance = self.balance(to);
        self.balances.borrow_mut().set(to.clone(), balance + amount);
        Ok(())
    }
}
