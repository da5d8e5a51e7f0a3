use core::cell::RefCell;
use core::fmt::Debug;

use soroban_sdk::{Env, IntoVal, Map, TryFromVal, Val};

use crate::errors::ContractError;
use crate::group::GroupRegistry;
use crate::storage::{StorageKey, Store};

/// In-memory `Store` that needs no deployed contract.
pub struct MemoryStore {
    env: Env,
    entries: RefCell<Map<StorageKey, Val>>,
}

impl MemoryStore {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            entries: RefCell::new(Map::new(env)),
        }
    }

    pub fn remove(&self, key: &StorageKey) {
        self.entries.borrow_mut().remove(key.clone());
    }
}

impl Store for MemoryStore {
    fn has(&self, key: &StorageKey) -> bool {
        self.entries.borrow().contains_key(key.clone())
    }

    fn get<V>(&self, key: &StorageKey) -> Option<V>
    where
        V: TryFromVal<Env, Val>,
        V::Error: Debug,
    {
        let value = self.entries.borrow().get(key.clone())?;
        Some(V::try_from_val(&self.env, &value).expect("stored value has another type"))
    }

    fn set<V>(&self, key: &StorageKey, value: &V)
    where
        V: IntoVal<Env, Val>,
    {
        let value: Val = value.into_val(&self.env);
        self.entries.borrow_mut().set(key.clone(), value);
    }
}

/// Registry that knows exactly one group.
pub struct StaticRegistry {
    group_id: u64,
    contribution_amount: i128,
    member_count: u32,
}

impl StaticRegistry {
    pub fn new(group_id: u64, contribution_amount: i128, member_count: u32) -> Self {
        Self {
            group_id,
            contribution_amount,
            member_count,
        }
    }
}

impl GroupRegistry for StaticRegistry {
    fn get_member_count(&self, group_id: u64) -> Result<u32, ContractError> {
        if group_id != self.group_id {
            return Err(ContractError::GroupNotFound);
        }
        Ok(self.member_count)
    }

    fn get_contribution_amount(&self, group_id: u64) -> Result<i128, ContractError> {
        if group_id != self.group_id {
            return Err(ContractError::GroupNotFound);
        }
        Ok(self.contribution_amount)
    }
}
