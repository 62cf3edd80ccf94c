//! Per-account ordered set of addresses with a capacity limit.
//!
//! Members live in an arena (`Vec<Address>` per owner) and an index map
//! (owner, member) → position gives O(1) membership tests and O(1) removal
//! by swapping the last member into the freed slot.
//!
//! ## Rules
//! - No duplicates.
//! - Insertion order is iteration order until the first removal; after a
//!   removal the remaining members are a permutation of the survivors.
//! - `insert` of an existing member is not an error and does not count
//!   against the capacity.

use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberSetError {
    CapacityReached,
}

/// Storage layout of one member set: the arena prefix and the index prefix.
pub struct MemberSet {
    list: Symbol,
    index: Symbol,
}

impl MemberSet {
    pub const fn new(list: Symbol, index: Symbol) -> Self {
        Self { list, index }
    }

    fn list_key(&self, owner: &Address) -> (Symbol, Address) {
        (self.list.clone(), owner.clone())
    }

    fn index_key(&self, owner: &Address, member: &Address) -> (Symbol, Address, Address) {
        (self.index.clone(), owner.clone(), member.clone())
    }

    pub fn members(&self, env: &Env, owner: &Address) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&self.list_key(owner))
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn len(&self, env: &Env, owner: &Address) -> u32 {
        self.members(env, owner).len()
    }

    pub fn contains(&self, env: &Env, owner: &Address, member: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&self.index_key(owner, member))
    }

    /// Member at `index`, or `None` when out of range.
    pub fn at(&self, env: &Env, owner: &Address, index: u32) -> Option<Address> {
        self.members(env, owner).get(index)
    }

    /// Adds `member`. Returns `Ok(true)` if it was added, `Ok(false)` if it
    /// was already present.
    pub fn insert(
        &self,
        env: &Env,
        owner: &Address,
        member: &Address,
        capacity: u32,
    ) -> Result<bool, MemberSetError> {
        if self.contains(env, owner, member) {
            return Ok(false);
        }
        let mut list = self.members(env, owner);
        if list.len() >= capacity {
            return Err(MemberSetError::CapacityReached);
        }
        let position = list.len();
        list.push_back(member.clone());
        self.write_list(env, owner, &list);
        self.write_index(env, owner, member, position);
        Ok(true)
    }

    /// Removes `member`. Returns `false` if it was not present.
    pub fn remove(&self, env: &Env, owner: &Address, member: &Address) -> bool {
        let index_key = self.index_key(owner, member);
        let position: u32 = match env.storage().persistent().get(&index_key) {
            Some(position) => position,
            None => return false,
        };
        let mut list = self.members(env, owner);
        let last = list.len().saturating_sub(1);
        if position != last {
            if let Some(moved) = list.get(last) {
                list.set(position, moved.clone());
                self.write_index(env, owner, &moved, position);
            }
        }
        list.pop_back();
        env.storage().persistent().remove(&index_key);
        self.write_list(env, owner, &list);
        true
    }

    /// Removes every member and returns them in their stored order.
    pub fn clear(&self, env: &Env, owner: &Address) -> Vec<Address> {
        let list = self.members(env, owner);
        for member in list.iter() {
            env.storage()
                .persistent()
                .remove(&self.index_key(owner, &member));
        }
        env.storage().persistent().remove(&self.list_key(owner));
        list
    }

    fn write_list(&self, env: &Env, owner: &Address, list: &Vec<Address>) {
        let key = self.list_key(owner);
        if list.is_empty() {
            env.storage().persistent().remove(&key);
            return;
        }
        env.storage().persistent().set(&key, list);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn write_index(&self, env: &Env, owner: &Address, member: &Address, position: u32) {
        let key = self.index_key(owner, member);
        env.storage().persistent().set(&key, &position);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
