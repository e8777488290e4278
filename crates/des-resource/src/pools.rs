//! `ResourcePools` — the run's named pool registry.

use des_core::{PoolId, ProcessId};

use crate::{Acquire, PoolError, PoolResult, ResourcePool};

/// All pools of a run, addressed by the `PoolId` returned from [`add`][Self::add].
#[derive(Debug, Default)]
pub struct ResourcePools {
    pools: Vec<ResourcePool>,
}

impl ResourcePools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool.  Names must be unique and capacity positive.
    pub fn add(&mut self, name: impl Into<String>, capacity: usize) -> PoolResult<PoolId> {
        let name = name.into();
        if self.by_name(&name).is_some() {
            return Err(PoolError::DuplicateName(name));
        }
        let id = PoolId::try_from(self.pools.len()).map_err(|_| PoolError::TooManyPools)?;
        self.pools.push(ResourcePool::new(name, capacity)?);
        Ok(id)
    }

    pub fn get(&self, id: PoolId) -> Option<&ResourcePool> {
        self.pools.get(id.index())
    }

    fn get_mut(&mut self, id: PoolId) -> PoolResult<&mut ResourcePool> {
        self.pools.get_mut(id.index()).ok_or(PoolError::UnknownPool(id))
    }

    pub fn by_name(&self, name: &str) -> Option<PoolId> {
        self.pools
            .iter()
            .position(|p| p.name() == name)
            .map(|i| PoolId(i as u16))
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &ResourcePool)> {
        self.pools.iter().enumerate().map(|(i, p)| (PoolId(i as u16), p))
    }

    pub fn acquire(&mut self, id: PoolId, process: ProcessId) -> PoolResult<Acquire> {
        self.get_mut(id)?.acquire(process)
    }

    pub fn release(&mut self, id: PoolId, process: ProcessId) -> PoolResult<Option<ProcessId>> {
        self.get_mut(id)?.release(process)
    }

    /// Release every unit `process` still holds, in pool order.
    ///
    /// Returns `(pool, granted waiter)` for each released unit.
    pub fn release_all(&mut self, process: ProcessId) -> Vec<(PoolId, Option<ProcessId>)> {
        let mut released = Vec::new();
        for (i, pool) in self.pools.iter_mut().enumerate() {
            if pool.holds(process) {
                // `holds` was just checked, so this cannot fail.
                if let Ok(next) = pool.release(process) {
                    released.push((PoolId(i as u16), next));
                }
            }
        }
        released
    }
}
