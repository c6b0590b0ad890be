//! Per-query department cache used while hydrating seller rows.
//!
//! # Invariants
//! - One cache lives for exactly one multi-row query call.
//! - Within that call every department id maps to a single `Rc` allocation.

use crate::model::department::{Department, DepartmentId};
use std::collections::HashMap;
use std::rc::Rc;

/// Maps department ids to the department already built for them.
#[derive(Debug, Default)]
pub struct HydrationCache {
    departments: HashMap<DepartmentId, Rc<Department>>,
}

impl HydrationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the cached department, if any.
    pub fn get(&self, id: DepartmentId) -> Option<Rc<Department>> {
        self.departments.get(&id).map(Rc::clone)
    }

    pub fn put(&mut self, id: DepartmentId, department: Rc<Department>) {
        self.departments.insert(id, department);
    }

    /// Returns the cached department or builds, caches and returns it.
    ///
    /// `build` runs at most once per id for the lifetime of the cache.
    pub fn get_or_try_insert_with<E, F>(
        &mut self,
        id: DepartmentId,
        build: F,
    ) -> Result<Rc<Department>, E>
    where
        F: FnOnce() -> Result<Department, E>,
    {
        if let Some(department) = self.get(id) {
            return Ok(department);
        }
        let department = Rc::new(build()?);
        self.put(id, Rc::clone(&department));
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::HydrationCache;
    use crate::model::department::Department;
    use std::rc::Rc;

    #[test]
    fn get_returns_same_allocation_as_put() {
        let mut cache = HydrationCache::new();
        let books = Rc::new(Department::with_id(4, "Books"));
        cache.put(4, Rc::clone(&books));

        let cached = cache.get(4).unwrap();
        assert!(Rc::ptr_eq(&cached, &books));
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn builder_runs_once_per_id() {
        let mut cache = HydrationCache::new();
        let mut builds = 0;
        for id in [1, 2, 1, 1, 2] {
            cache
                .get_or_try_insert_with::<(), _>(id, || {
                    builds += 1;
                    Ok(Department::with_id(id, format!("dep-{id}")))
                })
                .unwrap();
        }
        assert_eq!(builds, 2);
        assert_eq!(cache.get(1).unwrap().name, "dep-1");
        assert_eq!(cache.get(2).unwrap().name, "dep-2");
    }

    #[test]
    fn failed_build_leaves_cache_untouched() {
        let mut cache = HydrationCache::new();
        let result = cache.get_or_try_insert_with(9, || Err("broken row"));
        assert_eq!(result.unwrap_err(), "broken row");
        assert!(cache.get(9).is_none());
    }
}
