//! Per-run contributor registry.
//!
//! Contributors are registered in order, then resolved per capability. A
//! resolution evaluates each candidate's condition exactly once and is
//! memoised; once anything has been resolved the registry is closed so a
//! late registration cannot make earlier answers stale.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::application::{
    ApplicationError,
    condition::ConditionContext,
    contributor::{Capability, Contributor},
};

pub struct ContributorRegistry {
    contributors: Vec<Arc<dyn Contributor>>,
    ids: HashSet<String>,
    resolved: HashMap<Capability, Vec<usize>>,
}

impl ContributorRegistry {
    pub fn new() -> Self {
        Self {
            contributors: Vec::new(),
            ids: HashSet::new(),
            resolved: HashMap::new(),
        }
    }

    pub fn register(&mut self, contributor: Arc<dyn Contributor>) -> Result<(), ApplicationError> {
        let id = contributor.id().to_string();
        if self.is_closed() {
            return Err(ApplicationError::RegistrationClosed { id });
        }
        if !self.ids.insert(id.clone()) {
            return Err(ApplicationError::DuplicateRegistration { id });
        }
        self.contributors.push(contributor);
        Ok(())
    }

    /// Active contributors of `capability`: priority descending, then
    /// registration order.
    pub fn resolve(
        &mut self,
        capability: Capability,
        ctx: &ConditionContext<'_>,
    ) -> Vec<Arc<dyn Contributor>> {
        let contributors = &self.contributors;
        let indices = self.resolved.entry(capability).or_insert_with(|| {
            let mut active: Vec<usize> = contributors
                .iter()
                .enumerate()
                .filter(|(_, c)| c.capability() == capability)
                .filter(|(_, c)| c.condition().evaluate(ctx))
                .map(|(index, _)| index)
                .collect();
            // Stable sort keeps registration order among equal priorities.
            active.sort_by_key(|&index| std::cmp::Reverse(contributors[index].priority()));
            active
        });
        indices
            .iter()
            .map(|&index| Arc::clone(&contributors[index]))
            .collect()
    }

    /// The single active contributor of `capability`, if any.
    ///
    /// Two or more active candidates is an error; priority never breaks the tie.
    pub fn resolve_single(
        &mut self,
        capability: Capability,
        ctx: &ConditionContext<'_>,
    ) -> Result<Option<Arc<dyn Contributor>>, ApplicationError> {
        let mut active = self.resolve(capability, ctx);
        match active.len() {
            0 => Ok(None),
            1 => Ok(active.pop()),
            _ => Err(ApplicationError::AmbiguousResolution {
                capability,
                candidates: active.iter().map(|c| c.id().to_string()).collect(),
            }),
        }
    }

    /// Active contributors of every capability, in stage order.
    pub fn resolve_all(&mut self, ctx: &ConditionContext<'_>) -> Vec<Arc<dyn Contributor>> {
        Capability::ALL
            .iter()
            .flat_map(|&capability| self.resolve(capability, ctx))
            .collect()
    }

    /// Zero-based registration position of `id`.
    pub fn registration_order(&self, id: &str) -> Option<usize> {
        self.contributors.iter().position(|c| c.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        !self.resolved.is_empty()
    }
}

impl Default for ContributorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
