//! Reuse group outputs across generation passes.
//!
//! [`TypeGroup`] compares and hashes by value, members and locations included, so an unchanged group from a previous
//! pass can be looked up directly and its artifact reused without emitting again.

use std::collections::HashMap;

use stringify_core::{FormattingTarget, TypeGroup};

use super::emit::{EmitError, GenerationOutput, GroupOutput, emit_group};
use super::group::group_targets;
use crate::config::GeneratorConfig;

/// Counters for one incremental pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Groups whose output was taken from the cache
    pub reused: usize,
    /// Groups emitted in this pass
    pub emitted: usize,
    /// Cached groups that did not appear in this pass
    pub evicted: usize,
}

/// Memoizing emitter keyed by [`TypeGroup`] equality.
#[derive(Debug, Default)]
pub struct IncrementalEmitter {
    config: GeneratorConfig,
    cache: HashMap<TypeGroup, GroupOutput>,
}

impl IncrementalEmitter {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of groups currently cached.
    pub fn cached_groups(&self) -> usize {
        self.cache.len()
    }

    /// Run one pass. The cache afterwards holds exactly the groups of this pass.
    #[tracing::instrument(skip_all, fields(target_count = targets.len()))]
    pub fn run(&mut self, targets: Vec<FormattingTarget>) -> Result<(GenerationOutput, PassStats), EmitError> {
        let mut stats = PassStats::default();
        let mut next = HashMap::new();
        let mut groups = Vec::new();

        for group in group_targets(targets) {
            let output = match self.cache.remove(&group) {
                Some(cached) => {
                    tracing::debug!(type_name = %group.type_name, "reusing cached group output");
                    stats.reused += 1;
                    cached
                }
                None => {
                    stats.emitted += 1;
                    emit_group(&group, &self.config)?
                }
            };
            groups.push(output.clone());
            next.insert(group, output);
        }

        stats.evicted = self.cache.len();
        self.cache = next;
        tracing::debug!(
            reused = stats.reused,
            emitted = stats.emitted,
            evicted = stats.evicted,
            "incremental pass done"
        );

        Ok((GenerationOutput { groups }, stats))
    }
}
