//! Stat resolver module.
//!
//! Provides the `StatResolver` type, which owns the sources and transforms
//! of a stat pipeline and resolves them in dependency order.

use crate::error::StatError;
use crate::graph::StatGraph;
use crate::resolved::ResolvedStat;
use crate::source::StatSource;
use crate::stat_id::StatId;
use crate::transform::StatTransform;
use std::collections::HashMap;

/// Resolves a set of stats from their sources and transforms.
///
/// Resolution:
/// 1. Sums the sources of each stat (no source means 0.0)
/// 2. Builds the dependency graph from transform dependencies
/// 3. Detects cycles
/// 4. Applies transforms in registration order, stats in topological order
///
/// # Examples
///
/// ```rust
/// use dinoarena::*;
/// use dinoarena::source::ConstantSource;
/// use dinoarena::transform::{ClampTransform, ScalingTransform};
///
/// let mut resolver = StatResolver::new();
///
/// resolver.register_source(StatId::mass_score(), Box::new(ConstantSource::new(70.0)));
/// resolver.register_source(StatId::defense(), Box::new(ConstantSource::new(35.0)));
/// resolver.register_transform(
///     StatId::defense(),
///     Box::new(ScalingTransform::new(StatId::mass_score(), 0.4)),
/// );
/// resolver.register_transform(StatId::defense(), Box::new(ClampTransform::new(10.0, 100.0)));
///
/// let resolved = resolver.resolve_all().unwrap();
/// assert_eq!(resolved[&StatId::defense()].value, 63.0); // 35 + 70 * 0.4
/// ```
#[derive(Default)]
pub struct StatResolver {
    /// Multiple sources per stat (additive).
    sources: HashMap<StatId, Vec<Box<dyn StatSource>>>,

    /// Transform chain per stat.
    transforms: HashMap<StatId, Vec<Box<dyn StatTransform>>>,
}

impl StatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source for a stat. Multiple sources are summed.
    pub fn register_source(&mut self, stat_id: StatId, source: Box<dyn StatSource>) {
        self.sources.entry(stat_id).or_default().push(source);
    }

    /// Register a transform for a stat. Transforms apply in registration order.
    pub fn register_transform(&mut self, stat_id: StatId, transform: Box<dyn StatTransform>) {
        self.transforms.entry(stat_id).or_default().push(transform);
    }

    /// Resolve every registered stat.
    ///
    /// Fails with `StatError::Cycle` if transforms depend on each other
    /// circularly.
    pub fn resolve_all(&self) -> Result<HashMap<StatId, ResolvedStat>, StatError> {
        let graph = self.build_graph();
        let order = graph.topological_sort()?;

        let mut resolved = HashMap::with_capacity(order.len());
        for stat_id in order {
            let stat = self.resolve_stat_internal(&stat_id, &resolved)?;
            resolved.insert(stat_id, stat);
        }
        Ok(resolved)
    }

    /// Build the dependency graph from all registered transforms.
    fn build_graph(&self) -> StatGraph {
        let mut graph = StatGraph::new();

        for stat_id in self.sources.keys().chain(self.transforms.keys()) {
            graph.add_node(stat_id.clone());
        }

        for (stat_id, transforms) in &self.transforms {
            for transform in transforms {
                for dep in transform.depends_on() {
                    graph.add_edge(stat_id.clone(), dep);
                }
            }
        }

        graph
    }

    fn resolve_stat_internal(
        &self,
        stat_id: &StatId,
        resolved_so_far: &HashMap<StatId, ResolvedStat>,
    ) -> Result<ResolvedStat, StatError> {
        let mut resolved = ResolvedStat::new(stat_id.clone(), 0.0);

        let mut value = 0.0;
        match self.sources.get(stat_id) {
            Some(sources) => {
                for source in sources {
                    let contribution = source.get_value(stat_id);
                    value += contribution;
                    resolved.add_source(source.description(), contribution);
                }
            }
            None => resolved.add_source("Default", 0.0),
        }

        if let Some(transforms) = self.transforms.get(stat_id) {
            for transform in transforms {
                let mut dependencies = HashMap::new();
                for dep_id in transform.depends_on() {
                    let dep_value = resolved_so_far
                        .get(&dep_id)
                        .map(|r| r.value)
                        .ok_or_else(|| StatError::MissingDependency(dep_id.clone()))?;
                    dependencies.insert(dep_id, dep_value);
                }

                value = transform.apply(value, &dependencies)?;
                resolved.add_transform(transform.description(), value);
            }
        }

        resolved.value = value;
        Ok(resolved)
    }
}
