//! Relation scenarios over the asynchronous object API
//!
//! The harness builds random closed objects on a `Timeline` and checks the
//! algebra's invariants for every ordered pair. The standalone scenarios
//! cover lifecycle and clock-family behaviour that random extents cannot.

use std::sync::Arc;
use std::time::Duration;

use chronon_core::{Bound, ChrononError, LifecycleState, ReplicaId, WallTime};
use chronon_relation::{AllenRelation, Relation, RelationOutcome};
use chronon_runtime::{SpaceConfig, TemporalObject, TemporalObjectSpace};
use chronon_time::{ClockAdapter, ClockSource, LinearProjection, LogicalClock, SteppedClock};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fixtures::{ms, random_spans, Timeline};

// ============================================================================
// RANDOM RELATION HARNESS
// ============================================================================

/// Configuration for relation scenarios
#[derive(Debug, Clone)]
pub struct RelationScenarioConfig {
    /// Number of objects
    pub object_count: usize,

    /// Extents fall within `[0, horizon_ms)`
    pub horizon_ms: i64,

    /// RNG seed
    pub seed: u64,
}

impl Default for RelationScenarioConfig {
    fn default() -> Self {
        Self {
            object_count: 12,
            horizon_ms: 40,
            seed: 1,
        }
    }
}

impl RelationScenarioConfig {
    pub fn minimal() -> Self {
        Self {
            object_count: 4,
            horizon_ms: 10,
            seed: 1,
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    /// Many objects on a short horizon, so shared bounds are common
    pub fn stress() -> Self {
        Self {
            object_count: 40,
            horizon_ms: 16,
            seed: 0x5eed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of a relation scenario
#[derive(Debug, Clone, Default)]
pub struct RelationScenarioResult {
    /// Ordered pairs evaluated
    pub pairs_checked: usize,

    /// Relation queries issued
    pub queries: usize,

    /// How often each base relation was the one holding
    pub base_counts: [usize; 13],

    /// Invariant violations, one line each
    pub violations: Vec<String>,
}

impl RelationScenarioResult {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of distinct base relations seen
    pub fn coverage(&self) -> usize {
        self.base_counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Relation scenario harness
pub struct RelationScenarioHarness {
    config: RelationScenarioConfig,
    rng: StdRng,
}

impl RelationScenarioHarness {
    pub fn new(config: RelationScenarioConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Run the scenario
    pub async fn run(&mut self) -> RelationScenarioResult {
        let mut result = RelationScenarioResult::default();
        let timeline = Timeline::new();

        let spans = random_spans(&mut self.rng, self.config.object_count, self.config.horizon_ms);
        let mut objects = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match timeline.closed(start, end).await {
                Ok(object) => objects.push(object),
                Err(rejection) => result
                    .violations
                    .push(format!("[{start}, {end}] could not be built: {rejection}")),
            }
        }

        for a in &objects {
            for b in &objects {
                self.check_pair(a, b, &mut result).await;
                result.pairs_checked += 1;
            }
        }

        tracing::info!(
            pairs = result.pairs_checked,
            queries = result.queries,
            coverage = result.coverage(),
            violations = result.violations.len(),
            "relation scenario finished"
        );
        result
    }

    async fn check_pair(&self, a: &TemporalObject, b: &TemporalObject, result: &mut RelationScenarioResult) {
        let mut outcomes = Vec::with_capacity(Relation::ALL.len());
        for relation in Relation::ALL {
            result.queries += 1;
            match a.evaluate(relation, b).await {
                Ok(resolution) => outcomes.push((relation, resolution.outcome)),
                Err(rejection) => {
                    result.violations.push(format!("{} {relation} {}: {rejection}", a.id(), b.id()));
                    return;
                }
            }
        }
        let get = |relation: Relation| {
            outcomes
                .iter()
                .find(|(r, _)| *r == relation)
                .map(|(_, o)| *o)
                .unwrap_or(RelationOutcome::Nothing)
        };

        // Exactly one base relation
        let holding: Vec<_> = AllenRelation::ALL
            .into_iter()
            .filter(|base| get(base.relation()).is_true())
            .collect();
        match holding.as_slice() {
            [base] => {
                let index = AllenRelation::ALL.iter().position(|b| b == base).unwrap_or(0);
                result.base_counts[index] += 1;
            }
            _ => result.violations.push(format!(
                "{} vs {}: {} base relations hold ({holding:?})",
                a.id(),
                b.id(),
                holding.len()
            )),
        }
        for base in AllenRelation::ALL {
            if !get(base.relation()).is_definite() {
                result
                    .violations
                    .push(format!("{} {base} {}: indeterminate on a metric clock", a.id(), b.id()));
            }
        }

        // Converses
        for base in AllenRelation::ALL {
            result.queries += 1;
            let forward = get(base.relation());
            match b.evaluate(base.inverse().relation(), a).await {
                Ok(resolution) if resolution.outcome == forward => {}
                Ok(resolution) => result.violations.push(format!(
                    "{} {base} {} is {forward} but the converse is {}",
                    a.id(),
                    b.id(),
                    resolution.outcome
                )),
                Err(rejection) => result.violations.push(rejection.to_string()),
            }
        }

        if get(Relation::Disjunct) != !get(Relation::ContemporaryOf) {
            result
                .violations
                .push(format!("{} vs {}: disjunct is not the negation of contemporaryOf", a.id(), b.id()));
        }

        let lte = get(Relation::Before) | get(Relation::Meets) | get(Relation::Equals);
        if get(Relation::Lte) != lte {
            result
                .violations
                .push(format!("{} vs {}: lte differs from before | meets | equals", a.id(), b.id()));
        }
    }
}

// ============================================================================
// LIFECYCLE AND CLOCK-FAMILY SCENARIOS
// ============================================================================

fn space_on(clock: Arc<dyn ClockSource>, adapter: Option<Arc<dyn ClockAdapter>>) -> TemporalObjectSpace {
    let mut config = SpaceConfig::default().with_clock(clock);
    config.adapter = adapter;
    TemporalObjectSpace::with_config(config)
}

/// Clockless space: `finishes` rejects until the target is forged
pub async fn clockless_finishes_scenario() -> Result<(), String> {
    let logical: Arc<dyn ClockSource> = Arc::new(LogicalClock::new(ReplicaId(1)));
    let space = TemporalObjectSpace::clockless();
    let a = space.create();
    let b = space.create();

    a.forge_with(logical.clone()).await.map_err(|r| r.to_string())?;
    match a.finishes(&b).await {
        Err(rejection) if rejection.error == ChrononError::NotForged(b.id()) => {}
        other => return Err(format!("expected NotForged for {}, got {other:?}", b.id())),
    }

    b.forge_with(logical).await.map_err(|r| r.to_string())?;
    let resolution = a.finishes(&b).await.map_err(|r| r.to_string())?;
    if resolution.outcome != RelationOutcome::True {
        return Err(format!("finishes resolved {}", resolution.outcome));
    }
    if b.state() != LifecycleState::Finished {
        return Err(format!("target left {}", b.state()));
    }
    Ok(())
}

/// `finishes` commits once; the second call changes nothing
pub async fn finishes_idempotence_scenario() -> Result<(), String> {
    let timeline = Timeline::new();
    let target = timeline.open(0);
    let finisher = timeline.closed(5, 25).await.map_err(|r| r.to_string())?;

    let first = finisher.finishes(&target).await.map_err(|r| r.to_string())?;
    let end = target.extent().map(|e| e.end);
    let second = finisher.finishes(&target).await.map_err(|r| r.to_string())?;

    if first.outcome != RelationOutcome::True || second.outcome != RelationOutcome::False {
        return Err(format!("finishes resolved {} then {}", first.outcome, second.outcome));
    }
    if end != Some(Bound::At(ms(25))) || target.extent().map(|e| e.end) != end {
        return Err(format!("target end moved to {:?}", target.extent()));
    }
    Ok(())
}

/// Every relation, `nothing` included, rejects against an unforged object
pub async fn unforged_rejection_scenario() -> Result<(), String> {
    let timeline = Timeline::new();
    let forged = timeline.open(0);
    let unforged = TemporalObjectSpace::with_config(SpaceConfig::deferred()).create();

    for relation in Relation::ALL {
        for (a, b) in [(&forged, &unforged), (&unforged, &forged)] {
            match a.evaluate(relation, b).await {
                Err(rejection) if rejection.error == ChrononError::NotForged(unforged.id()) => {}
                other => return Err(format!("{relation}: expected NotForged, got {other:?}")),
            }
        }
    }
    Ok(())
}

/// Vector against wall clock: rejected without an adapter, resolved with one
pub async fn progressive_clocking_scenario() -> Result<(), String> {
    let wall: Arc<dyn ClockSource> = Arc::new(SteppedClock::new(WallTime::from_millis(50)));
    let logical: Arc<dyn ClockSource> = Arc::new(LogicalClock::new(ReplicaId(9)));

    let metric_object = space_on(wall.clone(), None).create();
    let logical_object = space_on(logical.clone(), None).create();
    for relation in Relation::ALL {
        match metric_object.evaluate(relation, &logical_object).await {
            Err(rejection) if matches!(rejection.error, ChrononError::IncompatibleClocks { .. }) => {}
            other => return Err(format!("{relation} without adapter: {other:?}")),
        }
    }

    let adapter: Arc<dyn ClockAdapter> = Arc::new(LinearProjection::new(WallTime::EPOCH, Duration::from_millis(1)));
    let metric_object = space_on(wall, Some(adapter.clone())).create();
    let logical_object = space_on(logical, Some(adapter)).create();
    for relation in Relation::ALL {
        if let Err(rejection) = metric_object.evaluate(relation, &logical_object).await {
            return Err(format!("{relation} with adapter: {rejection}"));
        }
    }
    Ok(())
}

/// Causally unrelated vector extents leave ordering relations indeterminate
pub async fn concurrent_vectors_scenario() -> Result<(), String> {
    let a = space_on(Arc::new(LogicalClock::new(ReplicaId(1))), None).create();
    let b = space_on(Arc::new(LogicalClock::new(ReplicaId(2))), None).create();
    a.finish().await.map_err(|r| r.to_string())?;
    b.finish().await.map_err(|r| r.to_string())?;

    let before = a.before(&b).await.map_err(|r| r.to_string())?;
    if before.outcome != RelationOutcome::Indeterminate {
        return Err(format!("before resolved {}", before.outcome));
    }
    Ok(())
}

/// Forge and finish only move forward
pub async fn lifecycle_scenario() -> Result<(), String> {
    let object = TemporalObjectSpace::with_config(SpaceConfig::deferred()).create();
    let mut seen = vec![object.state()];

    object.forge().await.map_err(|r| r.to_string())?;
    seen.push(object.state());
    object.finish().await.map_err(|r| r.to_string())?;
    seen.push(object.state());
    object.forge().await.map_err(|r| r.to_string())?;
    seen.push(object.state());

    let expected = [
        LifecycleState::Unforged,
        LifecycleState::Forged,
        LifecycleState::Finished,
        LifecycleState::Finished,
    ];
    if seen != expected {
        return Err(format!("states went {seen:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_minimal_relation_scenario() {
        let result = RelationScenarioHarness::new(RelationScenarioConfig::minimal()).run().await;
        assert!(result.passed(), "violations: {:?}", result.violations);
        assert_eq!(result.pairs_checked, 16);
    }

    #[tokio::test]
    async fn test_stress_relation_scenario() {
        chronon_runtime::init_test_tracing();
        let result = RelationScenarioHarness::new(RelationScenarioConfig::stress()).run().await;

        assert!(result.passed(), "violations: {:?}", result.violations);
        // Short horizon, many objects: shared bounds show up
        assert!(result.coverage() >= 9, "coverage {}", result.coverage());
    }

    #[tokio::test]
    async fn test_scenarios_across_seeds() {
        for seed in 0..4 {
            let config = RelationScenarioConfig::standard().with_seed(seed);
            let result = RelationScenarioHarness::new(config).run().await;
            assert!(result.passed(), "seed {seed}: {:?}", result.violations);
        }
    }

    #[tokio::test]
    async fn test_clockless_finishes() {
        clockless_finishes_scenario().await.unwrap();
    }

    #[tokio::test]
    async fn test_finishes_idempotence() {
        finishes_idempotence_scenario().await.unwrap();
    }

    #[tokio::test]
    async fn test_unforged_rejection() {
        unforged_rejection_scenario().await.unwrap();
    }

    #[tokio::test]
    async fn test_progressive_clocking() {
        progressive_clocking_scenario().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_vectors() {
        concurrent_vectors_scenario().await.unwrap();
    }

    #[tokio::test]
    async fn test_lifecycle() {
        lifecycle_scenario().await.unwrap();
    }
}
