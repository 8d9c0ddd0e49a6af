use ai_core::{Behavior, BehaviorKind, Idle, Memory, Policy, TickContext, WorldMut};

use crate::{Profile, ScoreContext};

/// Utility arbitration over a profile's scoring table.
///
/// Each decision:
/// - Scores every entry; the first entry reaching the maximum wins ties.
/// - If nothing scores above zero, falls back to [`Idle`] (keeping a running idle).
/// - Builds a candidate from the winner. A candidate of the running behavior's kind is dropped
///   and the running behavior kept, except for `move_to` candidates whose target moved: those
///   replace it.
pub struct TaskSelector<W>
where
    W: WorldMut + 'static,
{
    profile: Profile<W>,
    last_scores: Vec<(&'static str, f32)>,
    last_winner: Option<&'static str>,
}

impl<W> TaskSelector<W>
where
    W: WorldMut + 'static,
{
    pub fn new(profile: Profile<W>) -> Self {
        Self {
            profile,
            last_scores: Vec::new(),
            last_winner: None,
        }
    }

    pub fn profile(&self) -> &Profile<W> {
        &self.profile
    }

    /// Scores from the most recent decision, in table order.
    pub fn last_scores(&self) -> &[(&'static str, f32)] {
        &self.last_scores
    }

    /// Label of the entry that scored highest above zero in the most recent decision.
    pub fn last_winner(&self) -> Option<&'static str> {
        self.last_winner
    }

    pub fn choose_next_behavior(
        &mut self,
        tick: &TickContext,
        agent: W::Agent,
        world: &W,
        memory: &Memory,
        current: &dyn Behavior<W>,
    ) -> Option<Box<dyn Behavior<W>>> {
        let ctx = ScoreContext {
            tick,
            agent,
            world,
            memory,
        };

        self.last_scores.clear();
        let mut best: Option<(usize, f32)> = None;
        for (i, entry) in self.profile.entries().iter().enumerate() {
            let score = entry.score(&ctx);
            self.last_scores.push((entry.label, score));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((i, score));
            }
        }

        let Some((best_idx, best_score)) = best.filter(|(_, score)| *score > 0.0) else {
            self.last_winner = None;
            if current.kind() == BehaviorKind::IDLE {
                return None;
            }
            tracing::trace!(agent = ?agent, "no positive score, falling back to idle");
            return Some(Box::new(Idle));
        };

        let entry = &self.profile.entries()[best_idx];
        self.last_winner = Some(entry.label);
        tracing::trace!(
            agent = ?agent,
            winner = entry.label,
            score = best_score,
            "selector scored"
        );

        let candidate = entry.make(&ctx);
        if candidate.kind() != current.kind() {
            return Some(candidate);
        }

        if candidate.kind() == BehaviorKind::MOVE_TO && is_retarget(candidate.as_ref(), current) {
            return Some(candidate);
        }

        None
    }
}

fn is_retarget<W>(candidate: &dyn Behavior<W>, current: &dyn Behavior<W>) -> bool
where
    W: WorldMut + 'static,
{
    match (candidate.target_position(), current.target_position()) {
        (Some(next), Some(running)) => next.distance(running) > 0.0,
        _ => false,
    }
}

impl<W> Policy<W> for TaskSelector<W>
where
    W: WorldMut + 'static,
{
    fn choose_next_behavior(
        &mut self,
        tick: &TickContext,
        agent: W::Agent,
        world: &W,
        memory: &Memory,
        current: &dyn Behavior<W>,
    ) -> Option<Box<dyn Behavior<W>>> {
        TaskSelector::choose_next_behavior(self, tick, agent, world, memory, current)
    }

    fn name(&self) -> &str {
        self.profile.name()
    }
}
