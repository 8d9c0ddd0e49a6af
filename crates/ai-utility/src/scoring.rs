use std::rc::Rc;

use ai_core::{Behavior, Memory, TickContext, WorldMut};

/// Read-only view handed to score functions and behavior factories.
pub struct ScoreContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub tick: &'a TickContext,
    pub agent: W::Agent,
    pub world: &'a W,
    pub memory: &'a Memory,
}

pub type ScoreFn<W> = Rc<dyn Fn(&ScoreContext<'_, W>) -> f32>;
pub type BehaviorFactory<W> = Rc<dyn Fn(&ScoreContext<'_, W>) -> Box<dyn Behavior<W>>>;

/// A `(score, factory)` pair. Holds no per-actor state, so one entry can serve many brains.
pub struct ScoringEntry<W>
where
    W: WorldMut + 'static,
{
    pub label: &'static str,
    score_fn: ScoreFn<W>,
    make_fn: BehaviorFactory<W>,
}

impl<W> Clone for ScoringEntry<W>
where
    W: WorldMut + 'static,
{
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            score_fn: Rc::clone(&self.score_fn),
            make_fn: Rc::clone(&self.make_fn),
        }
    }
}

impl<W> ScoringEntry<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        label: &'static str,
        score_fn: impl Fn(&ScoreContext<'_, W>) -> f32 + 'static,
        make_fn: impl Fn(&ScoreContext<'_, W>) -> Box<dyn Behavior<W>> + 'static,
    ) -> Self {
        Self {
            label,
            score_fn: Rc::new(score_fn),
            make_fn: Rc::new(make_fn),
        }
    }

    /// Evaluates the score; NaN ranks below everything.
    pub fn score(&self, ctx: &ScoreContext<'_, W>) -> f32 {
        let s = (self.score_fn)(ctx);
        if s.is_nan() {
            f32::NEG_INFINITY
        } else {
            s
        }
    }

    pub fn make(&self, ctx: &ScoreContext<'_, W>) -> Box<dyn Behavior<W>> {
        (self.make_fn)(ctx)
    }
}

impl<W> std::fmt::Debug for ScoringEntry<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEntry")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
