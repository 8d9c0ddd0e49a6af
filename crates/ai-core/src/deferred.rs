//! Deferred continuations for multi-step world sequences.
//!
//! A behavior that needs "do A, then later B" schedules B here instead of blocking. The brain
//! runs due continuations on later ticks, in due-time then schedule order. A continuation
//! receives no guarantee about the world: it must re-check the actor before acting.

use crate::{TickContext, WorldMut};

type Continuation<W> = Box<dyn FnOnce(&mut DeferredContext<'_, W>, &mut W)>;

struct Pending<W>
where
    W: WorldMut + 'static,
{
    due_ms: u64,
    seq: u64,
    label: &'static str,
    run: Continuation<W>,
}

pub struct Deferred<W>
where
    W: WorldMut + 'static,
{
    pending: Vec<Pending<W>>,
    next_seq: u64,
}

impl<W> Default for Deferred<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

/// Handed to a running continuation so it can chain the next step.
pub struct DeferredContext<'a, W>
where
    W: WorldMut + 'static,
{
    pub tick: &'a TickContext,
    pub agent: W::Agent,
    pub deferred: &'a mut Deferred<W>,
}

impl<W> Deferred<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `run` to execute on the first tick with `now_ms >= due_ms`.
    pub fn schedule_at(
        &mut self,
        due_ms: u64,
        label: &'static str,
        run: impl FnOnce(&mut DeferredContext<'_, W>, &mut W) + 'static,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms,
            seq,
            label,
            run: Box::new(run),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.pending.iter().map(|p| p.label).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drops every pending continuation whose label starts with `prefix`.
    pub fn cancel(&mut self, prefix: &str) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !p.label.starts_with(prefix));
        before - self.pending.len()
    }

    /// Runs everything due at `ctx.now_ms`. Continuations scheduled while running wait for a
    /// later call even when already due.
    pub fn run_due(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> usize {
        let now = ctx.now_ms;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due_ms <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due_ms, p.seq));

        let count = due.len();
        for pending in due {
            tracing::trace!(step = pending.label, now, "running deferred step");
            let mut dctx = DeferredContext {
                tick: ctx,
                agent,
                deferred: self,
            };
            (pending.run)(&mut dctx, world);
        }
        count
    }
}

impl<W> DeferredContext<'_, W>
where
    W: WorldMut + 'static,
{
    pub fn schedule_after(
        &mut self,
        delay_ms: u64,
        label: &'static str,
        run: impl FnOnce(&mut DeferredContext<'_, W>, &mut W) + 'static,
    ) {
        let due = self.tick.now_ms.saturating_add(delay_ms);
        self.deferred.schedule_at(due, label, run);
    }
}
