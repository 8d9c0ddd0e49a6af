#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use ai_core::{AgentId, BrainEvent, BrainObserver, MoveOutcome};

/// A small, allocation-friendly trace event.
///
/// This is intentionally "dumb data" so it can be recorded during simulation and later rendered
/// by tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: u64,
    pub tag: Cow<'static, str>,
    pub detail: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(tick: u64, agent: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            agent,
            tag: tag.into(),
            detail: Cow::Borrowed(""),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn from_brain_event<A: AgentId>(tick: u64, event: &BrainEvent<A>) -> Self {
        let agent = event.agent().stable_id();
        match *event {
            BrainEvent::Deployed { .. } => Self::new(tick, agent, "brain.deployed"),
            BrainEvent::BehaviorChanged { from, to, .. } => {
                Self::new(tick, agent, "brain.behavior_changed")
                    .with_detail(format!("{}->{}", from.name(), to.name()))
            }
            BrainEvent::MoveFinished { outcome, .. } => {
                let detail = match outcome {
                    MoveOutcome::Succeeded => "succeeded",
                    MoveOutcome::Failed => "failed",
                };
                Self::new(tick, agent, "brain.move_finished").with_detail(detail)
            }
            BrainEvent::Reset { .. } => Self::new(tick, agent, "brain.reset"),
        }
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Shared sink: keep one handle for reading while the observer owns the other.
impl<S: TraceSink> TraceSink for Rc<RefCell<S>> {
    fn emit(&mut self, event: TraceEvent) {
        self.borrow_mut().emit(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn for_agent(&self, agent: u64) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.agent == agent)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Forwards every brain notification to a [`TraceSink`].
#[derive(Debug, Default)]
pub struct TraceObserver<S> {
    sink: S,
}

impl<S: TraceSink> TraceObserver<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<A, S> BrainObserver<A> for TraceObserver<S>
where
    A: AgentId,
    S: TraceSink + 'static,
{
    fn notify(&mut self, tick: u64, event: &BrainEvent<A>) {
        self.sink.emit(TraceEvent::from_brain_event(tick, event));
    }
}
