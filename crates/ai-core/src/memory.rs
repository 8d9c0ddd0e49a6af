//! Typed fact store with per-key expiry on a logical clock.
//!
//! Facts are addressed by [`MemoryKey<T>`]. A key's value is either present or absent; values
//! whose [`Fact::is_present`] is `false` (e.g. `false`, `None`, `""`) are never stored, so
//! writing them clears the slot and its expiry.
//!
//! Expiry is evaluated lazily on reads (`time >= expiry` reads as absent) and physically on
//! [`Memory::prune`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use glam::{Vec2, Vec3};

/// A value that can be written to [`Memory`].
///
/// `is_present` decides whether a value counts as a fact at all; "empty" values clear.
pub trait Fact: 'static {
    fn is_present(&self) -> bool {
        true
    }
}

impl Fact for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T: Fact> Fact for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Fact::is_present)
    }
}

impl Fact for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Fact for &'static str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! always_present {
    ($($t:ty),* $(,)?) => {
        $(impl Fact for $t {})*
    };
}

always_present!(u8, u16, u32, u64, usize, i8, i16, i32, i64, f32, f64, Vec2, Vec3);

impl<T: 'static> Fact for Vec<T> {}

impl<A: Fact, B: Fact> Fact for (A, B) {}

pub struct MemoryKey<T: 'static> {
    id: u64,
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for MemoryKey<T> {}

impl<T: 'static> Clone for MemoryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> PartialEq for MemoryKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> Eq for MemoryKey<T> {}

impl<T: 'static> fmt::Debug for MemoryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryKey({}#{:#x})", self.name, self.id)
    }
}

impl<T: 'static> MemoryKey<T> {
    pub const fn new(id: u64, name: &'static str) -> Self {
        Self {
            id,
            name,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

struct Slot {
    name: &'static str,
    value: Box<dyn Any>,
}

#[derive(Default)]
pub struct Memory {
    time: u64,
    values: BTreeMap<u64, Slot>,
    expiries: BTreeMap<u64, u64>,
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("time", &self.time)
            .field(
                "facts",
                &self.values.values().map(|s| s.name).collect::<Vec<_>>(),
            )
            .field("expiries", &self.expiries)
            .finish()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time in milliseconds.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Moves the logical clock. Called once per tick by the owning brain.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.time = now_ms;
    }

    /// Writes `value` under `key`.
    ///
    /// `ttl_ms` of `None` or `Some(0)` removes any previous expiry, so the fact persists until
    /// cleared or overwritten. A positive TTL expires the fact at `time + ttl_ms`.
    pub fn set<T: Fact>(&mut self, key: MemoryKey<T>, value: T, ttl_ms: Option<u64>) {
        if !value.is_present() {
            self.clear(key);
            return;
        }

        self.values.insert(
            key.id,
            Slot {
                name: key.name,
                value: Box::new(value),
            },
        );

        match ttl_ms {
            Some(ttl) if ttl > 0 => {
                self.expiries.insert(key.id, self.time.saturating_add(ttl));
            }
            _ => {
                self.expiries.remove(&key.id);
            }
        }
        tracing::trace!(fact = key.name, ?ttl_ms, time = self.time, "memory set");
    }

    pub fn get<T: Fact>(&self, key: MemoryKey<T>) -> Option<&T> {
        if self.is_expired(key.id) {
            return None;
        }
        let slot = self.values.get(&key.id)?;
        let value = slot.value.downcast_ref::<T>();
        if value.is_none() {
            tracing::error!(
                fact = key.name,
                stored = slot.name,
                "memory type mismatch (stored type differs from requested)"
            );
        }
        value
    }

    /// `true` for a stored, unexpired fact of the requested type that is present.
    pub fn has<T: Fact>(&self, key: MemoryKey<T>) -> bool {
        self.get(key).is_some_and(|value| value.is_present())
    }

    /// Removes the fact and its expiry, returning the value if it was still live.
    pub fn clear<T: Fact>(&mut self, key: MemoryKey<T>) -> Option<T> {
        let expired = self.is_expired(key.id);
        self.expiries.remove(&key.id);
        let slot = self.values.remove(&key.id)?;
        if expired {
            return None;
        }
        slot.value.downcast::<T>().map(|b| *b).ok()
    }

    pub fn expires_at<T: Fact>(&self, key: MemoryKey<T>) -> Option<u64> {
        self.expiries.get(&key.id).copied()
    }

    /// Milliseconds until expiry; `0` for facts without expiry, absent facts and expired facts.
    pub fn time_remaining<T: Fact>(&self, key: MemoryKey<T>) -> u64 {
        self.expiries
            .get(&key.id)
            .map(|expiry| expiry.saturating_sub(self.time))
            .unwrap_or(0)
    }

    /// Physically drops every fact whose expiry has been reached. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let now = self.time;
        let due: Vec<u64> = self
            .expiries
            .iter()
            .filter(|(_, expiry)| now >= **expiry)
            .map(|(id, _)| *id)
            .collect();

        for id in &due {
            self.expiries.remove(id);
            if let Some(slot) = self.values.remove(id) {
                tracing::trace!(fact = slot.name, time = now, "memory expired");
            }
        }
        due.len()
    }

    /// Back to a freshly constructed store: no facts, no expiries, clock at zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of stored facts, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the live facts, ordered by key id.
    pub fn fact_names(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(id, _)| !self.is_expired(**id))
            .map(|(_, slot)| slot.name)
            .collect()
    }

    fn is_expired(&self, id: u64) -> bool {
        self.expiries
            .get(&id)
            .is_some_and(|expiry| self.time >= *expiry)
    }
}
