use std::rc::Rc;

use ai_core::{Brain, Sensor, WorldMut};

use crate::{ScoreContext, ScoringEntry, TaskSelector};

pub type SensorFactory<W> = Rc<dyn Fn() -> Box<dyn Sensor<W>>>;

/// A named, shareable configuration: a scoring table plus the sensors it feeds on.
///
/// Profiles hold no per-actor state. Installing one builds fresh sensor instances and a fresh
/// [`TaskSelector`] for the target brain.
pub struct Profile<W>
where
    W: WorldMut + 'static,
{
    name: String,
    entries: Vec<ScoringEntry<W>>,
    sensors: Vec<SensorFactory<W>>,
}

impl<W> Clone for Profile<W>
where
    W: WorldMut + 'static,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            entries: self.entries.clone(),
            sensors: self.sensors.clone(),
        }
    }
}

impl<W> Profile<W>
where
    W: WorldMut + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            sensors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ScoringEntry<W>] {
        &self.entries
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn push_entry(&mut self, entry: ScoringEntry<W>) {
        self.entries.push(entry);
    }

    pub fn with_entry(mut self, entry: ScoringEntry<W>) -> Self {
        self.entries.push(entry);
        self
    }

    /// Shorthand for `with_entry(ScoringEntry::new(..))`.
    pub fn with_scored(
        self,
        label: &'static str,
        score_fn: impl Fn(&ScoreContext<'_, W>) -> f32 + 'static,
        make_fn: impl Fn(&ScoreContext<'_, W>) -> Box<dyn ai_core::Behavior<W>> + 'static,
    ) -> Self {
        self.with_entry(ScoringEntry::new(label, score_fn, make_fn))
    }

    pub fn with_sensor(mut self, factory: impl Fn() -> Box<dyn Sensor<W>> + 'static) -> Self {
        self.sensors.push(Rc::new(factory));
        self
    }

    pub fn build_sensors(&self) -> Vec<Box<dyn Sensor<W>>> {
        self.sensors.iter().map(|make| make()).collect()
    }

    pub fn selector(&self) -> TaskSelector<W> {
        TaskSelector::new(self.clone())
    }

    /// Replaces the brain's sensor set and policy with this profile's.
    pub fn install(&self, brain: &mut Brain<W>) {
        brain.install(self.build_sensors(), Box::new(self.selector()));
    }
}

impl<W> std::fmt::Debug for Profile<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .field("sensors", &self.sensors.len())
            .finish()
    }
}

/// `brain.install_profile(&profile)` sugar.
pub trait InstallProfile<W>
where
    W: WorldMut + 'static,
{
    fn install_profile(&mut self, profile: &Profile<W>);
}

impl<W> InstallProfile<W> for Brain<W>
where
    W: WorldMut + 'static,
{
    fn install_profile(&mut self, profile: &Profile<W>) {
        profile.install(self);
    }
}
