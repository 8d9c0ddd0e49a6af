use std::path::Path;

use ai_core::Vec3;
use ai_tactics::TacticsConfig;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::arena::ArenaRules;

/// One team's starting force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadConfig {
    pub team: u16,
    pub spawn: Vec3,
    #[serde(default)]
    pub infantry: u32,
    #[serde(default)]
    pub vehicles: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    pub id: u32,
    pub position: Vec3,
    #[serde(default)]
    pub owner: Option<u16>,
}

/// A full scenario, usually loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub seed: u64,
    pub ticks: u64,
    pub tick_ms: u64,
    /// Policy cadence; brains are staggered over this many ticks by id.
    pub decide_every_ticks: u32,
    pub rules: ArenaRules,
    pub tactics: TacticsConfig,
    pub squads: Vec<SquadConfig>,
    pub objectives: Vec<ObjectiveConfig>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::skirmish()
    }
}

impl ArenaConfig {
    /// Two squads racing for three objectives on a 300 m strip.
    pub fn skirmish() -> Self {
        Self {
            seed: 0x5EED,
            ticks: 600,
            tick_ms: 250,
            decide_every_ticks: 2,
            rules: ArenaRules::default(),
            tactics: TacticsConfig::default(),
            squads: vec![
                SquadConfig {
                    team: 1,
                    spawn: Vec3::new(-150.0, 0.0, 0.0),
                    infantry: 4,
                    vehicles: 1,
                },
                SquadConfig {
                    team: 2,
                    spawn: Vec3::new(150.0, 0.0, 0.0),
                    infantry: 4,
                    vehicles: 1,
                },
            ],
            objectives: vec![
                ObjectiveConfig {
                    id: 1,
                    position: Vec3::new(-60.0, 0.0, 20.0),
                    owner: None,
                },
                ObjectiveConfig {
                    id: 2,
                    position: Vec3::ZERO,
                    owner: None,
                },
                ObjectiveConfig {
                    id: 3,
                    position: Vec3::new(60.0, 0.0, -20.0),
                    owner: None,
                },
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(
            self.decide_every_ticks > 0,
            "decide_every_ticks must be positive"
        );
        ensure!(self.rules.health > 0.0, "rules.health must be positive");
        ensure!(
            self.rules.vehicle_seats >= 2,
            "rules.vehicle_seats must leave room for a combat seat"
        );
        ensure!(
            u32::from(self.tactics.fight.combat_seat) < u32::from(self.rules.vehicle_seats),
            "tactics.fight.combat_seat {} does not exist (vehicles have {} seats)",
            self.tactics.fight.combat_seat,
            self.rules.vehicle_seats
        );
        self.tactics.validate().context("invalid tactics config")?;

        let mut ids: Vec<u32> = self.objectives.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ensure!(
            ids.len() == self.objectives.len(),
            "objective ids must be unique"
        );
        Ok(())
    }
}
