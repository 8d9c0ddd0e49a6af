use ai_core::{Behavior, BehaviorContext, BehaviorKind};

use crate::{ActorWorldMut, FightConfig, Seat};

const STEP_PREFIX: &str = "fight.";

/// Switches the actor into the host's combat mode.
///
/// A driver first leaves the driver seat and takes the combat seat of the same vehicle, one
/// deferred step at a time; each step re-checks that the actor is alive and where it is
/// expected to be. Aiming, firing and cover are left to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fight {
    config: FightConfig,
}

impl Fight {
    pub fn new(config: FightConfig) -> Self {
        Self { config }
    }
}

impl<W> Behavior<W> for Fight
where
    W: ActorWorldMut + 'static,
{
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::FIGHT
    }

    fn enter(&mut self, ctx: &mut BehaviorContext<'_, W>, world: &mut W) {
        if !world.is_alive(ctx.agent) {
            return;
        }

        let Some(seat) = world.seat(ctx.agent).filter(|s| s.is_driver()) else {
            world.engage(ctx.agent);
            return;
        };

        world.exit_vehicle(ctx.agent);
        let combat_seat = Seat {
            vehicle: seat.vehicle,
            index: self.config.combat_seat,
        };
        let reseat_delay = self.config.reseat_delay_ms;
        tracing::debug!(agent = ?ctx.agent, vehicle = seat.vehicle, "dismounting to fight");

        ctx.schedule_after(
            self.config.dismount_delay_ms,
            "fight.reseat",
            move |dctx, world: &mut W| {
                if !world.is_alive(dctx.agent) || world.seat(dctx.agent).is_some() {
                    return;
                }
                world.enter_vehicle(dctx.agent, combat_seat);
                dctx.schedule_after(reseat_delay, "fight.engage", move |dctx, world: &mut W| {
                    if !world.is_alive(dctx.agent) {
                        return;
                    }
                    if world.seat(dctx.agent) == Some(combat_seat) {
                        world.engage(dctx.agent);
                    }
                });
            },
        );
    }

    fn exit(&mut self, ctx: &mut BehaviorContext<'_, W>, _world: &mut W) {
        let dropped = ctx.deferred.cancel(STEP_PREFIX);
        if dropped > 0 {
            tracing::debug!(agent = ?ctx.agent, dropped, "fight exited before reseating finished");
        }
    }
}
