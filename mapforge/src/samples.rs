//! Templates shipped with the binary.

use mapforge_data::{AttackTarget, House, Mission, RepeatType};

use crate::action::Action;
use crate::condition::Condition;
use crate::error::Result;
use crate::registry::Registry;
use crate::template::Template;

fn yuri() -> House {
    House::new("YuriCountry", 9)
}

/// Yuri wins a short while after entering the map.
#[derive(Debug, Default, Clone, Copy)]
pub struct YuriVictory;

impl Template for YuriVictory {
    fn name(&self) -> &str {
        "yuri-victory"
    }

    fn description(&self) -> &str {
        "three chained triggers ending in a Yuri victory"
    }

    fn populate(&self, registry: &mut Registry) -> Result<()> {
        let _ = registry
            .create_trigger()
            .name("AutoWin")
            .description("entry")
            .group("Victory")
            .owner(yuri())
            .on(Condition::entered_by(&yuri()))
            .then_new(|t| t.name("AutoWin.Wait").owner(yuri()).on(Condition::elapsed_time(100)))
            .then_new(|t| {
                t.name("AutoWin.Declare")
                    .owner(yuri())
                    .on(Condition::elapsed_time(100))
                    .act(Action::declare_winner(&yuri()))
            });
        Ok(())
    }
}

/// Two raiding parties sent from waypoints 70 and 71 every few minutes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Raid;

impl Template for Raid {
    fn name(&self) -> &str {
        "raid"
    }

    fn description(&self) -> &str {
        "repeating reinforcements with attack scripts"
    }

    fn populate(&self, registry: &mut Registry) -> Result<()> {
        let tanks = registry.create_task_force().name("Raid tanks").add("HTNK", 5).handle();
        let mut teams = Vec::new();
        for waypoint in [70, 71] {
            let script = registry
                .create_script()
                .name(format!("Raid from {waypoint}"))
                .move_to_waypoint(waypoint)
                .attack_nearest(AttackTarget::Anything)
                .enter_mission(Mission::Hunt)
                .handle();
            let team = registry
                .create_team()
                .name(format!("Raid {waypoint}"))
                .house(yuri().name())
                .with_options(|o| {
                    o.aggressive = true;
                    o.waypoint = Some(waypoint);
                })
                .with_task_force(tanks)
                .with_script(script)
                .id();
            teams.push((team, waypoint));
        }

        let mut sender = registry
            .create_trigger()
            .name("Raid.Send")
            .group("Raid")
            .owner(yuri())
            .repeat(RepeatType::RepeatingOr)
            .on(Condition::elapsed_time(240));
        for (team, waypoint) in &teams {
            sender = sender.act(Action::reinforcements_at(team, *waypoint));
        }
        let _ = sender.act(Action::text("MSG:RaidIncoming"));
        Ok(())
    }
}

/// Every bundled template.
pub fn bundled() -> Vec<Box<dyn Template>> {
    vec![Box::new(YuriVictory), Box::new(Raid)]
}

pub fn find(name: &str) -> Option<Box<dyn Template>> {
    bundled().into_iter().find(|t| t.name() == name)
}
