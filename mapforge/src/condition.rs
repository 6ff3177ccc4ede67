//! Trigger conditions ("events") and their encoding.
//!
//! Each condition renders as `opcode,tag,param` (or `opcode,2,count,type` for the techno
//! count conditions). Opcodes and tags live in the table below; payloads are typed.
//!
//! Some opcodes are deliberately shared by more than one kind because the engine treats them
//! the same way: `AttackedByAnyHouse` and `DestroyedByAnyHouse` are both 6, and
//! `BridgeDestroyed` and `SelectedByPlayer` are both 31. Existing maps depend on these exact
//! values, so the aliases stay.

use mapforge_data::House;

opcode_table! {
    /// Condition kinds understood by the engine.
    pub enum ConditionKind {
        Nothing = (0, 0),
        /// An infantry or vehicle of the given house enters the attached object.
        EnteredBy = (1, 0),
        DiscoveredByPlayer = (4, 0),
        HouseDiscovered = (5, 0),
        AttackedByAnyHouse = (6, 0),
        DestroyedByAnyHouse = (6, 0),
        AnyEvent = (8, 0),
        UnitsDestroyed = (9, 0),
        BuildingsDestroyed = (10, 0),
        AllDestroyed = (11, 0),
        CreditsExceed = (12, 0),
        /// Counts from the moment the trigger is enabled; repeating triggers restart it.
        ElapsedTime = (13, 0),
        MissionTimerExpired = (14, 0),
        DestroyedBuildingsCount = (15, 0),
        DestroyedUnitsCount = (16, 0),
        NoFactoriesLeft = (17, 0),
        BuildBuildingType = (19, 0),
        BuildUnitType = (20, 0),
        BuildInfantryType = (21, 0),
        BuildAircraftType = (22, 0),
        TeamLeavesMap = (23, 1),
        ZoneEntryBy = (24, 0),
        CrossesHorizontalLine = (25, 0),
        CrossesVerticalLine = (26, 0),
        GlobalSet = (27, 0),
        GlobalCleared = (28, 0),
        DestroyedByAnything = (29, 0),
        LowPower = (30, 0),
        BridgeDestroyed = (31, 0),
        BuildingExists = (32, 0),
        SelectedByPlayer = (31, 0),
        ComesNearWaypoint = (34, 0),
        EnemyInSpotlight = (35, 0),
        LocalSet = (36, 0),
        LocalCleared = (37, 0),
        FirstDamaged = (38, 0),
        HalfHealth = (39, 0),
        QuarterHealth = (40, 0),
        FirstDamagedAnySource = (41, 0),
        HalfHealthAnySource = (42, 0),
        QuarterHealthAnySource = (43, 0),
        AttackedByHouse = (44, 0),
        AmbientLightBelow = (45, 0),
        AmbientLightAbove = (46, 0),
        ElapsedScenarioTime = (47, 0),
        DestroyedByAnythingAlt = (48, 0),
        PickupCrate = (49, 0),
        PickupCrateAny = (50, 0),
        RandomDelay = (51, 0),
        CreditsBelow = (52, 0),
        NavalUnitsDestroyed = (55, 0),
        LandUnitsDestroyed = (56, 0),
        BuildingDoesNotExist = (57, 0),
        PowerFull = (58, 0),
        EnteredOrOverflownBy = (59, 0),
        TechTypeExists = (60, 2),
        TechTypeDoesNotExist = (61, 2),
        UnderEmp = (62, 0),
    }
}

/// Typed payload of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionParam {
    None,
    Number(i64),
    /// `count,type` pair used by the techno count conditions.
    CountOf { count: i64, techno: String },
}

/// A single condition attached to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub param: ConditionParam,
}

impl Condition {
    /// A condition whose parameter slot is unused.
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            param: ConditionParam::None,
        }
    }

    pub fn with_number(kind: ConditionKind, value: impl Into<i64>) -> Self {
        Self {
            kind,
            param: ConditionParam::Number(value.into()),
        }
    }

    /// House parameters are written as the house index.
    pub fn with_house(kind: ConditionKind, house: &House) -> Self {
        Self::with_number(kind, house.index())
    }

    pub fn count_of(kind: ConditionKind, count: i64, techno: impl Into<String>) -> Self {
        Self {
            kind,
            param: ConditionParam::CountOf {
                count,
                techno: techno.into(),
            },
        }
    }

    pub fn elapsed_time(seconds: i64) -> Self {
        Self::with_number(ConditionKind::ElapsedTime, seconds)
    }

    pub fn elapsed_scenario_time(seconds: i64) -> Self {
        Self::with_number(ConditionKind::ElapsedScenarioTime, seconds)
    }

    pub fn mission_timer_expired() -> Self {
        Self::new(ConditionKind::MissionTimerExpired)
    }

    pub fn entered_by(house: &House) -> Self {
        Self::with_house(ConditionKind::EnteredBy, house)
    }

    pub fn attacked_by(house: &House) -> Self {
        Self::with_house(ConditionKind::AttackedByHouse, house)
    }

    pub fn all_destroyed(house: &House) -> Self {
        Self::with_house(ConditionKind::AllDestroyed, house)
    }

    pub fn global_set(index: i64) -> Self {
        Self::with_number(ConditionKind::GlobalSet, index)
    }

    pub fn global_cleared(index: i64) -> Self {
        Self::with_number(ConditionKind::GlobalCleared, index)
    }

    pub fn local_set(index: i64) -> Self {
        Self::with_number(ConditionKind::LocalSet, index)
    }

    pub fn credits_exceed(amount: i64) -> Self {
        Self::with_number(ConditionKind::CreditsExceed, amount)
    }

    pub fn random_delay(seconds: i64) -> Self {
        Self::with_number(ConditionKind::RandomDelay, seconds)
    }

    pub fn tech_type_exists(count: i64, techno: impl Into<String>) -> Self {
        Self::count_of(ConditionKind::TechTypeExists, count, techno)
    }

    pub fn tech_type_does_not_exist(count: i64, techno: impl Into<String>) -> Self {
        Self::count_of(ConditionKind::TechTypeDoesNotExist, count, techno)
    }

    /// Render the comma separated tuple for the `[Events]` line.
    pub fn render(&self) -> String {
        let opcode = self.kind.opcode();
        let tag = self.kind.param_tag();
        match &self.param {
            ConditionParam::None => format!("{opcode},{tag},0"),
            ConditionParam::Number(n) => format!("{opcode},{tag},{n}"),
            ConditionParam::CountOf { count, techno } => format!("{opcode},{tag},{count},{techno}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_numeric_conditions() {
        assert_eq!(Condition::elapsed_time(3).render(), "13,0,3");
        assert_eq!(Condition::new(ConditionKind::Nothing).render(), "0,0,0");
        assert_eq!(Condition::entered_by(&House::new("YuriCountry", 9)).render(), "1,0,9");
    }

    #[test]
    fn team_leaves_map_uses_team_tag() {
        assert_eq!(Condition::new(ConditionKind::TeamLeavesMap).render(), "23,1,0");
    }

    #[test]
    fn techno_count_uses_two_fields() {
        assert_eq!(Condition::tech_type_exists(3, "HTNK").render(), "60,2,3,HTNK");
        assert_eq!(Condition::tech_type_does_not_exist(1, "GAPOWR").render(), "61,2,1,GAPOWR");
    }

    #[test]
    fn aliased_opcodes_are_preserved() {
        assert_eq!(
            ConditionKind::AttackedByAnyHouse.opcode(),
            ConditionKind::DestroyedByAnyHouse.opcode()
        );
        assert_eq!(
            ConditionKind::BridgeDestroyed.opcode(),
            ConditionKind::SelectedByPlayer.opcode()
        );
        assert_ne!(ConditionKind::AttackedByAnyHouse, ConditionKind::DestroyedByAnyHouse);
    }

    #[test]
    fn table_lists_every_kind() {
        assert!(ConditionKind::ALL.contains(&ConditionKind::UnderEmp));
        assert_eq!(ConditionKind::ALL.first(), Some(&ConditionKind::Nothing));
    }
}
