//! Unit scripts: the ordered orders a team carries out.
//!
//! Each step renders as `index=opcode,argument` in the script's own section.

use mapforge_data::{AttackTarget, Facing, House, Mission, TalkBubble, Threat, UnloadResult};

use crate::error::Result;
use crate::idgen::Identifier;
use crate::record;
use crate::registry::{Registry, ScriptRef};

pub const SECTION_LIST: &str = "ScriptTypes";

/// Script opcodes understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ScriptOp {
    AttackNearest = 0,
    AttackWaypoint = 1,
    MoveToWaypoint = 3,
    MoveToCell = 4,
    GuardFor = 5,
    /// Jump to a 1-based line of the same script.
    JumpToLine = 6,
    PlayerWins = 7,
    Unload = 8,
    Deploy = 9,
    FollowFriendly = 10,
    EnterMission = 11,
    LoadOntoTransport = 14,
    PatrolToWaypoint = 16,
    ChangeScript = 17,
    ChangeTeam = 18,
    Panic = 19,
    ChangeHouse = 20,
    Scatter = 21,
    MoveIntoShroud = 22,
    PlayerLoses = 23,
    StartProduction = 29,
    SellAndReturn = 30,
    SelfDestruct = 31,
    DeleteTeamMembers = 37,
    Calm = 41,
    FaceDirection = 42,
    WaitUntilFullyLoaded = 43,
    AttackBuilding = 46,
    MoveToBuilding = 47,
    Scout = 48,
    Flash = 50,
    PlayAnimation = 51,
    TalkBubble = 52,
    AttackBuildingAtWaypoint = 59,
    /// Extended engine only.
    AreaGuardFor = 10100,
}

impl ScriptOp {
    pub const fn opcode(self) -> u32 {
        self as u32
    }
}

/// An ordered list of `(opcode, argument)` steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitScript {
    pub(crate) id: Identifier,
    pub(crate) name: Option<String>,
    pub(crate) steps: Vec<(ScriptOp, i64)>,
}

impl UnitScript {
    pub(crate) fn new(id: Identifier) -> Self {
        Self {
            id,
            name: None,
            steps: Vec::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn steps(&self) -> &[(ScriptOp, i64)] {
        &self.steps
    }

    /// Entries of the script's own section: `Name` followed by one line per step.
    ///
    /// # Errors
    /// `RecordTooLong` if any entry reaches the engine limit.
    pub fn render_entries(&self) -> Result<Vec<(String, String)>> {
        let section = self.id.as_str();
        let name = self.name.clone().unwrap_or_else(|| self.id.to_string());
        let mut entries = vec![("Name".to_string(), record::fit(section, "Name", name)?)];
        for (index, (op, arg)) in self.steps.iter().enumerate() {
            entries.push((index.to_string(), format!("{},{arg}", op.opcode())));
        }
        Ok(entries)
    }
}

/// Fluent cursor over one unit script inside a [`Registry`].
#[derive(Debug)]
pub struct ScriptBuilder<'a> {
    registry: &'a mut Registry,
    index: usize,
}

impl<'a> ScriptBuilder<'a> {
    pub(crate) fn new(registry: &'a mut Registry, index: usize) -> Self {
        Self { registry, index }
    }

    pub fn handle(&self) -> ScriptRef {
        ScriptRef(self.index)
    }

    pub fn id(&self) -> Identifier {
        self.registry.scripts[self.index].id.clone()
    }

    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.registry.scripts[self.index].name = Some(name.into());
        self
    }

    /// Append a raw step.
    #[must_use]
    pub fn step(self, op: ScriptOp, arg: impl Into<i64>) -> Self {
        self.registry.scripts[self.index].steps.push((op, arg.into()));
        self
    }

    #[must_use]
    pub fn attack_nearest(self, target: AttackTarget) -> Self {
        self.step(ScriptOp::AttackNearest, target.value())
    }

    #[must_use]
    pub fn attack_waypoint(self, waypoint: u32) -> Self {
        self.step(ScriptOp::AttackWaypoint, waypoint)
    }

    #[must_use]
    pub fn move_to_waypoint(self, waypoint: u32) -> Self {
        self.step(ScriptOp::MoveToWaypoint, waypoint)
    }

    /// Move to map cell `(x, y)`; the engine packs it as `x + y * 128`.
    #[must_use]
    pub fn move_to_cell(self, x: u32, y: u32) -> Self {
        self.step(ScriptOp::MoveToCell, i64::from(x) + i64::from(y) * 128)
    }

    #[must_use]
    pub fn guard_for(self, seconds: u32) -> Self {
        self.step(ScriptOp::GuardFor, seconds)
    }

    /// Jump back to `line`, counted from 1.
    #[must_use]
    pub fn jump_to_line(self, line: u32) -> Self {
        self.step(ScriptOp::JumpToLine, line)
    }

    #[must_use]
    pub fn player_wins(self) -> Self {
        self.step(ScriptOp::PlayerWins, 0)
    }

    #[must_use]
    pub fn player_loses(self) -> Self {
        self.step(ScriptOp::PlayerLoses, 0)
    }

    #[must_use]
    pub fn unload(self, keep: UnloadResult) -> Self {
        self.step(ScriptOp::Unload, keep.value())
    }

    #[must_use]
    pub fn deploy(self) -> Self {
        self.step(ScriptOp::Deploy, 0)
    }

    #[must_use]
    pub fn follow_friendly(self) -> Self {
        self.step(ScriptOp::FollowFriendly, 0)
    }

    /// Switch into `mission`; the script ends here.
    #[must_use]
    pub fn enter_mission(self, mission: Mission) -> Self {
        self.step(ScriptOp::EnterMission, mission.value())
    }

    #[must_use]
    pub fn load_onto_transport(self) -> Self {
        self.step(ScriptOp::LoadOntoTransport, 0)
    }

    #[must_use]
    pub fn patrol_to(self, waypoint: u32) -> Self {
        self.step(ScriptOp::PatrolToWaypoint, waypoint)
    }

    #[must_use]
    pub fn change_script(self, index: u32) -> Self {
        self.step(ScriptOp::ChangeScript, index)
    }

    #[must_use]
    pub fn change_team(self, index: u32) -> Self {
        self.step(ScriptOp::ChangeTeam, index)
    }

    #[must_use]
    pub fn panic(self) -> Self {
        self.step(ScriptOp::Panic, 0)
    }

    #[must_use]
    pub fn change_house(self, house: &House) -> Self {
        self.step(ScriptOp::ChangeHouse, house.index())
    }

    #[must_use]
    pub fn scatter(self) -> Self {
        self.step(ScriptOp::Scatter, 0)
    }

    #[must_use]
    pub fn move_into_shroud(self) -> Self {
        self.step(ScriptOp::MoveIntoShroud, 0)
    }

    #[must_use]
    pub fn start_production(self) -> Self {
        self.step(ScriptOp::StartProduction, 0)
    }

    #[must_use]
    pub fn sell_and_return(self) -> Self {
        self.step(ScriptOp::SellAndReturn, 0)
    }

    #[must_use]
    pub fn self_destruct(self) -> Self {
        self.step(ScriptOp::SelfDestruct, 0)
    }

    #[must_use]
    pub fn delete_team_members(self) -> Self {
        self.step(ScriptOp::DeleteTeamMembers, 0)
    }

    #[must_use]
    pub fn calm(self) -> Self {
        self.step(ScriptOp::Calm, 0)
    }

    #[must_use]
    pub fn face(self, facing: Facing) -> Self {
        self.step(ScriptOp::FaceDirection, facing.value())
    }

    #[must_use]
    pub fn wait_until_fully_loaded(self) -> Self {
        self.step(ScriptOp::WaitUntilFullyLoaded, 0)
    }

    /// Attack the building type at `building_index` in the rules list, picked by `threat`.
    #[must_use]
    pub fn attack_building(self, building_index: i32, threat: Threat) -> Self {
        self.step(
            ScriptOp::AttackBuilding,
            i64::from(building_index) + i64::from(threat.value()),
        )
    }

    #[must_use]
    pub fn move_to_building(self, building_index: i32, threat: Threat) -> Self {
        self.step(
            ScriptOp::MoveToBuilding,
            i64::from(building_index) + i64::from(threat.value()),
        )
    }

    #[must_use]
    pub fn scout(self) -> Self {
        self.step(ScriptOp::Scout, 0)
    }

    #[must_use]
    pub fn flash(self, frames: u32) -> Self {
        self.step(ScriptOp::Flash, frames)
    }

    #[must_use]
    pub fn play_animation(self, index: u32) -> Self {
        self.step(ScriptOp::PlayAnimation, index)
    }

    #[must_use]
    pub fn talk_bubble(self, bubble: TalkBubble) -> Self {
        self.step(ScriptOp::TalkBubble, bubble.value())
    }

    #[must_use]
    pub fn attack_building_at(self, waypoint: u32) -> Self {
        self.step(ScriptOp::AttackBuildingAtWaypoint, waypoint)
    }

    #[must_use]
    pub fn area_guard_for(self, seconds: u32) -> Self {
        self.step(ScriptOp::AreaGuardFor, seconds)
    }
}
