//! Trigger actions and their encoding.
//!
//! An action renders as `opcode,tag,param,p2,p3,p4,p5,cell`. The last field is the target
//! waypoint in base-26 letters, or `A` when the action has no target.

use mapforge_data::{CameraSpeed, House, RadarEvent, SpotlightBehavior};

use crate::cell;
use crate::idgen::Identifier;

opcode_table! {
    /// Action kinds understood by the engine.
    pub enum ActionKind {
        Nothing = (0, 0),
        DeclareWinner = (1, 0),
        DeclareLoser = (2, 0),
        ProductionBegins = (3, 0),
        CreateTeam = (4, 1),
        DestroyTeam = (5, 1),
        AllToHunt = (6, 0),
        /// Spawns the team at its own waypoint.
        Reinforcements = (7, 1),
        DropZoneFlare = (8, 0),
        FireSale = (9, 0),
        PlayMovie = (10, 0),
        TextTrigger = (11, 4),
        DestroyTrigger = (12, 2),
        AutocreateBegins = (13, 0),
        ChangeHouse = (14, 0),
        RevealAllMap = (16, 0),
        RevealAroundWaypoint = (17, 0),
        RevealWaypointZone = (18, 0),
        PlaySoundEffect = (19, 7),
        PlayMusic = (20, 8),
        PlaySpeech = (21, 6),
        ForceTrigger = (22, 2),
        TimerStart = (23, 0),
        TimerStop = (24, 0),
        TimerExtend = (25, 0),
        TimerShorten = (26, 0),
        TimerSet = (27, 0),
        GlobalSet = (28, 0),
        GlobalClear = (29, 0),
        AutoBaseBuilding = (30, 0),
        GrowShroud = (31, 0),
        DestroyAttachedObject = (32, 0),
        OneTimeSuperWeapon = (33, 0),
        RepeatingSuperWeapon = (34, 0),
        PreferredTarget = (35, 0),
        AllChangeHouse = (36, 0),
        MakeAlly = (37, 0),
        MakeEnemy = (38, 0),
        /// Uses the four extra fields as x, y, width, height.
        ChangeViewport = (40, 0),
        PlayAnimAt = (41, 0),
        ExplosionAt = (42, 0),
        VoxelAnimAt = (43, 0),
        DisablePlayerControl = (46, 0),
        EnablePlayerControl = (47, 0),
        MoveCameraTo = (48, 0),
        ZoomIn = (49, 0),
        ZoomOut = (50, 0),
        ReshroudMap = (51, 0),
        SpotlightBehavior = (52, 0),
        EnableTrigger = (53, 2),
        DisableTrigger = (54, 2),
        CreateRadarEvent = (55, 0),
        LocalSet = (56, 0),
        LocalClear = (57, 0),
        SellBuilding = (60, 0),
        TurnOffBuilding = (61, 0),
        TurnOnBuilding = (62, 0),
        Apply100Damage = (63, 0),
        WinScenario = (67, 0),
        LoseScenario = (68, 0),
        EndMission = (69, 0),
        StartAi = (74, 0),
        StopAi = (75, 0),
        ReinforcementsAt = (80, 1),
        WakeTeam = (81, 0),
        WakeAllSleepers = (82, 0),
        WakeAllHarmless = (83, 0),
        SetTimerText = (103, 4),
        ChronoReinforcementsAt = (107, 1),
        CenterCameraAt = (112, 0),
        AllCheer = (113, 0),
    }
}

/// The primary parameter slot of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParam {
    Zero,
    Number(i64),
    Text(String),
    Trigger(Identifier),
    Team(Identifier),
    /// Resolves to the owning trigger's id when rendered.
    SelfTrigger,
}

/// A single action attached to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub param: ActionParam,
    pub extra: [i64; 4],
    /// Target waypoint index; `None` renders the no-target sentinel.
    pub target: Option<u32>,
}

const NO_TARGET: &str = "A";

impl Action {
    pub fn new(kind: ActionKind, param: ActionParam) -> Self {
        Self {
            kind,
            param,
            extra: [0; 4],
            target: None,
        }
    }

    pub fn simple(kind: ActionKind) -> Self {
        Self::new(kind, ActionParam::Zero)
    }

    pub fn with_number(kind: ActionKind, value: impl Into<i64>) -> Self {
        Self::new(kind, ActionParam::Number(value.into()))
    }

    pub fn with_house(kind: ActionKind, house: &House) -> Self {
        Self::with_number(kind, house.index())
    }

    pub fn with_text(kind: ActionKind, text: impl Into<String>) -> Self {
        Self::new(kind, ActionParam::Text(text.into()))
    }

    pub fn with_trigger(kind: ActionKind, trigger: &Identifier) -> Self {
        Self::new(kind, ActionParam::Trigger(trigger.clone()))
    }

    pub fn with_team(kind: ActionKind, team: &Identifier) -> Self {
        Self::new(kind, ActionParam::Team(team.clone()))
    }

    /// Point the action at a waypoint.
    #[must_use]
    pub fn at(mut self, waypoint: u32) -> Self {
        self.target = Some(waypoint);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: [i64; 4]) -> Self {
        self.extra = extra;
        self
    }

    pub fn declare_winner(house: &House) -> Self {
        Self::with_house(ActionKind::DeclareWinner, house)
    }

    pub fn declare_loser(house: &House) -> Self {
        Self::with_house(ActionKind::DeclareLoser, house)
    }

    pub fn enable_trigger(trigger: &Identifier) -> Self {
        Self::with_trigger(ActionKind::EnableTrigger, trigger)
    }

    pub fn disable_trigger(trigger: &Identifier) -> Self {
        Self::with_trigger(ActionKind::DisableTrigger, trigger)
    }

    pub fn disable_self() -> Self {
        Self::new(ActionKind::DisableTrigger, ActionParam::SelfTrigger)
    }

    pub fn destroy_trigger(trigger: &Identifier) -> Self {
        Self::with_trigger(ActionKind::DestroyTrigger, trigger)
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::with_text(ActionKind::TextTrigger, label)
    }

    pub fn play_speech(speech: impl Into<String>) -> Self {
        Self::with_text(ActionKind::PlaySpeech, speech)
    }

    pub fn play_sound(sound: impl Into<String>) -> Self {
        Self::with_text(ActionKind::PlaySoundEffect, sound)
    }

    pub fn global_set(index: i64) -> Self {
        Self::with_number(ActionKind::GlobalSet, index)
    }

    pub fn global_clear(index: i64) -> Self {
        Self::with_number(ActionKind::GlobalClear, index)
    }

    pub fn timer_set(seconds: i64) -> Self {
        Self::with_number(ActionKind::TimerSet, seconds)
    }

    pub fn reinforcements(team: &Identifier) -> Self {
        Self::with_team(ActionKind::Reinforcements, team)
    }

    pub fn reinforcements_at(team: &Identifier, waypoint: u32) -> Self {
        Self::with_team(ActionKind::ReinforcementsAt, team).at(waypoint)
    }

    pub fn create_team(team: &Identifier) -> Self {
        Self::with_team(ActionKind::CreateTeam, team)
    }

    pub fn all_to_hunt(house: &House) -> Self {
        Self::with_house(ActionKind::AllToHunt, house)
    }

    pub fn drop_zone_flare(waypoint: u32) -> Self {
        Self::simple(ActionKind::DropZoneFlare).at(waypoint)
    }

    pub fn change_viewport(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::simple(ActionKind::ChangeViewport).with_extra([x, y, width, height])
    }

    pub fn move_camera_to(speed: CameraSpeed, waypoint: u32) -> Self {
        Self::with_number(ActionKind::MoveCameraTo, speed.value()).at(waypoint)
    }

    pub fn center_camera_at(waypoint: u32) -> Self {
        Self::simple(ActionKind::CenterCameraAt).at(waypoint)
    }

    pub fn spotlight(behavior: SpotlightBehavior) -> Self {
        Self::with_number(ActionKind::SpotlightBehavior, behavior.value())
    }

    pub fn radar_event(event: RadarEvent, waypoint: u32) -> Self {
        Self::with_number(ActionKind::CreateRadarEvent, event.value()).at(waypoint)
    }

    /// The trigger this action points at, if any. `SelfTrigger` is not reported.
    pub fn trigger_ref(&self) -> Option<&Identifier> {
        match &self.param {
            ActionParam::Trigger(id) => Some(id),
            _ => None,
        }
    }

    pub fn team_ref(&self) -> Option<&Identifier> {
        match &self.param {
            ActionParam::Team(id) => Some(id),
            _ => None,
        }
    }

    /// Render the tuple for the `[Actions]` line; `owner` replaces the self reference.
    pub fn render(&self, owner: &Identifier) -> String {
        let param = match &self.param {
            ActionParam::Zero => "0".to_string(),
            ActionParam::Number(n) => n.to_string(),
            ActionParam::Text(s) => s.clone(),
            ActionParam::Trigger(id) | ActionParam::Team(id) => id.to_string(),
            ActionParam::SelfTrigger => owner.to_string(),
        };
        let cell = self.target.map_or_else(|| NO_TARGET.to_string(), cell::encode);
        let [p2, p3, p4, p5] = self.extra;
        format!(
            "{},{},{param},{p2},{p3},{p4},{p5},{cell}",
            self.kind.opcode(),
            self.kind.param_tag()
        )
    }
}
