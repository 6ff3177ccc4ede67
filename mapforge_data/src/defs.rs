use serde::{Deserialize, Serialize};
use std::fmt;

/// Implements `value()` for fieldless enums whose discriminant is the number the engine reads.
macro_rules! numbered {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Integer written into the map file for this variant.
                pub const fn value(self) -> i32 {
                    self as i32
                }
            }

            impl From<$name> for i64 {
                fn from(value: $name) -> Self {
                    i64::from(value.value())
                }
            }
        )+
    };
}

/// A faction that can own triggers and be named in trigger parameters.
///
/// Trigger headers reference houses by name while condition and action parameters use the
/// numeric index, so both are carried together.
///
/// ```
/// use mapforge_data::{House, Player};
///
/// let soviets = House::new("Russians", 1);
/// assert_eq!(soviets.name(), "Russians");
/// assert_eq!(soviets.index(), 1);
///
/// let slot: House = Player::A.into();
/// assert_eq!(slot.name(), "<Player @A>");
/// assert_eq!(slot.index(), 4475);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct House {
    name: String,
    index: i32,
}

impl House {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> i32 {
        self.index
    }
}

impl From<&House> for House {
    fn from(house: &House) -> Self {
        house.clone()
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Multiplayer start slots; the engine addresses them with fixed house indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Player {
    A = 4475,
    B = 4476,
    C = 4477,
    D = 4478,
    E = 4479,
    F = 4480,
    G = 4481,
    H = 4482,
}

impl Player {
    pub fn letter(self) -> char {
        match self {
            Player::A => 'A',
            Player::B => 'B',
            Player::C => 'C',
            Player::D => 'D',
            Player::E => 'E',
            Player::F => 'F',
            Player::G => 'G',
            Player::H => 'H',
        }
    }
}

impl From<Player> for House {
    fn from(player: Player) -> Self {
        House::new(format!("<Player @{}>", player.letter()), player.value())
    }
}

/// Repeat policy of a trigger; the discriminant is the first field of its tag record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(i32)]
pub enum RepeatType {
    /// Fires once when any event holds.
    #[default]
    OneTimeOr = 0,
    /// Fires once when every event holds.
    OneTimeAnd = 1,
    /// Fires every time any event holds.
    RepeatingOr = 2,
}

/// Difficulty levels a trigger can be enabled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Camera pan speeds for the move-camera action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum CameraSpeed {
    VerySlow,
    Slow,
    Normal,
    Fast,
    VeryFast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum SpotlightBehavior {
    None,
    FixedAngle,
    Circle,
    FollowEnemy,
}

/// Radar event kinds raised by the create-radar-event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum RadarEvent {
    Combat,
    NonCombat,
    DropZone,
    BaseAttack,
    HarvestAttack,
    EnemySensed,
    UnitReady,
    UnitLost,
    UnitRepaired,
    BuildingInfiltrated,
    BuildingCaptured,
    BeaconPlaced,
    SuperWeaponDetected,
    SuperWeaponActivated,
    BridgeRepaired,
    GarrisonAbandoned,
    AllyAttack,
}

/// Target classes for the attack-nearest script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum AttackTarget {
    NotSpecified,
    /// Anything, using auto targeting.
    Anything,
    Buildings,
    Harvesters,
    Infantry,
    Vehicles,
    Factories,
    BaseDefenses,
    AnythingAlt,
    PowerPlants,
    Garrisonable,
    TechBuildings,
}

/// What a transport team keeps after an unload step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum UnloadResult {
    KeepAll,
    TransportOnly,
    PassengersOnly,
    ReleaseAll,
}

/// Unit missions a script can switch a team into. Entering a mission ends the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum Mission {
    Sleep,
    Attack,
    Move,
    QMove,
    Retreat,
    Guard,
    Sticky,
    Enter,
    Capture,
    Eaten,
    Harvest,
    AreaGuard,
    Return,
    Stop,
    Ambush,
    Hunt,
    Unload,
    Sabotage,
    Construction,
    Selling,
    Repair,
    Rescue,
    Missile,
    Harmless,
    Open,
    Patrol,
    ParadropApproach,
    ParadropOverfly,
    Wait,
    ChronoMove,
    AreaFire,
    SpyplaneApproach,
    SpyplaneOverfly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum Facing {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Threat selection added to a building type index in attack/move-to-building steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum Threat {
    Least = 0,
    Most = 65536,
    Nearest = 131_072,
    Farthest = 196_608,
}

/// Speech bubble shown over a unit by the talk-bubble script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum TalkBubble {
    None = 0,
    Asterisk = 1,
    Question = 2,
    Exclamation = 3,
}

numbered!(
    Player,
    RepeatType,
    CameraSpeed,
    SpotlightBehavior,
    RadarEvent,
    AttackTarget,
    UnloadResult,
    Mission,
    Facing,
    Threat,
    TalkBubble,
);
