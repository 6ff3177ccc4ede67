use serde::{Deserialize, Serialize};

/// Deployment options written into a team's own section.
///
/// Every field has the engine's documented default, so a partial TOML table can be used to
/// override only a few of them.
///
/// ```
/// use mapforge_data::TeamOptions;
///
/// let opts: TeamOptions = toml::from_str("priority = 12\naggressive = true").unwrap();
/// assert_eq!(opts.priority, 12);
/// assert!(opts.aggressive);
/// assert_eq!(opts.max, 5);
/// assert_eq!(opts.house, "<none>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamOptions {
    pub name: Option<String>,
    pub veteran_level: i32,
    /// 0 = default, 1 = join controller's team, 2 = grinder, 3 = bio reactor, 4 = hunt, 5 = idle.
    pub mind_control_decision: i32,
    /// Transports with this set compute content scans.
    pub loadable: bool,
    pub full: bool,
    pub annoyance: bool,
    pub guard_slower: bool,
    pub house: String,
    /// Members may be pulled from lower priority teams and idle units.
    pub recruiter: bool,
    /// Only meaningful together with `recruiter`.
    pub autocreate: bool,
    pub prebuild: bool,
    pub reinforce: bool,
    pub droppod: bool,
    pub use_transport_origin: bool,
    pub transport_waypoint: Option<u32>,
    pub whiner: bool,
    /// Disband once the script finishes.
    pub loose_recruit: bool,
    pub aggressive: bool,
    pub suicide: bool,
    pub priority: i32,
    pub max: i32,
    pub tag: Option<String>,
    pub tech_level: i32,
    /// -2 lets the team pick any task force.
    pub group: i32,
    pub on_trans_only: bool,
    pub avoid_threats: bool,
    pub ion_immune: bool,
    pub transports_return_on_unload: bool,
    pub are_team_members_recruitable: bool,
    pub is_base_defense: bool,
    pub only_target_house_enemy: bool,
    pub waypoint: Option<u32>,
}

impl Default for TeamOptions {
    fn default() -> Self {
        Self {
            name: None,
            veteran_level: 1,
            mind_control_decision: 0,
            loadable: false,
            full: false,
            annoyance: false,
            guard_slower: false,
            house: "<none>".to_string(),
            recruiter: false,
            autocreate: false,
            prebuild: false,
            reinforce: false,
            droppod: false,
            use_transport_origin: false,
            transport_waypoint: None,
            whiner: false,
            loose_recruit: false,
            aggressive: false,
            suicide: false,
            priority: 5,
            max: 5,
            tag: None,
            tech_level: 0,
            group: -1,
            on_trans_only: false,
            avoid_threats: false,
            ion_immune: false,
            transports_return_on_unload: false,
            are_team_members_recruitable: false,
            is_base_defense: false,
            only_target_house_enemy: false,
            waypoint: None,
        }
    }
}
