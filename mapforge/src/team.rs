//! Teams: a task force, a unit script and the deployment option block.

use mapforge_data::TeamOptions;

use crate::cell;
use crate::error::{ForgeError, Result};
use crate::idgen::Identifier;
use crate::record::{self, yes_no};
use crate::registry::{Registry, ScriptRef, TaskForceRef, TeamRef};
use crate::script::ScriptBuilder;
use crate::taskforce::TaskForceBuilder;

pub const SECTION_LIST: &str = "TeamTypes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub(crate) id: Identifier,
    pub(crate) options: TeamOptions,
    pub(crate) task_force: Option<Identifier>,
    pub(crate) script: Option<Identifier>,
}

impl Team {
    pub(crate) fn new(id: Identifier, options: TeamOptions) -> Self {
        Self {
            id,
            options,
            task_force: None,
            script: None,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn options(&self) -> &TeamOptions {
        &self.options
    }

    pub fn task_force(&self) -> Option<&Identifier> {
        self.task_force.as_ref()
    }

    pub fn script(&self) -> Option<&Identifier> {
        self.script.as_ref()
    }

    /// Entries of the team's own section.
    ///
    /// Optional references (`Tag`, `Waypoint`, `TransportWaypoint`) are only written when set;
    /// waypoints use the letter encoding.
    ///
    /// # Errors
    /// - `MissingReference` when the task force or script was never assigned
    /// - `RecordTooLong` if any entry reaches the engine limit
    pub fn render_entries(&self) -> Result<Vec<(String, String)>> {
        let task_force = self.task_force.as_ref().ok_or_else(|| ForgeError::MissingReference {
            team: self.id.to_string(),
            missing: "task force",
        })?;
        let script = self.script.as_ref().ok_or_else(|| ForgeError::MissingReference {
            team: self.id.to_string(),
            missing: "script",
        })?;

        let o = &self.options;
        let mut entries: Vec<(&str, String)> = vec![
            ("Name", o.name.clone().unwrap_or_else(|| self.id.to_string())),
            ("VeteranLevel", o.veteran_level.to_string()),
            ("MindControlDecision", o.mind_control_decision.to_string()),
            ("Loadable", yes_no(o.loadable).to_string()),
            ("Full", yes_no(o.full).to_string()),
            ("Annoyance", yes_no(o.annoyance).to_string()),
            ("GuardSlower", yes_no(o.guard_slower).to_string()),
            ("House", o.house.clone()),
            ("Recruiter", yes_no(o.recruiter).to_string()),
            ("Autocreate", yes_no(o.autocreate).to_string()),
            ("Prebuild", yes_no(o.prebuild).to_string()),
            ("Reinforce", yes_no(o.reinforce).to_string()),
            ("Droppod", yes_no(o.droppod).to_string()),
            ("UseTransportOrigin", yes_no(o.use_transport_origin).to_string()),
            ("Whiner", yes_no(o.whiner).to_string()),
            ("LooseRecruit", yes_no(o.loose_recruit).to_string()),
            ("Aggressive", yes_no(o.aggressive).to_string()),
            ("Suicide", yes_no(o.suicide).to_string()),
            ("Priority", o.priority.to_string()),
            ("Max", o.max.to_string()),
            ("TechLevel", o.tech_level.to_string()),
            ("Group", o.group.to_string()),
            ("OnTransOnly", yes_no(o.on_trans_only).to_string()),
            ("AvoidThreats", yes_no(o.avoid_threats).to_string()),
            ("IonImmune", yes_no(o.ion_immune).to_string()),
            ("TransportsReturnOnUnload", yes_no(o.transports_return_on_unload).to_string()),
            ("AreTeamMembersRecruitable", yes_no(o.are_team_members_recruitable).to_string()),
            ("IsBaseDefense", yes_no(o.is_base_defense).to_string()),
            ("OnlyTargetHouseEnemy", yes_no(o.only_target_house_enemy).to_string()),
        ];
        if let Some(tag) = &o.tag {
            entries.push(("Tag", tag.clone()));
        }
        if let Some(waypoint) = o.waypoint {
            entries.push(("Waypoint", cell::encode(waypoint)));
        }
        if let Some(waypoint) = o.transport_waypoint {
            entries.push(("TransportWaypoint", cell::encode(waypoint)));
        }
        entries.push(("TaskForce", task_force.to_string()));
        entries.push(("Script", script.to_string()));

        let mut rendered = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            rendered.push((key.to_string(), record::fit(self.id.as_str(), key, value)?));
        }
        Ok(rendered)
    }
}

/// Fluent cursor over one team inside a [`Registry`].
#[derive(Debug)]
pub struct TeamBuilder<'a> {
    registry: &'a mut Registry,
    index: usize,
}

impl<'a> TeamBuilder<'a> {
    pub(crate) fn new(registry: &'a mut Registry, index: usize) -> Self {
        Self { registry, index }
    }

    fn record(&mut self) -> &mut Team {
        &mut self.registry.teams[self.index]
    }

    pub fn handle(&self) -> TeamRef {
        TeamRef(self.index)
    }

    pub fn id(&self) -> Identifier {
        self.registry.teams[self.index].id.clone()
    }

    /// Edit the option block in place.
    #[must_use]
    pub fn with_options<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(&mut TeamOptions),
    {
        edit(&mut self.record().options);
        self
    }

    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.with_options(|o| o.name = Some(name))
    }

    #[must_use]
    pub fn house(self, house: impl Into<String>) -> Self {
        let house = house.into();
        self.with_options(|o| o.house = house)
    }

    #[must_use]
    pub fn with_task_force(self, task_force: TaskForceRef) -> Self {
        let id = self.registry.task_force(task_force).id().clone();
        self.with_task_force_id(&id)
    }

    /// Reference a task force by id, e.g. one that already exists in the target map.
    #[must_use]
    pub fn with_task_force_id(mut self, task_force: &Identifier) -> Self {
        self.record().task_force = Some(task_force.clone());
        self
    }

    /// Create a task force, let `configure` fill it in, and assign it.
    #[must_use]
    pub fn with_task_force_new<F>(self, configure: F) -> Self
    where
        F: FnOnce(TaskForceBuilder<'_>) -> TaskForceBuilder<'_>,
    {
        let builder = self.registry.create_task_force();
        let handle = builder.handle();
        let _ = configure(builder);
        self.with_task_force(handle)
    }

    #[must_use]
    pub fn with_script(self, script: ScriptRef) -> Self {
        let id = self.registry.script(script).id().clone();
        self.with_script_id(&id)
    }

    #[must_use]
    pub fn with_script_id(mut self, script: &Identifier) -> Self {
        self.record().script = Some(script.clone());
        self
    }

    /// Create a unit script, let `configure` fill it in, and assign it.
    #[must_use]
    pub fn with_script_new<F>(self, configure: F) -> Self
    where
        F: FnOnce(ScriptBuilder<'_>) -> ScriptBuilder<'_>,
    {
        let builder = self.registry.create_script();
        let handle = builder.handle();
        let _ = configure(builder);
        self.with_script(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapforge_data::AttackTarget;

    fn entry<'a>(entries: &'a [(String, String)], key: &str) -> Option<&'a str> {
        entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn renders_options_and_references() {
        let mut registry = Registry::new();
        let team = registry
            .create_team()
            .name("Strike")
            .house("YuriCountry")
            .with_options(|o| {
                o.aggressive = true;
                o.waypoint = Some(27);
                o.priority = 50;
            })
            .with_task_force_new(|tf| tf.add("YTNK", 3))
            .with_script_new(|s| s.attack_nearest(AttackTarget::Anything))
            .handle();
        let entries = registry.team(team).render_entries().expect("entries");
        assert_eq!(entry(&entries, "Name"), Some("Strike"));
        assert_eq!(entry(&entries, "House"), Some("YuriCountry"));
        assert_eq!(entry(&entries, "Aggressive"), Some("yes"));
        assert_eq!(entry(&entries, "Suicide"), Some("no"));
        assert_eq!(entry(&entries, "Priority"), Some("50"));
        assert_eq!(entry(&entries, "Waypoint"), Some("AB"));
        assert_eq!(entry(&entries, "TaskForce"), Some("03D00001"));
        assert_eq!(entry(&entries, "Script"), Some("03E00001"));
        assert_eq!(entry(&entries, "Tag"), None);
        assert_eq!(entry(&entries, "TransportWaypoint"), None);
    }

    #[test]
    fn missing_task_force_is_an_error() {
        let mut registry = Registry::new();
        let team = registry.create_team().with_script_new(|s| s.deploy()).handle();
        match registry.team(team).render_entries() {
            Err(ForgeError::MissingReference { team, missing }) => {
                assert_eq!(team, "03C00001");
                assert_eq!(missing, "task force");
            },
            other => panic!("expected missing reference, got {other:?}"),
        }
    }

    #[test]
    fn missing_script_is_an_error() {
        let mut registry = Registry::new();
        let team = registry
            .create_team()
            .with_task_force_id(&Identifier::external("0A1B2C3D"))
            .handle();
        assert!(matches!(
            registry.team(team).render_entries(),
            Err(ForgeError::MissingReference { missing: "script", .. })
        ));
    }

    #[test]
    fn shared_records_are_referenced_not_copied() {
        let mut registry = Registry::new();
        let tf = registry.create_task_force().add("E1", 5).handle();
        let script = registry.create_script().guard_for(30).handle();
        let a = registry.create_team().with_task_force(tf).with_script(script).handle();
        let b = registry.create_team().with_task_force(tf).with_script(script).handle();
        assert_eq!(registry.task_forces().len(), 1);
        assert_eq!(registry.team(a).task_force(), registry.team(b).task_force());
    }
}
