//! The registry owns every record built during one run.
//!
//! Records are only created here, so creation and registration cannot drift apart. Builders
//! are short-lived cursors borrowing the registry mutably; the typed `*Ref` handles are plain
//! indices that stay valid for the registry's lifetime.

use log::debug;
use mapforge_data::TeamOptions;

use crate::error::{ForgeError, Result};
use crate::idgen::{IdGenerator, Identifier, Namespace};
use crate::script::{ScriptBuilder, UnitScript};
use crate::taskforce::{TaskForce, TaskForceBuilder};
use crate::team::{Team, TeamBuilder};
use crate::trigger::{Trigger, TriggerBuilder};

/// Handle to a trigger owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerRef(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamRef(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskForceRef(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptRef(pub(crate) usize);

/// All triggers, teams, task forces and unit scripts of one build, in creation order.
#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) ids: IdGenerator,
    pub(crate) triggers: Vec<Trigger>,
    pub(crate) teams: Vec<Team>,
    pub(crate) task_forces: Vec<TaskForce>,
    pub(crate) scripts: Vec<UnitScript>,
    team_defaults: TeamOptions,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose new teams start from `defaults` instead of the engine defaults.
    pub fn with_team_defaults(defaults: TeamOptions) -> Self {
        Self {
            team_defaults: defaults,
            ..Self::default()
        }
    }

    pub fn team_defaults(&self) -> &TeamOptions {
        &self.team_defaults
    }

    /// Allocate and register a trigger, returning a builder on it.
    pub fn create_trigger(&mut self) -> TriggerBuilder<'_> {
        let (id, tag) = self.ids.next_trigger();
        let index = self.triggers.len();
        self.triggers.push(Trigger::new(id, tag));
        TriggerBuilder::new(self, index)
    }

    /// Create a trigger and let `configure` fill it in.
    ///
    /// The returned handle always names the trigger created here, even when `configure`
    /// walks a chain and hands back a builder on a later trigger.
    pub fn create_and_configure<F>(&mut self, configure: F) -> TriggerRef
    where
        F: FnOnce(TriggerBuilder<'_>) -> TriggerBuilder<'_>,
    {
        let builder = self.create_trigger();
        let handle = builder.handle();
        let _ = configure(builder);
        handle
    }

    /// Reopen an existing trigger for further configuration.
    pub fn edit_trigger(&mut self, trigger: TriggerRef) -> TriggerBuilder<'_> {
        TriggerBuilder::new(self, trigger.0)
    }

    pub fn create_team(&mut self) -> TeamBuilder<'_> {
        let id = self.ids.next(Namespace::Team);
        let index = self.teams.len();
        self.teams.push(Team::new(id, self.team_defaults.clone()));
        TeamBuilder::new(self, index)
    }

    pub fn create_task_force(&mut self) -> TaskForceBuilder<'_> {
        let id = self.ids.next(Namespace::TaskForce);
        let index = self.task_forces.len();
        self.task_forces.push(TaskForce::new(id));
        TaskForceBuilder::new(self, index)
    }

    pub fn create_script(&mut self) -> ScriptBuilder<'_> {
        let id = self.ids.next(Namespace::Script);
        let index = self.scripts.len();
        self.scripts.push(UnitScript::new(id));
        ScriptBuilder::new(self, index)
    }

    /// Identifier for a caller-chosen key; each key may be used once per registry.
    ///
    /// # Errors
    /// `DuplicateFixedKey` on reuse, `InvalidArgument` for negative keys.
    pub fn fixed_id(&mut self, key: i32) -> Result<Identifier> {
        self.ids.fixed(key)
    }

    /// Look up the single trigger whose display name is `name`.
    ///
    /// # Errors
    /// `UnknownTrigger` when nothing matches, `AmbiguousTrigger` when several triggers do.
    pub fn find_trigger(&self, name: &str) -> Result<TriggerRef> {
        let mut matches = self
            .triggers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.name() == name)
            .map(|(i, _)| TriggerRef(i));
        match (matches.next(), matches.count()) {
            (None, _) => Err(ForgeError::UnknownTrigger(name.to_string())),
            (Some(found), 0) => Ok(found),
            (Some(_), rest) => Err(ForgeError::AmbiguousTrigger {
                name: name.to_string(),
                count: rest + 1,
            }),
        }
    }

    pub fn trigger_by_id(&self, id: &Identifier) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.id() == id)
    }

    pub fn trigger(&self, trigger: TriggerRef) -> &Trigger {
        &self.triggers[trigger.0]
    }

    pub fn team(&self, team: TeamRef) -> &Team {
        &self.teams[team.0]
    }

    pub fn task_force(&self, task_force: TaskForceRef) -> &TaskForce {
        &self.task_forces[task_force.0]
    }

    pub fn script(&self, script: ScriptRef) -> &UnitScript {
        &self.scripts[script.0]
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn task_forces(&self) -> &[TaskForce] {
        &self.task_forces
    }

    pub fn scripts(&self) -> &[UnitScript] {
        &self.scripts
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.teams.is_empty() && self.task_forces.is_empty() && self.scripts.is_empty()
    }

    pub(crate) fn log_summary(&self) {
        debug!(
            "registry holds {} triggers, {} teams, {} task forces, {} scripts",
            self.triggers.len(),
            self.teams.len(),
            self.task_forces.len(),
            self.scripts.len()
        );
    }
}
