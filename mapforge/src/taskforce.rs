//! Task forces: the unit composition of a team.

use crate::error::Result;
use crate::idgen::Identifier;
use crate::record;
use crate::registry::{Registry, TaskForceRef};

pub const SECTION_LIST: &str = "TaskForces";

/// Ordered `(unit type, count)` pairs under one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForce {
    pub(crate) id: Identifier,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) group: i32,
    pub(crate) units: Vec<(String, u32)>,
}

impl TaskForce {
    pub(crate) fn new(id: Identifier) -> Self {
        Self {
            id,
            name: None,
            description: None,
            group: -1,
            units: Vec::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn group(&self) -> i32 {
        self.group
    }

    pub fn units(&self) -> &[(String, u32)] {
        &self.units
    }

    /// Entries of the task force's own section: `Name`, one `n=count,type` per unit and `Group`.
    ///
    /// # Errors
    /// `RecordTooLong` if any entry reaches the engine limit.
    pub fn render_entries(&self) -> Result<Vec<(String, String)>> {
        let section = self.id.as_str();
        let name = self.name.clone().unwrap_or_else(|| self.id.to_string());
        let mut entries = vec![("Name".to_string(), record::fit(section, "Name", name)?)];
        for (index, (unit, count)) in self.units.iter().enumerate() {
            let key = index.to_string();
            let value = record::fit(section, &key, format!("{count},{unit}"))?;
            entries.push((key, value));
        }
        entries.push(("Group".to_string(), self.group.to_string()));
        Ok(entries)
    }
}

/// Fluent cursor over one task force inside a [`Registry`].
#[derive(Debug)]
pub struct TaskForceBuilder<'a> {
    registry: &'a mut Registry,
    index: usize,
}

impl<'a> TaskForceBuilder<'a> {
    pub(crate) fn new(registry: &'a mut Registry, index: usize) -> Self {
        Self { registry, index }
    }

    fn record(&mut self) -> &mut TaskForce {
        &mut self.registry.task_forces[self.index]
    }

    pub fn handle(&self) -> TaskForceRef {
        TaskForceRef(self.index)
    }

    pub fn id(&self) -> Identifier {
        self.registry.task_forces[self.index].id.clone()
    }

    /// Append `count` units of `unit`; order is kept.
    #[must_use]
    pub fn add(mut self, unit: impl Into<String>, count: u32) -> Self {
        self.record().units.push((unit.into(), count));
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record().name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record().description = Some(description.into());
        self
    }

    #[must_use]
    pub fn group(mut self, group: i32) -> Self {
        self.record().group = group;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_units_in_order() {
        let mut registry = Registry::new();
        let tf = registry
            .create_task_force()
            .name("Tanks")
            .add("HTNK", 4)
            .add("E2", 10)
            .handle();
        let entries = registry.task_force(tf).render_entries().expect("entries");
        let rendered: Vec<String> = entries.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(rendered, vec!["Name=Tanks", "0=4,HTNK", "1=10,E2", "Group=-1"]);
    }

    #[test]
    fn unnamed_task_force_uses_its_id() {
        let mut registry = Registry::new();
        let tf = registry.create_task_force().group(3).handle();
        let entries = registry.task_force(tf).render_entries().expect("entries");
        assert_eq!(entries[0], ("Name".to_string(), "03D00001".to_string()));
        assert_eq!(entries[1], ("Group".to_string(), "3".to_string()));
    }
}
