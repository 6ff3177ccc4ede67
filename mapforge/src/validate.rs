//! Non-fatal checks run before every build.

use std::collections::HashSet;
use std::fmt;

use crate::idgen::Identifier;
use crate::registry::Registry;

/// Suspicious but legal content found in a registry.
///
/// None of these stop a build: references to ids outside the registry are normal in append
/// mode, where they usually point at records of the hand-authored map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A trigger with no conditions never fires.
    NoConditions { trigger: String },
    NoActions { trigger: String },
    NoOwner { trigger: String },
    ExternalReference { kind: &'static str, id: String, context: String },
    EmptyTaskForce { task_force: String },
    EmptyScript { script: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NoConditions { trigger } => write!(f, "trigger '{trigger}' has no conditions"),
            Finding::NoActions { trigger } => write!(f, "trigger '{trigger}' has no actions"),
            Finding::NoOwner { trigger } => write!(f, "trigger '{trigger}' has no owner"),
            Finding::ExternalReference { kind, id, context } => {
                write!(f, "{kind} '{id}' is not built in this run ({context})")
            },
            Finding::EmptyTaskForce { task_force } => write!(f, "task force '{task_force}' has no units"),
            Finding::EmptyScript { script } => write!(f, "script '{script}' has no steps"),
        }
    }
}

/// Check cross-references and obvious omissions.
pub fn validate_registry(registry: &Registry) -> Vec<Finding> {
    let mut findings = Vec::new();

    let triggers: HashSet<&Identifier> = registry.triggers().iter().map(|t| t.id()).collect();
    let teams: HashSet<&Identifier> = registry.teams().iter().map(|t| t.id()).collect();
    let task_forces: HashSet<&Identifier> = registry.task_forces().iter().map(|t| t.id()).collect();
    let scripts: HashSet<&Identifier> = registry.scripts().iter().map(|s| s.id()).collect();

    for trigger in registry.triggers() {
        let label = format!("{} [{}]", trigger.name(), trigger.id());
        if trigger.conditions().is_empty() {
            findings.push(Finding::NoConditions { trigger: label.clone() });
        }
        if trigger.actions().is_empty() {
            findings.push(Finding::NoActions { trigger: label.clone() });
        }
        if trigger.owner().is_none() {
            findings.push(Finding::NoOwner { trigger: label.clone() });
        }
        if let Some(related) = trigger.related() {
            check_ref("trigger", related, &triggers, format!("related to '{label}'"), &mut findings);
        }
        for action in trigger.actions() {
            if let Some(target) = action.trigger_ref() {
                check_ref("trigger", target, &triggers, format!("action of '{label}'"), &mut findings);
            }
            if let Some(team) = action.team_ref() {
                check_ref("team", team, &teams, format!("action of '{label}'"), &mut findings);
            }
        }
    }

    for team in registry.teams() {
        if let Some(task_force) = team.task_force() {
            check_ref(
                "task force",
                task_force,
                &task_forces,
                format!("team '{}'", team.id()),
                &mut findings,
            );
        }
        if let Some(script) = team.script() {
            check_ref("script", script, &scripts, format!("team '{}'", team.id()), &mut findings);
        }
    }

    for task_force in registry.task_forces() {
        if task_force.units().is_empty() {
            findings.push(Finding::EmptyTaskForce {
                task_force: task_force.id().to_string(),
            });
        }
    }
    for script in registry.scripts() {
        if script.steps().is_empty() {
            findings.push(Finding::EmptyScript {
                script: script.id().to_string(),
            });
        }
    }

    findings
}

fn check_ref(
    kind: &'static str,
    id: &Identifier,
    known: &HashSet<&Identifier>,
    context: String,
    findings: &mut Vec<Finding>,
) {
    if !known.contains(id) {
        findings.push(Finding::ExternalReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Condition};
    use mapforge_data::House;

    #[test]
    fn complete_registry_is_clean() {
        let mut registry = Registry::new();
        let _ = registry
            .create_trigger()
            .owner(House::new("Russians", 1))
            .on(Condition::elapsed_time(5))
            .act(Action::text("MSG:Hello"));
        assert!(validate_registry(&registry).is_empty());
    }

    #[test]
    fn empty_trigger_is_reported() {
        let mut registry = Registry::new();
        registry.create_trigger();
        let findings = validate_registry(&registry);
        assert_eq!(findings.len(), 3);
        assert!(findings.contains(&Finding::NoConditions {
            trigger: "03A00001 [03A00001]".into()
        }));
    }

    #[test]
    fn references_outside_the_registry_are_reported() {
        let mut registry = Registry::new();
        let external = Identifier::external("01000123");
        let _ = registry
            .create_trigger()
            .owner(House::new("Russians", 1))
            .on(Condition::elapsed_time(5))
            .enable_trigger(&external);
        let findings = validate_registry(&registry);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].to_string(),
            "trigger '01000123' is not built in this run (action of '03A00001 [03A00001]')"
        );
    }
}
