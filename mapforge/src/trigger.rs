//! Trigger records and their fluent builder.
//!
//! A trigger renders into four lines sharing its id as key: the tag record, the header, the
//! condition list and the action list.

use log::debug;
use mapforge_data::{Difficulty, House, RepeatType};

use crate::action::{Action, ActionKind};
use crate::condition::Condition;
use crate::error::{ForgeError, Result};
use crate::idgen::Identifier;
use crate::record::{self, NONE};
use crate::registry::{Registry, TriggerRef};

pub const SECTION_TAGS: &str = "Tags";
pub const SECTION_TRIGGERS: &str = "Triggers";
pub const SECTION_EVENTS: &str = "Events";
pub const SECTION_ACTIONS: &str = "Actions";

/// One rule: conditions, reactions, enablement and repeat policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub(crate) id: Identifier,
    pub(crate) tag: Identifier,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) group: Option<String>,
    pub(crate) owner: Option<House>,
    pub(crate) repeat: RepeatType,
    pub(crate) related: Option<Identifier>,
    pub(crate) easy: bool,
    pub(crate) normal: bool,
    pub(crate) hard: bool,
    pub(crate) disabled: bool,
    pub(crate) conditions: Vec<Condition>,
    pub(crate) actions: Vec<Action>,
    pub(crate) next: Vec<Identifier>,
}

impl Trigger {
    pub(crate) fn new(id: Identifier, tag: Identifier) -> Self {
        Self {
            name: id.to_string(),
            id,
            tag,
            description: None,
            group: None,
            owner: None,
            repeat: RepeatType::default(),
            related: None,
            easy: true,
            normal: true,
            hard: true,
            disabled: false,
            conditions: Vec::new(),
            actions: Vec::new(),
            next: Vec::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn tag(&self) -> &Identifier {
        &self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn owner(&self) -> Option<&House> {
        self.owner.as_ref()
    }

    pub fn repeat(&self) -> RepeatType {
        self.repeat
    }

    pub fn related(&self) -> Option<&Identifier> {
        self.related.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn enabled_on(&self, difficulty: Difficulty) -> bool {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Triggers enabled by this one, in wiring order.
    pub fn next(&self) -> &[Identifier] {
        &self.next
    }

    /// `repeat,name,trigger` line of the `[Tags]` section.
    ///
    /// # Errors
    /// `RecordTooLong` if the line reaches the engine limit.
    pub fn render_tag(&self) -> Result<String> {
        let value = format!("{},{},{}", self.repeat.value(), self.name, self.id);
        record::fit(SECTION_TAGS, self.tag.as_str(), value)
    }

    /// `owner,related,name,disabled,easy,normal,hard,0` line of the `[Triggers]` section.
    ///
    /// # Errors
    /// `RecordTooLong` if the line reaches the engine limit.
    pub fn render_header(&self) -> Result<String> {
        let owner = self.owner.as_ref().map_or(NONE, House::name);
        let related = self.related.as_ref().map_or(NONE, Identifier::as_str);
        let value = format!(
            "{owner},{related},{},{},{},{},{},0",
            self.name,
            record::bit(self.disabled),
            record::bit(self.easy),
            record::bit(self.normal),
            record::bit(self.hard),
        );
        record::fit(SECTION_TRIGGERS, self.id.as_str(), value)
    }

    /// Count-prefixed condition list.
    ///
    /// # Errors
    /// `RecordTooLong` if the line reaches the engine limit.
    pub fn render_events(&self) -> Result<String> {
        let mut value = self.conditions.len().to_string();
        for condition in &self.conditions {
            value.push(',');
            value.push_str(&condition.render());
        }
        record::fit(SECTION_EVENTS, self.id.as_str(), value)
    }

    /// Count-prefixed action list; self references resolve to this trigger's id.
    ///
    /// # Errors
    /// `RecordTooLong` if the line reaches the engine limit.
    pub fn render_actions(&self) -> Result<String> {
        let mut value = self.actions.len().to_string();
        for action in &self.actions {
            value.push(',');
            value.push_str(&action.render(&self.id));
        }
        record::fit(SECTION_ACTIONS, self.id.as_str(), value)
    }
}

/// Fluent cursor over one trigger inside a [`Registry`].
///
/// Setters consume and return the builder so calls chain; [`TriggerBuilder::then`] moves the
/// cursor to the successor trigger instead.
#[derive(Debug)]
pub struct TriggerBuilder<'a> {
    registry: &'a mut Registry,
    index: usize,
}

impl<'a> TriggerBuilder<'a> {
    pub(crate) fn new(registry: &'a mut Registry, index: usize) -> Self {
        Self { registry, index }
    }

    fn record(&mut self) -> &mut Trigger {
        &mut self.registry.triggers[self.index]
    }

    fn current(&self) -> &Trigger {
        &self.registry.triggers[self.index]
    }

    pub fn handle(&self) -> TriggerRef {
        TriggerRef(self.index)
    }

    pub fn id(&self) -> Identifier {
        self.current().id.clone()
    }

    pub fn tag(&self) -> Identifier {
        self.current().tag.clone()
    }

    /// Read access to the registry, e.g. to look up other records while configuring.
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record().name = name.into();
        self
    }

    /// Free text shown in the preview only.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record().description = Some(description.into());
        self
    }

    /// Preview grouping; successors wired with [`TriggerBuilder::then`] inherit it.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.record().group = Some(group.into());
        self
    }

    #[must_use]
    pub fn owner(mut self, house: impl Into<House>) -> Self {
        self.record().owner = Some(house.into());
        self
    }

    #[must_use]
    pub fn repeat(mut self, repeat: RepeatType) -> Self {
        self.record().repeat = repeat;
        self
    }

    #[must_use]
    pub fn difficulties(mut self, easy: bool, normal: bool, hard: bool) -> Self {
        let trigger = self.record();
        trigger.easy = easy;
        trigger.normal = normal;
        trigger.hard = hard;
        self
    }

    /// Enable the trigger on exactly the listed difficulties.
    #[must_use]
    pub fn only_on(self, difficulties: &[Difficulty]) -> Self {
        let easy = difficulties.contains(&Difficulty::Easy);
        let normal = difficulties.contains(&Difficulty::Normal);
        let hard = difficulties.contains(&Difficulty::Hard);
        self.difficulties(easy, normal, hard)
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.record().disabled = disabled;
        self
    }

    #[must_use]
    pub fn relate(mut self, trigger: &Identifier) -> Self {
        self.record().related = Some(trigger.clone());
        self
    }

    #[must_use]
    pub fn relate_to(self, trigger: TriggerRef) -> Self {
        let id = self.registry.trigger(trigger).id.clone();
        self.relate(&id)
    }

    /// Append a condition.
    #[must_use]
    pub fn on(mut self, condition: Condition) -> Self {
        self.record().conditions.push(condition);
        self
    }

    /// Append an action.
    #[must_use]
    pub fn act(mut self, action: Action) -> Self {
        self.record().actions.push(action);
        self
    }

    /// Enable another trigger (possibly one from the existing map) and record the link.
    #[must_use]
    pub fn enable_trigger(mut self, trigger: &Identifier) -> Self {
        let record = self.record();
        record.actions.push(Action::enable_trigger(trigger));
        record.next.push(trigger.clone());
        self
    }

    #[must_use]
    pub fn disable_trigger(self, trigger: &Identifier) -> Self {
        self.act(Action::disable_trigger(trigger))
    }

    /// Disable this trigger once it fires; the id is filled in at render time.
    #[must_use]
    pub fn disable_self(self) -> Self {
        self.act(Action::disable_self())
    }

    /// Force another trigger to fire.
    ///
    /// # Errors
    /// `SelfTriggerReferenceDenied` when `trigger` is this trigger's own id.
    pub fn force_trigger(self, trigger: &Identifier) -> Result<Self> {
        if *trigger == self.current().id {
            return Err(ForgeError::SelfTriggerReferenceDenied(trigger.to_string()));
        }
        Ok(self.act(Action::with_trigger(ActionKind::ForceTrigger, trigger)))
    }

    fn wire(&mut self, next: usize) {
        let next_id = self.registry.triggers[next].id.clone();
        let group = self.current().group.clone();
        let current = self.record();
        current.actions.push(Action::enable_trigger(&next_id));
        current.next.push(next_id.clone());
        let successor = &mut self.registry.triggers[next];
        successor.disabled = true;
        if successor.group.is_none() {
            successor.group = group;
        }
        debug!("{} now enables {next_id}", self.current().id);
    }

    /// Wire `next` as a successor and continue the chain on it.
    ///
    /// The current trigger gains an "enable `next`" action and `next` starts disabled.
    #[must_use]
    pub fn then(mut self, next: TriggerRef) -> TriggerBuilder<'a> {
        self.wire(next.0);
        TriggerBuilder {
            registry: self.registry,
            index: next.0,
        }
    }

    /// Wire `next` as a successor but keep configuring the current trigger.
    #[must_use]
    pub fn with_next(mut self, next: TriggerRef) -> Self {
        self.wire(next.0);
        self
    }

    /// Create a successor, configure it with `configure`, wire it and continue on it.
    #[must_use]
    pub fn then_new<F>(self, configure: F) -> TriggerBuilder<'a>
    where
        F: FnOnce(TriggerBuilder<'_>) -> TriggerBuilder<'_>,
    {
        let next = self.registry.create_and_configure(configure);
        self.then(next)
    }

    /// Create a successor, configure it, wire it and stay on the current trigger.
    #[must_use]
    pub fn with_next_new<F>(self, configure: F) -> Self
    where
        F: FnOnce(TriggerBuilder<'_>) -> TriggerBuilder<'_>,
    {
        let next = self.registry.create_and_configure(configure);
        self.with_next(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionParam;

    fn yuri() -> House {
        House::new("YuriCountry", 9)
    }

    #[test]
    fn header_defaults() {
        let mut registry = Registry::new();
        let t = registry.create_trigger().handle();
        let trigger = registry.trigger(t);
        assert_eq!(trigger.name(), "03A00001");
        assert_eq!(
            trigger.render_header().expect("header"),
            "<none>,<none>,03A00001,0,1,1,1,0"
        );
        assert_eq!(trigger.render_tag().expect("tag"), "0,03A00001,03A00001");
        assert_eq!(trigger.render_events().expect("events"), "0");
        assert_eq!(trigger.render_actions().expect("actions"), "0");
    }

    #[test]
    fn header_reflects_setters() {
        let mut registry = Registry::new();
        let related = Identifier::external("01000042");
        let t = registry
            .create_trigger()
            .name("Attack")
            .owner(yuri())
            .repeat(RepeatType::RepeatingOr)
            .only_on(&[Difficulty::Hard])
            .relate(&related)
            .disabled(true)
            .handle();
        let trigger = registry.trigger(t);
        assert_eq!(
            trigger.render_header().expect("header"),
            "YuriCountry,01000042,Attack,1,0,0,1,0"
        );
        assert_eq!(trigger.render_tag().expect("tag"), "2,Attack,03A00001");
        assert!(trigger.enabled_on(Difficulty::Hard));
        assert!(!trigger.enabled_on(Difficulty::Easy));
    }

    #[test]
    fn events_count_conditions_not_actions() {
        let mut registry = Registry::new();
        let t = registry
            .create_trigger()
            .on(Condition::elapsed_time(10))
            .on(Condition::global_set(3))
            .act(Action::global_clear(3))
            .handle();
        let trigger = registry.trigger(t);
        assert_eq!(trigger.render_events().expect("events"), "2,13,0,10,27,0,3");
        assert_eq!(trigger.render_actions().expect("actions"), "1,29,0,3,0,0,0,0,A");
    }

    #[test]
    fn then_returns_the_successor() {
        let mut registry = Registry::new();
        let b = registry.create_trigger().name("B").handle();
        let a = registry.create_trigger().name("A").group("Intro");
        let a_handle = a.handle();
        let cursor = a.then(b);
        assert_eq!(cursor.handle(), b);
        drop(cursor);

        let a = registry.trigger(a_handle);
        let b_trigger = registry.trigger(b);
        assert_eq!(a.actions().len(), 1);
        assert_eq!(a.actions()[0].kind, ActionKind::EnableTrigger);
        assert_eq!(a.actions()[0].param, ActionParam::Trigger(b_trigger.id().clone()));
        assert_eq!(a.next(), &[b_trigger.id().clone()]);
        assert!(b_trigger.is_disabled());
        assert_eq!(b_trigger.group(), Some("Intro"));
    }

    #[test]
    fn with_next_stays_on_the_parent() {
        let mut registry = Registry::new();
        let child1 = registry.create_trigger().group("Own").handle();
        let child2 = registry.create_trigger().handle();
        let parent = registry
            .create_trigger()
            .group("Parent")
            .with_next(child1)
            .with_next(child2)
            .handle();
        assert_eq!(registry.trigger(parent).actions().len(), 2);
        assert_eq!(registry.trigger(child1).group(), Some("Own"));
        assert_eq!(registry.trigger(child2).group(), Some("Parent"));
        assert!(registry.trigger(child1).is_disabled());
        assert!(registry.trigger(child2).is_disabled());
    }

    #[test]
    fn callback_forms_create_and_wire() {
        let mut registry = Registry::new();
        let last = registry
            .create_trigger()
            .name("Start")
            .on(Condition::elapsed_time(1))
            .then_new(|t| t.name("Middle").on(Condition::elapsed_time(100)))
            .then_new(|t| t.name("End").act(Action::declare_winner(&yuri())))
            .handle();
        assert_eq!(registry.triggers().len(), 3);
        assert_eq!(registry.trigger(last).name(), "End");
        let start = &registry.triggers()[0];
        assert_eq!(
            start.render_actions().expect("actions"),
            "1,53,2,03A00002,0,0,0,0,A"
        );
        let middle = &registry.triggers()[1];
        assert_eq!(middle.name(), "Middle");
        assert_eq!(
            middle.render_actions().expect("actions"),
            "1,53,2,03A00003,0,0,0,0,A"
        );
    }

    #[test]
    fn nested_branches_keep_the_parent() {
        let mut registry = Registry::new();
        let parent = registry
            .create_trigger()
            .with_next_new(|t| t.name("Left"))
            .with_next_new(|t| t.name("Right").then_new(|t| t.name("Right.2")))
            .handle();
        assert_eq!(registry.trigger(parent).next().len(), 2);
        assert_eq!(registry.triggers().len(), 4);
    }

    #[test]
    fn force_trigger_rejects_self() {
        let mut registry = Registry::new();
        let builder = registry.create_trigger();
        let own = builder.id();
        match builder.force_trigger(&own) {
            Err(ForgeError::SelfTriggerReferenceDenied(id)) => assert_eq!(id, "03A00001"),
            other => panic!("expected self reference error, got {other:?}"),
        }
    }

    #[test]
    fn force_trigger_accepts_others() {
        let mut registry = Registry::new();
        let other = registry.create_trigger().id();
        let t = registry
            .create_trigger()
            .force_trigger(&other)
            .expect("other trigger")
            .handle();
        assert_eq!(
            registry.trigger(t).render_actions().expect("actions"),
            "1,22,2,03A00001,0,0,0,0,A"
        );
    }

    #[test]
    fn disable_self_uses_own_id() {
        let mut registry = Registry::new();
        registry.create_trigger();
        let t = registry.create_trigger().disable_self().handle();
        assert_eq!(
            registry.trigger(t).render_actions().expect("actions"),
            "1,54,2,03A00002,0,0,0,0,A"
        );
    }

    #[test]
    fn long_action_lists_fail_at_render_time() {
        let mut registry = Registry::new();
        let mut builder = registry.create_trigger();
        for _ in 0..30 {
            builder = builder.act(Action::text("A_VERY_LONG_STRING_TABLE_LABEL"));
        }
        let t = builder.handle();
        assert!(matches!(
            registry.trigger(t).render_actions(),
            Err(ForgeError::RecordTooLong { .. })
        ));
        assert!(registry.trigger(t).render_header().is_ok());
    }
}
