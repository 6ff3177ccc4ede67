//! ** idgen module **
//! Per-registry identifier allocation.
//!
//! Every namespace keeps its own counter starting at 1 and renders as a fixed prefix followed
//! by a zero padded number. The engine reads some of these by fixed offset, so the widths
//! must not change. Fixed identifiers come from caller-chosen keys instead of a counter.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::error::{ForgeError, Result};

/// An allocated identifier, e.g. `03A00001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap an identifier that was allocated elsewhere (for example one already present in a
    /// hand-authored map).
    pub fn external(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Counter-backed identifier spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Trigger,
    Tag,
    Team,
    TaskForce,
    Script,
}

impl Namespace {
    fn prefix(self) -> &'static str {
        match self {
            Namespace::Trigger => "03A",
            Namespace::Tag => "03B",
            Namespace::Team => "03C",
            Namespace::TaskForce => "03D",
            Namespace::Script => "03E",
        }
    }
}

const COUNTER_WIDTH: usize = 5;
const FIXED_PREFIX: &str = "04";
const FIXED_WIDTH: usize = 6;

fn format_id(prefix: &str, width: usize, value: u64) -> Identifier {
    Identifier(format!("{prefix}{value:0width$}"))
}

/// Identifier allocator owned by a single `Registry`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    triggers: u64,
    teams: u64,
    task_forces: u64,
    scripts: u64,
    fixed: HashSet<i32>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier in `namespace`.
    ///
    /// Triggers and tags share one counter: asking for either advances both, so prefer
    /// [`IdGenerator::next_trigger`] which hands out the matching pair.
    pub fn next(&mut self, namespace: Namespace) -> Identifier {
        let counter = match namespace {
            Namespace::Trigger | Namespace::Tag => &mut self.triggers,
            Namespace::Team => &mut self.teams,
            Namespace::TaskForce => &mut self.task_forces,
            Namespace::Script => &mut self.scripts,
        };
        *counter += 1;
        let id = format_id(namespace.prefix(), COUNTER_WIDTH, *counter);
        debug!("allocated {namespace:?} id {id}");
        id
    }

    /// Allocate a trigger id together with its lock-step tag id.
    pub fn next_trigger(&mut self) -> (Identifier, Identifier) {
        self.triggers += 1;
        let trigger = format_id(Namespace::Trigger.prefix(), COUNTER_WIDTH, self.triggers);
        let tag = format_id(Namespace::Tag.prefix(), COUNTER_WIDTH, self.triggers);
        debug!("allocated trigger id {trigger} with tag {tag}");
        (trigger, tag)
    }

    /// Return the identifier derived from `key`, refusing keys that were already handed out.
    ///
    /// # Errors
    /// - `DuplicateFixedKey` when `key` was used before in this registry
    /// - `InvalidArgument` when `key` is negative
    pub fn fixed(&mut self, key: i32) -> Result<Identifier> {
        let value = u64::try_from(key)
            .map_err(|_| ForgeError::InvalidArgument(format!("fixed id key must not be negative (got {key})")))?;
        if !self.fixed.insert(key) {
            return Err(ForgeError::DuplicateFixedKey(key));
        }
        Ok(format_id(FIXED_PREFIX, FIXED_WIDTH, value))
    }
}
