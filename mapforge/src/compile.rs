//! Serialization of a registry into INI sections.
//!
//! Both output modes render everything in memory first; the file is only touched once every
//! record rendered successfully.

use std::path::Path;

use log::{info, warn};

use crate::error::{ForgeError, Result};
use crate::idgen::Identifier;
use crate::ini::IniDocument;
use crate::registry::Registry;
use crate::trigger::{SECTION_ACTIONS, SECTION_EVENTS, SECTION_TAGS, SECTION_TRIGGERS};
use crate::validate::validate_registry;
use crate::{script, taskforce, team};

/// How the `[Tags]` section is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKey {
    /// Fresh documents key tags by their trigger id.
    Trigger,
    /// Merged documents key tags by the tag id, so re-appending replaces the same entry.
    Tag,
}

impl Registry {
    /// Render every record into a new document, as [`Registry::compile`] would write it.
    ///
    /// # Errors
    /// `RecordTooLong` or `MissingReference` from the record renderers.
    pub fn render_document(&self) -> Result<IniDocument> {
        let mut doc = IniDocument::new();
        self.render_into(&mut doc, TagKey::Trigger)?;
        Ok(doc)
    }

    /// Write all records to a new file at `path`, replacing any existing file.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty path
    /// - `RecordTooLong` / `MissingReference` while rendering; nothing is written then
    /// - `Io` when the file cannot be written
    pub fn compile(&self, path: &Path) -> Result<()> {
        check_path(path)?;
        self.report();
        let doc = self.render_document()?;
        doc.write(path)?;
        info!(
            "compiled {} triggers, {} teams, {} task forces, {} scripts into {}",
            self.triggers.len(),
            self.teams.len(),
            self.task_forces.len(),
            self.scripts.len(),
            path.display()
        );
        Ok(())
    }

    /// Merge all records into the existing map at `path`.
    ///
    /// Sections the registry does not produce are written back untouched. Team, task force
    /// and script sections with a generated id are replaced wholesale.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty path
    /// - `FileNotFound` when `path` does not exist
    /// - `RecordTooLong` / `MissingReference` while rendering; the file is left as it was
    /// - `Io` on read or write failure
    pub fn append(&self, path: &Path) -> Result<()> {
        check_path(path)?;
        let mut doc = IniDocument::read(path)?;
        self.report();
        self.merge_into(&mut doc)?;
        doc.write(path)?;
        info!(
            "appended {} triggers, {} teams, {} task forces, {} scripts to {}",
            self.triggers.len(),
            self.teams.len(),
            self.task_forces.len(),
            self.scripts.len(),
            path.display()
        );
        Ok(())
    }

    /// In-memory half of [`Registry::append`].
    ///
    /// # Errors
    /// `RecordTooLong` or `MissingReference`; `doc` is unchanged on error.
    pub fn merge_into(&self, doc: &mut IniDocument) -> Result<()> {
        let mut generated = IniDocument::new();
        self.render_triggers(&mut generated, TagKey::Tag)?;
        self.render_entities(&mut generated, Some(&*doc))?;
        for id in self.entity_ids() {
            doc.clear_section(id.as_str());
        }
        doc.merge(&generated);
        Ok(())
    }

    fn render_into(&self, doc: &mut IniDocument, tags: TagKey) -> Result<()> {
        self.render_triggers(doc, tags)?;
        self.render_entities(doc, None)
    }

    fn render_triggers(&self, doc: &mut IniDocument, tags: TagKey) -> Result<()> {
        // render every line first so a failure leaves `doc` alone
        let mut lines = Vec::with_capacity(self.triggers.len());
        for trigger in &self.triggers {
            let tag_key = match tags {
                TagKey::Trigger => trigger.id(),
                TagKey::Tag => trigger.tag(),
            };
            lines.push((
                trigger.id().as_str(),
                tag_key.as_str(),
                trigger.render_tag()?,
                trigger.render_header()?,
                trigger.render_events()?,
                trigger.render_actions()?,
            ));
        }
        for (id, tag_key, tag, header, events, actions) in lines {
            doc.set(SECTION_TAGS, tag_key, tag);
            doc.set(SECTION_TRIGGERS, id, header);
            doc.set(SECTION_EVENTS, id, events);
            doc.set(SECTION_ACTIONS, id, actions);
        }
        Ok(())
    }

    /// Teams, task forces and scripts: one list section each plus one section per record.
    fn render_entities(&self, doc: &mut IniDocument, existing: Option<&IniDocument>) -> Result<()> {
        let mut rendered = Vec::new();
        for record in &self.teams {
            rendered.push((team::SECTION_LIST, record.id(), record.render_entries()?));
        }
        for record in &self.task_forces {
            rendered.push((taskforce::SECTION_LIST, record.id(), record.render_entries()?));
        }
        for record in &self.scripts {
            rendered.push((script::SECTION_LIST, record.id(), record.render_entries()?));
        }

        let mut lists = ListIndices::default();
        for (list, id, entries) in rendered {
            let index = lists.index_for(list, id, existing);
            doc.set(list, index.to_string(), id.as_str());
            let section = doc.section_mut(id.as_str());
            for (key, value) in entries {
                section.set(key, value);
            }
        }
        Ok(())
    }

    fn entity_ids(&self) -> impl Iterator<Item = &Identifier> {
        self.teams
            .iter()
            .map(|t| t.id())
            .chain(self.task_forces.iter().map(|t| t.id()))
            .chain(self.scripts.iter().map(|s| s.id()))
    }

    fn report(&self) {
        self.log_summary();
        for finding in validate_registry(self) {
            warn!("{finding}");
        }
    }
}

/// Next free `index=id` key per list section.
#[derive(Debug, Default)]
struct ListIndices {
    next: Vec<(&'static str, u64)>,
}

impl ListIndices {
    /// Reuse the index an existing document already gives `id`, otherwise take the next one
    /// after the highest numeric key.
    fn index_for(&mut self, list: &'static str, id: &Identifier, existing: Option<&IniDocument>) -> u64 {
        let section = existing.and_then(|doc| doc.section(list));
        if let Some(section) = section
            && let Some(key) = section
                .entries()
                .find(|(_, value)| *value == id.as_str())
                .and_then(|(key, _)| key.parse::<u64>().ok())
        {
            return key;
        }
        let slot = if let Some(pos) = self.next.iter().position(|(name, _)| *name == list) {
            &mut self.next[pos].1
        } else {
            let start = section
                .and_then(|s| s.entries().filter_map(|(key, _)| key.parse::<u64>().ok()).max())
                .map_or(0, |max| max + 1);
            self.next.push((list, start));
            let last = self.next.len() - 1;
            &mut self.next[last].1
        };
        let index = *slot;
        *slot += 1;
        index
    }
}

fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ForgeError::InvalidArgument("output path must not be empty".to_string()));
    }
    Ok(())
}
