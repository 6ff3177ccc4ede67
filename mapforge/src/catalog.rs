//! Catalog generator: turns the game's type lists into a Rust source file of constants.
//!
//! The rules, eva and sound INI files (plus everything they `#include`) are scanned for the
//! registries templates refer to by index, e.g. `[VehicleTypes]` or `[DialogList]`. Each
//! list becomes one module with a constant per distinct entry and a `NAMES` slice.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ForgeError, Result};
use crate::ini::IniDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Rules,
    Eva,
    Sound,
}

impl Source {
    fn file_name(self, suffix: &str) -> String {
        match self {
            Source::Rules => format!("rules{suffix}.ini"),
            Source::Eva => format!("eva{suffix}.ini"),
            Source::Sound => format!("sound{suffix}.ini"),
        }
    }
}

/// `(module, source, section)` for every generated list, in output order.
const LISTS: &[(&str, Source, &str)] = &[
    ("animations", Source::Rules, "Animations"),
    ("vehicle_types", Source::Rules, "VehicleTypes"),
    ("building_types", Source::Rules, "BuildingTypes"),
    ("infantry_types", Source::Rules, "InfantryTypes"),
    ("aircraft_types", Source::Rules, "AircraftTypes"),
    ("super_weapon_types", Source::Rules, "SuperWeaponTypes"),
    ("weapon_types", Source::Rules, "WeaponTypes"),
    ("warheads", Source::Rules, "Warheads"),
    ("eva", Source::Eva, "DialogList"),
    ("sounds", Source::Sound, "SoundList"),
];

const INCLUDE_SECTIONS: &[&str] = &["#include", "$include"];

/// One generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogList {
    pub module: &'static str,
    pub section: &'static str,
    /// Distinct entries in first-seen order; the position is the engine index.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub lists: Vec<CatalogList>,
}

/// A source file together with everything it includes, in read order.
#[derive(Debug, Default)]
struct SourceSet {
    documents: Vec<IniDocument>,
    visited: HashSet<PathBuf>,
    next_auto_key: u32,
}

impl SourceSet {
    fn load(dir: &Path, file: &Path) -> Result<Self> {
        if !file.is_file() {
            return Err(ForgeError::FileNotFound(file.to_path_buf()));
        }
        let mut set = SourceSet::default();
        set.read(dir, file)?;
        Ok(set)
    }

    fn read(&mut self, dir: &Path, file: &Path) -> Result<()> {
        if !self.visited.insert(file.to_path_buf()) {
            debug!("'{}' already read, skipping include", file.display());
            return Ok(());
        }
        let bytes = fs::read(file)?;
        let text = expand_auto_keys(&String::from_utf8_lossy(&bytes), &mut self.next_auto_key);
        let doc = IniDocument::parse(&text);
        let includes: Vec<String> = INCLUDE_SECTIONS
            .iter()
            .filter_map(|name| doc.section(name))
            .flat_map(|section| section.values().map(str::to_string))
            .collect();
        self.documents.push(doc);
        for include in includes {
            let path = dir.join(&include);
            if path.is_file() {
                self.read(dir, &path)?;
            } else {
                warn!("included file '{}' not found, skipping", path.display());
            }
        }
        Ok(())
    }

    /// Distinct values of `section` across all documents, in order.
    fn distinct_values(&self, section: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter_map(|doc| doc.section(section))
            .flat_map(|s| s.values())
            .filter(|value| !value.is_empty() && seen.insert(value.to_string()))
            .map(str::to_string)
            .collect()
    }
}

/// Rewrite `+=value` list entries into unique `AUTOnnnnn=value` keys so they survive parsing.
///
/// Only a `+=` that starts a line (after indentation) is a list entry. One inside a value or
/// comment is left alone, unlike a plain text replace over the whole file.
fn expand_auto_keys(text: &str, counter: &mut u32) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        match line.trim_start().strip_prefix("+=") {
            Some(value) => {
                let _ = write!(out, "AUTO{counter:05}={value}");
                *counter += 1;
            },
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// Turn an INI entry into a Rust constant name.
pub fn const_name(entry: &str) -> String {
    let mut name: String = entry
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name.insert(0, '_');
    }
    name
}

impl Catalog {
    /// Read the three sources under `ini_dir`.
    ///
    /// # Errors
    /// `FileNotFound` if one of `rules{suffix}.ini`, `eva{suffix}.ini` or `sound{suffix}.ini`
    /// is missing, `Io` for read failures.
    pub fn load(ini_dir: &Path, suffix: &str) -> Result<Self> {
        let mut sources = Vec::new();
        for source in [Source::Rules, Source::Eva, Source::Sound] {
            let file = ini_dir.join(source.file_name(suffix));
            sources.push((source, SourceSet::load(ini_dir, &file)?));
        }
        let lists = LISTS
            .iter()
            .map(|&(module, source, section)| {
                let names = sources
                    .iter()
                    .find(|(s, _)| *s == source)
                    .map(|(_, set)| set.distinct_values(section))
                    .unwrap_or_default();
                debug!("{section}: {} entries", names.len());
                CatalogList { module, section, names }
            })
            .collect();
        Ok(Self { lists })
    }

    pub fn list(&self, module: &str) -> Option<&CatalogList> {
        self.lists.iter().find(|l| l.module == module)
    }

    /// Rust source for the whole catalog.
    pub fn render(&self) -> String {
        let mut out = String::from("//! Generated by `mapforge catalog`. Do not edit.\n\n#![allow(dead_code)]\n");
        for list in &self.lists {
            let _ = write!(out, "\n/// `[{}]`\npub mod {} {{\n", list.section, list.module);
            let mut used = HashSet::new();
            for (index, entry) in list.names.iter().enumerate() {
                let mut name = const_name(entry);
                if !used.insert(name.clone()) {
                    name = format!("{name}_{index}");
                    used.insert(name.clone());
                }
                if name != entry.as_str() {
                    let _ = writeln!(out, "    /// `{entry}`");
                }
                let _ = writeln!(out, "    pub const {name}: i32 = {index};");
            }
            out.push_str("\n    pub const NAMES: &[&str] = &[");
            for (index, entry) in list.names.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{entry:?}");
            }
            out.push_str("];\n}\n");
        }
        out
    }
}

/// Load the catalog and write it to `dest`.
///
/// # Errors
/// Errors of [`Catalog::load`], `Io` when `dest` cannot be written.
pub fn generate_catalog(ini_dir: &Path, dest: &Path, suffix: &str) -> Result<Catalog> {
    let catalog = Catalog::load(ini_dir, suffix)?;
    if let Some(dir) = dest.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(dest, catalog.render())?;
    info!(
        "catalog with {} entries written to {}",
        catalog.lists.iter().map(|l| l.names.len()).sum::<usize>(),
        dest.display()
    );
    Ok(catalog)
}
