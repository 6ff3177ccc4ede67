//! Section based `key=value` documents.
//!
//! Parsing is lenient (junk lines, duplicate keys and repeated sections are kept) and every
//! line that is never touched is written back exactly as it was read: the original bytes,
//! whatever their encoding, plus comments, spacing, block layout and the source line ending.
//! That is what lets `append` layer generated records onto hand-authored maps.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;

use crate::error::{ForgeError, Result};

const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry {
        key: String,
        value: String,
        /// Original bytes; dropped once the entry is modified.
        raw: Option<Vec<u8>>,
    },
    Other(Vec<u8>),
}

impl Line {
    fn is_blank(&self) -> bool {
        matches!(self, Line::Other(raw) if is_blank(raw))
    }

    fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Line::Entry { raw: Some(raw), .. } | Line::Other(raw) => Cow::Borrowed(raw.as_slice()),
            Line::Entry { key, value, raw: None } => Cow::Owned(format!("{key}={value}").into_bytes()),
        }
    }
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(u8::is_ascii_whitespace)
}

/// One physical `[Name]` block as it appears in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Block {
    /// Header bytes as read; generated blocks have none.
    header: Option<Vec<u8>>,
    lines: Vec<Line>,
}

impl Block {
    /// Position after the last non-blank line.
    fn body_end(&self) -> usize {
        self.lines.iter().rposition(|line| !line.is_blank()).map_or(0, |i| i + 1)
    }
}

/// All blocks sharing one section name. Lookups see every block; new keys go to the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    blocks: Vec<Block>,
}

impl Section {
    fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|block| block.lines.iter())
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines().find_map(|line| match line {
            Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key`, replacing the first existing entry and dropping any duplicates of it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut replaced = false;
        for block in &mut self.blocks {
            block.lines.retain_mut(|line| match line {
                Line::Entry { key: k, value: v, raw } if *k == key => {
                    if replaced {
                        return false;
                    }
                    replaced = true;
                    if *v != value {
                        v.clone_from(&value);
                        *raw = None;
                    }
                    true
                },
                _ => true,
            });
        }
        if !replaced {
            if self.blocks.is_empty() {
                self.blocks.push(Block::default());
            }
            let block = &mut self.blocks[0];
            // keep trailing blank lines after the new entry so section spacing survives
            let at = block.body_end();
            block.lines.insert(
                at,
                Line::Entry {
                    key,
                    value,
                    raw: None,
                },
            );
        }
    }

    /// Remove every entry and comment, keeping the headers and the trailing blank lines that
    /// separate each block from the next section.
    pub fn clear(&mut self) {
        for block in &mut self.blocks {
            let end = block.body_end();
            block.lines.drain(..end);
        }
    }

    /// All entries in file order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines().filter_map(|line| match line {
            Line::Entry { key, value, .. } => Some((key.as_str(), value.as_str())),
            Line::Other(_) => None,
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A whole INI document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDocument {
    preamble: Vec<Line>,
    sections: IndexMap<String, Section>,
    /// `(section, block)` positions in output order.
    layout: Vec<(usize, usize)>,
    newline: &'static str,
    bom: bool,
    final_newline: bool,
}

impl Default for IniDocument {
    fn default() -> Self {
        Self {
            preamble: Vec::new(),
            sections: IndexMap::new(),
            layout: Vec::new(),
            newline: "\n",
            bom: false,
            final_newline: true,
        }
    }
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse text. Lines that are neither headers nor `key=value` pairs are kept verbatim.
    pub fn parse(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parse raw bytes. Keys and values are decoded leniently for lookups, but untouched lines
    /// keep their exact bytes, so maps in legacy code pages round-trip unchanged.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let (bom, body) = match bytes.strip_prefix(BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };
        let mut doc = IniDocument {
            newline: if body.windows(2).any(|w| w == b"\r\n") { "\r\n" } else { "\n" },
            bom,
            final_newline: body.is_empty() || body.ends_with(b"\n"),
            ..IniDocument::default()
        };
        let mut raw_lines: Vec<&[u8]> = body.split(|&b| b == b'\n').collect();
        if body.is_empty() || body.ends_with(b"\n") {
            raw_lines.pop();
        }

        let mut current: Option<(usize, usize)> = None;
        for raw in raw_lines {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let text = String::from_utf8_lossy(raw);
            let trimmed = text.trim();
            let line = if let Some(name) = section_name(trimmed) {
                current = Some(doc.push_block(name, Some(raw.to_vec())));
                continue;
            } else if let Some((key, value)) = split_entry(trimmed) {
                Line::Entry {
                    key: key.to_string(),
                    value: value.to_string(),
                    raw: Some(raw.to_vec()),
                }
            } else {
                Line::Other(raw.to_vec())
            };
            match current {
                Some((s, b)) => {
                    if let Some(block) = doc.block_mut(s, b) {
                        block.lines.push(line);
                    }
                },
                None => doc.preamble.push(line),
            }
        }
        doc
    }

    /// Read a document from disk.
    ///
    /// # Errors
    /// `FileNotFound` when `path` does not exist, `Io` for any other read failure.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ForgeError::FileNotFound(path.to_path_buf()));
        }
        Ok(Self::parse_bytes(&fs::read(path)?))
    }

    /// Write the whole document in one go, creating parent directories as needed.
    ///
    /// # Errors
    /// `Io` on any filesystem failure.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// The document as it would be written to disk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut lines: Vec<Cow<'_, [u8]>> = self.preamble.iter().map(Line::bytes).collect();
        for &(s, b) in &self.layout {
            let Some((name, section)) = self.sections.get_index(s) else {
                continue;
            };
            let Some(block) = section.blocks.get(b) else {
                continue;
            };
            match &block.header {
                Some(raw) => lines.push(Cow::Borrowed(raw.as_slice())),
                None => {
                    // generated sections are separated by one blank line
                    if lines.last().is_some_and(|line| !is_blank(line)) {
                        lines.push(Cow::Borrowed(&b""[..]));
                    }
                    lines.push(Cow::Owned(format!("[{name}]").into_bytes()));
                },
            }
            lines.extend(block.lines.iter().map(Line::bytes));
        }

        let mut out = Vec::new();
        if self.bom {
            out.extend_from_slice(BOM);
        }
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(self.newline.as_bytes());
            }
            out.extend_from_slice(line);
        }
        if self.final_newline && !lines.is_empty() {
            out.extend_from_slice(self.newline.as_bytes());
        }
        out
    }

    fn push_block(&mut self, name: &str, header: Option<Vec<u8>>) -> (usize, usize) {
        let s = match self.sections.get_index_of(name) {
            Some(s) => s,
            None => self.sections.insert_full(name.to_string(), Section::default()).0,
        };
        let section = &mut self.sections[s];
        if !section.blocks.is_empty() {
            debug!("section [{name}] continues in a later block");
        }
        section.blocks.push(Block { header, lines: Vec::new() });
        let position = (s, section.blocks.len() - 1);
        self.layout.push(position);
        position
    }

    fn block_mut(&mut self, section: usize, block: usize) -> Option<&mut Block> {
        self.sections.get_index_mut(section).and_then(|(_, s)| s.blocks.get_mut(block))
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Get or create a section.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let s = match self.sections.get_index_of(name) {
            Some(s) => s,
            None => self.push_block(name, None).0,
        };
        &mut self.sections[s]
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Value of `key` in section `name`.
    pub fn get(&self, name: &str, key: &str) -> Option<&str> {
        self.section(name).and_then(|s| s.get(key))
    }

    pub fn set(&mut self, name: &str, key: impl Into<String>, value: impl Into<String>) {
        self.section_mut(name).set(key, value);
    }

    /// Drop every key of section `name` if it exists.
    pub fn clear_section(&mut self, name: &str) {
        if let Some(section) = self.sections.get_mut(name) {
            section.clear();
        }
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Fold `other` into this document section by section; keys in `other` win.
    pub fn merge(&mut self, other: &IniDocument) {
        for (name, incoming) in &other.sections {
            let target = self.section_mut(name);
            for (key, value) in incoming.entries() {
                target.set(key, value);
            }
        }
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

fn section_name(trimmed: &str) -> Option<&str> {
    let inner = trimmed.strip_prefix('[')?;
    let end = inner.find(']')?;
    let name = inner[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Split `key=value`, ignoring `;` comment lines and trailing `;` comments on the value.
fn split_entry(trimmed: &str) -> Option<(&str, &str)> {
    if trimmed.starts_with(';') || trimmed.starts_with("//") {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.split_once(';').map_or(value, |(v, _)| v).trim();
    Some((key, value))
}
