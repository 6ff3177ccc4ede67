//! Trigger graph projection for the HTML preview.
//!
//! Read-only: one node per trigger, one category per display group and one link per
//! enable-next edge. Positions follow a fixed grid so repeated previews are identical.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::{ForgeError, Result};
use crate::registry::Registry;

const PAGE_TEMPLATE: &str = include_str!("../assets/preview.html");
const DATA_PLACEHOLDER: &str = "{{data}}";
const DEFAULT_CATEGORY: &str = "Default";
const GRID_SPACING: f64 = 120.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub nodes: Vec<Node>,
    pub categories: Vec<Category>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// `description[name]`
    pub name: String,
    pub symbol_size: u32,
    /// Rendered event and action lines.
    pub value: String,
    pub category: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Chart {
    fn category_for(&mut self, group: Option<&str>) -> usize {
        let Some(group) = group.filter(|g| !g.is_empty()) else {
            return 0;
        };
        if let Some(index) = self.categories.iter().position(|c| c.name == group) {
            return index;
        }
        self.categories.push(Category { name: group.to_string() });
        self.categories.len() - 1
    }
}

/// Position of the `index`th of `count` nodes on a square grid centred on the origin.
#[allow(clippy::cast_precision_loss)]
fn grid_position(index: usize, count: usize) -> (f64, f64) {
    let mut columns = 1;
    while columns * columns < count {
        columns += 1;
    }
    let rows = count.div_ceil(columns).max(1);
    let x = (index % columns) as f64 - (columns - 1) as f64 / 2.0;
    let y = (index / columns) as f64 - (rows - 1) as f64 / 2.0;
    (x * GRID_SPACING, y * GRID_SPACING)
}

impl Registry {
    /// Project the trigger graph.
    ///
    /// # Errors
    /// `RecordTooLong` if a trigger's event or action line cannot be rendered.
    pub fn chart(&self) -> Result<Chart> {
        let mut chart = Chart {
            categories: vec![Category {
                name: DEFAULT_CATEGORY.to_string(),
            }],
            ..Chart::default()
        };
        let count = self.triggers().len();
        for (index, trigger) in self.triggers().iter().enumerate() {
            let (x, y) = grid_position(index, count);
            let category = chart.category_for(trigger.group());
            chart.nodes.push(Node {
                id: trigger.id().to_string(),
                name: format!("{}[{}]", trigger.description().unwrap_or_default(), trigger.name()),
                symbol_size: 10,
                value: format!(
                    "events:{}\nactions:{}",
                    trigger.render_events()?,
                    trigger.render_actions()?
                ),
                category,
                x,
                y,
            });
            for next in trigger.next() {
                chart.links.push(Link {
                    source: trigger.id().to_string(),
                    target: next.to_string(),
                });
            }
        }
        Ok(chart)
    }

    /// The preview page with the chart embedded.
    ///
    /// # Errors
    /// `RecordTooLong` from the projection, `Json` if serialization fails.
    pub fn render_preview(&self) -> Result<String> {
        let json = serde_json::to_string(&self.chart()?)?;
        Ok(PAGE_TEMPLATE.replace(DATA_PLACEHOLDER, &json))
    }

    /// Write the preview page to `path`, creating parent directories.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty path, plus the errors of [`Registry::render_preview`]
    /// and `Io` on write failure.
    pub fn preview(&self, path: &Path) -> Result<()> {
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ForgeError::InvalidArgument("preview path must not be empty".to_string()));
        }
        let page = self.render_preview()?;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, page)?;
        info!("preview of {} triggers written to {}", self.triggers().len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    fn chained() -> Registry {
        let mut registry = Registry::new();
        let _ = registry
            .create_trigger()
            .name("Start")
            .description("Opening")
            .group("Intro")
            .on(Condition::elapsed_time(1))
            .then_new(|t| t.name("Next"));
        let _ = registry.create_trigger().name("Loose");
        registry
    }

    #[test]
    fn nodes_categories_and_links() {
        let chart = chained().chart().expect("chart");
        assert_eq!(chart.nodes.len(), 3);
        assert_eq!(chart.nodes[0].name, "Opening[Start]");
        assert_eq!(chart.nodes[0].value, "events:1,13,0,1\nactions:1,53,2,03A00002,0,0,0,0,A");
        let names: Vec<_> = chart.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Default", "Intro"]);
        // the successor inherits the group
        assert_eq!(chart.nodes[1].category, 1);
        assert_eq!(chart.nodes[2].category, 0);
        assert_eq!(
            chart.links,
            vec![Link {
                source: "03A00001".into(),
                target: "03A00002".into()
            }]
        );
    }

    #[test]
    fn positions_are_deterministic_and_distinct() {
        let a = chained().chart().expect("chart");
        let b = chained().chart().expect("chart");
        assert_eq!(a, b);
        let mut seen: Vec<(i64, i64)> = Vec::new();
        for node in &a.nodes {
            #[allow(clippy::cast_possible_truncation)]
            let point = (node.x as i64, node.y as i64);
            assert!(!seen.contains(&point));
            seen.push(point);
        }
    }

    #[test]
    fn page_embeds_camel_case_json() {
        let page = chained().render_preview().expect("page");
        assert!(!page.contains(DATA_PLACEHOLDER));
        assert!(page.contains("\"symbolSize\":10"));
        assert!(page.contains("\"categories\":[{\"name\":\"Default\"}"));
    }
}
