//! Templates describe a map's scripted content; the runner populates a registry from one
//! template and serves any number of outputs from it.

use std::path::Path;

use log::{info, warn};
use mapforge_data::TeamOptions;

use crate::error::Result;
use crate::registry::Registry;

/// Scripted map content.
pub trait Template {
    /// Name used to pick the template on the command line.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Create every trigger, team, task force and script of the map.
    ///
    /// # Errors
    /// Whatever the builders report, e.g. a reused fixed id key.
    fn populate(&self, registry: &mut Registry) -> Result<()>;
}

/// Runs a template at most once, however many outputs are requested.
pub struct TemplateRunner {
    template: Box<dyn Template>,
    registry: Registry,
    built: bool,
}

impl std::fmt::Debug for TemplateRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRunner")
            .field("template", &self.template.name())
            .field("built", &self.built)
            .finish_non_exhaustive()
    }
}

impl TemplateRunner {
    pub fn new(template: impl Template + 'static) -> Self {
        Self::from_boxed(Box::new(template))
    }

    pub fn from_boxed(template: Box<dyn Template>) -> Self {
        Self {
            template,
            registry: Registry::new(),
            built: false,
        }
    }

    /// Start every team from `defaults`. Only effective before the first output.
    #[must_use]
    pub fn with_team_defaults(mut self, defaults: TeamOptions) -> Self {
        if !self.built {
            self.registry = Registry::with_team_defaults(defaults);
        }
        self
    }

    pub fn template_name(&self) -> &str {
        self.template.name()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Populate the registry unless that already happened, then hand it out.
    ///
    /// # Errors
    /// Errors raised by [`Template::populate`]. A failed population discards everything it
    /// created, so a retry starts from a fresh registry with the same team defaults.
    pub fn registry(&mut self) -> Result<&Registry> {
        if !self.built {
            info!("populating template '{}'", self.template.name());
            if let Err(e) = self.template.populate(&mut self.registry) {
                warn!("template '{}' failed, discarding its records", self.template.name());
                self.registry = Registry::with_team_defaults(self.registry.team_defaults().clone());
                return Err(e);
            }
            self.built = true;
        }
        Ok(&self.registry)
    }

    /// Compile into a fresh file at `path`.
    ///
    /// # Errors
    /// Population errors and those of [`Registry::compile`].
    pub fn build(&mut self, path: &Path) -> Result<()> {
        self.registry()?.compile(path)
    }

    /// Merge into the existing map at `path`.
    ///
    /// # Errors
    /// Population errors and those of [`Registry::append`].
    pub fn append(&mut self, path: &Path) -> Result<()> {
        self.registry()?.append(path)
    }

    /// Write the trigger graph preview to `path`.
    ///
    /// # Errors
    /// Population errors and those of [`Registry::preview`].
    pub fn preview(&mut self, path: &Path) -> Result<()> {
        self.registry()?.preview(path)
    }
}
