#[cfg(test)]
#[macro_use]
extern crate maplit;

use anyhow::{Context, Result};
use log::*;

#[macro_use]
pub mod labels;

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod plan;
pub mod services;
pub mod shopping;
pub mod template;
pub mod workspace;

#[cfg(test)]
mod test;

use crate::catalog::MemoryCatalog;
use crate::plan::{MenuPlan, MenuReport};
use crate::workspace::Workspace;

/// The loaded catalog, ready to plan menus against.
pub struct VegMenu {
    catalog: MemoryCatalog,
}

impl VegMenu {
    pub fn new(config: &config::Config) -> Result<Self> {
        let catalog = config.catalog.build().context("build catalog")?;
        info!(
            "Catalog ready: {} ingredients, {} recipes",
            catalog.ingredient_count(),
            catalog.recipe_count()
        );
        Ok(VegMenu { catalog })
    }

    pub fn catalog(&self) -> &MemoryCatalog {
        &self.catalog
    }

    /// Builds a fresh workspace from `plan` and reports on it. `missing`
    /// adds to the condiments the plan already lists as missing.
    pub fn report<S: AsRef<str>>(&self, plan: &MenuPlan, missing: &[S]) -> Result<MenuReport> {
        let mut workspace = Workspace::new();
        plan.apply(&self.catalog, &mut workspace)?;

        let missing: Vec<&str> = plan
            .missing
            .iter()
            .map(String::as_str)
            .chain(missing.iter().map(|s| s.as_ref()))
            .collect();
        Ok(MenuReport::build(&self.catalog, &workspace, &missing))
    }
}
