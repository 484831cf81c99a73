//! Shopping list for the working menu.

use std::collections::BTreeSet;

use log::*;
use serde::Serialize;

use crate::catalog::CatalogStore;
use crate::workspace::{MenuEntry, Workspace};

/// Everything to buy for a menu, split into core ingredients and
/// condiments. Names are sorted and unique within each half.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShoppingList {
    core: Vec<String>,
    condiments: Vec<String>,
}

impl ShoppingList {
    /// Recipe ingredients go to whichever half their condiment flag says.
    /// Custom dish ingredients are taken by name and count as core, unless
    /// the same name already turned up as a condiment.
    pub fn generate<C: CatalogStore + ?Sized>(catalog: &C, workspace: &Workspace) -> Self {
        let mut core = BTreeSet::new();
        let mut condiments = BTreeSet::new();

        for entry in workspace.entries() {
            match entry {
                MenuEntry::Recipe(recipe) => {
                    for ingredient in catalog.ingredients_for_recipe(recipe.id) {
                        if ingredient.is_condiment {
                            condiments.insert(ingredient.name);
                        } else {
                            core.insert(ingredient.name);
                        }
                    }
                }
                MenuEntry::Custom(dish) => {
                    core.extend(dish.ingredients().iter().cloned());
                }
            }
        }

        // A name already bought as a condiment is not listed again as core.
        core.retain(|name| !condiments.contains(name));
        debug!(
            "Shopping list: {} core, {} condiments",
            core.len(),
            condiments.len()
        );

        ShoppingList {
            core: core.into_iter().collect(),
            condiments: condiments.into_iter().collect(),
        }
    }

    pub fn core(&self) -> &[String] {
        &self.core
    }

    pub fn condiments(&self) -> &[String] {
        &self.condiments
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.condiments.is_empty()
    }

    /// The final list: every core ingredient, then the condiments the cook
    /// confirmed they lack. Confirmations that are not on the condiment
    /// list are ignored.
    pub fn checklist<S: AsRef<str>>(&self, missing: &[S]) -> Vec<String> {
        let missing: BTreeSet<&str> = missing.iter().map(|s| s.as_ref().trim()).collect();
        for name in missing.iter() {
            if !self.condiments.iter().any(|c| c == name) {
                warn!("Ignoring {:?}: not a condiment on this list", name);
            }
        }

        self.core
            .iter()
            .chain(
                self.condiments
                    .iter()
                    .filter(|c| missing.contains(c.as_str())),
            )
            .cloned()
            .collect()
    }

    /// The checklist as one `- item` line per entry.
    pub fn render_checklist<S: AsRef<str>>(&self, missing: &[S]) -> String {
        self.checklist(missing)
            .iter()
            .map(|item| format!("- {}\n", item))
            .collect()
    }
}
