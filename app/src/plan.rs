//! Batch planning: a menu described in TOML, replayed onto a fresh workspace
//! and summarised.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze, MenuAnalysis};
use crate::catalog::{CatalogStore, DishCategory, EntryCategory};
use crate::shopping::ShoppingList;
use crate::template::{SlotKey, TemplateEngine};
use crate::workspace::{CustomDish, MenuEntry, Workspace};

/// Plan file layout.
///
/// ```toml
/// sets = ["家常便飯"]
/// recipes = ["紅燒豆腐"]
/// missing = ["鹽"]
///
/// [[custom]]
/// name = "涼拌小黃瓜"
/// ingredients = ["小黃瓜", "蒜頭"]
///
/// [template]
/// scenario = "2人世界"
///
/// [[template.slots]]
/// category = "main"
/// recipe = "菠菜炒蛋"
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct MenuPlan {
    #[serde(default)]
    pub sets: Vec<String>,
    #[serde(default)]
    pub recipes: Vec<String>,
    #[serde(default)]
    pub custom: Vec<CustomRecord>,
    #[serde(default)]
    pub template: Option<TemplatePlan>,
    /// Condiments the cook does not have at home.
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CustomRecord {
    pub name: String,
    #[serde(default)]
    pub category: Option<DishCategory>,
    pub ingredients: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TemplatePlan {
    pub scenario: String,
    #[serde(default)]
    pub slots: Vec<SlotFill>,
}

/// Fills one slot with either a catalog recipe or a custom dish.
#[derive(Deserialize, Debug, Clone)]
pub struct SlotFill {
    pub category: DishCategory,
    #[serde(default)]
    pub ordinal: usize,
    #[serde(default)]
    pub recipe: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl MenuPlan {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Load plan from {:?}", path);
        let buf = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
        Self::from_toml(&buf).with_context(|| format!("parse {:?}", path))
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        let plan = toml::from_str(src)?;
        Ok(plan)
    }

    /// Appends the plan to `workspace`: set menus, then named recipes, then
    /// custom dishes, then the committed template slots.
    pub fn apply<C: CatalogStore + ?Sized>(
        &self,
        catalog: &C,
        workspace: &mut Workspace,
    ) -> Result<()> {
        for name in self.sets.iter() {
            let set = catalog
                .menu_set_by_name(name)
                .ok_or_else(|| anyhow!("no set menu named {:?}", name))?;
            let n = workspace.load_set(catalog, set.id)?;
            info!("Loaded {} dishes from set menu {:?}", n, name);
        }

        for name in self.recipes.iter() {
            let recipe = catalog
                .recipe_by_name(name)
                .ok_or_else(|| anyhow!("no recipe named {:?}", name))?;
            workspace.add_recipe(catalog, recipe.id)?;
        }

        for record in self.custom.iter() {
            let category = record
                .category
                .map(EntryCategory::from)
                .unwrap_or(EntryCategory::Custom);
            let dish = CustomDish::new(&record.name, category, &record.ingredients)
                .with_context(|| format!("custom dish {:?}", record.name))?;
            workspace.append(dish);
        }

        if let Some(template) = self.template.as_ref() {
            template.apply(catalog, workspace)?;
        }

        Ok(())
    }
}

impl TemplatePlan {
    fn apply<C: CatalogStore + ?Sized>(
        &self,
        catalog: &C,
        workspace: &mut Workspace,
    ) -> Result<()> {
        let mut engine = TemplateEngine::new();
        if engine.select(&self.scenario).is_empty() {
            return Err(anyhow!("unknown scenario {:?}", self.scenario));
        }

        for fill in self.slots.iter() {
            let key = SlotKey::new(fill.category, fill.ordinal);
            match (fill.recipe.as_ref(), fill.name.as_ref()) {
                (Some(recipe), None) => {
                    let recipe = catalog
                        .recipe_by_name(recipe)
                        .ok_or_else(|| anyhow!("slot {}: no recipe named {:?}", key, recipe))?;
                    engine
                        .fill_slot_from_catalog(catalog, key, recipe.id)
                        .with_context(|| format!("fill slot {}", key))?;
                }
                (None, Some(name)) => {
                    engine
                        .fill_slot_with_custom(key, name, &fill.ingredients)
                        .with_context(|| format!("fill slot {}", key))?;
                }
                _ => return Err(anyhow!("slot {} needs exactly one of recipe or name", key)),
            }
        }

        let committed = engine.commit_all(workspace);
        info!(
            "Committed {} of {} slots for {:?}",
            committed,
            engine.blueprint().total(),
            self.scenario
        );
        Ok(())
    }
}

/// Per-category dish counts of the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total: usize,
    pub categories: Vec<(EntryCategory, usize)>,
}

/// Everything the planner shows about a finished menu.
#[derive(Debug, Clone, Serialize)]
pub struct MenuReport {
    pub entries: Vec<MenuEntry>,
    pub dashboard: Dashboard,
    pub analysis: MenuAnalysis,
    pub shopping: ShoppingList,
    pub checklist: Vec<String>,
}

impl MenuReport {
    pub fn build<C: CatalogStore + ?Sized, S: AsRef<str>>(
        catalog: &C,
        workspace: &Workspace,
        missing: &[S],
    ) -> Self {
        let shopping = ShoppingList::generate(catalog, workspace);
        let checklist = shopping.checklist(missing);
        MenuReport {
            entries: workspace.as_list(),
            dashboard: Dashboard {
                total: workspace.len(),
                categories: workspace.category_counts(),
            },
            analysis: analyze(catalog, workspace),
            shopping,
            checklist,
        }
    }
}
