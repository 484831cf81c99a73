use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;

use super::models::{DishCategory, NewIngredient, NewRecipe};
use super::{CatalogStore, MemoryCatalog};

/// On-disk catalog description, in TOML.
///
/// ```toml
/// [[ingredients]]
/// name = "菠菜"
/// category = "葉菜類"
/// five_color = "青"
/// nature = "涼"
///
/// [[recipes]]
/// name = "菠菜炒蛋"
/// category = "主菜"
/// ingredients = ["菠菜", "雞蛋", "鹽"]
///
/// [[sets]]
/// name = "家常便飯"
/// recipes = ["菠菜炒蛋"]
/// ```
#[derive(Deserialize, Debug, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub ingredients: Vec<NewIngredient>,
    #[serde(default)]
    pub recipes: Vec<RecipeRecord>,
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RecipeRecord {
    pub name: String,
    pub category: DishCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SetRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipes: Vec<String>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Load catalog from {:?}", path);
        let buf = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
        Self::from_toml(&buf).with_context(|| format!("parse {:?}", path))
    }

    pub fn from_toml(src: &str) -> Result<Self> {
        let file = toml::from_str(src)?;
        Ok(file)
    }

    /// Builds an in-memory catalog.
    ///
    /// Ingredient rows must be valid and uniquely named. Recipe ingredients
    /// and set recipes are matched by name; names that match nothing are
    /// reported and skipped. A recipe repeating an earlier recipe's name is
    /// skipped too, so sets always refer to the first one.
    pub fn into_catalog(self) -> Result<MemoryCatalog> {
        let mut catalog = MemoryCatalog::new();

        for row in self.ingredients {
            let name = row.name.clone();
            catalog
                .add_ingredient(row)
                .with_context(|| format!("ingredient {:?}", name))?;
        }

        for record in self.recipes {
            if catalog.recipe_by_name(record.name.trim()).is_some() {
                warn!("Skipping repeated recipe {:?}", record.name);
                continue;
            }
            let RecipeRecord {
                name,
                category,
                description,
                ingredients,
            } = record;
            let id = catalog
                .add_recipe(NewRecipe {
                    name: name.clone(),
                    category,
                    description,
                })
                .with_context(|| format!("recipe {:?}", name))?;

            let mut linked = Vec::new();
            for ingredient in ingredients.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
                match catalog.ingredient_by_name(ingredient) {
                    Some(found) => linked.push(found.id),
                    None => warn!(
                        "Recipe {:?} refers to unknown ingredient {:?}",
                        name, ingredient
                    ),
                }
            }
            catalog.set_recipe_ingredients(id, &linked)?;
        }

        for record in self.sets {
            let id = catalog
                .add_menu_set(&record.name, record.description.as_deref())
                .with_context(|| format!("set menu {:?}", record.name))?;

            let mut recipes = Vec::new();
            for recipe in record.recipes.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
                match catalog.recipe_by_name(recipe) {
                    Some(found) => recipes.push(found.id),
                    None => warn!(
                        "Set menu {:?} refers to unknown recipe {:?}",
                        record.name, recipe
                    ),
                }
            }
            catalog.set_menu_set_recipes(id, &recipes)?;
        }

        info!(
            "Loaded catalog: {} ingredients; {} recipes",
            catalog.ingredient_count(),
            catalog.recipe_count()
        );
        Ok(catalog)
    }
}
