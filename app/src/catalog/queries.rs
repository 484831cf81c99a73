use anyhow::Result;

use super::models::{DishCategory, Ingredient, IngredientCategory, MenuSet, Recipe};
use super::{CatalogStore, MemoryCatalog};
use crate::services::{Queryable, Request};

/// Ingredient listing, optionally narrowed by category and keyword.
#[derive(Debug, Clone, Default)]
pub struct ListIngredients {
    pub category: Option<IngredientCategory>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListRecipes {
    pub category: Option<DishCategory>,
}

#[derive(Debug, Clone, Default)]
pub struct ListMenuSets;

impl Request for ListIngredients {
    type Resp = Vec<Ingredient>;
}

impl Request for ListRecipes {
    type Resp = Vec<Recipe>;
}

impl Request for ListMenuSets {
    type Resp = Vec<(MenuSet, Vec<Recipe>)>;
}

impl Queryable<ListIngredients> for MemoryCatalog {
    fn query(&self, req: ListIngredients) -> Result<Vec<Ingredient>> {
        let keyword = req.keyword.as_deref().map(str::trim).unwrap_or("");
        let found = match (req.category, keyword.is_empty()) {
            (None, true) => self.all_ingredients(),
            (None, false) => self.search_ingredients(keyword),
            (Some(category), true) => self.ingredients_by_category(category),
            (Some(category), false) => self
                .search_ingredients(keyword)
                .into_iter()
                .filter(|i| i.category == category)
                .collect(),
        };
        Ok(found)
    }
}

impl Queryable<ListRecipes> for MemoryCatalog {
    fn query(&self, req: ListRecipes) -> Result<Vec<Recipe>> {
        let found = match req.category {
            Some(category) => self.recipes_by_category(category),
            None => self.all_recipes(),
        };
        Ok(found)
    }
}

impl Queryable<ListMenuSets> for MemoryCatalog {
    fn query(&self, _: ListMenuSets) -> Result<Vec<(MenuSet, Vec<Recipe>)>> {
        let sets = self
            .all_menu_sets()
            .into_iter()
            .map(|set| {
                let recipes = self.recipes_in_set(set.id);
                (set, recipes)
            })
            .collect();
        Ok(sets)
    }
}
