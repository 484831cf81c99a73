use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::*;

use infra::ids::{Entity, Id};

use super::models::*;
use super::{CatalogError, CatalogStore};

/// A catalog held entirely in memory.
///
/// Ids are derived from a per-catalog sequence number, so building the same
/// catalog in the same order always yields the same ids.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    ingredients: BTreeMap<Id<Ingredient>, Ingredient>,
    by_name: HashMap<String, Id<Ingredient>>,
    recipes: BTreeMap<Id<Recipe>, Recipe>,
    links: BTreeMap<Id<Recipe>, BTreeSet<Id<Ingredient>>>,
    sets: BTreeMap<Id<MenuSet>, MenuSet>,
    seq: u64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id<T: Entity>(&mut self) -> Id<T> {
        self.seq += 1;
        Id::hashed(&(T::PREFIX, self.seq))
    }

    pub fn add_ingredient(&mut self, new: NewIngredient) -> Result<Id<Ingredient>, CatalogError> {
        let new = NewIngredient {
            name: checked_name(&new.name)?,
            ..new
        };
        if self.by_name.contains_key(&new.name) {
            return Err(CatalogError::DuplicateIngredient(new.name));
        }

        let id: Id<Ingredient> = self.next_id();
        debug!("Add ingredient {} as {}", new.name, id);
        self.by_name.insert(new.name.clone(), id);
        self.ingredients.insert(id, Ingredient::from_new(id, new));
        Ok(id)
    }

    pub fn update_ingredient(
        &mut self,
        id: Id<Ingredient>,
        new: NewIngredient,
    ) -> Result<(), CatalogError> {
        let new = NewIngredient {
            name: checked_name(&new.name)?,
            ..new
        };
        match self.by_name.get(&new.name) {
            Some(other) if *other != id => {
                return Err(CatalogError::DuplicateIngredient(new.name));
            }
            _ => {}
        }
        let old = self
            .ingredients
            .get_mut(&id)
            .ok_or(CatalogError::IngredientNotFound(id))?;

        self.by_name.remove(&old.name);
        self.by_name.insert(new.name.clone(), id);
        *old = Ingredient::from_new(id, new);
        debug!("Updated ingredient {:?}", old);
        Ok(())
    }

    /// Removes an ingredient and unlinks it from every recipe.
    pub fn remove_ingredient(&mut self, id: Id<Ingredient>) -> Result<Ingredient, CatalogError> {
        let ingredient = self
            .ingredients
            .remove(&id)
            .ok_or(CatalogError::IngredientNotFound(id))?;
        self.by_name.remove(&ingredient.name);
        for linked in self.links.values_mut() {
            linked.remove(&id);
        }
        debug!("Removed ingredient {}", ingredient.name);
        Ok(ingredient)
    }

    pub fn add_recipe(&mut self, new: NewRecipe) -> Result<Id<Recipe>, CatalogError> {
        let new = NewRecipe {
            name: checked_name(&new.name)?,
            ..new
        };
        let id: Id<Recipe> = self.next_id();
        debug!("Add recipe {} ({}) as {}", new.name, new.category, id);
        self.recipes.insert(id, Recipe::from_new(id, new));
        self.links.insert(id, BTreeSet::new());
        Ok(id)
    }

    pub fn update_recipe(&mut self, id: Id<Recipe>, new: NewRecipe) -> Result<(), CatalogError> {
        let new = NewRecipe {
            name: checked_name(&new.name)?,
            ..new
        };
        let recipe = self
            .recipes
            .get_mut(&id)
            .ok_or(CatalogError::RecipeNotFound(id))?;
        *recipe = Recipe::from_new(id, new);
        Ok(())
    }

    /// Removes a recipe, its ingredient links, and its place in any set menu.
    pub fn remove_recipe(&mut self, id: Id<Recipe>) -> Result<Recipe, CatalogError> {
        let recipe = self
            .recipes
            .remove(&id)
            .ok_or(CatalogError::RecipeNotFound(id))?;
        self.links.remove(&id);
        for set in self.sets.values_mut() {
            set.recipes.retain(|r| *r != id);
        }
        debug!("Removed recipe {}", recipe.name);
        Ok(recipe)
    }

    /// Replaces the ingredients of a recipe. Repeated ids collapse into one link.
    pub fn set_recipe_ingredients(
        &mut self,
        recipe: Id<Recipe>,
        ingredients: &[Id<Ingredient>],
    ) -> Result<(), CatalogError> {
        if !self.recipes.contains_key(&recipe) {
            return Err(CatalogError::RecipeNotFound(recipe));
        }
        if let Some(missing) = ingredients
            .iter()
            .find(|id| !self.ingredients.contains_key(*id))
        {
            return Err(CatalogError::IngredientNotFound(*missing));
        }
        let linked = ingredients.iter().copied().collect::<BTreeSet<_>>();
        debug!("Recipe {} now has {} ingredients", recipe, linked.len());
        self.links.insert(recipe, linked);
        Ok(())
    }

    pub fn add_menu_set(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Id<MenuSet>, CatalogError> {
        let name = checked_name(name)?;
        let id: Id<MenuSet> = self.next_id();
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        debug!("Add set menu {} as {}", name, id);
        self.sets.insert(
            id,
            MenuSet {
                id,
                name,
                description,
                recipes: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn set_menu_set_recipes(
        &mut self,
        set: Id<MenuSet>,
        recipes: &[Id<Recipe>],
    ) -> Result<(), CatalogError> {
        if let Some(missing) = recipes.iter().find(|id| !self.recipes.contains_key(*id)) {
            return Err(CatalogError::RecipeNotFound(*missing));
        }
        let entry = self
            .sets
            .get_mut(&set)
            .ok_or(CatalogError::SetNotFound(set))?;
        entry.recipes = recipes.to_vec();
        Ok(())
    }

    pub fn remove_menu_set(&mut self, set: Id<MenuSet>) -> Result<MenuSet, CatalogError> {
        self.sets.remove(&set).ok_or(CatalogError::SetNotFound(set))
    }

    pub fn ingredient_by_id(&self, id: Id<Ingredient>) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    /// All ingredients, ordered by category and then name.
    pub fn all_ingredients(&self) -> Vec<Ingredient> {
        let mut all = self.ingredients.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        all
    }

    pub fn ingredients_by_category(&self, category: IngredientCategory) -> Vec<Ingredient> {
        self.all_ingredients()
            .into_iter()
            .filter(|i| i.category == category)
            .collect()
    }

    /// Case-insensitive substring match over names and effects.
    pub fn search_ingredients(&self, keyword: &str) -> Vec<Ingredient> {
        self.all_ingredients()
            .into_iter()
            .filter(|i| i.matches_keyword(keyword))
            .collect()
    }

    pub fn recipes_by_category(&self, category: DishCategory) -> Vec<Recipe> {
        self.all_recipes()
            .into_iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

impl CatalogStore for MemoryCatalog {
    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient> {
        self.by_name
            .get(name)
            .and_then(|id| self.ingredients.get(id))
            .cloned()
    }

    fn ingredients_for_recipe(&self, recipe: Id<Recipe>) -> Vec<Ingredient> {
        let mut found = self
            .links
            .get(&recipe)
            .into_iter()
            .flatten()
            .filter_map(|id| self.ingredients.get(id))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        found
    }

    fn recipe_by_id(&self, id: Id<Recipe>) -> Option<Recipe> {
        self.recipes.get(&id).cloned()
    }

    fn all_recipes(&self) -> Vec<Recipe> {
        let mut all = self.recipes.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    fn menu_set_by_id(&self, id: Id<MenuSet>) -> Option<MenuSet> {
        self.sets.get(&id).cloned()
    }

    fn all_menu_sets(&self) -> Vec<MenuSet> {
        let mut all = self.sets.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}

fn checked_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    Ok(name.to_string())
}
