//! The ingredient / recipe catalog the menu engine reads from.

use err_derive::Error;

use infra::ids::Id;

mod file;
mod memory;
mod models;
mod queries;

pub use self::file::{CatalogFile, RecipeRecord, SetRecord};
pub use self::memory::MemoryCatalog;
pub use self::models::{
    DishCategory, EntryCategory, FiveColor, Ingredient, IngredientCategory, MenuSet, Nature,
    NewIngredient, NewRecipe, Recipe,
};
pub use self::queries::{ListIngredients, ListMenuSets, ListRecipes};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(display = "name must not be empty")]
    EmptyName,
    #[error(display = "ingredient {:?} already exists", _0)]
    DuplicateIngredient(String),
    #[error(display = "no such ingredient: {}", _0)]
    IngredientNotFound(Id<Ingredient>),
    #[error(display = "no such recipe: {}", _0)]
    RecipeNotFound(Id<Recipe>),
    #[error(display = "no such set menu: {}", _0)]
    SetNotFound(Id<MenuSet>),
}

/// Read access to the catalog, as consumed by the workspace, the template
/// engine and the analyses.
///
/// Lookups that miss return `None` (or nothing); it is up to the caller
/// whether a miss is an error.
pub trait CatalogStore {
    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient>;

    /// The distinct ingredients linked to a recipe. Empty for unknown recipes.
    fn ingredients_for_recipe(&self, recipe: Id<Recipe>) -> Vec<Ingredient>;

    fn recipe_by_id(&self, id: Id<Recipe>) -> Option<Recipe>;

    /// All recipes, ordered by name.
    fn all_recipes(&self) -> Vec<Recipe>;

    fn menu_set_by_id(&self, id: Id<MenuSet>) -> Option<MenuSet>;

    /// All set menus, ordered by name.
    fn all_menu_sets(&self) -> Vec<MenuSet>;

    fn recipe_categories(&self) -> Vec<DishCategory> {
        DishCategory::ALL.to_vec()
    }

    fn ingredient_categories(&self) -> Vec<IngredientCategory> {
        IngredientCategory::ALL.to_vec()
    }

    fn recipe_by_name(&self, name: &str) -> Option<Recipe> {
        self.all_recipes().into_iter().find(|r| r.name == name)
    }

    fn menu_set_by_name(&self, name: &str) -> Option<MenuSet> {
        self.all_menu_sets().into_iter().find(|s| s.name == name)
    }

    /// Recipes of a set menu in the set's own order, skipping any that have
    /// since left the catalog.
    fn recipes_in_set(&self, set: Id<MenuSet>) -> Vec<Recipe> {
        self.menu_set_by_id(set)
            .map(|s| {
                s.recipes
                    .iter()
                    .filter_map(|id| self.recipe_by_id(*id))
                    .collect()
            })
            .unwrap_or_default()
    }
}
