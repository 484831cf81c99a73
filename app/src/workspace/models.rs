use err_derive::Error;
use serde::Serialize;

use infra::ids::Id;

use crate::catalog::{DishCategory, EntryCategory, Recipe};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error(display = "a custom dish needs a name")]
    EmptyName,
    #[error(display = "custom dish {:?} needs at least one ingredient", _0)]
    NoIngredients(String),
}

/// One dish on the working menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MenuEntry {
    Recipe(RecipeSnapshot),
    Custom(CustomDish),
}

/// A copy of a catalog recipe as it was when it was put on the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSnapshot {
    pub id: Id<Recipe>,
    pub name: String,
    pub category: DishCategory,
    pub description: Option<String>,
}

/// A dish composed on the spot from ingredient names.
///
/// Names are kept as typed; they are only matched against the catalog when
/// the menu is analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomDish {
    name: String,
    category: EntryCategory,
    ingredients: Vec<String>,
}

impl MenuEntry {
    pub fn name(&self) -> &str {
        match self {
            MenuEntry::Recipe(r) => &r.name,
            MenuEntry::Custom(c) => &c.name,
        }
    }

    pub fn category(&self) -> EntryCategory {
        match self {
            MenuEntry::Recipe(r) => EntryCategory::Dish(r.category),
            MenuEntry::Custom(c) => c.category,
        }
    }
}

impl From<RecipeSnapshot> for MenuEntry {
    fn from(snapshot: RecipeSnapshot) -> Self {
        MenuEntry::Recipe(snapshot)
    }
}

impl From<CustomDish> for MenuEntry {
    fn from(dish: CustomDish) -> Self {
        MenuEntry::Custom(dish)
    }
}

impl From<&Recipe> for RecipeSnapshot {
    fn from(recipe: &Recipe) -> Self {
        RecipeSnapshot {
            id: recipe.id,
            name: recipe.name.clone(),
            category: recipe.category,
            description: recipe.description.clone(),
        }
    }
}

impl CustomDish {
    /// Blank ingredient names are dropped and repeats collapse, keeping the
    /// first occurrence.
    pub fn new<I, S>(
        name: &str,
        category: EntryCategory,
        ingredients: I,
    ) -> Result<Self, EntryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }

        let mut names: Vec<String> = Vec::new();
        for ingredient in ingredients {
            let ingredient = ingredient.as_ref().trim();
            if !ingredient.is_empty() && !names.iter().any(|n| n == ingredient) {
                names.push(ingredient.to_string());
            }
        }
        if names.is_empty() {
            return Err(EntryError::NoIngredients(name.to_string()));
        }

        Ok(CustomDish {
            name: name.to_string(),
            category,
            ingredients: names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> EntryCategory {
        self.category
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }
}
