//! The working menu for one planning session.

use err_derive::Error;
use log::*;

use infra::ids::Id;

use crate::catalog::{CatalogStore, EntryCategory, MenuSet, Recipe};

mod models;

pub use self::models::{CustomDish, EntryError, MenuEntry, RecipeSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error(display = "no menu entry at {} (menu has {})", index, len)]
    OutOfRange { index: usize, len: usize },
    #[error(display = "no such recipe: {}", _0)]
    RecipeNotFound(Id<Recipe>),
    #[error(display = "no such set menu: {}", _0)]
    SetNotFound(Id<MenuSet>),
    #[error(display = "{}", _0)]
    Entry(EntryError),
}

/// Ordered list of menu entries.
///
/// Entries have no identity beyond their position; the same dish may be on
/// the menu any number of times.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    entries: Vec<MenuEntry>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<E: Into<MenuEntry>>(&mut self, entry: E) {
        let entry = entry.into();
        debug!("Append {:?} at {}", entry.name(), self.entries.len());
        self.entries.push(entry);
    }

    pub fn remove_at(&mut self, index: usize) -> Result<MenuEntry, WorkspaceError> {
        if index >= self.entries.len() {
            return Err(WorkspaceError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        debug!("Removed {:?} from {}", entry.name(), index);
        Ok(entry)
    }

    pub fn clear(&mut self) {
        debug!("Clear {} entries", self.entries.len());
        self.entries.clear();
    }

    /// A copy of the current entries, in insertion order.
    pub fn as_list(&self) -> Vec<MenuEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Puts a snapshot of a catalog recipe on the menu.
    pub fn add_recipe<C: CatalogStore + ?Sized>(
        &mut self,
        catalog: &C,
        recipe: Id<Recipe>,
    ) -> Result<(), WorkspaceError> {
        let recipe = catalog
            .recipe_by_id(recipe)
            .ok_or(WorkspaceError::RecipeNotFound(recipe))?;
        self.append(RecipeSnapshot::from(&recipe));
        Ok(())
    }

    /// Puts a free-form dish on the menu under the `Custom` category.
    pub fn add_custom<I, S>(&mut self, name: &str, ingredients: I) -> Result<(), WorkspaceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dish = CustomDish::new(name, EntryCategory::Custom, ingredients)
            .map_err(WorkspaceError::Entry)?;
        self.append(dish);
        Ok(())
    }

    /// Appends every recipe of a set menu, in the set's order. Returns how
    /// many entries were added.
    pub fn load_set<C: CatalogStore + ?Sized>(
        &mut self,
        catalog: &C,
        set: Id<MenuSet>,
    ) -> Result<usize, WorkspaceError> {
        if catalog.menu_set_by_id(set).is_none() {
            return Err(WorkspaceError::SetNotFound(set));
        }
        let recipes = catalog.recipes_in_set(set);
        for recipe in recipes.iter() {
            self.append(RecipeSnapshot::from(recipe));
        }
        Ok(recipes.len())
    }

    /// How many entries fall in each category, in order of first appearance.
    pub fn category_counts(&self) -> Vec<(EntryCategory, usize)> {
        let mut counts: Vec<(EntryCategory, usize)> = Vec::new();
        for entry in self.entries.iter() {
            let category = entry.category();
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += 1,
                None => counts.push((category, 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::{DishCategory, MemoryCatalog, NewRecipe};

    fn custom(name: &str) -> CustomDish {
        CustomDish::new(name, EntryCategory::Custom, &["tofu"]).expect("dish")
    }

    fn names(ws: &Workspace) -> Vec<String> {
        ws.as_list().iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn appends_keep_insertion_order() {
        let mut ws = Workspace::new();
        for name in &["a", "b", "c"] {
            ws.append(custom(name));
        }
        assert_eq!(names(&ws), vec!["a", "b", "c"]);

        ws.remove_at(1).expect("remove b");
        assert_eq!(names(&ws), vec!["a", "c"]);
        assert_eq!(ws.len(), 2);
    }

    #[test]
    fn remove_out_of_range_leaves_menu_untouched() {
        let mut ws = Workspace::new();
        assert_eq!(
            ws.remove_at(0).unwrap_err(),
            WorkspaceError::OutOfRange { index: 0, len: 0 }
        );

        ws.append(custom("a"));
        assert_eq!(
            ws.remove_at(3).unwrap_err(),
            WorkspaceError::OutOfRange { index: 3, len: 1 }
        );
        assert_eq!(names(&ws), vec!["a"]);
    }

    #[test]
    fn identical_appends_are_independent_entries() {
        let mut ws = Workspace::new();
        let dish = custom("twice");
        ws.append(dish.clone());
        ws.append(dish);
        assert_eq!(ws.len(), 2);

        ws.remove_at(0).expect("first");
        assert_eq!(names(&ws), vec!["twice"]);
        ws.remove_at(0).expect("second");
        assert!(ws.is_empty());
    }

    #[test]
    fn as_list_is_a_copy() {
        let mut ws = Workspace::new();
        ws.append(custom("a"));
        let mut list = ws.as_list();
        list.clear();
        assert_eq!(ws.len(), 1);

        ws.clear();
        assert!(ws.is_empty());
    }

    #[test]
    fn recipe_entries_are_snapshots() {
        let mut catalog = MemoryCatalog::new();
        let id = catalog
            .add_recipe(NewRecipe {
                name: "mapo tofu".into(),
                category: DishCategory::Main,
                description: Some("numbing".into()),
            })
            .expect("recipe");

        let mut ws = Workspace::new();
        ws.add_recipe(&catalog, id).expect("add");
        catalog
            .update_recipe(
                id,
                NewRecipe {
                    name: "braised tofu".into(),
                    category: DishCategory::Side,
                    description: None,
                },
            )
            .expect("update");

        match &ws.entries()[0] {
            MenuEntry::Recipe(snapshot) => {
                assert_eq!(snapshot.name, "mapo tofu");
                assert_eq!(snapshot.category, DishCategory::Main);
                assert_eq!(snapshot.description.as_deref(), Some("numbing"));
            }
            other => panic!("expected recipe entry; got {:?}", other),
        }
    }

    #[test]
    fn adding_unknown_recipe_fails() {
        let catalog = MemoryCatalog::new();
        let mut ws = Workspace::new();
        let ghost = Id::hashed("ghost");
        assert_eq!(
            ws.add_recipe(&catalog, ghost),
            Err(WorkspaceError::RecipeNotFound(ghost))
        );
        assert!(ws.is_empty());
    }

    #[test]
    fn empty_custom_dishes_never_reach_the_menu() {
        let mut ws = Workspace::new();
        let none: &[&str] = &[];
        assert_eq!(
            ws.add_custom("soup", none),
            Err(WorkspaceError::Entry(EntryError::NoIngredients("soup".into())))
        );
        assert_eq!(
            ws.add_custom("", &["kelp"]),
            Err(WorkspaceError::Entry(EntryError::EmptyName))
        );
        assert!(ws.is_empty());
    }

    #[test]
    fn loads_set_menus_in_order() {
        let mut catalog = MemoryCatalog::new();
        let soup = catalog
            .add_recipe(NewRecipe {
                name: "kelp soup".into(),
                category: DishCategory::Soup,
                description: None,
            })
            .expect("soup");
        let rice = catalog
            .add_recipe(NewRecipe {
                name: "brown rice".into(),
                category: DishCategory::Staple,
                description: None,
            })
            .expect("rice");
        let set = catalog.add_menu_set("simple", None).expect("set");
        catalog.set_menu_set_recipes(set, &[soup, rice]).expect("fill");

        let mut ws = Workspace::new();
        assert_eq!(ws.load_set(&catalog, set), Ok(2));
        assert_eq!(names(&ws), vec!["kelp soup", "brown rice"]);

        assert_eq!(
            ws.load_set(&catalog, Id::hashed("nope")),
            Err(WorkspaceError::SetNotFound(Id::hashed("nope")))
        );
    }

    #[test]
    fn counts_entries_per_category() {
        let mut ws = Workspace::new();
        ws.append(custom("a"));
        ws.append(
            CustomDish::new("b", EntryCategory::Dish(DishCategory::Soup), &["kelp"]).expect("b"),
        );
        ws.append(custom("c"));
        assert_eq!(
            ws.category_counts(),
            vec![
                (EntryCategory::Custom, 2),
                (EntryCategory::Dish(DishCategory::Soup), 1)
            ]
        );
    }
}
