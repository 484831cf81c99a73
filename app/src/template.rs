//! Guided composition: pick a dining scenario, fill its dish slots, then
//! commit the lot to the workspace.

use std::collections::BTreeMap;
use std::fmt;

use err_derive::Error;
use log::*;
use serde::Serialize;

use infra::ids::Id;

use crate::catalog::{CatalogStore, DishCategory, Recipe};
use crate::workspace::{CustomDish, EntryError, MenuEntry, RecipeSnapshot, Workspace};

closed_set! {
    /// Dining scenarios with a fixed dish blueprint.
    pub enum Scenario ("scenario") {
        Solo => ("solo", "1人獨享"),
        Couple => ("couple", "2人世界"),
        SmallFamily => ("small-family", "3-4人小家庭"),
        Gathering => ("gathering", "5-6人聚餐"),
        FamilyReunion => ("family-reunion", "10人家族聚會"),
        Party => ("party", "20人中型派對"),
    }
}

impl Scenario {
    pub fn blueprint(self) -> Blueprint {
        use DishCategory::*;
        let counts: &[(DishCategory, usize)] = match self {
            Scenario::Solo => &[(Staple, 1), (Side, 1)],
            Scenario::Couple => &[(Main, 1), (Side, 1), (Staple, 1), (Soup, 1)],
            Scenario::SmallFamily => &[(Main, 2), (Side, 1), (Staple, 1), (Soup, 1)],
            Scenario::Gathering => &[
                (Main, 3),
                (Side, 2),
                (Staple, 1),
                (Soup, 1),
                (DessertOrDrink, 1),
            ],
            Scenario::FamilyReunion => &[
                (Main, 4),
                (Side, 2),
                (Staple, 2),
                (Soup, 1),
                (DessertOrDrink, 1),
            ],
            Scenario::Party => &[
                (Main, 5),
                (Side, 3),
                (Staple, 2),
                (Soup, 2),
                (DessertOrDrink, 2),
            ],
        };
        Blueprint {
            counts: counts.to_vec(),
        }
    }
}

/// The blueprint for a scenario label. Labels that name no scenario get an
/// empty blueprint.
pub fn blueprint_for(label: &str) -> Blueprint {
    match label.parse::<Scenario>() {
        Ok(scenario) => scenario.blueprint(),
        Err(e) => {
            debug!("No blueprint: {}", e);
            Blueprint::default()
        }
    }
}

/// How many dishes of each category a menu calls for, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Blueprint {
    counts: Vec<(DishCategory, usize)>,
}

/// One position within a blueprint: the `ordinal`-th dish of `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotKey {
    pub category: DishCategory,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotState<'a> {
    Unfilled,
    Filled(&'a MenuEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error(display = "slot {} is not part of the current blueprint", _0)]
    UnknownSlot(SlotKey),
    #[error(display = "no such recipe: {}", _0)]
    RecipeNotFound(Id<Recipe>),
    #[error(display = "{}", _0)]
    Entry(EntryError),
}

impl Blueprint {
    pub fn counts(&self) -> &[(DishCategory, usize)] {
        &self.counts
    }

    pub fn count(&self, category: DishCategory) -> usize {
        self.counts
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Every slot, grouped by category in blueprint order.
    pub fn slots(&self) -> Vec<SlotKey> {
        self.counts
            .iter()
            .flat_map(|&(category, n)| (0..n).map(move |ordinal| SlotKey { category, ordinal }))
            .collect()
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        key.ordinal < self.count(key.category)
    }
}

impl SlotKey {
    pub fn new(category: DishCategory, ordinal: usize) -> Self {
        SlotKey { category, ordinal }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}#{}", self.category, self.ordinal)
    }
}

/// Pending slot candidates for the active blueprint.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    blueprint: Blueprint,
    pending: BTreeMap<SlotKey, MenuEntry>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_scenario(scenario: Scenario) -> Self {
        TemplateEngine {
            blueprint: scenario.blueprint(),
            pending: BTreeMap::new(),
        }
    }

    /// Switches to the blueprint for `label`, dropping any pending candidates.
    pub fn select(&mut self, label: &str) -> &Blueprint {
        if !self.pending.is_empty() {
            debug!("Discarding {} pending slots", self.pending.len());
        }
        self.pending.clear();
        self.blueprint = blueprint_for(label);
        &self.blueprint
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Catalog recipes whose category matches the slot's, the usual picks
    /// offered for it.
    pub fn candidates<C: CatalogStore + ?Sized>(&self, catalog: &C, key: SlotKey) -> Vec<Recipe> {
        catalog
            .all_recipes()
            .into_iter()
            .filter(|r| r.category == key.category)
            .collect()
    }

    /// Stages a catalog recipe for a slot. The recipe's own category need not
    /// match the slot's.
    pub fn fill_slot_from_catalog<C: CatalogStore + ?Sized>(
        &mut self,
        catalog: &C,
        key: SlotKey,
        recipe: Id<Recipe>,
    ) -> Result<(), TemplateError> {
        self.check_slot(key)?;
        let recipe = catalog
            .recipe_by_id(recipe)
            .ok_or(TemplateError::RecipeNotFound(recipe))?;
        if recipe.category != key.category {
            debug!(
                "Slot {} takes {:?} from category {}",
                key, recipe.name, recipe.category
            );
        }
        self.stage(key, RecipeSnapshot::from(&recipe).into());
        Ok(())
    }

    /// Stages a custom dish for a slot, filed under the slot's category.
    pub fn fill_slot_with_custom<I, S>(
        &mut self,
        key: SlotKey,
        name: &str,
        ingredients: I,
    ) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.check_slot(key)?;
        let dish = CustomDish::new(name, key.category.into(), ingredients)
            .map_err(TemplateError::Entry)?;
        self.stage(key, dish.into());
        Ok(())
    }

    pub fn unfill_slot(&mut self, key: SlotKey) -> Option<MenuEntry> {
        self.pending.remove(&key)
    }

    pub fn slot_state(&self, key: SlotKey) -> SlotState<'_> {
        match self.pending.get(&key) {
            Some(entry) => SlotState::Filled(entry),
            None => SlotState::Unfilled,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves every staged candidate onto the workspace, in slot order, and
    /// returns how many were moved. Unfilled slots are simply skipped.
    pub fn commit_all(&mut self, workspace: &mut Workspace) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let n = pending.len();
        for key in self.blueprint.slots() {
            if let Some(entry) = pending.get(&key) {
                workspace.append(entry.clone());
            }
        }
        debug!("Committed {} of {} slots", n, self.blueprint.total());
        n
    }

    fn check_slot(&self, key: SlotKey) -> Result<(), TemplateError> {
        if self.blueprint.contains(key) {
            Ok(())
        } else {
            Err(TemplateError::UnknownSlot(key))
        }
    }

    fn stage(&mut self, key: SlotKey, entry: MenuEntry) {
        debug!("Slot {} <- {:?}", key, entry.name());
        self.pending.insert(key, entry);
    }
}
