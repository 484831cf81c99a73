//! Color balance and thermal-nature score of a menu.

use std::collections::BTreeMap;

use log::*;
use serde::Serialize;

use crate::catalog::{CatalogStore, FiveColor, Ingredient};
use crate::workspace::{MenuEntry, Workspace};

/// Mean magnitude at which the nature gauge pegs at either end.
const GAUGE_SPAN: f64 = 1.5;

/// The catalog ingredients behind a menu entry.
///
/// Recipe entries use the recipe's current ingredient links. Custom dishes
/// look each name up, and names the catalog no longer knows are left out.
pub fn resolve_ingredients<C: CatalogStore + ?Sized>(
    catalog: &C,
    entry: &MenuEntry,
) -> Vec<Ingredient> {
    match entry {
        MenuEntry::Recipe(recipe) => catalog.ingredients_for_recipe(recipe.id),
        MenuEntry::Custom(dish) => dish
            .ingredients()
            .iter()
            .filter_map(|name| {
                let found = catalog.ingredient_by_name(name);
                if found.is_none() {
                    debug!("Dropping unknown ingredient {:?} of {:?}", name, dish.name());
                }
                found
            })
            .collect(),
    }
}

/// Occurrences of each five-element color. Only colors that were seen
/// appear, and `Unknown` never does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ColorBalance(BTreeMap<FiveColor, usize>);

impl ColorBalance {
    fn record(&mut self, color: FiveColor) {
        if color.is_known() {
            *self.0.entry(color).or_insert(0) += 1;
        }
    }

    pub fn get(&self, color: FiveColor) -> usize {
        self.0.get(&color).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FiveColor, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }

    pub fn as_map(&self) -> &BTreeMap<FiveColor, usize> {
        &self.0
    }
}

/// Which way a menu leans thermally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Leaning {
    Cooling,
    Balanced,
    Warming,
}

/// Mean nature score over every resolved ingredient occurrence, on the
/// scale cold = -2 to hot = +2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NatureScore {
    mean: f64,
    samples: usize,
}

impl NatureScore {
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// `Balanced` while the mean stays within `threshold` of zero.
    pub fn classify(&self, threshold: f64) -> Leaning {
        if self.mean > threshold {
            Leaning::Warming
        } else if self.mean < -threshold {
            Leaning::Cooling
        } else {
            Leaning::Balanced
        }
    }

    /// Position on a cold-to-hot gauge, from 0 to 100 with 50 as neutral.
    pub fn gauge_percent(&self) -> f64 {
        let clamped = (self.mean / GAUGE_SPAN).max(-1.0).min(1.0);
        (clamped + 1.0) / 2.0 * 100.0
    }
}

#[derive(Debug, Default)]
struct NatureTally {
    sum: i64,
    samples: usize,
}

impl NatureTally {
    fn record(&mut self, ingredient: &Ingredient) {
        self.sum += i64::from(ingredient.nature.score());
        self.samples += 1;
    }

    fn score(&self) -> Option<NatureScore> {
        if self.samples == 0 {
            return None;
        }
        Some(NatureScore {
            mean: self.sum as f64 / self.samples as f64,
            samples: self.samples,
        })
    }
}

/// Both analyses of one menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuAnalysis {
    pub colors: ColorBalance,
    /// `None` when no ingredient at all could be resolved.
    pub nature: Option<NatureScore>,
}

pub fn color_balance<C: CatalogStore + ?Sized>(catalog: &C, workspace: &Workspace) -> ColorBalance {
    analyze(catalog, workspace).colors
}

pub fn nature_score<C: CatalogStore + ?Sized>(
    catalog: &C,
    workspace: &Workspace,
) -> Option<NatureScore> {
    analyze(catalog, workspace).nature
}

pub fn analyze<C: CatalogStore + ?Sized>(catalog: &C, workspace: &Workspace) -> MenuAnalysis {
    let mut colors = ColorBalance::default();
    let mut natures = NatureTally::default();

    for entry in workspace.entries() {
        for ingredient in resolve_ingredients(catalog, entry) {
            colors.record(ingredient.five_color);
            natures.record(&ingredient);
        }
    }

    trace!("Analysed {} ingredient occurrences", natures.samples);
    MenuAnalysis {
        colors,
        nature: natures.score(),
    }
}
