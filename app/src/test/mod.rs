//! Guarded with `#[cfg(test)]` from `lib.rs`

use anyhow::Result;
use env_logger;

use crate::analysis::{analyze, Leaning};
use crate::catalog::{CatalogStore, DishCategory, EntryCategory, FiveColor};
use crate::shopping::ShoppingList;
use crate::template::{SlotKey, SlotState, TemplateEngine};
use crate::workspace::Workspace;


#[test]
fn couple_menu_from_template_to_shopping_list() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let catalog = junk_drawer::catalog()?;

    let mut engine = TemplateEngine::new();
    let blueprint = engine.select("2人世界").clone();
    assert_eq!(blueprint.total(), 4);

    for key in blueprint.slots() {
        let candidates = engine.candidates(&catalog, key);
        let recipe = candidates
            .first()
            .ok_or_else(|| anyhow::anyhow!("no candidate for {}", key))?;
        engine.fill_slot_from_catalog(&catalog, key, recipe.id)?;
    }
    assert_eq!(engine.pending_count(), 4);

    let mut ws = Workspace::new();
    ws.add_custom("cold tofu", &["tofu", "garlic", "dragon fruit"])?;
    assert_eq!(engine.commit_all(&mut ws), 4);
    assert_eq!(engine.pending_count(), 0);

    let names: Vec<_> = ws.entries().iter().map(|e| e.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "cold tofu",
            "spinach omelette",
            "wood ear salad",
            "vegetable rice",
            "shiitake tofu soup"
        ]
    );

    let analysis = analyze(&catalog, &ws);
    assert_eq!(
        analysis.colors.as_map(),
        &btreemap! {
            FiveColor::BlueGreen => 1,
            FiveColor::Red => 2,
            FiveColor::Yellow => 3,
            FiveColor::White => 8,
            FiveColor::Black => 2,
        }
    );
    let nature = analysis.nature.expect("nature score");
    assert_eq!(nature.samples(), 16);
    assert_eq!(nature.mean(), -0.25);
    assert_eq!(nature.classify(0.3), Leaning::Balanced);

    let shopping = ShoppingList::generate(&catalog, &ws);
    assert_eq!(
        shopping.condiments().iter().cloned().collect::<std::collections::HashSet<_>>(),
        hashset! {
            "salt".to_string(),
            "ginger".to_string(),
            "vinegar".to_string(),
            "garlic".to_string(),
        }
    );
    assert!(shopping.core().contains(&"dragon fruit".to_string()));
    assert!(!shopping.core().contains(&"garlic".to_string()));

    let checklist = shopping.checklist(&["garlic"]);
    assert_eq!(checklist.last().map(String::as_str), Some("garlic"));
    assert_eq!(checklist.len(), shopping.core().len() + 1);
    Ok(())
}

#[test]
fn switching_scenario_drops_unfinished_slots() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let catalog = junk_drawer::catalog()?;
    let soup = catalog
        .recipe_by_name("shiitake tofu soup")
        .ok_or_else(|| anyhow::anyhow!("soup"))?;

    let mut engine = TemplateEngine::new();
    engine.select("small-family");
    let key = SlotKey::new(DishCategory::Soup, 0);
    engine.fill_slot_from_catalog(&catalog, key, soup.id)?;
    match engine.slot_state(key) {
        SlotState::Filled(entry) => assert_eq!(entry.name(), "shiitake tofu soup"),
        SlotState::Unfilled => panic!("soup slot should be filled"),
    }

    engine.select("1人獨享");
    assert_eq!(engine.pending_count(), 0);
    assert!(engine.fill_slot_from_catalog(&catalog, key, soup.id).is_err());

    let mut ws = Workspace::new();
    assert_eq!(engine.commit_all(&mut ws), 0);
    assert!(ws.is_empty());
    Ok(())
}

#[test]
fn set_menu_dashboard_and_removal() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let catalog = junk_drawer::catalog()?;
    let set = catalog
        .menu_set_by_name("home style")
        .ok_or_else(|| anyhow::anyhow!("set"))?;

    let mut ws = Workspace::new();
    assert_eq!(ws.load_set(&catalog, set.id)?, 3);
    ws.add_custom("fruit plate", &["apple"])?;
    assert_eq!(
        ws.category_counts(),
        vec![
            (EntryCategory::Dish(DishCategory::Soup), 1),
            (EntryCategory::Dish(DishCategory::Main), 1),
            (EntryCategory::Dish(DishCategory::Staple), 1),
            (EntryCategory::Custom, 1),
        ]
    );

    let removed = ws.remove_at(0)?;
    assert_eq!(removed.name(), "shiitake tofu soup");
    assert_eq!(ws.len(), 3);
    assert!(ws.remove_at(3).is_err());
    Ok(())
}
