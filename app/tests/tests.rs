#[macro_use]
extern crate lazy_static;

use std::path::PathBuf;

use anyhow::Result;

use vegmenu::catalog::{CatalogStore, DishCategory, FiveColor, ListIngredients, ListMenuSets};
use vegmenu::config::{CatalogConfig, Config};
use vegmenu::plan::MenuPlan;
use vegmenu::services::Queryable;
use vegmenu::VegMenu;

lazy_static! {
    static ref DEMO_DIR: PathBuf = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|root| root.join("demos"))
        .expect("workspace root");
}

fn demo_menu() -> Result<VegMenu> {
    env_logger::try_init().unwrap_or_default();
    let config = Config {
        catalog: CatalogConfig {
            path: DEMO_DIR.join("catalog.toml"),
        },
    };
    VegMenu::new(&config)
}

#[test]
fn loads_the_demo_catalog() -> Result<()> {
    let vm = demo_menu()?;
    let catalog = vm.catalog();
    assert_eq!(catalog.ingredient_count(), 35);
    assert_eq!(catalog.recipe_count(), 5);

    let salt = catalog
        .ingredient_by_name("鹽")
        .ok_or_else(|| anyhow::anyhow!("salt"))?;
    assert!(salt.is_condiment);
    assert_eq!(salt.five_color, FiveColor::White);

    let soup = catalog
        .recipe_by_name("香菇豆腐湯")
        .ok_or_else(|| anyhow::anyhow!("soup"))?;
    assert_eq!(soup.category, DishCategory::Soup);
    assert_eq!(catalog.ingredients_for_recipe(soup.id).len(), 3);
    Ok(())
}

#[test]
fn searches_ingredients_by_effect() -> Result<()> {
    let vm = demo_menu()?;
    let found = vm.catalog().query(ListIngredients {
        category: None,
        keyword: Some("化痰".to_string()),
    })?;
    let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["芥藍", "白蘿蔔", "豆漿"]);
    Ok(())
}

#[test]
fn lists_set_menus_with_their_recipes() -> Result<()> {
    let vm = demo_menu()?;
    let sets = vm.catalog().query(ListMenuSets)?;
    assert_eq!(sets.len(), 1);
    let (set, recipes) = &sets[0];
    assert_eq!(set.name, "家常便飯");
    let names: Vec<_> = recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["菠菜炒蛋", "香菇豆腐湯", "蔬菜燴飯"]);
    Ok(())
}

#[test]
fn reports_on_the_demo_plan() -> Result<()> {
    let vm = demo_menu()?;
    let plan = MenuPlan::load(&DEMO_DIR.join("plan.toml"))?;
    let report = vm.report(&plan, &["糖"])?;

    assert_eq!(report.dashboard.total, 5);
    let names: Vec<_> = report.entries.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["自創營養餐", "菠菜炒蛋", "涼拌木耳", "蔬菜燴飯", "蓮藕湯"]
    );

    assert!(report.analysis.nature.is_some());
    assert!(report.shopping.condiments().contains(&"醋".to_string()));
    assert!(report.checklist.contains(&"醋".to_string()));
    assert!(!report.checklist.contains(&"糖".to_string()));
    assert!(!report.shopping.core().contains(&"鹽".to_string()));
    Ok(())
}
