use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;

use vegmenu::analysis::Leaning;
use vegmenu::catalog::{
    DishCategory, IngredientCategory, ListIngredients, ListMenuSets, ListRecipes,
};
use vegmenu::plan::{MenuPlan, MenuReport};
use vegmenu::services::Queryable;
use vegmenu::template::Scenario;

/// Mean nature magnitude still read as balanced.
const BALANCE_THRESHOLD: f64 = 0.3;

#[derive(Debug, StructOpt)]
#[structopt(name = "vm", about = "Vegetarian menu planner")]
struct Opt {
    /// Config file
    #[structopt(parse(from_os_str))]
    config: PathBuf,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "ingredients", about = "List catalog ingredients")]
    Ingredients {
        #[structopt(long)]
        category: Option<IngredientCategory>,
        /// Case-insensitive match on name and effects
        #[structopt(long)]
        search: Option<String>,
    },
    #[structopt(name = "recipes", about = "List catalog recipes")]
    Recipes {
        #[structopt(long)]
        category: Option<DishCategory>,
    },
    #[structopt(name = "sets", about = "List classic set menus")]
    Sets,
    #[structopt(name = "scenarios", about = "Show scenario blueprints")]
    Scenarios,
    #[structopt(name = "plan", about = "Compose and analyse a menu from a plan file")]
    Plan {
        #[structopt(parse(from_os_str))]
        plan: PathBuf,
        /// Condiment to buy; may be repeated
        #[structopt(long)]
        missing: Vec<String>,
        /// Print the report as JSON
        #[structopt(long)]
        json: bool,
    },
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    vegmenu: vegmenu::config::Config,
    #[serde(default)]
    env_logger: vegmenu::config::EnvLogger,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let mut config_buf = String::new();
    File::open(&opt.config)
        .and_then(|mut f| f.read_to_string(&mut config_buf))
        .with_context(|| format!("read {:?}", opt.config))?;
    let config: Config = toml::from_str(&config_buf).context("parse config")?;

    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);

    if let Commands::Scenarios = opt.command {
        print_scenarios();
        return Ok(());
    }

    let vegmenu_config = config.vegmenu.with_env_overrides()?;
    let vm = vegmenu::VegMenu::new(&vegmenu_config)?;

    match opt.command {
        Commands::Ingredients { category, search } => {
            let list = vm.catalog().query(ListIngredients {
                category,
                keyword: search,
            })?;
            for ingredient in list {
                println!(
                    "{}\t{}\t{}\t{}{}",
                    ingredient.name,
                    ingredient.category,
                    ingredient.five_color,
                    ingredient.nature,
                    if ingredient.is_condiment {
                        "\tcondiment"
                    } else {
                        ""
                    }
                );
            }
        }
        Commands::Recipes { category } => {
            for recipe in vm.catalog().query(ListRecipes { category })? {
                println!("{}: {} ({})", recipe.id, recipe.name, recipe.category);
            }
        }
        Commands::Sets => {
            for (set, recipes) in vm.catalog().query(ListMenuSets)? {
                println!("{}: {}", set.id, set.name);
                for recipe in recipes {
                    println!("  - {} ({})", recipe.name, recipe.category);
                }
            }
        }
        Commands::Scenarios => print_scenarios(),
        Commands::Plan {
            plan,
            missing,
            json,
        } => {
            let plan = MenuPlan::load(&plan)?;
            let report = vm.report(&plan, &missing[..])?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_scenarios() {
    for scenario in Scenario::ALL {
        let blueprint = scenario.blueprint();
        let counts: Vec<String> = blueprint
            .counts()
            .iter()
            .map(|(category, n)| format!("{} {}", category, n))
            .collect();
        println!(
            "{} ({}): {}",
            scenario,
            scenario.native_label(),
            counts.join(", ")
        );
    }
}

fn print_report(report: &MenuReport) {
    println!("Menu ({} dishes)", report.dashboard.total);
    for (i, entry) in report.entries.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, entry.name(), entry.category());
    }
    for (category, n) in report.dashboard.categories.iter() {
        println!("  {}: {}", category, n);
    }

    println!("Colors");
    if report.analysis.colors.is_empty() {
        println!("  (none)");
    }
    for (color, n) in report.analysis.colors.iter() {
        println!("  {}: {}", color, n);
    }

    match report.analysis.nature {
        Some(score) => {
            let leaning = match score.classify(BALANCE_THRESHOLD) {
                Leaning::Cooling => "cooling",
                Leaning::Balanced => "balanced",
                Leaning::Warming => "warming",
            };
            println!(
                "Nature: {:+.2} over {} ingredients, {} ({:.0}%)",
                score.mean(),
                score.samples(),
                leaning,
                score.gauge_percent()
            );
        }
        None => println!("Nature: no ingredients to score"),
    }

    println!("Shopping list");
    for item in report.checklist.iter() {
        println!("- {}", item);
    }
}
