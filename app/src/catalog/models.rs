use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use infra::ids::{Entity, Id};

closed_set! {
    /// Shelf category of an ingredient.
    pub enum IngredientCategory ("ingredient category") {
        LeafyGreens => ("leafy-greens", "葉菜類"),
        RootsAndTubers => ("roots-and-tubers", "根莖類"),
        Mushrooms => ("mushrooms", "菇菌類"),
        SoyProducts => ("soy-products", "豆製品"),
        EggsAndDairy => ("eggs-and-dairy", "蛋奶類"),
        Grains => ("grains", "五穀雜糧"),
        Fruit => ("fruit", "水果類"),
        Seasonings => ("seasonings", "調味品"),
        NutsAndSeeds => ("nuts-and-seeds", "堅果種子類"),
        Seaweed => ("seaweed", "藻類"),
        SweetsAndSnacks => ("sweets-and-snacks", "甜品/點心類"),
        Other => ("other", "其他"),
    }
}

closed_set! {
    /// Five-element color of an ingredient. `Unknown` marks rows whose color
    /// was never classified; it never shows up in a color balance.
    pub enum FiveColor ("five-color") {
        BlueGreen => ("blue-green", "青"),
        Red => ("red", "赤"),
        Yellow => ("yellow", "黃"),
        White => ("white", "白"),
        Black => ("black", "黑"),
        Unknown => ("unknown", "未知"),
    }
}

closed_set! {
    /// Thermal nature, from coldest to hottest.
    pub enum Nature ("nature") {
        Cold => ("cold", "寒"),
        Cool => ("cool", "涼"),
        Neutral => ("neutral", "平"),
        Warm => ("warm", "溫"),
        Hot => ("hot", "熱"),
    }
}

closed_set! {
    /// Role a recipe plays in a meal.
    pub enum DishCategory ("dish category") {
        Staple => ("staple", "主食"),
        Main => ("main", "主菜"),
        Side => ("side", "配菜"),
        Soup => ("soup", "湯品"),
        DessertOrDrink => ("dessert-or-drink", "甜點/飲料"),
        Sauce => ("sauce", "醬料/醃料"),
        Stock => ("stock", "高湯/湯底"),
    }
}

impl FiveColor {
    pub const PALETTE: [FiveColor; 5] = [
        FiveColor::BlueGreen,
        FiveColor::Red,
        FiveColor::Yellow,
        FiveColor::White,
        FiveColor::Black,
    ];

    pub fn is_known(self) -> bool {
        self != FiveColor::Unknown
    }
}

impl Nature {
    pub fn score(self) -> i32 {
        match self {
            Nature::Hot => 2,
            Nature::Warm => 1,
            Nature::Neutral => 0,
            Nature::Cool => -1,
            Nature::Cold => -2,
        }
    }
}

/// Category shown for a menu entry: a recipe's dish role, or `Custom` for
/// dishes composed free-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryCategory {
    Dish(DishCategory),
    Custom,
}

impl EntryCategory {
    pub fn label(self) -> &'static str {
        match self {
            EntryCategory::Dish(dish) => dish.label(),
            EntryCategory::Custom => "custom",
        }
    }
}

impl From<DishCategory> for EntryCategory {
    fn from(dish: DishCategory) -> Self {
        EntryCategory::Dish(dish)
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.label())
    }
}

impl Serialize for EntryCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: Id<Ingredient>,
    pub name: String,
    pub category: IngredientCategory,
    pub five_color: FiveColor,
    pub nature: Nature,
    pub effects: Option<String>,
    pub is_condiment: bool,
}

/// Everything about an ingredient except its surrogate id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewIngredient {
    pub name: String,
    pub category: IngredientCategory,
    pub five_color: FiveColor,
    pub nature: Nature,
    #[serde(default)]
    pub effects: Option<String>,
    #[serde(default)]
    pub is_condiment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: Id<Recipe>,
    pub name: String,
    pub category: DishCategory,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub category: DishCategory,
    #[serde(default)]
    pub description: Option<String>,
}

/// A named bundle of recipes, loaded into a menu in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSet {
    pub id: Id<MenuSet>,
    pub name: String,
    pub description: Option<String>,
    pub recipes: Vec<Id<Recipe>>,
}

impl Ingredient {
    pub(crate) fn from_new(id: Id<Ingredient>, new: NewIngredient) -> Self {
        let NewIngredient {
            name,
            category,
            five_color,
            nature,
            effects,
            is_condiment,
        } = new;
        let effects = effects.filter(|e| !e.trim().is_empty());
        Ingredient {
            id,
            name,
            category,
            five_color,
            nature,
            effects,
            is_condiment,
        }
    }

    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self
                .effects
                .as_ref()
                .map(|e| e.to_lowercase().contains(&keyword))
                .unwrap_or(false)
    }
}

impl Recipe {
    pub(crate) fn from_new(id: Id<Recipe>, new: NewRecipe) -> Self {
        let NewRecipe {
            name,
            category,
            description,
        } = new;
        let description = description.filter(|d| !d.trim().is_empty());
        Recipe {
            id,
            name,
            category,
            description,
        }
    }
}

impl Entity for Ingredient {
    const PREFIX: &'static str = "ingredient";
}

impl Entity for Recipe {
    const PREFIX: &'static str = "recipe";
}

impl Entity for MenuSet {
    const PREFIX: &'static str = "set";
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_english_and_native_labels() {
        assert_eq!("blue-green".parse::<FiveColor>(), Ok(FiveColor::BlueGreen));
        assert_eq!("青".parse::<FiveColor>(), Ok(FiveColor::BlueGreen));
        assert_eq!(" 甜點/飲料 ".parse::<DishCategory>(), Ok(DishCategory::DessertOrDrink));
        assert_eq!(
            "堅果種子類".parse::<IngredientCategory>(),
            Ok(IngredientCategory::NutsAndSeeds)
        );
    }

    #[test]
    fn rejects_labels_outside_the_set() {
        let err = "purple".parse::<FiveColor>().unwrap_err();
        assert_eq!(err.kind, "five-color");
        assert_eq!(err.value, "purple");
        assert!("lukewarm".parse::<Nature>().is_err());
        assert!("花果類".parse::<IngredientCategory>().is_err());
    }

    #[test]
    fn closed_sets_have_fixed_sizes() {
        assert_eq!(IngredientCategory::ALL.len(), 12);
        assert_eq!(DishCategory::ALL.len(), 7);
        assert_eq!(Nature::ALL.len(), 5);
        assert!(FiveColor::PALETTE.iter().all(|c| c.is_known()));
    }

    #[test]
    fn nature_scale_runs_from_minus_two_to_two() {
        let scores: Vec<i32> = Nature::ALL.iter().map(|n| n.score()).collect();
        assert_eq!(scores, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn deserializes_ingredient_rows_with_native_labels() {
        let row: NewIngredient = toml::from_str(
            r#"
            name = "菠菜"
            category = "葉菜類"
            five_color = "青"
            nature = "涼"
            effects = "補血"
            "#,
        )
        .expect("parse row");
        assert_eq!(row.category, IngredientCategory::LeafyGreens);
        assert_eq!(row.nature, Nature::Cool);
        assert!(!row.is_condiment);
    }

    #[test]
    fn keyword_search_covers_name_and_effects() {
        let tofu = Ingredient::from_new(
            Id::hashed("tofu"),
            NewIngredient {
                name: "Tofu".into(),
                category: IngredientCategory::SoyProducts,
                five_color: FiveColor::White,
                nature: Nature::Cool,
                effects: Some("Clears heat".into()),
                is_condiment: false,
            },
        );
        assert!(tofu.matches_keyword("tof"));
        assert!(tofu.matches_keyword("HEAT"));
        assert!(!tofu.matches_keyword("spinach"));
    }
}
