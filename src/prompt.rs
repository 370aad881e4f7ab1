use std::ops::RangeInclusive;

use crate::model::{CALORIES_RANGE, PREP_TIME_RANGE};

/// The chef persona template used as the system instruction.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains `{{EXAMPLES}}`, `{{PREP_TIME_RANGE}}` and `{{CALORIES_RANGE}}`
/// placeholders, filled in by [`chef_system_prompt`].
pub const CHEF_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// How many few-shot recipes are rendered into the system instruction
pub const PROMPT_EXAMPLE_COUNT: usize = 5;

/// A worked example shown to the model
#[derive(Debug, Clone, Copy)]
pub struct FewShotRecipe {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub steps: &'static [&'static str],
    pub prep_time_minutes: u32,
    pub calories: u32,
}

/// Static corpus of worked recipes used to steer output style
pub const FEW_SHOT_RECIPES: &[FewShotRecipe] = &[
    FewShotRecipe {
        name: "Classic French Omelette",
        ingredients: &["3 large eggs", "1 tbsp butter", "Salt and pepper to taste", "1 tbsp fresh chives"],
        steps: &[
            "Beat eggs with salt and pepper until just combined.",
            "Melt butter in non-stick pan over medium-low heat.",
            "Pour in eggs and let set slightly, then gently push cooked edges toward center.",
            "When mostly set but still glossy, fold one third over, then roll onto plate. Garnish with chives.",
        ],
        prep_time_minutes: 8,
        calories: 220,
    },
    FewShotRecipe {
        name: "Caramelized Onion and Egg Scramble",
        ingredients: &["4 eggs", "2 medium onions, sliced", "2 tbsp olive oil", "Salt", "Black pepper", "Fresh parsley"],
        steps: &[
            "Heat olive oil in a skillet. Add onions and cook over medium-low heat, stirring occasionally, until golden and caramelized (about 20 minutes).",
            "In a bowl, whisk eggs with salt and pepper.",
            "Push onions to one side, add a little more oil if needed, and pour in eggs.",
            "Scramble gently until set but still soft. Fold in onions, garnish with parsley, and serve.",
        ],
        prep_time_minutes: 28,
        calories: 320,
    },
    FewShotRecipe {
        name: "Tomato Basil Pasta",
        ingredients: &["400g spaghetti", "4 ripe tomatoes", "3 cloves garlic", "Fresh basil", "Olive oil", "Parmesan", "Salt and pepper"],
        steps: &[
            "Boil salted water and cook pasta until al dente. Reserve 1/2 cup pasta water.",
            "Dice tomatoes and mince garlic. Tear basil leaves.",
            "Sauté garlic in olive oil until fragrant. Add tomatoes, salt, and pepper; cook 5 minutes.",
            "Toss drained pasta with sauce, adding pasta water as needed. Top with basil and Parmesan.",
        ],
        prep_time_minutes: 25,
        calories: 450,
    },
    FewShotRecipe {
        name: "Garlic Butter Shrimp",
        ingredients: &["500g shrimp", "4 tbsp butter", "4 cloves garlic", "Lemon juice", "Parsley", "Salt and pepper"],
        steps: &[
            "Pat shrimp dry and season with salt and pepper.",
            "Melt butter in a large skillet over medium-high. Add minced garlic; cook 30 seconds.",
            "Add shrimp in a single layer; cook 2 minutes per side until pink.",
            "Remove from heat. Add lemon juice and parsley. Serve immediately.",
        ],
        prep_time_minutes: 15,
        calories: 280,
    },
    FewShotRecipe {
        name: "Chicken Stir-Fry with Vegetables",
        ingredients: &["400g chicken breast", "2 cups mixed vegetables", "2 tbsp soy sauce", "1 tbsp sesame oil", "Ginger", "Garlic", "Rice"],
        steps: &[
            "Slice chicken and vegetables. Mince ginger and garlic.",
            "Heat sesame oil in a wok. Stir-fry chicken until cooked; set aside.",
            "Stir-fry vegetables and ginger-garlic until tender-crisp.",
            "Return chicken, add soy sauce, toss. Serve over rice.",
        ],
        prep_time_minutes: 30,
        calories: 380,
    },
    FewShotRecipe {
        name: "Creamy Avocado Toast",
        ingredients: &["2 slices sourdough", "1 ripe avocado", "Lime juice", "Salt", "Red pepper flakes", "2 poached eggs"],
        steps: &[
            "Toast bread until golden.",
            "Mash avocado with lime juice and salt. Spread on toast.",
            "Top with poached eggs, red pepper flakes, and extra salt if desired.",
        ],
        prep_time_minutes: 12,
        calories: 350,
    },
    FewShotRecipe {
        name: "Lentil Soup",
        ingredients: &["1 cup red lentils", "1 onion", "2 carrots", "3 cups vegetable broth", "Cumin", "Turmeric", "Lemon"],
        steps: &[
            "Dice onion and carrots. Rinse lentils.",
            "Sauté onion and carrots in oil. Add cumin and turmeric; cook 1 minute.",
            "Add lentils and broth. Simmer 20 minutes until lentils are tender.",
            "Blend partially if desired. Season with salt and lemon juice.",
        ],
        prep_time_minutes: 35,
        calories: 220,
    },
    FewShotRecipe {
        name: "Greek Salad",
        ingredients: &["Cucumber", "Tomatoes", "Red onion", "Kalamata olives", "Feta cheese", "Olive oil", "Oregano", "Lemon"],
        steps: &[
            "Chop cucumber and tomatoes. Thinly slice red onion.",
            "Combine vegetables with olives and cubed feta in a bowl.",
            "Dress with olive oil, lemon juice, oregano, salt, and pepper. Toss and serve.",
        ],
        prep_time_minutes: 15,
        calories: 250,
    },
    FewShotRecipe {
        name: "Honey Garlic Salmon",
        ingredients: &["2 salmon fillets", "3 tbsp honey", "3 cloves garlic", "Soy sauce", "Rice vinegar", "Sesame seeds", "Green onions"],
        steps: &[
            "Mix honey, minced garlic, soy sauce, and rice vinegar for the glaze.",
            "Season salmon. Pan-sear skin-side down until crisp; flip and cook until done.",
            "Pour glaze over salmon; let it bubble 1-2 minutes. Garnish with sesame seeds and green onions.",
        ],
        prep_time_minutes: 22,
        calories: 420,
    },
    FewShotRecipe {
        name: "Mushroom Risotto",
        ingredients: &["1.5 cups Arborio rice", "300g mushrooms", "1 onion", "White wine", "Vegetable broth", "Parmesan", "Butter"],
        steps: &[
            "Slice mushrooms. Dice onion. Heat broth in a separate pot.",
            "Sauté onion in butter; add rice and toast 2 minutes. Add wine; stir until absorbed.",
            "Add broth one ladle at a time, stirring until absorbed. Halfway through, add mushrooms.",
            "When rice is creamy and tender, stir in Parmesan and butter. Season and serve.",
        ],
        prep_time_minutes: 45,
        calories: 480,
    },
    FewShotRecipe {
        name: "Spicy Egg and Potato Hash",
        ingredients: &["4 eggs", "2 medium potatoes", "1 onion", "Bell pepper", "Paprika", "Cumin", "Salt", "Oil"],
        steps: &[
            "Dice potatoes and onion. Dice bell pepper.",
            "Pan-fry potatoes in oil until golden and tender. Add onion and pepper; cook until soft.",
            "Season with paprika, cumin, and salt. Make wells in the hash and crack in eggs.",
            "Cover and cook until eggs are set. Serve with hot sauce if desired.",
        ],
        prep_time_minutes: 35,
        calories: 340,
    },
];

/// System and user instruction for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn for_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Self {
        Prompt {
            system: chef_system_prompt(),
            user: user_instruction(ingredients),
        }
    }
}

fn format_range(range: &RangeInclusive<i64>) -> String {
    format!("{}-{}", range.start(), range.end())
}

/// Render the first [`PROMPT_EXAMPLE_COUNT`] few-shot recipes as plain text.
pub fn few_shot_examples_text() -> String {
    FEW_SHOT_RECIPES
        .iter()
        .take(PROMPT_EXAMPLE_COUNT)
        .enumerate()
        .map(|(i, recipe)| {
            format!(
                "Example {}: {}\n  Ingredients: {}\n  Steps: {}\n  Prep: {} min, Calories: {}",
                i + 1,
                recipe.name,
                recipe.ingredients.join(", "),
                recipe.steps.join(" | "),
                recipe.prep_time_minutes,
                recipe.calories
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the chef persona system instruction, including the output contract
/// and the few-shot examples.
pub fn chef_system_prompt() -> String {
    CHEF_PROMPT_TEMPLATE
        .trim()
        .replace("{{PREP_TIME_RANGE}}", &format_range(&PREP_TIME_RANGE))
        .replace("{{CALORIES_RANGE}}", &format_range(&CALORIES_RANGE))
        .replace("{{EXAMPLES}}", &few_shot_examples_text())
}

/// Build the user instruction listing the requested ingredients.
pub fn user_instruction<S: AsRef<str>>(ingredients: &[S]) -> String {
    let listed: Vec<&str> = ingredients.iter().map(|i| i.as_ref()).collect();
    format!(
        "Generate one recipe using these ingredients: {}",
        listed.join(", ")
    )
}

/// Split free text like `"Egg, Onions ,"` into trimmed, non-empty ingredient names.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
