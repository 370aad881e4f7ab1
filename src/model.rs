use serde::Serialize;
use std::ops::RangeInclusive;

/// Allowed `prep_time_minutes` values
pub const PREP_TIME_RANGE: RangeInclusive<i64> = 1..=480;

/// Allowed `calories` values
pub const CALORIES_RANGE: RangeInclusive<i64> = 0..=5000;

/// A validated recipe.
///
/// Only the validator constructs recipes, so every instance satisfies the
/// schema: non-blank name, prep time within [`PREP_TIME_RANGE`] and calories
/// within [`CALORIES_RANGE`]. Serializes to the flat JSON object the model
/// was asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    name: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    prep_time_minutes: u32,
    calories: u32,
}

impl Recipe {
    pub(crate) fn new(
        name: String,
        ingredients: Vec<String>,
        steps: Vec<String>,
        prep_time_minutes: u32,
        calories: u32,
    ) -> Self {
        Recipe {
            name,
            ingredients,
            steps,
            prep_time_minutes,
            calories,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingredient lines, each a quantity plus an item
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Cooking steps in the order they are performed
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn prep_time_minutes(&self) -> u32 {
        self.prep_time_minutes
    }

    pub fn calories(&self) -> u32 {
        self.calories
    }

    /// Render the recipe as Markdown with a bulleted ingredient list,
    /// numbered steps and a short nutrition section.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("## {}\n\n", self.name));

        output.push_str("### Ingredients\n");
        for ingredient in &self.ingredients {
            output.push_str(&format!("- {}\n", ingredient));
        }

        output.push_str("\n### Steps\n");
        for (i, step) in self.steps.iter().enumerate() {
            output.push_str(&format!("**{}.** {}\n", i + 1, step));
        }

        output.push_str("\n#### Nutrition Facts\n");
        output.push_str(&format!("- Prep Time: {} min\n", self.prep_time_minutes));
        output.push_str(&format!("- Calories: {}\n", self.calories));

        output
    }
}
