//! Prompts for recipe, meal-plan, and shopping-list generation

use crate::prompts::constraints_or_none;

/// Build the single-recipe generation prompt
///
/// # Arguments
///
/// * `ingredients` - Ingredients the user has on hand
/// * `health_constraints` - Joined constraint string (may be empty)
pub fn recipe_prompt(ingredients: &[String], health_constraints: &str) -> String {
    format!(
        "You are a professional chef who is also highly knowledgeable in nutritional science. \
         The user has the following ingredients: {ingredients}.\n\n\
         Health constraints: {constraints}. **CRITICAL INSTRUCTION**: Ensure the generated \
         recipe strictly complies with these constraints (e.g., if Diabetic, no high sugar \
         ingredients). If a condition is highly sensitive, add a small, one-sentence disclaimer \
         at the end of the recipe recommending professional consultation.\n\n\
         Generate ONE unique recipe that uses as many of the provided ingredients as possible. \
         Format your response strictly using Markdown with these headings: 'Recipe Title', \
         'Ingredients', 'Instructions', and 'Estimated Time'. \
         Be concise and highly practical.",
        ingredients = ingredients.join(", "),
        constraints = constraints_or_none(health_constraints),
    )
}

/// Build the 7-day meal-plan generation prompt
///
/// When both a target weight and timeframe are present the plan is asked to
/// create an appropriate calorie deficit or surplus; otherwise it targets
/// maintenance calories.
///
/// # Arguments
///
/// * `ingredients` - Core ingredients every meal must feature
/// * `health_constraints` - Joined constraint string (may be empty)
/// * `target_weight_kg` - Goal weight, if set
/// * `target_timeframe_weeks` - Goal timeframe, if set
pub fn plan_prompt(
    ingredients: &[String],
    health_constraints: &str,
    target_weight_kg: Option<f64>,
    target_timeframe_weeks: Option<f64>,
) -> String {
    let user_ingredients = ingredients.join(", ");

    let goal_prompt = match (target_weight_kg, target_timeframe_weeks) {
        (Some(weight), Some(weeks)) => format!(
            "The user's goal is to reach {weight}kg in {weeks} weeks. Your plan MUST create a \
             calorie deficit/surplus appropriate for this goal, assuming a daily calorie need \
             provided by your maintenance calculations."
        ),
        _ => "Generate a plan based on maintenance calories.".to_string(),
    };

    format!(
        "You are a professional nutritionist and meal planner. \
         The user has provided a list of core ingredients: {user_ingredients}.\n\n\
         {goal_prompt}\n\
         Generate a comprehensive 7-day meal plan (Monday to Sunday) that includes a suggested \
         Breakfast, Lunch, and Dinner for each day.\n\n\
         **CRITICAL INSTRUCTION**: Every single meal listed in the plan MUST prominently \
         feature one or more ingredients from the user's provided list ({user_ingredients}). \
         DO NOT introduce any major ingredients (like primary proteins or vegetables) that are \
         NOT in the provided list, unless they are common pantry staples (salt, pepper, oil, \
         water).\n\n\
         **CRITICAL INSTRUCTION ADDED**: Provide an approximate calorie count (in kcal) for \
         every meal, enclosed in parentheses at the end of the meal description (e.g., \
         \"Scrambled eggs with tomato and pork (350 kcal)\"). The total daily calorie count \
         must align with the weight goal specified above.\n\n\
         Health constraints: {constraints}. Ensure the entire plan strictly complies with \
         these constraints.\n\n\
         Format the plan STRICTLY as a Markdown Table with FIVE columns: Day, Breakfast, \
         Lunch, Dinner, and Total Daily Calories. Do not include any text before or after the \
         table.\n\
         | Day | Breakfast | Lunch | Dinner | Total Daily Calories |\n\
         | --- | --- | --- | --- | --- |\n\
         | Monday | ... | ... | ... | (Approx. XXXX kcal) |\n\
         (Continue for Tuesday through Sunday)",
        constraints = constraints_or_none(health_constraints),
    )
}

/// Build the shopping-list consolidation prompt
///
/// # Arguments
///
/// * `meal_plan_markdown` - The weekly plan to consolidate
pub fn shopping_list_prompt(meal_plan_markdown: &str) -> String {
    format!(
        "From the following weekly meal plan in markdown format, please extract a single, \
         comprehensive shopping list with all ingredients and their total quantities \
         consolidated. Return the list as a clean markdown bulleted list. Only return the \
         list, nothing else.\n\n\
         MEAL PLAN:\n\
         ---\n\
         {meal_plan_markdown}\n\
         ---"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients() -> Vec<String> {
        vec!["chicken".to_string(), "rice".to_string()]
    }

    #[test]
    fn test_recipe_prompt_lists_ingredients() {
        let prompt = recipe_prompt(&ingredients(), "");
        assert!(prompt.contains("chicken, rice"));
        assert!(prompt.contains("Health constraints: None."));
        assert!(prompt.contains("'Recipe Title'"));
    }

    #[test]
    fn test_recipe_prompt_includes_constraints() {
        let prompt = recipe_prompt(&ingredients(), "vegetarian; diabetic");
        assert!(prompt.contains("Health constraints: vegetarian; diabetic."));
    }

    #[test]
    fn test_plan_prompt_with_goal() {
        let prompt = plan_prompt(&ingredients(), "", Some(65.0), Some(8.0));
        assert!(prompt.contains("reach 65kg in 8 weeks"));
        assert!(prompt.contains("| Day | Breakfast | Lunch | Dinner | Total Daily Calories |"));
    }

    #[test]
    fn test_plan_prompt_without_goal_targets_maintenance() {
        let prompt = plan_prompt(&ingredients(), "", None, None);
        assert!(prompt.contains("maintenance calories"));
        assert!(!prompt.contains("reach"));
    }

    #[test]
    fn test_plan_prompt_requires_both_goal_fields() {
        let prompt = plan_prompt(&ingredients(), "", Some(65.0), None);
        assert!(prompt.contains("maintenance calories"));
    }

    #[test]
    fn test_shopping_list_prompt_embeds_plan() {
        let prompt = shopping_list_prompt("| Monday | eggs |");
        assert!(prompt.contains("| Monday | eggs |"));
        assert!(prompt.contains("markdown bulleted list"));
    }
}
