//! Prompts for health-profile and food-image analysis

use crate::nutrition::{BodyProfile, HealthMetrics};

/// Build the health analysis prompt from a profile and its computed metrics
pub fn health_prompt(profile: &BodyProfile, metrics: &HealthMetrics) -> String {
    format!(
        "You are a highly qualified virtual health and nutrition coach. Analyze the following \
         user profile and metrics:\n\
         - **Gender:** {gender}\n\
         - **Age:** {age}\n\
         - **Weight:** {weight} kg\n\
         - **Height:** {height} cm\n\
         - **Activity:** {activity}\n\
         - **Calculated TDEE (Maintenance Calories):** {tdee} calories\n\
         - **Calculated BMI:** {bmi:.1}\n\n\
         Provide a brief analysis in Markdown format. Include the following sections:\n\
         1. **Summary of Metrics:** State the user's BMI category (Underweight, Normal, \
         Overweight, Obese).\n\
         2. **Estimated Daily Calorie Needs:** State the maintenance ({tdee} kcal) and provide \
         recommended calorie ranges for both weight loss and weight gain.\n\
         3. **Personalized Dietary Focus:** Give 3 actionable, non-medical, diet-related tips \
         tailored to their profile and activity level.\n\
         4. **Disclaimer:** End with a strong reminder that this is an AI recommendation, not \
         professional medical advice.",
        gender = profile.gender,
        age = profile.age_years,
        weight = profile.weight_kg,
        height = profile.height_cm,
        activity = profile.activity,
        tdee = metrics.tdee,
        bmi = metrics.bmi,
    )
}

/// Fixed prompt for food-image analysis
pub fn image_prompt() -> String {
    "Analyze this image of food. Identify the main components (e.g., chicken, rice, broccoli) \
     and estimate the total calorie count and serving size. \
     Provide the output STRICTLY in Markdown with the following sections: \
     ### Calorie Estimate, ### Main Ingredients, and ### Nutritional Note. \
     Be conservative with your calorie estimate."
        .to_string()
}
