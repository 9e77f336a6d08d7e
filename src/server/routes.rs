//! Request handlers for the generation, analysis, and email endpoints
//!
//! Validation happens at the boundary, before any collaborator call; each
//! endpoint carries its own fixed 500 body so a failed generation never
//! leaks upstream error detail into the response.

use crate::nutrition::{ActivityLevel, BodyProfile, Gender, HealthMetrics};
use crate::prompts;
use crate::providers::{GenerationRequest, InlineImage};
use crate::relay::relay;
use crate::server::state::AppState;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine;
use serde::Deserialize;
use std::sync::Arc;

const RECIPE_ERROR: &str = "Failed to generate recipe. Check server logs for details.";
const PLAN_ERROR: &str = "Failed to generate plan. Check server logs for details.";
const SHOPPING_LIST_ERROR: &str = "Internal Server Error while generating the list";
const HEALTH_ERROR: &str = "Failed to generate health analysis.";
const IMAGE_ERROR: &str = "Failed to analyze image.";

/// Request body for `POST /api/generate-recipe`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
}

/// Request body for `POST /api/generate-plan`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub target_timeframe: Option<f64>,
}

/// Request body for `POST /api/generate-shopping-list`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateShoppingListRequest {
    #[serde(default)]
    pub meal_plan_markdown: Option<String>,
}

/// Request body for `POST /api/analyze-health`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeHealthRequest {
    pub gender: Gender,
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
}

/// Request body for `POST /api/analyze-image`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub image_mime_type: Option<String>,
}

/// Request body for `POST /api/send-email`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Generate one recipe from the user's ingredients
pub async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRecipeRequest>,
) -> Response {
    let ingredients = match &request.ingredients {
        Some(list) if !list.is_empty() => list.clone(),
        _ => return (StatusCode::BAD_REQUEST, "Please provide ingredients.").into_response(),
    };

    let constraints = prompts::join_health_constraints(
        request.dietary_restrictions.as_deref().unwrap_or(""),
        request.medical_conditions.as_deref().unwrap_or(""),
    );
    let prompt = prompts::recipe_prompt(&ingredients, &constraints);

    start_generation(
        &state,
        "generate-recipe",
        GenerationRequest::text(prompt),
        RECIPE_ERROR,
    )
    .await
}

/// Generate a 7-day meal plan from the user's ingredients and goals
pub async fn generate_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeneratePlanRequest>,
) -> Response {
    let Some(ingredients) = &request.ingredients else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing or malformed ingredients list.",
        )
            .into_response();
    };

    let constraints = prompts::join_health_constraints(
        request.dietary_restrictions.as_deref().unwrap_or(""),
        request.medical_conditions.as_deref().unwrap_or(""),
    );
    let prompt = prompts::plan_prompt(
        ingredients,
        &constraints,
        request.target_weight,
        request.target_timeframe,
    );

    start_generation(
        &state,
        "generate-plan",
        GenerationRequest::text(prompt),
        PLAN_ERROR,
    )
    .await
}

/// Consolidate a weekly plan into one shopping list
pub async fn generate_shopping_list(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateShoppingListRequest>,
) -> Response {
    let meal_plan = match &request.meal_plan_markdown {
        Some(markdown) if !markdown.is_empty() => markdown,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Missing mealPlanMarkdown in request body",
            )
                .into_response()
        }
    };

    let prompt = prompts::shopping_list_prompt(meal_plan);

    start_generation(
        &state,
        "generate-shopping-list",
        GenerationRequest::text(prompt),
        SHOPPING_LIST_ERROR,
    )
    .await
}

/// Analyze a body profile and stream back a markdown report
pub async fn analyze_health(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeHealthRequest>,
) -> Response {
    let profile = BodyProfile {
        gender: request.gender,
        age_years: request.age,
        weight_kg: request.weight,
        height_cm: request.height,
        activity: request.activity_level,
    };
    let metrics = HealthMetrics::for_profile(&profile);
    let prompt = prompts::health_prompt(&profile, &metrics);

    start_generation(
        &state,
        "analyze-health",
        GenerationRequest::text(prompt),
        HEALTH_ERROR,
    )
    .await
}

/// Analyze a food photo and stream back a markdown estimate
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Response {
    let (data, mime_type) = match (&request.image_base64, &request.image_mime_type) {
        (Some(data), Some(mime)) if !data.is_empty() && !mime.is_empty() => (data, mime),
        _ => return (StatusCode::BAD_REQUEST, "Missing image data.").into_response(),
    };

    if base64::engine::general_purpose::STANDARD.decode(data).is_err() {
        return (StatusCode::BAD_REQUEST, "Missing image data.").into_response();
    }

    let image = InlineImage {
        mime_type: mime_type.clone(),
        data_base64: data.clone(),
    };

    start_generation(
        &state,
        "analyze-image",
        GenerationRequest::with_image(prompts::image_prompt(), image),
        IMAGE_ERROR,
    )
    .await
}

/// Send the shopping list by email
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let (recipient, subject, body) = match (&request.recipient, &request.subject, &request.body) {
        (Some(recipient), Some(subject), Some(body)) => (recipient, subject, body),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Missing recipient, subject, or body.",
            )
                .into_response()
        }
    };

    let html = format!(
        "<h3>Your Shopping List:</h3>{}",
        body.replace('\n', "<br>")
    );

    match state.mailer.send(recipient, subject, &html).await {
        Ok(()) => (StatusCode::OK, "Email sent successfully").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error sending email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Email send failed: {}", e),
            )
                .into_response()
        }
    }
}

/// Start a generation call and relay its stream
///
/// A failure to start the call is a pre-commit upstream failure: the
/// endpoint's fixed 500 body goes out and the error is logged with the
/// endpoint name.
async fn start_generation(
    state: &AppState,
    endpoint: &'static str,
    request: GenerationRequest,
    error_body: &'static str,
) -> Response {
    match state.provider.stream_generate(request).await {
        Ok(stream) => relay(stream, endpoint, error_body).await,
        Err(e) => {
            tracing::error!(endpoint, error = %e, "Generation call failed to start");
            (StatusCode::INTERNAL_SERVER_ERROR, error_body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_request_accepts_camel_case() {
        let request: GenerateRecipeRequest = serde_json::from_str(
            r#"{"ingredients":["rice"],"dietaryRestrictions":"vegan","medicalConditions":""}"#,
        )
        .unwrap();
        assert_eq!(request.ingredients.unwrap(), vec!["rice".to_string()]);
        assert_eq!(request.dietary_restrictions.as_deref(), Some("vegan"));
    }

    #[test]
    fn test_plan_request_goal_fields_optional() {
        let request: GeneratePlanRequest =
            serde_json::from_str(r#"{"ingredients":[]}"#).unwrap();
        assert!(request.ingredients.unwrap().is_empty());
        assert!(request.target_weight.is_none());
        assert!(request.target_timeframe.is_none());
    }

    #[test]
    fn test_health_request_requires_all_fields() {
        let result = serde_json::from_str::<AnalyzeHealthRequest>(
            r#"{"gender":"male","age":30,"weight":70}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_health_request_parses() {
        let request: AnalyzeHealthRequest = serde_json::from_str(
            r#"{"gender":"female","age":28,"weight":60,"height":165,"activityLevel":"Moderate"}"#,
        )
        .unwrap();
        assert_eq!(request.gender, Gender::Female);
        assert_eq!(request.activity_level, ActivityLevel::Moderate);
    }

    #[test]
    fn test_image_request_fields_default_to_none() {
        let request: AnalyzeImageRequest = serde_json::from_str("{}").unwrap();
        assert!(request.image_base64.is_none());
        assert!(request.image_mime_type.is_none());
    }
}
