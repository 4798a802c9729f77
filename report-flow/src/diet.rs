use serde::Serialize;
use tracing::warn;

use crate::collaborators::DietOutcome;
use crate::models::DietRecommendation;

/// Where the diet recommendation attached to a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietSource {
    /// The generative collaborator produced it.
    Service,
    /// The collaborator failed but shipped its own fallback payload.
    ServiceFallback,
    /// The collaborator failed without a fallback; the fixed local default
    /// was substituted.
    LocalDefault,
}

/// Resolve the diet collaborator's outcome into the recommendation that
/// ships with the report. The substitution order on failure is fixed:
/// collaborator-supplied fallback first, local default last. Substitution
/// is recorded, not raised; the report still completes.
pub fn resolve(outcome: DietOutcome) -> (DietRecommendation, DietSource) {
    match outcome {
        DietOutcome::Generated(diet) => (diet, DietSource::Service),
        DietOutcome::Failed { error, fallback } => {
            warn!("diet generation failed, substituting fallback: {error}");
            match fallback {
                Some(diet) => (diet, DietSource::ServiceFallback),
                None => (basic_diet(), DietSource::LocalDefault),
            }
        }
    }
}

/// The fixed local default used when the diet collaborator fails without
/// supplying a fallback of its own.
pub fn basic_diet() -> DietRecommendation {
    DietRecommendation {
        overview: "A balanced diet plan focusing on whole foods, adequate hydration, and \
                   healthy lifestyle practices."
            .to_string(),
        vegetarian_foods: vec![
            "Whole grains like brown rice and wheat".to_string(),
            "Green vegetables and salads".to_string(),
            "Lentils and legumes".to_string(),
            "Nuts and seeds".to_string(),
        ],
        non_vegetarian_foods: vec![
            "Lean chicken".to_string(),
            "Fish rich in omega-3".to_string(),
            "Eggs".to_string(),
        ],
        foods_to_avoid: vec![
            "Processed foods".to_string(),
            "Excessive salt and sugar".to_string(),
            "Deep fried items".to_string(),
        ],
        lifestyle_tips: vec![
            "Drink 8-10 glasses of water daily".to_string(),
            "Exercise regularly".to_string(),
            "Get adequate sleep".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_diet() -> DietRecommendation {
        DietRecommendation {
            overview: "Low-sodium plan for hypertension management.".to_string(),
            vegetarian_foods: vec!["Steamed greens".to_string()],
            non_vegetarian_foods: vec!["Grilled fish".to_string()],
            foods_to_avoid: vec!["Pickles".to_string()],
            lifestyle_tips: vec!["Walk 30 minutes daily".to_string()],
        }
    }

    #[test]
    fn generated_output_passes_through() {
        let (diet, source) = resolve(DietOutcome::Generated(service_diet()));
        assert_eq!(diet, service_diet());
        assert_eq!(source, DietSource::Service);
    }

    #[test]
    fn failure_with_fallback_uses_the_supplied_fallback() {
        let (diet, source) = resolve(DietOutcome::Failed {
            error: "model unavailable".to_string(),
            fallback: Some(service_diet()),
        });
        assert_eq!(diet, service_diet());
        assert_eq!(source, DietSource::ServiceFallback);
    }

    #[test]
    fn failure_without_fallback_substitutes_the_local_default() {
        let (diet, source) = resolve(DietOutcome::Failed {
            error: "model unavailable".to_string(),
            fallback: None,
        });
        assert_eq!(diet, basic_diet());
        assert_eq!(source, DietSource::LocalDefault);
        // the default is complete: all four lists plus an overview
        assert!(!diet.overview.is_empty());
        assert_eq!(diet.vegetarian_foods.len(), 4);
        assert_eq!(diet.non_vegetarian_foods.len(), 3);
        assert_eq!(diet.foods_to_avoid.len(), 3);
        assert_eq!(diet.lifestyle_tips.len(), 3);
    }
}
