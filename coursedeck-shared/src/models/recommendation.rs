/// Course recommendation contract
///
/// Recommendations come from a [`RecommendationSource`]. The production
/// platform talks to a remote ranking service; this crate ships
/// [`CatalogueRecommender`], which ranks the local course catalogue so the API
/// works standalone.
///
/// # Ranking (CatalogueRecommender)
///
/// 1. Keep courses in the preferred category (ignoring case) at the requested
///    skill level.
/// 2. Unregistered users see discounted courses first.
/// 3. Order by average rating (high first), then discounted price (low
///    first), then course id.
/// 4. Keep the first `top_n`.

use crate::{
    models::course::{Course, Level},
    validation::LEVEL_PATTERN,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::Validate;

/// Recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    /// Requesting user
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    pub user_id: i64,

    /// Category to recommend from
    #[validate(length(min = 1, max = 50, message = "preferred_category must be 1-50 characters"))]
    pub preferred_category: String,

    /// Skill level (`beginner|intermediate|advanced`)
    #[validate(regex(
        path = *LEVEL_PATTERN,
        message = "skill_level must be one of beginner, intermediate, advanced"
    ))]
    pub skill_level: String,

    /// Maximum number of results
    #[validate(range(min = 1, max = 50, message = "top_n must be between 1 and 50"))]
    pub top_n: u32,

    /// Whether the user has an account
    #[serde(default)]
    pub is_registered: bool,
}

/// One recommended course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Course ID
    pub course_id: i64,

    /// Course title
    pub course_title: String,

    /// Average learner rating
    pub average_rating: f64,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Course level
    pub difficulty_level: Level,

    /// Course category
    pub course_category: String,

    /// List price
    pub price: f64,

    /// Discount percentage
    pub discount: f64,

    /// Price after discount
    pub discounted_price: f64,
}

impl From<&Course> for RecommendationResult {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.id,
            course_title: course.name.clone(),
            average_rating: course.average_rating,
            image_url: course.image_url.clone(),
            difficulty_level: course.level,
            course_category: course.category.clone(),
            price: course.price,
            discount: course.discount,
            discounted_price: course.discounted_price,
        }
    }
}

/// Something that can rank courses for a user
pub trait RecommendationSource: Send + Sync {
    /// Returns at most `request.top_n` results, best first
    ///
    /// `request` has already passed validation.
    fn recommend(&self, request: &RecommendationRequest, catalogue: &[Course]) -> Vec<RecommendationResult>;
}

/// Ranks the local catalogue
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogueRecommender;

impl CatalogueRecommender {
    fn compare(registered: bool, a: &Course, b: &Course) -> Ordering {
        let promoted = |c: &Course| !registered && c.discount > 0.0;

        promoted(b)
            .cmp(&promoted(a))
            .then_with(|| b.average_rating.total_cmp(&a.average_rating))
            .then_with(|| a.discounted_price.total_cmp(&b.discounted_price))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl RecommendationSource for CatalogueRecommender {
    fn recommend(&self, request: &RecommendationRequest, catalogue: &[Course]) -> Vec<RecommendationResult> {
        let Ok(level) = request.skill_level.parse::<Level>() else {
            tracing::warn!(skill_level = %request.skill_level, "Unrecognised skill level");
            return Vec::new();
        };
        let category = request.preferred_category.trim();

        let mut matches: Vec<&Course> = catalogue
            .iter()
            .filter(|c| c.level == level && c.category.eq_ignore_ascii_case(category))
            .collect();

        matches.sort_by(|a, b| Self::compare(request.is_registered, a, b));

        matches
            .into_iter()
            .take(request.top_n as usize)
            .map(RecommendationResult::from)
            .collect()
    }
}
