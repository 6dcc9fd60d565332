/// Demo data for local development
///
/// Enabled with `SEED_DEMO_DATA=true` on the API server. Seeding is additive;
/// records whose names already exist are skipped.

use super::Store;
use crate::models::{
    category::{Category, CreateCategory},
    course::{Course, CreateCourse, Level},
};
use chrono::{DateTime, Utc};

const CATEGORIES: &[(&str, &str)] = &[
    ("Programming", "Software development courses"),
    ("Design", "Visual and product design"),
    ("Languages", "Spoken language courses"),
];

const COURSES: &[(&str, &str, Level, f64, f64, &[&str])] = &[
    ("Rust Fundamentals", "Programming", Level::Beginner, 49.0, 10.0, &["rust", "systems"]),
    ("Async Rust in Practice", "Programming", Level::Advanced, 89.0, 0.0, &["rust", "async"]),
    ("Web APIs with Axum", "Programming", Level::Intermediate, 69.0, 20.0, &["rust", "web"]),
    ("Colour and Typography", "Design", Level::Beginner, 29.0, 0.0, &["typography"]),
    ("Spanish for Travellers", "Languages", Level::Beginner, 19.0, 50.0, &["spanish"]),
];

/// Seeds categories, tags and courses
///
/// Returns the number of courses created.
pub fn demo(store: &mut Store, now: DateTime<Utc>) -> usize {
    for (name, description) in CATEGORIES {
        let result = Category::create(
            store,
            CreateCategory {
                name: (*name).to_string(),
                description: Some((*description).to_string()),
            },
            now,
        );
        if let Err(e) = result {
            tracing::debug!(error = %e, "Skipping seed category");
        }
    }

    let mut created = 0;
    for (name, category, level, price, discount, tags) in COURSES {
        if store.courses.iter().any(|c| c.name == *name) {
            continue;
        }
        Course::create(
            store,
            CreateCourse {
                name: (*name).to_string(),
                description: format!("{} ({} level).", name, level),
                category: (*category).to_string(),
                level: *level,
                price: *price,
                discount: *discount,
                image_url: None,
                tags: tags.iter().map(|t| (*t).to_string()).collect(),
            },
            now,
        );
        created += 1;
    }

    tracing::info!(courses = created, "Seeded demo data");
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tag::Tag;

    #[test]
    fn test_demo_seed_is_idempotent() {
        let mut store = Store::new();
        let now = Utc::now();

        assert_eq!(demo(&mut store, now), COURSES.len());
        assert_eq!(Category::list(&store).len(), CATEGORIES.len());
        assert!(Tag::find_by_name(&store, "rust").is_some());

        assert_eq!(demo(&mut store, now), 0);
        assert_eq!(store.courses.len(), COURSES.len());
    }
}
