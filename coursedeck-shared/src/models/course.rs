/// Course model and catalogue operations
///
/// Courses are flat catalogue records. The only derived values are the
/// discounted price and the running average rating.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use coursedeck_shared::models::course::{Course, CreateCourse, Level};
/// use coursedeck_shared::store::Store;
///
/// let mut store = Store::new();
/// let course = Course::create(&mut store, CreateCourse {
///     name: "Rust for Beginners".to_string(),
///     description: "Ownership, borrowing and traits from scratch.".to_string(),
///     category: "Programming".to_string(),
///     level: Level::Beginner,
///     price: 50.0,
///     discount: 10.0,
///     image_url: None,
///     tags: vec!["rust".to_string()],
/// }, Utc::now());
///
/// assert_eq!(course.discounted_price, 45.0);
/// ```

use crate::{error::StoreError, models::tag::Tag, store::Store};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// No prior knowledge expected
    Beginner,

    /// Some experience expected
    Intermediate,

    /// Solid experience expected
    Advanced,
}

impl Level {
    /// Converts level to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised level name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// Price after applying a percentage discount, rounded to cents
pub fn discounted_price(price: f64, discount: f64) -> f64 {
    (price * (100.0 - discount)).round() / 100.0
}

/// Course record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course ID
    pub id: i64,

    /// Course title
    pub name: String,

    /// Long description
    pub description: String,

    /// Category name
    pub category: String,

    /// Skill level
    pub level: Level,

    /// List price
    pub price: f64,

    /// Discount percentage (0-100)
    pub discount: f64,

    /// Price after discount
    pub discounted_price: f64,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Tag names
    pub tags: Vec<String>,

    /// Average learner rating (0 when unrated)
    pub average_rating: f64,

    /// Number of ratings received
    pub rating_count: u32,

    /// Sum of all ratings received
    #[serde(skip)]
    pub rating_sum: u64,

    /// When the course was created
    pub created_at: DateTime<Utc>,

    /// When the course was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Course title
    pub name: String,

    /// Long description
    pub description: String,

    /// Category name
    pub category: String,

    /// Skill level
    pub level: Level,

    /// List price
    pub price: f64,

    /// Discount percentage
    pub discount: f64,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Tag names
    pub tags: Vec<String>,
}

/// Partial course update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourse {
    /// Course title
    pub name: Option<String>,

    /// Long description
    pub description: Option<String>,

    /// Category name
    pub category: Option<String>,

    /// Skill level
    pub level: Option<Level>,

    /// List price
    pub price: Option<f64>,

    /// Discount percentage
    pub discount: Option<f64>,

    /// Cover image URL; `Some(None)` removes it
    pub image_url: Option<Option<String>>,

    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

/// Catalogue filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFilter {
    /// Category name (case-insensitive)
    pub category: Option<String>,

    /// Skill level
    pub level: Option<Level>,
}

impl CourseFilter {
    /// Whether a course passes the filter
    pub fn matches(&self, course: &Course) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| course.category.eq_ignore_ascii_case(c.trim()));
        let level_ok = self.level.map_or(true, |l| course.level == l);
        category_ok && level_ok
    }
}

/// Trims tag names and drops case-insensitive duplicates, keeping first spelling
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            out.push(tag);
        }
    }
    out
}

impl Course {
    /// Creates a course, registering any tags not yet known
    pub fn create(store: &mut Store, data: CreateCourse, now: DateTime<Utc>) -> Self {
        let tags = normalize_tags(data.tags);
        for tag in &tags {
            Tag::find_or_create(store, tag, now);
        }

        let course = store.courses.insert_with(|id| Course {
            id,
            name: data.name.trim().to_string(),
            description: data.description.trim().to_string(),
            category: data.category.trim().to_string(),
            level: data.level,
            price: data.price,
            discount: data.discount,
            discounted_price: discounted_price(data.price, data.discount),
            image_url: data.image_url,
            tags,
            average_rating: 0.0,
            rating_count: 0,
            rating_sum: 0,
            created_at: now,
            updated_at: now,
        });

        tracing::debug!(course_id = course.id, level = %course.level, "Course created");
        course
    }

    /// Finds a course by ID
    pub fn find_by_id(store: &Store, id: i64) -> Option<Self> {
        store.courses.get(id).cloned()
    }

    /// Lists courses passing the filter, in id order
    pub fn list(store: &Store, filter: &CourseFilter) -> Vec<Self> {
        store
            .courses
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    /// Applies a partial update
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no course has this id.
    pub fn update(
        store: &mut Store,
        id: i64,
        data: UpdateCourse,
        now: DateTime<Utc>,
    ) -> Result<Self, StoreError> {
        if store.courses.get(id).is_none() {
            return Err(StoreError::not_found("course", id));
        }

        let tags = data.tags.map(normalize_tags);
        if let Some(tags) = &tags {
            for tag in tags {
                Tag::find_or_create(store, tag, now);
            }
        }

        let course = store
            .courses
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("course", id))?;

        if let Some(name) = data.name {
            course.name = name.trim().to_string();
        }
        if let Some(description) = data.description {
            course.description = description.trim().to_string();
        }
        if let Some(category) = data.category {
            course.category = category.trim().to_string();
        }
        if let Some(level) = data.level {
            course.level = level;
        }
        if let Some(price) = data.price {
            course.price = price;
        }
        if let Some(discount) = data.discount {
            course.discount = discount;
        }
        if let Some(image_url) = data.image_url {
            course.image_url = image_url;
        }
        if let Some(tags) = tags {
            course.tags = tags;
        }
        course.discounted_price = discounted_price(course.price, course.discount);
        course.updated_at = now;

        Ok(course.clone())
    }

    /// Records a learner rating and recomputes the average
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no course has this id.
    pub fn rate(store: &mut Store, id: i64, rating: u8, now: DateTime<Utc>) -> Result<Self, StoreError> {
        let course = store
            .courses
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("course", id))?;

        course.rating_sum += u64::from(rating);
        course.rating_count += 1;
        let average = course.rating_sum as f64 / f64::from(course.rating_count);
        course.average_rating = (average * 100.0).round() / 100.0;
        course.updated_at = now;

        Ok(course.clone())
    }

    /// Deletes a course
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no course has this id.
    pub fn delete(store: &mut Store, id: i64) -> Result<Self, StoreError> {
        store
            .courses
            .remove(id)
            .ok_or_else(|| StoreError::not_found("course", id))
    }
}
