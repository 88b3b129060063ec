//! # Catalog entities
//!
//! Typed projections of the documents stored in the course, project and resource
//! collections. They are decoded from [`crate::Document`] via serde and never
//! written back: the hosted database is the only owner of this data.
//!
//! | Struct | Collection | Notes |
//! |--------|-----------|-------|
//! | [`Course`] | courses | `rating` also accepts the legacy `ratings` attribute |
//! | [`Project`] | projects | `technologies` defaults to an empty list |
//! | [`Resource`] | resources | `category` is one of [`ResourceCategory`] |
//!
//! Category documents have no struct of their own: only their display name is
//! used (see [`crate::filter::category_name`]).
//!
//! Attributes the backend reports as `null` decode to their empty value.

use serde::{Deserialize, Deserializer, Serialize};

/// Appwrite sends `null` for optional attributes that were never set; treat it
/// like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A video course.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "CourseRecord")]
pub struct Course {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    /// Thumbnail URL
    pub image: String,
    pub category: String,
    /// Length in seconds
    pub duration: u64,
    pub rating: f32,
    /// YouTube video id
    #[serde(rename = "videoID", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "githubUrl", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// Course attributes as stored. Older documents use `ratings`; a document may
/// carry both, in which case `rating` wins.
#[derive(Deserialize)]
struct CourseRecord {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    duration: u64,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    ratings: Option<f32>,
    #[serde(rename = "videoID", default)]
    video_id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "githubUrl", default)]
    github_url: Option<String>,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            image: record.image,
            category: record.category,
            duration: record.duration,
            rating: record.rating.or(record.ratings).unwrap_or_default(),
            video_id: record.video_id,
            description: record.description,
            github_url: record.github_url,
        }
    }
}

impl Course {
    pub fn youtube_url(&self) -> Option<String> {
        self.video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.youtube.com/watch?v={id}"))
    }

    pub fn embed_url(&self) -> Option<String> {
        self.video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.youtube.com/embed/{id}?rel=0&modestbranding=0"))
    }
}

/// A showcase project with its source and walkthrough links.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Banner image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: String,
    #[serde(rename = "youtubeUrl", default, deserialize_with = "null_as_default")]
    pub youtube_url: String,
    #[serde(rename = "githubUrl", default, deserialize_with = "null_as_default")]
    pub github_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

impl Project {
    /// First `limit` technologies plus how many were left out.
    pub fn technology_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.technologies.len().min(limit);
        (&self.technologies[..shown], self.technologies.len() - shown)
    }
}

/// Track a learning resource belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Frontend,
    Backend,
    Fullstack,
    Nextjs,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 4] = [
        ResourceCategory::Frontend,
        ResourceCategory::Backend,
        ResourceCategory::Fullstack,
        ResourceCategory::Nextjs,
    ];

    /// Human-readable label shown on filter chips.
    pub fn label(self) -> &'static str {
        match self {
            ResourceCategory::Frontend => "Frontend",
            ResourceCategory::Backend => "Backend",
            ResourceCategory::Fullstack => "Fullstack",
            ResourceCategory::Nextjs => "Next.js",
        }
    }

    /// Parse a stored category. Case, surrounding blanks and the separators in
    /// `"Next.js"` or `"full-stack"` are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "frontend" => Some(ResourceCategory::Frontend),
            "backend" => Some(ResourceCategory::Backend),
            "fullstack" => Some(ResourceCategory::Fullstack),
            "nextjs" => Some(ResourceCategory::Nextjs),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ResourceCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ResourceCategory::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown resource category {raw:?}")))
    }
}

/// A downloadable learning resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    pub category: ResourceCategory,
}

/// Render a duration in seconds as `"1hr 5min 3sec"`, leaving out zero parts.
pub fn format_duration(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let parts: Vec<String> = [(hrs, "hr"), (mins, "min"), (secs, "sec")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    parts.join(" ")
}
