//! Category derivation and client-side filtering.

use std::collections::HashSet;

use crate::document::Document;
use crate::models::{Course, Resource, ResourceCategory};

/// Synthetic category that matches everything. Always first in a category list.
pub const ALL_CATEGORY: &str = "All";

/// Display name of a category document: `name`, falling back to the legacy
/// `category` attribute.
pub fn category_name(doc: &Document) -> Option<&str> {
    doc.str_field("name")
        .filter(|name| !name.trim().is_empty())
        .or_else(|| doc.str_field("category"))
        .filter(|name| !name.trim().is_empty())
}

/// `"All"` followed by the distinct names in first-seen order. Blank names are
/// skipped and a source value of `"All"` does not produce a second entry.
pub fn derive_categories<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    seen.insert(ALL_CATEGORY);
    let mut categories = vec![ALL_CATEGORY.to_string()];
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name) {
            categories.push(name.to_string());
        }
    }
    categories
}

/// Categories present across a set of courses.
pub fn categories_from_courses(courses: &[Course]) -> Vec<String> {
    derive_categories(courses.iter().map(|c| c.category.as_str()))
}

/// Courses in `selected`, or every course when `selected` is [`ALL_CATEGORY`].
/// Compared on trimmed names, the same form the category chips show.
pub fn filter_courses<'a>(courses: &'a [Course], selected: &str) -> Vec<&'a Course> {
    let selected = selected.trim();
    if selected == ALL_CATEGORY {
        return courses.iter().collect();
    }
    courses
        .iter()
        .filter(|c| c.category.trim() == selected)
        .collect()
}

/// Filter chip selection on the resources screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResourceFilter {
    #[default]
    All,
    Only(ResourceCategory),
}

impl ResourceFilter {
    /// Chips in display order.
    pub fn options() -> Vec<ResourceFilter> {
        std::iter::once(ResourceFilter::All)
            .chain(ResourceCategory::ALL.into_iter().map(ResourceFilter::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceFilter::All => ALL_CATEGORY,
            ResourceFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(self, resource: &Resource) -> bool {
        match self {
            ResourceFilter::All => true,
            ResourceFilter::Only(category) => resource.category == category,
        }
    }

    pub fn apply<'a>(self, resources: &'a [Resource]) -> Vec<&'a Resource> {
        resources.iter().filter(|r| self.matches(r)).collect()
    }
}
