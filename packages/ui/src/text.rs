//! Display strings derived from catalog data.

use catalog::ALL_CATEGORY;

/// `"1 course"`, `"3 courses"`.
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Count line above the course list: `"3 courses in React"`.
pub fn course_count_line(count: usize, category: &str) -> String {
    format!("{} in {}", pluralize(count, "course"), category)
}

/// Count line above the resource list. The category is omitted for "All".
pub fn resource_count_line(count: usize, filter_label: &str) -> String {
    let counted = pluralize(count, "resource");
    if filter_label == ALL_CATEGORY {
        counted
    } else {
        format!("{counted} in {filter_label}")
    }
}

/// Star rating with one decimal.
pub fn rating(value: f32) -> String {
    format!("{value:.1}")
}

/// `"+2"` marker for technologies left off a project card.
pub fn overflow_marker(hidden: usize) -> Option<String> {
    (hidden > 0).then(|| format!("+{hidden}"))
}

/// Initials used when a user has no avatar image.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(course_count_line(1, "React"), "1 course in React");
        assert_eq!(course_count_line(0, "All"), "0 courses in All");
        assert_eq!(resource_count_line(4, "All"), "4 resources");
        assert_eq!(resource_count_line(1, "Next.js"), "1 resource in Next.js");
    }

    #[test]
    fn test_overflow_marker() {
        assert_eq!(overflow_marker(0), None);
        assert_eq!(overflow_marker(2).as_deref(), Some("+2"));
    }

    #[test]
    fn test_rating_and_initials() {
        assert_eq!(rating(4.0), "4.0");
        assert_eq!(rating(4.56), "4.6");
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials(""), "");
    }
}
