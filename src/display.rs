//! Display helpers for cards and toasts

use chrono::{DateTime, Utc};

pub fn like_label(count: usize) -> String {
    match count {
        1 => "1 like".to_string(),
        n => format!("{} likes", n),
    }
}

pub fn comment_label(count: usize) -> String {
    match count {
        0 => "No comments yet".to_string(),
        1 => "1 comment".to_string(),
        n => format!("{} comments", n),
    }
}

pub fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// "edited" marker when an item or comment changed after creation
pub fn was_edited(created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> bool {
    matches!((created, updated), (Some(c), Some(u)) if u > c)
}

/// Up to two initials for the avatar placeholder
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_labels() {
        assert_eq!(like_label(0), "0 likes");
        assert_eq!(like_label(1), "1 like");
        assert_eq!(comment_label(0), "No comments yet");
        assert_eq!(comment_label(3), "3 comments");
    }

    #[test]
    fn test_timestamps() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(Some(created)), "2024-05-01 09:30");
        assert_eq!(format_timestamp(None), "");
        assert!(was_edited(Some(created), Some(updated)));
        assert!(!was_edited(Some(created), Some(created)));
        assert!(!was_edited(None, Some(updated)));
    }

    #[test]
    fn test_initials_and_capitalize() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("  "), "?");
        assert_eq!(initials("Grace Brewster Hopper"), "GB");
        assert_eq!(capitalize("progress update"), "Progress update");
        assert_eq!(capitalize(""), "");
    }
}
