//! Body-category inference from free-text source fields.
//!
//! Precedence, first match wins:
//!
//! 1. exact body-region match (lower body / core / full body)
//! 2. muscle-keyword scan over prime mover + target group text
//! 3. body region "upper body" with no keyword hit -> arms
//! 4. everything else -> full_body
//!
//! The keyword chain is an explicit ordered rule list so the precedence
//! stays auditable and testable on its own.

use crate::models::Category;

/// Ordered keyword rules for the muscle-hint scan. First match wins.
const MUSCLE_RULES: &[(&[&str], Category)] = &[
    (&["pectoralis", "chest"], Category::Chest),
    (
        &["latissimus", "trapezi", "rhombo", "erector", "back"],
        Category::Back,
    ),
    (&["deltoid", "shoulder", "rotator"], Category::Shoulders),
    (
        &["biceps", "triceps", "forearm", "wrist", "brachii"],
        Category::Arms,
    ),
];

/// Map body region and muscle text onto one body category.
pub fn infer_category(body_region: &str, prime_mover: &str, target_group: &str) -> Category {
    let region = body_region.trim().to_lowercase();

    match region.as_str() {
        "lower body" => return Category::Legs,
        "core" => return Category::Core,
        "full body" => return Category::FullBody,
        _ => {}
    }

    // Upper body: infer from muscles
    let hint = format!("{} {}", prime_mover.trim(), target_group.trim()).to_lowercase();

    for (keywords, category) in MUSCLE_RULES {
        if keywords.iter().any(|keyword| hint.contains(keyword)) {
            return *category;
        }
    }

    if region == "upper body" {
        return Category::Arms;
    }

    Category::FullBody
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_region_wins_over_muscle_text() {
        // Region match takes priority even with a chest keyword present.
        assert_eq!(
            infer_category("Lower Body", "Pectoralis Major", "Chest"),
            Category::Legs
        );
        assert_eq!(infer_category("Core", "", ""), Category::Core);
        assert_eq!(infer_category("Full Body", "", ""), Category::FullBody);
    }

    #[test]
    fn test_muscle_keyword_scan() {
        assert_eq!(
            infer_category("", "Anterior Deltoid", ""),
            Category::Shoulders
        );
        assert_eq!(
            infer_category("Upper Body", "Pectoralis Major", "Chest"),
            Category::Chest
        );
        assert_eq!(
            infer_category("", "", "Latissimus Dorsi"),
            Category::Back
        );
        assert_eq!(
            infer_category("Upper Body", "Biceps Brachii", ""),
            Category::Arms
        );
    }

    #[test]
    fn test_rule_order_is_first_match_wins() {
        // Text hits both the chest and back lists; chest is listed first.
        assert_eq!(
            infer_category("", "Pectoralis Major", "Upper Back"),
            Category::Chest
        );
    }

    #[test]
    fn test_upper_body_without_keyword_defaults_to_arms() {
        assert_eq!(infer_category("Upper Body", "", ""), Category::Arms);
    }

    #[test]
    fn test_no_match_defaults_to_full_body() {
        assert_eq!(infer_category("", "", ""), Category::FullBody);
        assert_eq!(infer_category("Unknown", "Mystery", "Nothing"), Category::FullBody);
    }
}
