//! Domain models for the exercise preparation jobs.
//!
//! This module contains the core data structures shared by both jobs:
//!
//! - [`ExerciseRecord`] - one import-ready output row (Supabase exercises schema)
//! - [`Difficulty`] - normalized difficulty tier
//! - [`Category`] - normalized body category

use serde::{Deserialize, Serialize};

// =============================================================================
// Difficulty
// =============================================================================

/// Normalized difficulty tier.
///
/// Source spreadsheets use a wider free-text ladder (novice, expert,
/// grand master, ...) which collapses onto three import buckets. Unmapped
/// levels serialize as the empty string so they import as NULL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a free-text difficulty level, case-insensitively.
    ///
    /// Returns `None` for empty or unrecognized levels.
    pub fn from_level(level: &str) -> Option<Self> {
        let normalized = level.trim().to_lowercase();
        match normalized.as_str() {
            "beginner" | "novice" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "expert" | "master" | "grand master" | "legendary" => {
                Some(Self::Advanced)
            }
            _ => None,
        }
    }

    /// Import-ready column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Normalized body category.
///
/// Closed set used by the `category` column. Inference from source text
/// lives in [`crate::transform::category`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Legs,
    Core,
    FullBody,
    Chest,
    Back,
    Shoulders,
    Arms,
}

impl Category {
    /// Import-ready column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legs => "legs",
            Self::Core => "core",
            Self::FullBody => "full_body",
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
        }
    }
}

// =============================================================================
// Exercise Record (import schema)
// =============================================================================

/// One import-ready row of the exercises table.
///
/// Field order matches the target column order; the CSV writer derives
/// the header row from it. Array columns hold Postgres `text[]` literals,
/// boolean columns hold lowercase `"true"`/`"false"`, and nullable scalar
/// columns hold the empty string so they import as NULL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_groups: String,
    pub equipment_needed: String,
    pub difficulty: String,
    pub instructions: String,
    pub video_url: String,
    pub image_url: String,
    pub is_compound: String,
    pub is_custom: String,
    pub created_by: String,
    pub created_at: String,
    pub exercisedb_id: String,
    pub gif_url: String,
    pub tips: String,
    pub last_synced_at: String,
    pub sync_status: String,
}

impl ExerciseRecord {
    /// Output column names, in serialization order.
    pub const COLUMNS: [&'static str; 19] = [
        "id",
        "name",
        "description",
        "category",
        "muscle_groups",
        "equipment_needed",
        "difficulty",
        "instructions",
        "video_url",
        "image_url",
        "is_compound",
        "is_custom",
        "created_by",
        "created_at",
        "exercisedb_id",
        "gif_url",
        "tips",
        "last_synced_at",
        "sync_status",
    ];

    /// Value of a column by name. `None` for unknown columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        let value = match column {
            "id" => &self.id,
            "name" => &self.name,
            "description" => &self.description,
            "category" => &self.category,
            "muscle_groups" => &self.muscle_groups,
            "equipment_needed" => &self.equipment_needed,
            "difficulty" => &self.difficulty,
            "instructions" => &self.instructions,
            "video_url" => &self.video_url,
            "image_url" => &self.image_url,
            "is_compound" => &self.is_compound,
            "is_custom" => &self.is_custom,
            "created_by" => &self.created_by,
            "created_at" => &self.created_at,
            "exercisedb_id" => &self.exercisedb_id,
            "gif_url" => &self.gif_url,
            "tips" => &self.tips,
            "last_synced_at" => &self.last_synced_at,
            "sync_status" => &self.sync_status,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_level() {
        assert_eq!(Difficulty::from_level("Novice"), Some(Difficulty::Beginner));
        assert_eq!(
            Difficulty::from_level("intermediate"),
            Some(Difficulty::Intermediate)
        );
        assert_eq!(Difficulty::from_level("Master"), Some(Difficulty::Advanced));
        assert_eq!(
            Difficulty::from_level("  Grand Master "),
            Some(Difficulty::Advanced)
        );
        assert_eq!(Difficulty::from_level("Unknown Level"), None);
        assert_eq!(Difficulty::from_level(""), None);
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::FullBody.as_str(), "full_body");
        assert_eq!(Category::Legs.as_str(), "legs");
        assert_eq!(Category::Shoulders.as_str(), "shoulders");
    }

    #[test]
    fn test_record_get_covers_all_columns() {
        let record = ExerciseRecord {
            id: "x".into(),
            name: "Squat".into(),
            description: String::new(),
            category: "legs".into(),
            muscle_groups: "{}".into(),
            equipment_needed: "{}".into(),
            difficulty: String::new(),
            instructions: "{}".into(),
            video_url: String::new(),
            image_url: String::new(),
            is_compound: "true".into(),
            is_custom: "false".into(),
            created_by: String::new(),
            created_at: "2024-01-01 00:00:00+00".into(),
            exercisedb_id: String::new(),
            gif_url: String::new(),
            tips: "{}".into(),
            last_synced_at: String::new(),
            sync_status: "pending".into(),
        };

        for column in ExerciseRecord::COLUMNS {
            assert!(record.get(column).is_some(), "missing column: {}", column);
        }
        assert!(record.get("no_such_column").is_none());
        assert_eq!(record.get("name"), Some("Squat"));
    }
}
