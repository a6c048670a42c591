use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    #[default]
    Personal,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn label(self) -> &'static str {
        self.as_key()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category selector of the list view: every category, or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_KEY: &'static str = "All";

    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }

    pub fn as_key(self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_KEY,
            CategoryFilter::Only(category) => category.as_key(),
        }
    }

    /// Unknown keys fall back to `All`.
    pub fn from_key(key: &str) -> Self {
        Category::from_key(key)
            .map(CategoryFilter::Only)
            .unwrap_or(CategoryFilter::All)
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub category: Category,

    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// `created_at` is cut to whole milliseconds, the resolution it is stored at.
    pub fn new(id: String, text: String, category: Category, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            category,
            created_at: now.trunc_subsecs(3),
        }
    }
}
