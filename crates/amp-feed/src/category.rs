//! News categories

/// Top-headline category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    General,
    Business,
    Technology,
    Health,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Health,
    ];

    /// API identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Business => "business",
            Self::Technology => "technology",
            Self::Health => "health",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Business => "Business",
            Self::Technology => "Technology",
            Self::Health => "Health",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "General US news",
            Self::Business => "Economy and finance",
            Self::Technology => "Innovation and tech",
            Self::Health => "Health and wellbeing",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id().eq_ignore_ascii_case(id.trim()))
    }
}
