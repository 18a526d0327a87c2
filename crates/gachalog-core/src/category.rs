// Gacha banner categories and the order their tabs are rendered in.

use std::fmt;

/// One gacha banner type. The wire format identifies them by numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryCode {
    /// Limited character event banner (`301`).
    CharacterEvent,
    /// Permanent standard banner (`200`).
    Permanent,
    /// Limited weapon event banner (`302`).
    WeaponEvent,
    /// Chronicled banner (`500`).
    Chronicled,
}

/// Every known category. The store's key set is exactly this list.
pub const ALL_CATEGORIES: [CategoryCode; 4] = [
    CategoryCode::CharacterEvent,
    CategoryCode::Permanent,
    CategoryCode::WeaponEvent,
    CategoryCode::Chronicled,
];

/// Tab rendering order.
pub const DISPLAY_ORDER: [CategoryCode; 4] = [
    CategoryCode::CharacterEvent,
    CategoryCode::WeaponEvent,
    CategoryCode::Permanent,
    CategoryCode::Chronicled,
];

impl CategoryCode {
    /// The code used as the key in backend payloads.
    pub fn code(self) -> &'static str {
        match self {
            CategoryCode::CharacterEvent => "301",
            CategoryCode::Permanent => "200",
            CategoryCode::WeaponEvent => "302",
            CategoryCode::Chronicled => "500",
        }
    }

    /// Parse a wire code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_CATEGORIES.into_iter().find(|c| c.code() == code)
    }

    /// Label used until the backend supplies one.
    pub fn default_name(self) -> &'static str {
        match self {
            CategoryCode::CharacterEvent => "Character Event Wish",
            CategoryCode::Permanent => "Standard Wish",
            CategoryCode::WeaponEvent => "Weapon Event Wish",
            CategoryCode::Chronicled => "Chronicled Wish",
        }
    }

    /// Position in [`DISPLAY_ORDER`].
    pub fn display_index(self) -> usize {
        DISPLAY_ORDER
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    /// Next tab in display order, wrapping around.
    pub fn next(self) -> Self {
        DISPLAY_ORDER[(self.display_index() + 1) % DISPLAY_ORDER.len()]
    }

    /// Previous tab in display order, wrapping around.
    pub fn prev(self) -> Self {
        let len = DISPLAY_ORDER.len();
        DISPLAY_ORDER[(self.display_index() + len - 1) % len]
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
