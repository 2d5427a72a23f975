//! Menu

use serde::{Deserialize, Serialize};

/// A restaurant that can be ordered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Cuisine label, e.g. "Italian"
    pub cuisine: String,

    /// Average rating out of five, when known
    #[serde(default)]
    pub rating: Option<f64>,

    /// Hero image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A dish on a restaurant's menu.
///
/// Menu items are immutable once fetched; cart lines embed a copy rather than
/// mutating the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Catalog identifier, unique across restaurants
    pub id: String,

    /// Restaurant the item belongs to
    pub restaurant_id: String,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price in minor units
    pub price_cents: u64,

    /// Optional image
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItem {
    /// Create a menu item with no description or image.
    pub fn new(
        id: impl Into<String>,
        restaurant_id: impl Into<String>,
        name: impl Into<String>,
        price_cents: u64,
    ) -> Self {
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            description: None,
            price_cents,
            image_url: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
