//! Catalog served from the embedded YAML fixture.

use std::time::Duration;

use async_trait::async_trait;
use courier::{
    DeliveryError,
    menu::{MenuItem, Restaurant},
};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use super::CatalogService;

const CATALOG_YAML: &str = include_str!("catalog.yml");

/// Errors raised while loading a catalog fixture.
#[derive(Debug, Error)]
pub enum CatalogFixtureError {
    /// The YAML could not be parsed.
    #[error("failed to parse catalog fixture: {0}")]
    Parse(#[from] serde_norway::Error),

    /// Two restaurants share an identifier.
    #[error("duplicate restaurant id '{0}' in catalog fixture")]
    DuplicateRestaurant(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    restaurants: Vec<RestaurantFixture>,
}

#[derive(Debug, Deserialize)]
struct RestaurantFixture {
    id: String,
    name: String,
    cuisine: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    menu: Vec<MenuItemFixture>,
}

#[derive(Debug, Deserialize)]
struct MenuItemFixture {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price_cents: u64,
    #[serde(default)]
    image_url: Option<String>,
}

impl MenuItemFixture {
    fn into_menu_item(self, restaurant_id: &str) -> MenuItem {
        MenuItem {
            id: self.id,
            restaurant_id: restaurant_id.to_string(),
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            image_url: self.image_url,
        }
    }
}

/// In-memory catalog with an optional artificial delay on every call.
#[derive(Debug, Clone)]
pub struct FixtureCatalogService {
    restaurants: Vec<Restaurant>,
    menus: FxHashMap<String, Vec<MenuItem>>,
    latency: Duration,
}

impl FixtureCatalogService {
    /// Load the catalog bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is malformed.
    pub fn bundled(latency: Duration) -> Result<Self, CatalogFixtureError> {
        Self::from_yaml(CATALOG_YAML, latency)
    }

    /// Load a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or restaurant ids repeat.
    pub fn from_yaml(yaml: &str, latency: Duration) -> Result<Self, CatalogFixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut restaurants = Vec::with_capacity(fixture.restaurants.len());
        let mut menus = FxHashMap::default();

        for restaurant in fixture.restaurants {
            let items: Vec<MenuItem> = restaurant
                .menu
                .into_iter()
                .map(|item| item.into_menu_item(&restaurant.id))
                .collect();

            if menus.insert(restaurant.id.clone(), items).is_some() {
                return Err(CatalogFixtureError::DuplicateRestaurant(restaurant.id));
            }

            restaurants.push(Restaurant {
                id: restaurant.id,
                name: restaurant.name,
                cuisine: restaurant.cuisine,
                rating: restaurant.rating,
                image_url: restaurant.image_url,
            });
        }

        Ok(Self {
            restaurants,
            menus,
            latency,
        })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CatalogService for FixtureCatalogService {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, DeliveryError> {
        self.simulate_latency().await;

        debug!(count = self.restaurants.len(), "listing restaurants");

        Ok(self.restaurants.clone())
    }

    async fn list_menu_items(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, DeliveryError> {
        self.simulate_latency().await;

        let items = self.menus.get(restaurant_id).cloned().unwrap_or_default();

        debug!(restaurant_id, count = items.len(), "listing menu items");

        Ok(items)
    }
}
