//! Catalog service.

use async_trait::async_trait;
use courier::{
    DeliveryError,
    menu::{MenuItem, Restaurant},
};
use mockall::automock;

/// Read access to restaurants and their menus.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves every restaurant, in display order.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, DeliveryError>;

    /// Retrieves the menu of one restaurant. Unknown restaurants have an
    /// empty menu.
    async fn list_menu_items(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, DeliveryError>;
}
