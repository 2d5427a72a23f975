//! Cart

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    menu::MenuItem,
    pricing::{self, PriceBreakdown, Pricing},
    uuids::TypedUuid,
};

/// Cart line identifier
pub type CartItemUuid = TypedUuid<CartItem>;

/// Errors raised by the strict cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The item belongs to a different restaurant than the rest of the cart.
    #[error("item from restaurant {item} cannot be added to a cart for restaurant {cart}")]
    RestaurantMismatch {
        /// Restaurant of the items already in the cart
        cart: String,

        /// Restaurant of the rejected item
        item: String,
    },
}

/// A line in the cart: a menu item, how many, and a free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    uuid: CartItemUuid,
    menu_item: MenuItem,
    quantity: u32,
    note: String,
}

impl CartItem {
    /// Create a line with a fresh id. A quantity of zero is raised to one.
    pub fn new(menu_item: MenuItem, quantity: u32, note: impl Into<String>) -> Self {
        Self {
            uuid: CartItemUuid::new(),
            menu_item,
            quantity: quantity.max(1),
            note: note.into(),
        }
    }

    /// Line identifier
    pub fn uuid(&self) -> CartItemUuid {
        self.uuid
    }

    /// The embedded catalog entry
    pub fn menu_item(&self) -> &MenuItem {
        &self.menu_item
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Free-text note, empty when none was given
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Unit price times quantity.
    pub fn line_total_cents(&self) -> u64 {
        self.menu_item
            .price_cents
            .saturating_mul(u64::from(self.quantity))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    fn merges_with(&self, item: &NewCartItem) -> bool {
        self.menu_item.id == item.menu_item.id && self.note == item.note
    }
}

/// Request to add a menu item to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    /// Item to add
    pub menu_item: MenuItem,

    /// Units to add
    pub quantity: u32,

    /// Note for the line
    pub note: String,
}

impl NewCartItem {
    /// One unit with no note.
    pub fn new(menu_item: MenuItem) -> Self {
        Self {
            menu_item,
            quantity: 1,
            note: String::new(),
        }
    }

    /// Set the number of units.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

impl From<MenuItem> for NewCartItem {
    fn from(menu_item: MenuItem) -> Self {
        Self::new(menu_item)
    }
}

/// The in-progress order: an ordered list of lines plus the restaurant name
/// captured from the first addition.
///
/// Lines are identified by menu item id *and* note, so the same dish with a
/// different note is a separate line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    restaurant_name: Option<String>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line.
    pub fn get(&self, uuid: CartItemUuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.uuid == uuid)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Restaurant name recorded when the cart received its first line.
    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant_name.as_deref()
    }

    /// Restaurant of the first line, or `None` when empty.
    pub fn restaurant_id(&self) -> Option<&str> {
        self.items
            .first()
            .map(|item| item.menu_item.restaurant_id.as_str())
    }

    /// Add a menu item, merging into an existing line with the same menu item
    /// and note. Returns the id of the line that now holds the units.
    ///
    /// This does not check which restaurant the item belongs to; see
    /// [`Cart::try_add_item`] for the strict form.
    pub fn add_item(&mut self, item: NewCartItem, restaurant_name: Option<&str>) -> CartItemUuid {
        if let Some(existing) = self.items.iter_mut().find(|line| line.merges_with(&item)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);

            return existing.uuid;
        }

        let line = CartItem::new(item.menu_item, item.quantity, item.note);
        let uuid = line.uuid;

        self.items.push(line);

        if self.items.len() == 1
            && let Some(name) = restaurant_name
        {
            self.restaurant_name = Some(name.to_string());
        }

        uuid
    }

    /// Like [`Cart::add_item`], but rejects items from a restaurant other than
    /// the one the cart already holds.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::RestaurantMismatch`] when the restaurants differ.
    pub fn try_add_item(
        &mut self,
        item: NewCartItem,
        restaurant_name: Option<&str>,
    ) -> Result<CartItemUuid, CartError> {
        if let Some(cart) = self.restaurant_id()
            && cart != item.menu_item.restaurant_id
        {
            return Err(CartError::RestaurantMismatch {
                cart: cart.to_string(),
                item: item.menu_item.restaurant_id,
            });
        }

        Ok(self.add_item(item, restaurant_name))
    }

    /// Remove a line. Unknown ids are ignored. Removing the last line also
    /// forgets the restaurant name.
    pub fn remove_item(&mut self, uuid: CartItemUuid) {
        self.items.retain(|item| item.uuid != uuid);

        if self.items.is_empty() {
            self.restaurant_name = None;
        }
    }

    /// Set a line's quantity exactly; zero or below removes the line.
    pub fn update_quantity(&mut self, uuid: CartItemUuid, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(uuid);

            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.uuid == uuid) {
            item.set_quantity(u32::try_from(quantity).unwrap_or(u32::MAX));
        }
    }

    /// Replace a line's note. Lines are never merged as a result.
    pub fn update_note(&mut self, uuid: CartItemUuid, note: impl Into<String>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.uuid == uuid) {
            item.note = note.into();
        }
    }

    /// Empty the cart and forget the restaurant name.
    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_name = None;
    }

    /// Sum of line totals
    pub fn subtotal_cents(&self) -> u64 {
        pricing::subtotal_cents(&self.items)
    }

    /// Tax on the subtotal
    pub fn tax_cents(&self, pricing: &Pricing) -> u64 {
        pricing.tax_cents(self.subtotal_cents())
    }

    /// Delivery fee for the subtotal
    pub fn delivery_fee_cents(&self, pricing: &Pricing) -> u64 {
        pricing.delivery_fee_cents(self.subtotal_cents())
    }

    /// Amount due
    pub fn total_cents(&self, pricing: &Pricing) -> u64 {
        pricing.total_cents(&self.items)
    }

    /// Every derived amount at once
    pub fn breakdown(&self, pricing: &Pricing) -> PriceBreakdown {
        pricing.breakdown(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pizza() -> MenuItem {
        MenuItem::new("1-1", "1", "Margherita Pizza", 12_99)
    }

    fn wings() -> MenuItem {
        MenuItem::new("1-8", "1", "Chicken Wings", 10_99)
    }

    fn burger() -> MenuItem {
        MenuItem::new("2-1", "2", "Classic Burger", 8_99)
    }

    #[test]
    fn new_line_clamps_zero_quantity_to_one() {
        let item = CartItem::new(pizza(), 0, "");

        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let item = CartItem::new(pizza(), 3, "");

        assert_eq!(item.line_total_cents(), 38_97);
    }

    #[test]
    fn same_item_and_note_merges_into_one_line() {
        let mut cart = Cart::new();

        let first = cart.add_item(NewCartItem::new(pizza()), None);
        let second = cart.add_item(NewCartItem::new(pizza()), None);

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().map(CartItem::quantity), Some(2));
    }

    #[test]
    fn merge_adds_the_requested_quantity() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()).with_quantity(2), None);
        cart.add_item(NewCartItem::new(pizza()).with_quantity(3), None);

        assert_eq!(cart.items().first().map(CartItem::quantity), Some(5));
    }

    #[test]
    fn different_note_creates_a_separate_line() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()), None);
        cart.add_item(NewCartItem::new(pizza()).with_note("extra basil"), None);

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn restaurant_name_is_recorded_from_first_item() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()), Some("Pizza Palace"));
        cart.add_item(NewCartItem::new(wings()), Some("Somewhere Else"));
        cart.add_item(NewCartItem::new(pizza()), None);

        assert_eq!(cart.restaurant_name(), Some("Pizza Palace"));
    }

    #[test]
    fn restaurant_name_is_optional() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()), None);

        assert_eq!(cart.restaurant_name(), None);
        assert_eq!(cart.restaurant_id(), Some("1"));
    }

    #[test]
    fn restaurant_id_comes_from_first_line() {
        let mut cart = Cart::new();

        assert_eq!(cart.restaurant_id(), None);

        cart.add_item(NewCartItem::new(wings()), None);
        cart.add_item(NewCartItem::new(pizza()), None);

        assert_eq!(cart.restaurant_id(), Some("1"));
    }

    #[test]
    fn remove_item_drops_the_line() {
        let mut cart = Cart::new();

        let pizza_line = cart.add_item(NewCartItem::new(pizza()), None);
        cart.add_item(NewCartItem::new(wings()), None);

        cart.remove_item(pizza_line);

        assert_eq!(cart.len(), 1);
        assert!(cart.get(pizza_line).is_none());
    }

    #[test]
    fn remove_unknown_item_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(pizza()), None);

        let before = cart.clone();
        cart.remove_item(CartItemUuid::new());

        assert_eq!(cart, before);
    }

    #[test]
    fn update_quantity_sets_exact_value() {
        let mut cart = Cart::new();
        let line = cart.add_item(NewCartItem::new(pizza()), None);

        cart.update_quantity(line, 7);

        assert_eq!(cart.get(line).map(CartItem::quantity), Some(7));
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let line = cart.add_item(NewCartItem::new(pizza()), None);

        cart.update_quantity(line, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        let line = cart.add_item(NewCartItem::new(pizza()), None);

        cart.update_quantity(line, -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_unknown_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(pizza()), None);

        let before = cart.clone();
        cart.update_quantity(CartItemUuid::new(), 3);

        assert_eq!(cart, before);
    }

    #[test]
    fn update_note_does_not_merge_colliding_lines() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()), None);
        let noted = cart.add_item(NewCartItem::new(pizza()).with_note("no cheese"), None);

        cart.update_note(noted, "");

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(noted).map(CartItem::note), Some(""));
    }

    #[test]
    fn clear_empties_items_and_restaurant_name() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(pizza()), Some("Pizza Palace"));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_name(), None);
        assert_eq!(cart.restaurant_id(), None);
    }

    #[test]
    fn emptying_by_edits_forgets_restaurant_name() {
        let mut cart = Cart::new();
        let line = cart.add_item(NewCartItem::new(pizza()), Some("Pizza Palace"));

        cart.update_quantity(line, 0);

        assert_eq!(cart.restaurant_name(), None);

        let line = cart.add_item(NewCartItem::new(wings()), Some("Pizza Palace"));
        cart.remove_item(line);
        cart.add_item(NewCartItem::new(burger()), None);

        assert_eq!(cart.restaurant_id(), Some("2"));
        assert_eq!(cart.restaurant_name(), None);
    }

    #[test]
    fn removing_one_of_several_lines_keeps_restaurant_name() {
        let mut cart = Cart::new();
        let line = cart.add_item(NewCartItem::new(pizza()), Some("Pizza Palace"));
        cart.add_item(NewCartItem::new(wings()), None);

        cart.remove_item(line);

        assert_eq!(cart.restaurant_name(), Some("Pizza Palace"));
    }

    #[test]
    fn totals_delegate_to_pricing() {
        let pricing = Pricing::default();
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(MenuItem::new("x", "1", "X", 10_00)), None);

        assert_eq!(cart.subtotal_cents(), 10_00);
        assert_eq!(cart.tax_cents(&pricing), 80);
        assert_eq!(cart.delivery_fee_cents(&pricing), 5_00);
        assert_eq!(cart.total_cents(&pricing), 15_80);
    }

    // Mixed-restaurant carts: the permissive add keeps both lines and reports
    // the first restaurant, the strict add refuses.
    #[test]
    fn add_item_permits_mixing_restaurants() {
        let mut cart = Cart::new();

        cart.add_item(NewCartItem::new(pizza()), None);
        cart.add_item(NewCartItem::new(burger()), None);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.restaurant_id(), Some("1"));
    }

    #[test]
    fn try_add_item_rejects_other_restaurants() -> TestResult {
        let mut cart = Cart::new();

        cart.try_add_item(NewCartItem::new(pizza()), None)?;
        let result = cart.try_add_item(NewCartItem::new(burger()), None);

        assert_eq!(
            result,
            Err(CartError::RestaurantMismatch {
                cart: "1".to_string(),
                item: "2".to_string(),
            })
        );
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn try_add_item_accepts_same_restaurant() -> TestResult {
        let mut cart = Cart::new();

        cart.try_add_item(NewCartItem::new(pizza()), Some("Pizza Palace"))?;
        cart.try_add_item(NewCartItem::new(wings()), None)?;

        assert_eq!(cart.len(), 2);

        Ok(())
    }
}
