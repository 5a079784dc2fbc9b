//! Cart line items and the cart state reducer.
//!
//! [`CartState`] is an ordered list of [`CartItem`]s with at most one entry per
//! [`ProductId`]. All mutations go through the reducer methods on
//! `CartState`, which keep that invariant and report what changed as a
//! [`CartChange`].
//!
//! Items are never removed: decrementing stops at a quantity of zero and the
//! line stays in the cart.
//!
//! # Wire format
//!
//! The persisted form is a bare JSON array:
//!
//! ```json
//! [{"id":"1","title":"Cadeira Rivatti","image_url":"https://...","price":1400.5,"quantity":2}]
//! ```

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors that can occur when building a [`CartState`] from stored items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    /// Two entries share the same product ID.
    #[error("duplicate cart item for product {0}")]
    DuplicateItem(ProductId),
}

/// Product descriptor passed to `add_to_cart`.
///
/// Same shape as [`CartItem`] without a quantity; the cart decides the
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<NewCartItem> for CartItem {
    fn from(item: NewCartItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity: 1,
        }
    }
}

/// Outcome of a reducer call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line's quantity went up.
    Incremented { quantity: u32 },
    /// An existing line's quantity went down.
    Decremented { quantity: u32 },
    /// Nothing changed (unknown product, zero floor, or quantity ceiling).
    Unchanged,
}

impl CartChange {
    /// Whether the state differs from before the call.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Ordered cart contents, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CartItem>", try_from = "Vec<CartItem>")]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product.
    ///
    /// A product not yet in the cart is appended with quantity 1. A product
    /// already present keeps its position and gets quantity + 1.
    pub fn add(&mut self, item: NewCartItem) -> CartChange {
        if self.contains(&item.id) {
            return self.increment(&item.id);
        }
        self.items.push(CartItem::from(item));
        CartChange::Added
    }

    /// Raise the quantity of `id` by one. Unknown IDs are a no-op.
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        let Some(item) = self.get_mut(id) else {
            return CartChange::Unchanged;
        };
        match item.quantity.checked_add(1) {
            Some(quantity) => {
                item.quantity = quantity;
                CartChange::Incremented { quantity }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Lower the quantity of `id` by one, stopping at zero.
    ///
    /// Unknown IDs and lines already at zero are a no-op. A line at zero stays
    /// in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> CartChange {
        let Some(item) = self.get_mut(id) else {
            return CartChange::Unchanged;
        };
        match item.quantity.checked_sub(1) {
            Some(quantity) => {
                item.quantity = quantity;
                CartChange::Decremented { quantity }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Whether a line exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Serialize to the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the input is not a JSON array of cart
    /// items or lists the same product twice.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl TryFrom<Vec<CartItem>> for CartState {
    type Error = CartStateError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CartStateError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartState> for Vec<CartItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> NewCartItem {
        NewCartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            image_url: format!("https://cdn.example.com/{id}.png"),
            price: Price::from_cents(cents),
        }
    }

    #[test]
    fn test_add_new_product_appends_with_quantity_one() {
        let mut cart = CartState::new();
        assert_eq!(cart.add(product("a", 100)), CartChange::Added);
        assert_eq!(cart.add(product("b", 200)), CartChange::Added);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id.as_str(), "a");
        assert_eq!(cart.items()[1].id.as_str(), "b");
        assert!(cart.iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn test_add_existing_product_increments_in_place() {
        let mut cart = CartState::new();
        cart.add(product("a", 100));
        cart.add(product("b", 200));

        assert_eq!(
            cart.add(product("a", 100)),
            CartChange::Incremented { quantity: 2 }
        );
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id.as_str(), "a");
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_increment_unknown_is_noop() {
        let mut cart = CartState::new();
        cart.add(product("a", 100));
        let before = cart.clone();

        assert_eq!(
            cart.increment(&ProductId::new("missing")),
            CartChange::Unchanged
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_stops_at_zero_and_keeps_item() {
        let mut cart = CartState::new();
        cart.add(product("a", 100));
        let id = ProductId::new("a");

        assert_eq!(
            cart.decrement(&id),
            CartChange::Decremented { quantity: 0 }
        );
        assert_eq!(cart.decrement(&id), CartChange::Unchanged);
        assert_eq!(cart.get(&id).unwrap().quantity, 0);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_saturates() {
        let mut cart = CartState::try_from(vec![CartItem {
            quantity: u32::MAX,
            ..CartItem::from(product("a", 100))
        }])
        .unwrap();

        assert_eq!(cart.increment(&ProductId::new("a")), CartChange::Unchanged);
        assert_eq!(cart.total_quantity(), u32::MAX);
    }

    #[test]
    fn test_totals() {
        let mut cart = CartState::new();
        cart.add(product("a", 250));
        cart.add(product("a", 250));
        cart.add(product("b", 1000));

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Price::from_cents(1500));
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().line_total(), Price::from_cents(500));
    }

    #[test]
    fn test_json_shape() {
        let mut cart = CartState::new();
        cart.add(product("a", 1990));

        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": "a",
                "title": "Product a",
                "image_url": "https://cdn.example.com/a.png",
                "price": 19.9,
                "quantity": 1
            }])
        );
    }

    #[test]
    fn test_from_json_accepts_stored_array() {
        let json = r#"[
            {"id":"1","title":"Cadeira","image_url":"https://x/1.png","price":1400.5,"quantity":2},
            {"id":"2","title":"Mesa","image_url":"https://x/2.png","price":99,"quantity":0}
        ]"#;
        let cart = CartState::from_json(json).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].price, Price::from_cents(140_050));
        assert_eq!(cart.items()[1].quantity, 0);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id":"1","title":"A","image_url":"","price":1,"quantity":1},
            {"id":"1","title":"A","image_url":"","price":1,"quantity":3}
        ]"#;
        assert!(CartState::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_negative_quantity() {
        let json = r#"[{"id":"1","title":"A","image_url":"","price":1,"quantity":-1}]"#;
        assert!(CartState::from_json(json).is_err());
    }
}
