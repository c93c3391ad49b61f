use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a storefront user.
///
/// Wraps the chat platform's numeric user id. Used as the key of the cart
/// table; serializes as a bare integer (JSON object keys become its decimal
/// string form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Create a user id from the platform's numeric id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Snapshot wire shape of a line item: `[code, name, quantity, unit_price]`.
type LineItemWire = (String, String, u32, i64);

/// One product entry in a cart.
///
/// Serializes as the four-element array `[code, name, quantity, unit_price]`
/// so the snapshot file stays compact and inspectable with any text tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineItemWire", into = "LineItemWire")]
pub struct LineItem {
    /// Catalog code identifying the product.
    pub code: String,
    /// Display name captured when the item was added.
    pub name: String,
    /// Number of units; always positive.
    pub quantity: u32,
    /// Price of one unit in minor currency units.
    pub unit_price: i64,
}

impl LineItem {
    /// Create a line item.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: i64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Price of this line: `quantity * unit_price`.
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price
    }
}

impl From<LineItemWire> for LineItem {
    fn from((code, name, quantity, unit_price): LineItemWire) -> Self {
        Self {
            code,
            name,
            quantity,
            unit_price,
        }
    }
}

impl From<LineItem> for LineItemWire {
    fn from(item: LineItem) -> Self {
        (item.code, item.name, item.quantity, item.unit_price)
    }
}

/// A user's pending, uncommitted selection of items.
///
/// Holds at most one line per product code, in the order the codes were
/// first added. Serializes transparently as an array of line items; an
/// empty cart is a valid record, distinct from "no record".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a cart from a list of items, merging duplicate codes.
    ///
    /// Later duplicates fold into the earlier line the same way [`Cart::add`]
    /// does, so the one-line-per-code shape holds for any input.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Add an item to the cart.
    ///
    /// When a line with the same code already exists, its quantity absorbs
    /// the new one while the stored name and unit price keep their
    /// first-written values. Otherwise the item is appended.
    pub fn add(&mut self, item: LineItem) {
        match self.0.iter_mut().find(|line| line.code == item.code) {
            Some(line) => line.quantity += item.quantity,
            None => self.0.push(item),
        }
    }

    /// Sum of all line totals.
    pub fn total(&self) -> i64 {
        self.0.iter().map(LineItem::line_total).sum()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The cart's lines, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    /// Consume the cart, yielding its lines.
    pub fn into_items(self) -> Vec<LineItem> {
        self.0
    }
}

impl IntoIterator for Cart {
    type Item = LineItem;
    type IntoIter = std::vec::IntoIter<LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
