//! Catalog entities: the unit of identity and storage.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::values;

/// Scalar product attributes. Each is either present or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Display name.
    #[serde(default, deserialize_with = "values::lenient_text")]
    pub name: Option<String>,

    /// Product image reference.
    #[serde(default, deserialize_with = "values::lenient_text")]
    pub img_url: Option<String>,

    /// Product detail page reference.
    #[serde(default, deserialize_with = "values::lenient_text")]
    pub product_url: Option<String>,

    /// Listed price.
    #[serde(default, deserialize_with = "values::lenient_price")]
    pub price: Option<f64>,

    /// Stock status.
    #[serde(default, deserialize_with = "values::lenient_in_stock")]
    pub in_stock: Option<bool>,
}

impl Attributes {
    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the image reference.
    pub fn with_img_url(mut self, url: impl Into<String>) -> Self {
        self.img_url = Some(url.into());
        self
    }

    /// Set the detail page reference.
    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stock status.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Copy over attributes that are absent here and present in `other`.
    ///
    /// Present attributes are never overwritten. Returns the fields filled.
    pub fn fill_missing(&mut self, other: &Attributes) -> Vec<ComparisonField> {
        let mut filled = Vec::new();

        if self.name.is_none() && other.name.is_some() {
            self.name = other.name.clone();
            filled.push(ComparisonField::Name);
        }
        if self.img_url.is_none() && other.img_url.is_some() {
            self.img_url = other.img_url.clone();
            filled.push(ComparisonField::ImgUrl);
        }
        if self.product_url.is_none() && other.product_url.is_some() {
            self.product_url = other.product_url.clone();
            filled.push(ComparisonField::ProductUrl);
        }
        if self.price.is_none() && other.price.is_some() {
            self.price = other.price;
            filled.push(ComparisonField::Price);
        }
        if self.in_stock.is_none() && other.in_stock.is_some() {
            self.in_stock = other.in_stock;
            filled.push(ComparisonField::InStock);
        }

        filled
    }
}

/// Rooms a product belongs in.
///
/// Keeps first-seen order for display; equality ignores order. There is no
/// removal: within a run the set only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomTypes(IndexSet<String>);

impl RoomTypes {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room. Blank names are ignored. Returns whether the set grew.
    pub fn insert(&mut self, room: &str) -> bool {
        let room = room.trim();
        if room.is_empty() {
            return false;
        }
        self.0.insert(room.to_string())
    }

    /// Whether the set contains `room`.
    pub fn contains(&self, room: &str) -> bool {
        self.0.contains(room)
    }

    /// Rooms in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no room is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rooms as an owned list, first-seen order.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoomTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut rooms = RoomTypes::new();
        for room in iter {
            rooms.insert(room.as_ref());
        }
        rooms
    }
}

/// Fields compared when deciding whether a stored entity needs rewriting.
///
/// Bookkeeping such as `updated_at` is never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonField {
    Name,
    ImgUrl,
    ProductUrl,
    Price,
    InStock,
    RoomTypes,
    ProductType,
    FixtureType,
}

impl ComparisonField {
    /// Every compared field, in report order.
    pub const ALL: [ComparisonField; 8] = [
        ComparisonField::Name,
        ComparisonField::ImgUrl,
        ComparisonField::ProductUrl,
        ComparisonField::Price,
        ComparisonField::InStock,
        ComparisonField::RoomTypes,
        ComparisonField::ProductType,
        ComparisonField::FixtureType,
    ];

    /// Column name used by the store.
    pub fn column(&self) -> &'static str {
        match self {
            ComparisonField::Name => "name",
            ComparisonField::ImgUrl => "img_url",
            ComparisonField::ProductUrl => "product_url",
            ComparisonField::Price => "price",
            ComparisonField::InStock => "in_stock",
            ComparisonField::RoomTypes => "room_types",
            ComparisonField::ProductType => "product_type",
            ComparisonField::FixtureType => "fixture_type",
        }
    }
}

/// A catalog product, identified by its vendor-scoped SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Natural key, unique within a vendor. Stores may hold it as a number.
    #[serde(deserialize_with = "values::lenient_key")]
    pub sku: String,

    /// Vendor the SKU belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    #[serde(flatten)]
    pub attributes: Attributes,

    #[serde(default, deserialize_with = "values::null_as_default")]
    pub room_types: RoomTypes,

    #[serde(default, deserialize_with = "values::lenient_text")]
    pub product_type: Option<String>,

    /// Only meaningful together with `product_type`.
    #[serde(default, deserialize_with = "values::lenient_text")]
    pub fixture_type: Option<String>,

    /// Store bookkeeping. Never compared.
    #[serde(
        default,
        deserialize_with = "values::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Create an entity with no attributes or classification.
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            vendor: None,
            attributes: Attributes::default(),
            room_types: RoomTypes::new(),
            product_type: None,
            fixture_type: None,
            updated_at: None,
        }
    }

    /// Set the vendor.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set the attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the rooms.
    pub fn with_room_types<I, S>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.room_types = rooms.into_iter().collect();
        self
    }

    /// Set the product and fixture type.
    pub fn with_product_type(mut self, product_type: &str, fixture_type: Option<&str>) -> Self {
        self.product_type = Some(product_type.to_string());
        self.fixture_type = fixture_type.map(str::to_string);
        self
    }

    /// Compared fields whose values differ from `stored`.
    pub fn differing_fields(&self, stored: &Entity) -> Vec<ComparisonField> {
        ComparisonField::ALL
            .into_iter()
            .filter(|field| !self.field_matches(stored, *field))
            .collect()
    }

    /// Whether every compared field matches `stored`.
    pub fn matches(&self, stored: &Entity) -> bool {
        ComparisonField::ALL
            .into_iter()
            .all(|field| self.field_matches(stored, field))
    }

    fn field_matches(&self, stored: &Entity, field: ComparisonField) -> bool {
        let (a, b) = (&self.attributes, &stored.attributes);
        match field {
            ComparisonField::Name => a.name == b.name,
            ComparisonField::ImgUrl => a.img_url == b.img_url,
            ComparisonField::ProductUrl => a.product_url == b.product_url,
            ComparisonField::Price => a.price == b.price,
            ComparisonField::InStock => a.in_stock == b.in_stock,
            ComparisonField::RoomTypes => self.room_types == stored.room_types,
            ComparisonField::ProductType => self.product_type == stored.product_type,
            ComparisonField::FixtureType => self.fixture_type == stored.fixture_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entity {
        Entity::new("B-100")
            .with_attributes(Attributes::default().with_name("Odette Bed").with_price(1200.0))
            .with_room_types(["Bedroom"])
            .with_product_type("Bed", Some("Canopy Bed"))
    }

    #[test]
    fn test_room_types_equality_ignores_order() {
        let a: RoomTypes = ["Living Room", "Office"].into_iter().collect();
        let b: RoomTypes = ["Office", "Living Room"].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), vec!["Living Room", "Office"]);
    }

    #[test]
    fn test_room_types_insert() {
        let mut a: RoomTypes = ["Bedroom"].into_iter().collect();
        assert!(!a.insert("Bedroom"));
        assert!(a.insert(" Office "));
        assert!(!a.insert(" "));
        assert_eq!(a.len(), 2);
        assert!(a.contains("Office"));
    }

    #[test]
    fn test_timestamps_are_not_compared() {
        let current = sample();
        let mut stored = sample();
        stored.updated_at = Some(Utc::now());
        assert!(current.matches(&stored));
        assert!(current.differing_fields(&stored).is_empty());
    }

    #[test]
    fn test_differing_fields() {
        let current = sample();
        let mut stored = sample();
        stored.attributes.price = Some(999.0);
        stored.room_types.insert("Guest Room");
        assert_eq!(
            current.differing_fields(&stored),
            vec![ComparisonField::Price, ComparisonField::RoomTypes]
        );
    }

    #[test]
    fn test_fill_missing_never_overwrites() {
        let mut attrs = Attributes::default().with_name("Kept");
        let incoming = Attributes::default().with_name("Ignored").with_price(10.0);
        let filled = attrs.fill_missing(&incoming);
        assert_eq!(filled, vec![ComparisonField::Price]);
        assert_eq!(attrs.name.as_deref(), Some("Kept"));
        assert_eq!(attrs.price, Some(10.0));
    }

    #[test]
    fn test_deserialize_store_row() {
        let row = r#"{
            "id": 42,
            "sku": "B-100",
            "vendor": "bernhardt",
            "name": "Odette Bed",
            "img_url": null,
            "product_url": "",
            "price": "1,200.00",
            "in_stock": null,
            "room_types": ["Bedroom"],
            "product_type": "Bed",
            "fixture_type": "Canopy Bed",
            "created_at": "2024-05-01T10:00:00+00:00",
            "updated_at": "2024-05-02T10:00:00.123456+00:00"
        }"#;
        let entity: Entity = serde_json::from_str(row).unwrap();
        assert_eq!(entity.attributes.price, Some(1200.0));
        assert_eq!(entity.attributes.product_url, None);
        assert!(entity.updated_at.is_some());
        assert!(sample().matches(&entity));
    }

    #[test]
    fn test_numeric_sku() {
        let entity: Entity = serde_json::from_str(r#"{"sku": 12345, "name": "Bench"}"#).unwrap();
        assert_eq!(entity.sku, "12345");
        assert!(serde_json::from_str::<Entity>(r#"{"name": "Bench"}"#).is_err());
    }

    #[test]
    fn test_null_room_types() {
        let entity: Entity = serde_json::from_str(r#"{"sku": "X", "room_types": null}"#).unwrap();
        assert!(entity.room_types.is_empty());
    }
}
