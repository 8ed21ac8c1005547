//! The built-in dish catalog, and the search/category filtering applied to
//! it when browsing.

use std::fmt;
use std::str::FromStr;

use err_derive::Error;
use log::*;
use serde::Serialize;

use crate::menu::{Course, MenuStore, NewItem, Price, UnknownCourse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub course: Course,
    pub price: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Course(Course),
}

/// A catalog entry as shown while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogListing<'a> {
    pub entry: &'a CatalogEntry,
    pub added: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub available: usize,
    pub categories: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "No dish named {:?} in the catalog", _0)]
pub struct UnknownDish(pub String);

const fn dish(
    name: &'static str,
    description: &'static str,
    course: Course,
    cents: u64,
) -> CatalogEntry {
    CatalogEntry {
        name,
        description,
        course,
        price: Price::from_cents(cents),
    }
}

pub static CATALOG: &[CatalogEntry] = &[
    dish(
        "Mediterranean Mezze",
        "Hummus, baba ganoush, pita bread",
        Course::Appetizers,
        1599,
    ),
    dish(
        "Tuna Tartare",
        "Fresh tuna with avocado and citrus",
        Course::Appetizers,
        1899,
    ),
    dish(
        "Burrata Caprese",
        "Creamy burrata with heirloom tomatoes",
        Course::Appetizers,
        1699,
    ),
    dish(
        "Duck Liver Mousse",
        "Silky mousse with berry compote",
        Course::Appetizers,
        1799,
    ),
    dish(
        "Miso Black Cod",
        "Marinated cod with ginger rice",
        Course::Entrees,
        3499,
    ),
    dish(
        "Lamb Rack",
        "Herb-crusted rack with mint jus",
        Course::Entrees,
        4299,
    ),
    dish(
        "Wild Mushroom Risotto",
        "Arborio rice with truffle oil",
        Course::Entrees,
        2699,
    ),
    dish(
        "Sea Scallops",
        "Pan-seared with cauliflower purée",
        Course::Entrees,
        3299,
    ),
    dish(
        "Lavender Crème Brûlée",
        "Infused with organic lavender",
        Course::Desserts,
        1299,
    ),
    dish(
        "Chocolate Fondant",
        "Warm cake with molten center",
        Course::Desserts,
        1199,
    ),
    dish(
        "Pistachio Baklava",
        "Layered pastry with rose syrup",
        Course::Desserts,
        1099,
    ),
    dish(
        "Saffron Panna Cotta",
        "Creamy dessert with cardamom",
        Course::Desserts,
        1399,
    ),
    dish(
        "Signature Mocktails",
        "House-crafted non-alcoholic drinks",
        Course::Beverages,
        999,
    ),
    dish(
        "Craft Beer Flight",
        "Four local craft beer samples",
        Course::Beverages,
        1699,
    ),
    dish(
        "Organic Wine Selection",
        "Biodynamic and organic wines",
        Course::Beverages,
        1499,
    ),
    dish(
        "Artisan Coffee",
        "Single-origin pour over coffee",
        Course::Beverages,
        699,
    ),
];

impl CatalogEntry {
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name: self.name.to_string(),
            description: self.description.to_string(),
            course: self.course,
            price: self.price,
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl CategoryFilter {
    pub fn choices() -> [CategoryFilter; 5] {
        [
            CategoryFilter::All,
            CategoryFilter::Course(Course::Appetizers),
            CategoryFilter::Course(Course::Entrees),
            CategoryFilter::Course(Course::Desserts),
            CategoryFilter::Course(Course::Beverages),
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Course(course) => course.label(),
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Course(course) => course.short_label(),
        }
    }

    pub fn admits(self, course: Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Course(wanted) => wanted == course,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl From<Course> for CategoryFilter {
    fn from(course: Course) -> Self {
        CategoryFilter::Course(course)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCourse;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        src.parse().map(CategoryFilter::Course)
    }
}

/// Entries admitted by `category` whose name or description contains
/// `search`, ignoring case. An empty search matches everything. Catalog
/// order is kept.
pub fn filter_catalog<'a>(
    catalog: &'a [CatalogEntry],
    search: &str,
    category: CategoryFilter,
) -> Vec<&'a CatalogEntry> {
    let needle = search.to_lowercase();
    let found = catalog
        .iter()
        .filter(|entry| category.admits(entry.course))
        .filter(|entry| entry.matches_search(&needle))
        .collect::<Vec<_>>();
    trace!(
        "filter_catalog({:?}, {}) -> {} of {}",
        search,
        category,
        found.len(),
        catalog.len()
    );
    found
}

/// Whether a dish of this name is already on the menu. Only names are
/// compared, so a custom dish sharing a catalog name counts as added.
pub fn is_already_added(store: &MenuStore, name: &str) -> bool {
    store.contains_name(name.trim())
}

pub fn browse<'a>(
    store: &MenuStore,
    catalog: &'a [CatalogEntry],
    search: &str,
    category: CategoryFilter,
) -> Vec<CatalogListing<'a>> {
    filter_catalog(catalog, search, category)
        .into_iter()
        .map(|entry| CatalogListing {
            entry,
            added: is_already_added(store, entry.name),
        })
        .collect()
}

pub fn find_entry<'a>(catalog: &'a [CatalogEntry], name: &str) -> Option<&'a CatalogEntry> {
    let name = name.trim();
    catalog.iter().find(|entry| entry.name == name)
}

pub fn stats(catalog: &[CatalogEntry]) -> CatalogStats {
    let categories = Course::ALL
        .iter()
        .filter(|&&course| catalog.iter().any(|entry| entry.course == course))
        .count();
    CatalogStats {
        available: catalog.len(),
        categories,
    }
}
