use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use log::*;

use infra::ids::Id;

use super::models::{Course, MenuItem};
use super::store::MenuStore;
use crate::catalog::{self, CatalogEntry, CatalogListing, CategoryFilter, UnknownDish};
use crate::form::ItemForm;
use crate::services::{Commandable, Queryable, Request};

/// A shareable handle on one menu. Writers are serialised behind a single
/// lock; readers always see a complete snapshot.
#[derive(Debug, Clone)]
pub struct Menu {
    store: Arc<RwLock<MenuStore>>,
    catalog: &'static [CatalogEntry],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem(pub ItemForm);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFromCatalog(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveItem(pub Id<MenuItem>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalItems;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsByCourse(pub Course);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSections;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsAlreadyAdded(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseCatalog {
    pub search: String,
    pub category: CategoryFilter,
}

impl Menu {
    pub fn new() -> Self {
        Self::with_catalog(catalog::CATALOG)
    }

    pub fn with_catalog(catalog: &'static [CatalogEntry]) -> Self {
        let store = Arc::new(RwLock::new(MenuStore::new()));
        Menu { store, catalog }
    }

    pub fn catalog(&self) -> &'static [CatalogEntry] {
        self.catalog
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MenuStore>> {
        self.store
            .read()
            .map_err(|_| anyhow!("menu store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MenuStore>> {
        self.store
            .write()
            .map_err(|_| anyhow!("menu store lock poisoned"))
    }
}

impl Default for Menu {
    fn default() -> Self {
        Menu::new()
    }
}

impl Request for AddItem {
    type Resp = MenuItem;
}

impl Commandable<AddItem> for Menu {
    fn execute(&self, AddItem(form): AddItem) -> Result<MenuItem> {
        let mut store = self.write()?;
        let item = store.submit(&form)?;
        Ok(item.clone())
    }
}

impl Request for AddFromCatalog {
    type Resp = MenuItem;
}

/// Adds a catalog dish as listed. The store allows duplicates, so callers
/// that want the one-tap behaviour check `IsAlreadyAdded` first.
impl Commandable<AddFromCatalog> for Menu {
    fn execute(&self, AddFromCatalog(name): AddFromCatalog) -> Result<MenuItem> {
        let entry = catalog::find_entry(self.catalog, &name).ok_or(UnknownDish(name))?;
        let mut store = self.write()?;
        Ok(store.add_item(entry.to_new_item()).clone())
    }
}

impl Request for RemoveItem {
    type Resp = Option<MenuItem>;
}

impl Commandable<RemoveItem> for Menu {
    fn execute(&self, RemoveItem(id): RemoveItem) -> Result<Option<MenuItem>> {
        let removed = self.write()?.remove_item(id);
        if removed.is_none() {
            debug!("Nothing to remove for {}", id);
        }
        Ok(removed)
    }
}

impl Request for TotalItems {
    type Resp = usize;
}

impl Queryable<TotalItems> for Menu {
    fn query(&self, _: TotalItems) -> Result<usize> {
        Ok(self.read()?.total_items())
    }
}

impl Request for ItemsByCourse {
    type Resp = Vec<MenuItem>;
}

impl Queryable<ItemsByCourse> for Menu {
    fn query(&self, ItemsByCourse(course): ItemsByCourse) -> Result<Vec<MenuItem>> {
        let store = self.read()?;
        Ok(store.items_by_course(course).into_iter().cloned().collect())
    }
}

impl Request for ShowMenu {
    type Resp = Vec<MenuItem>;
}

impl Queryable<ShowMenu> for Menu {
    fn query(&self, _: ShowMenu) -> Result<Vec<MenuItem>> {
        Ok(self.read()?.items().to_vec())
    }
}

impl Request for MenuSections {
    type Resp = Vec<(Course, Vec<MenuItem>)>;
}

impl Queryable<MenuSections> for Menu {
    fn query(&self, _: MenuSections) -> Result<Vec<(Course, Vec<MenuItem>)>> {
        let store = self.read()?;
        let sections = store
            .sections()
            .into_iter()
            .map(|section| {
                let items = section.items.into_iter().cloned().collect();
                (section.course, items)
            })
            .collect();
        Ok(sections)
    }
}

impl Request for IsAlreadyAdded {
    type Resp = bool;
}

impl Queryable<IsAlreadyAdded> for Menu {
    fn query(&self, IsAlreadyAdded(name): IsAlreadyAdded) -> Result<bool> {
        Ok(catalog::is_already_added(&*self.read()?, &name))
    }
}

impl Request for BrowseCatalog {
    type Resp = Vec<CatalogListing<'static>>;
}

impl Queryable<BrowseCatalog> for Menu {
    fn query(&self, req: BrowseCatalog) -> Result<Vec<CatalogListing<'static>>> {
        let store = self.read()?;
        Ok(catalog::browse(&store, self.catalog, &req.search, req.category))
    }
}
