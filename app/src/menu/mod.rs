mod models;
mod service;
mod store;

pub use self::models::{Course, MenuItem, NewItem, Price, PriceError, UnknownCourse};
pub use self::service::{
    AddFromCatalog, AddItem, BrowseCatalog, IsAlreadyAdded, ItemsByCourse, Menu, MenuSections,
    RemoveItem, ShowMenu, TotalItems,
};
pub use self::store::{MenuStore, Section};
