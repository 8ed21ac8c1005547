use std::collections::BTreeMap;

use log::*;

use infra::ids::{Id, IdGen};

use super::models::{Course, MenuItem, NewItem};
use crate::form::{ItemForm, ValidationError};

/// The dishes chosen for the menu, in the order they were added.
#[derive(Debug, Default)]
pub struct MenuStore {
    items: Vec<MenuItem>,
    idgen: IdGen,
}

/// One course of the menu together with its dishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub course: Course,
    pub items: Vec<&'a MenuItem>,
}

impl MenuStore {
    pub fn new() -> Self {
        MenuStore::default()
    }

    pub fn add_item(&mut self, item: NewItem) -> &MenuItem {
        let id = self.idgen.generate();
        let item = MenuItem::new(id, item);
        info!("Adding {} {:?} to {}", item.id, item.name, item.course);
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Validates the form and appends the dish; on error the store is left
    /// untouched.
    pub fn submit(&mut self, form: &ItemForm) -> Result<&MenuItem, ValidationError> {
        let item = form.validate().map_err(|e| {
            debug!("Rejected form {:?}: {}", form, e);
            e
        })?;
        Ok(self.add_item(item))
    }

    pub fn remove_item(&mut self, id: Id<MenuItem>) -> Option<MenuItem> {
        let pos = self.items.iter().position(|it| it.id == id)?;
        let removed = self.items.remove(pos);
        info!("Removed {} {:?}", removed.id, removed.name);
        Some(removed)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: Id<MenuItem>) -> Option<&MenuItem> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn items_by_course(&self, course: Course) -> Vec<&MenuItem> {
        self.items.iter().filter(|it| it.course == course).collect()
    }

    /// Non-empty courses in canonical course order.
    pub fn sections(&self) -> Vec<Section<'_>> {
        Course::ALL
            .iter()
            .map(|&course| Section {
                course,
                items: self.items_by_course(course),
            })
            .filter(|section| !section.items.is_empty())
            .collect()
    }

    pub fn counts_by_course(&self) -> BTreeMap<Course, usize> {
        let mut counts = BTreeMap::new();
        for item in self.items.iter() {
            *counts.entry(item.course).or_insert(0) += 1;
        }
        counts
    }

    /// Exact, case-sensitive name match.
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|it| it.name == name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::btreemap;

    fn dish(name: &str, course: Course, price: &str) -> NewItem {
        ItemForm::new(name, format!("About {}", name), course, price)
            .validate()
            .expect("valid dish")
    }

    fn names<'a>(items: impl IntoIterator<Item = &'a MenuItem>) -> Vec<&'a str> {
        items.into_iter().map(|it| it.name()).collect()
    }

    #[test]
    fn adding_increments_total_by_one() {
        let mut store = MenuStore::new();
        assert_eq!(store.total_items(), 0);
        assert!(store.is_empty());

        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));
        assert_eq!(store.total_items(), 1);

        store.add_item(dish("Artisan Coffee", Course::Beverages, "6.99"));
        assert_eq!(store.total_items(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn add_returns_the_stored_item() {
        let mut store = MenuStore::new();
        let id = {
            let item = store.add_item(dish("Lamb Rack", Course::Entrees, "42.9"));
            assert_eq!(item.name(), "Lamb Rack");
            assert_eq!(item.price().to_string(), "42.90");
            item.id()
        };
        assert_eq!(store.get(id).map(|it| it.name()), Some("Lamb Rack"));
    }

    #[test]
    fn duplicate_names_are_allowed_with_distinct_ids() {
        let mut store = MenuStore::new();
        let first = store
            .add_item(dish("Lamb Rack", Course::Entrees, "42.99"))
            .id();
        let second = store
            .add_item(dish("Lamb Rack", Course::Entrees, "40"))
            .id();
        assert_ne!(first, second);
        assert_eq!(store.total_items(), 2);
    }

    #[test]
    fn items_by_course_preserves_insertion_order() {
        let mut store = MenuStore::new();
        store.add_item(dish("Chocolate Fondant", Course::Desserts, "11.99"));
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));
        store.add_item(dish("Pistachio Baklava", Course::Desserts, "10.99"));
        store.add_item(dish("Sea Scallops", Course::Entrees, "32.99"));

        assert_eq!(
            names(store.items_by_course(Course::Desserts)),
            vec!["Chocolate Fondant", "Pistachio Baklava"]
        );
        assert_eq!(
            names(store.items_by_course(Course::Entrees)),
            vec!["Lamb Rack", "Sea Scallops"]
        );
        assert!(store.items_by_course(Course::Beverages).is_empty());
    }

    #[test]
    fn sections_skip_empty_courses_and_follow_course_order() {
        let mut store = MenuStore::new();
        store.add_item(dish("Artisan Coffee", Course::Beverages, "6.99"));
        store.add_item(dish("Tuna Tartare", Course::Appetizers, "18.99"));
        store.add_item(dish("Signature Mocktails", Course::Beverages, "9.99"));

        let sections = store.sections();
        let courses = sections.iter().map(|s| s.course).collect::<Vec<_>>();
        assert_eq!(courses, vec![Course::Appetizers, Course::Beverages]);
        assert_eq!(
            names(sections[1].items.iter().cloned()),
            vec!["Artisan Coffee", "Signature Mocktails"]
        );
    }

    #[test]
    fn counts_by_course_only_lists_present_courses() {
        let mut store = MenuStore::new();
        store.add_item(dish("Artisan Coffee", Course::Beverages, "6.99"));
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));
        store.add_item(dish("Signature Mocktails", Course::Beverages, "9.99"));

        assert_eq!(
            store.counts_by_course(),
            btreemap! {
                Course::Entrees => 1,
                Course::Beverages => 2,
            }
        );
    }

    #[test]
    fn remove_item_updates_every_view() {
        let mut store = MenuStore::new();
        let coffee = store
            .add_item(dish("Artisan Coffee", Course::Beverages, "6.99"))
            .id();
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));
        store.add_item(dish("Craft Beer Flight", Course::Beverages, "16.99"));

        let removed = store.remove_item(coffee).expect("removed");
        assert_eq!(removed.name(), "Artisan Coffee");

        assert_eq!(store.total_items(), 2);
        assert!(store.get(coffee).is_none());
        assert!(!store.contains_name("Artisan Coffee"));
        assert_eq!(
            names(store.items_by_course(Course::Beverages)),
            vec!["Craft Beer Flight"]
        );
        assert_eq!(names(store.items()), vec!["Lamb Rack", "Craft Beer Flight"]);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut store = MenuStore::new();
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));

        assert_eq!(store.remove_item(Id::default()), None);
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn rejected_submission_leaves_store_unchanged() {
        let mut store = MenuStore::new();
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));

        for price in &["-5", "abc"] {
            let form = ItemForm::new("Soup", "Hot soup", Course::Appetizers, *price);
            assert!(store.submit(&form).is_err());
        }
        let form = ItemForm::new("", "Nameless", Course::Appetizers, "5");
        assert!(store.submit(&form).is_err());

        assert_eq!(store.total_items(), 1);
        assert_eq!(names(store.items()), vec!["Lamb Rack"]);
    }

    #[test]
    fn submission_normalises_price() {
        let mut store = MenuStore::new();
        let form = ItemForm::new("House Bread", "Sourdough", Course::Appetizers, "9.999");
        let item = store.submit(&form).expect("submit");
        assert_eq!(item.price().to_string(), "10.00");
    }

    #[test]
    fn name_lookup_is_exact() {
        let mut store = MenuStore::new();
        store.add_item(dish("Lamb Rack", Course::Entrees, "42.99"));

        assert!(store.contains_name("Lamb Rack"));
        assert!(!store.contains_name("lamb rack"));
        assert!(!store.contains_name("Lamb"));
    }
}
