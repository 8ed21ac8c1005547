//! Guarded with `#[cfg(test)]` from `lib.rs`

use anyhow::Result;

use crate::catalog::{self, CategoryFilter, CATALOG};
use crate::config::Config;
use crate::form::{Field, ItemForm, ValidationError};
use crate::menu::{Course, MenuItem, MenuStore, PriceError};
use crate::MenuBuilder;

fn names(items: &[&MenuItem]) -> Vec<String> {
    items.iter().map(|it| it.name().to_string()).collect()
}

#[test]
fn assemble_menu_from_catalog_and_custom_dishes() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let mut store = MenuStore::new();

    for found in catalog::filter_catalog(CATALOG, "", Course::Desserts.into()) {
        if !catalog::is_already_added(&store, found.name) {
            store.add_item(found.to_new_item());
        }
    }
    let tuna = catalog::filter_catalog(CATALOG, "tuna", CategoryFilter::All);
    store.add_item(tuna[0].to_new_item());

    let mut form = ItemForm::new(
        "Grandma's Trifle",
        "Sponge, custard, berries",
        Course::Desserts,
        "8",
    );
    store.submit(&form)?;
    form.reset();
    assert!(!form.is_complete());

    assert_eq!(store.total_items(), 6);
    assert_eq!(
        names(&store.items_by_course(Course::Desserts)),
        vec![
            "Lavender Crème Brûlée",
            "Chocolate Fondant",
            "Pistachio Baklava",
            "Saffron Panna Cotta",
            "Grandma's Trifle",
        ]
    );
    assert_eq!(names(&store.items_by_course(Course::Appetizers)), vec!["Tuna Tartare"]);

    let listing = catalog::browse(&store, CATALOG, "", CategoryFilter::All);
    let added = listing.iter().filter(|l| l.added).count();
    assert_eq!(added, 5);
    Ok(())
}

#[test]
fn views_stay_consistent_through_adds_and_removes() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let mut store = MenuStore::new();

    let mut ids = Vec::new();
    for entry in CATALOG.iter() {
        ids.push(store.add_item(entry.to_new_item()).id());
        let by_course: usize = Course::ALL
            .iter()
            .map(|&c| store.items_by_course(c).len())
            .sum();
        assert_eq!(by_course, store.total_items());
    }
    assert_eq!(store.total_items(), CATALOG.len());

    for id in ids.iter().step_by(2) {
        assert!(store.remove_item(*id).is_some());
        let counted: usize = store.counts_by_course().values().sum();
        assert_eq!(counted, store.total_items());
    }
    assert_eq!(store.total_items(), CATALOG.len() / 2);

    let remaining = store.items().iter().map(|it| it.id()).collect::<Vec<_>>();
    let expected = ids.iter().skip(1).step_by(2).cloned().collect::<Vec<_>>();
    assert_eq!(remaining, expected);
    Ok(())
}

#[test]
fn rejected_forms_never_touch_the_menu() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let mut store = MenuStore::new();
    store.add_item(CATALOG[0].to_new_item());

    let cases = vec![
        (
            ItemForm::new("", "x", Course::Entrees, "5"),
            ValidationError::MissingField { field: Field::Name },
        ),
        (
            ItemForm::new("Soup", "x", Course::Entrees, "-5"),
            ValidationError::InvalidPrice {
                input: "-5".into(),
                reason: PriceError::NotPositive,
            },
        ),
        (
            ItemForm::new("Soup", "x", Course::Entrees, "abc"),
            ValidationError::InvalidPrice {
                input: "abc".into(),
                reason: PriceError::Malformed,
            },
        ),
    ];
    for (form, expected) in cases {
        assert_eq!(store.submit(&form).map(|it| it.id()), Err(expected));
        assert_eq!(store.total_items(), 1);
    }
    Ok(())
}

#[test]
fn builder_sessions_share_one_menu() -> Result<()> {
    env_logger::try_init().unwrap_or_default();
    let config = Config::from_toml("[display]\ncurrency = \"R\"\n")?;
    let builder = MenuBuilder::new(&config);

    let mut out = Vec::new();
    builder
        .session()
        .run("add Lamb Rack\n".as_bytes(), &mut out)?;
    let mut out2 = Vec::new();
    builder.session().run("total\nmenu\n".as_bytes(), &mut out2)?;

    let out2 = String::from_utf8(out2)?;
    assert!(out2.contains("1 dishes added"), "{}", out2);
    assert!(out2.contains("Lamb Rack  R42.99"), "{}", out2);
    Ok(())
}
