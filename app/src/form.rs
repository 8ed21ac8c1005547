//! The manual-entry form for custom dishes, and the rules it must satisfy
//! before anything reaches the menu.

use std::fmt;

use err_derive::Error;
use log::*;

use crate::menu::{Course, NewItem, Price, PriceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(display = "Missing information: {} must not be empty", field)]
    MissingField { field: Field },
    #[error(display = "Invalid price {:?}: {}", input, reason)]
    InvalidPrice { input: String, reason: PriceError },
}

/// Raw text as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub course: Course,
    pub price: String,
}

impl fmt::Display for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
        };
        fmt.write_str(name)
    }
}

impl ItemForm {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        course: Course,
        price: impl Into<String>,
    ) -> Self {
        ItemForm {
            name: name.into(),
            description: description.into(),
            course,
            price: price.into(),
        }
    }

    /// Checks every field and produces trimmed values with the price
    /// normalised to whole cents. Blank fields are reported before a bad
    /// price, in form order.
    pub fn validate(&self) -> Result<NewItem, ValidationError> {
        let name = required(Field::Name, &self.name)?;
        let description = required(Field::Description, &self.description)?;
        let price_text = required(Field::Price, &self.price)?;

        let price = price_text
            .parse::<Price>()
            .map_err(|reason| ValidationError::InvalidPrice {
                input: price_text.to_string(),
                reason,
            })?;

        let item = NewItem {
            name: name.to_string(),
            description: description.to_string(),
            course: self.course,
            price,
        };
        debug!("Validated form: {:?}", item);
        Ok(item)
    }

    /// Whether submitting right now would succeed.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn reset(&mut self) {
        *self = ItemForm::default();
    }
}

fn required<'a>(field: Field, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(value)
}
