use std::fmt;
use std::str::FromStr;

use err_derive::Error;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use infra::ids::{Entity, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Course {
    Appetizers,
    #[serde(alias = "Main Courses")]
    Entrees,
    Desserts,
    Beverages,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "unknown course: {:?}", _0)]
pub struct UnknownCourse(pub String);

/// A strictly positive amount, held in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error(display = "not a number")]
    Malformed,
    #[error(display = "must be greater than zero")]
    NotPositive,
    #[error(display = "too large")]
    TooLarge,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub(super) id: Id<MenuItem>,
    pub(super) name: String,
    pub(super) description: String,
    pub(super) course: Course,
    pub(super) price: Price,
}

/// Fields for a dish that have already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) course: Course,
    pub(crate) price: Price,
}

impl Course {
    pub const ALL: [Course; 4] = [
        Course::Appetizers,
        Course::Entrees,
        Course::Desserts,
        Course::Beverages,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Course::Appetizers => "Appetizers",
            Course::Entrees => "Entrees",
            Course::Desserts => "Desserts",
            Course::Beverages => "Beverages",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Course::Appetizers => "App",
            Course::Entrees => "Ent",
            Course::Desserts => "Des",
            Course::Beverages => "Bev",
        }
    }
}

impl Default for Course {
    fn default() -> Self {
        Course::Entrees
    }
}

impl fmt::Display for Course {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.label())
    }
}

impl FromStr for Course {
    type Err = UnknownCourse;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let course = match src.trim().to_lowercase().as_str() {
            "appetizers" | "appetizer" | "app" => Course::Appetizers,
            "entrees" | "entree" | "ent" | "main courses" | "main course" | "mains" => {
                Course::Entrees
            }
            "desserts" | "dessert" | "des" => Course::Desserts,
            "beverages" | "beverage" | "bev" | "drinks" => Course::Beverages,
            _ => return Err(UnknownCourse(src.to_string())),
        };
        Ok(course)
    }
}

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Price { cents }
    }

    pub fn cents(self) -> u64 {
        self.cents
    }

    pub fn with_currency(self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Parses a plain decimal amount, rounding half-up to whole cents.
impl FromStr for Price {
    type Err = PriceError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.trim();
        let (negative, digits) = match src.as_bytes().first() {
            Some(b'-') => (true, &src[1..]),
            Some(b'+') => (false, &src[1..]),
            _ => (false, src),
        };

        let (whole, frac) = match digits.find('.') {
            Some(dot) => (&digits[..dot], &digits[dot + 1..]),
            None => (digits, ""),
        };
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(PriceError::Malformed);
        }

        let mut cents = 0u64;
        for b in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(u64::from(b - b'0')))
                .ok_or(PriceError::TooLarge)?;
        }
        let mut frac_digits = frac.bytes().map(|b| u64::from(b - b'0'));
        let tenths = frac_digits.next().unwrap_or(0);
        let hundredths = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().map(|d| d >= 5).unwrap_or(false);

        cents = cents
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + u64::from(round_up)))
            .ok_or(PriceError::TooLarge)?;

        if negative || cents == 0 {
            return Err(PriceError::NotPositive);
        }
        Ok(Price { cents })
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl MenuItem {
    pub(super) fn new(id: Id<MenuItem>, item: NewItem) -> Self {
        let NewItem {
            name,
            description,
            course,
            price,
        } = item;
        MenuItem {
            id,
            name,
            description,
            course,
            price,
        }
    }

    pub fn id(&self) -> Id<MenuItem> {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn course(&self) -> Course {
        self.course
    }
    pub fn price(&self) -> Price {
        self.price
    }
}

impl Entity for MenuItem {
    const PREFIX: &'static str = "item";
}

impl NewItem {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn course(&self) -> Course {
        self.course
    }
    pub fn price(&self) -> Price {
        self.price
    }
}
