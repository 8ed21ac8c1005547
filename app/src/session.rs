//! A line-at-a-time text front end over a [`Menu`].
//!
//! Each input line is one command; the session keeps the current catalog
//! search and category between commands, the way the browsing screen does.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use err_derive::Error;
use log::*;

use infra::ids::{Id, IdParseError};

use crate::catalog::{self, CategoryFilter, UnknownDish};
use crate::config::DisplayConfig;
use crate::form::{ItemForm, ValidationError};
use crate::menu::{
    AddFromCatalog, AddItem, BrowseCatalog, Course, IsAlreadyAdded, Menu, MenuItem,
    MenuSections, RemoveItem, ShowMenu, TotalItems, UnknownCourse,
};
use crate::services::{Commandable, Queryable};

const HELP: &str = "\
Commands:
  add <dish>                                    add a catalog dish
  custom <name> | <description> | <course> | <price>
                                                add your own dish
  remove <id>                                   remove a dish from the menu
  search <text>                                 filter the catalog by text
  category <All|App|Ent|Des|Bev>                filter the catalog by course
  catalog                                       show the filtered catalog
  menu                                          show your menu by course
  total                                         count the dishes on your menu
  export                                        print your menu as JSON
  help                                          show this text
  quit                                          leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Custom(ItemForm),
    Remove(Id<MenuItem>),
    Search(String),
    Category(CategoryFilter),
    Catalog,
    Menu,
    Total,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(display = "Unknown command {:?}; try `help`", _0)]
    UnknownCommand(String),
    #[error(display = "`{}` needs an argument", _0)]
    MissingArgument(&'static str),
    #[error(display = "Usage: custom <name> | <description> | <course> | <price>")]
    BadCustomDish,
    #[error(display = "{}", _0)]
    UnknownCourse(UnknownCourse),
    #[error(display = "Bad item id: {}", _0)]
    BadId(IdParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct Session {
    menu: Menu,
    display: DisplayConfig,
    search: String,
    category: CategoryFilter,
}

impl FromStr for Command {
    type Err = SessionError;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.find(char::is_whitespace) {
            Some(split) => (&line[..split], line[split..].trim()),
            None => (line, ""),
        };
        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(SessionError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        let cmd = match word.to_lowercase().as_str() {
            "add" => Command::Add(argument("add")?.to_string()),
            "custom" => Command::Custom(parse_custom(argument("custom")?)?),
            "remove" => Command::Remove(
                argument("remove")?
                    .parse()
                    .map_err(SessionError::BadId)?,
            ),
            // An empty search clears the filter.
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(
                argument("category")?
                    .parse()
                    .map_err(SessionError::UnknownCourse)?,
            ),
            "catalog" => Command::Catalog,
            "menu" => Command::Menu,
            "total" => Command::Total,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(SessionError::UnknownCommand(word.to_string())),
        };
        Ok(cmd)
    }
}

fn parse_custom(fields: &str) -> Result<ItemForm, SessionError> {
    let parts = fields.split('|').map(str::trim).collect::<Vec<_>>();
    if parts.len() != 4 {
        return Err(SessionError::BadCustomDish);
    }
    let course = if parts[2].is_empty() {
        Course::default()
    } else {
        parts[2].parse().map_err(SessionError::UnknownCourse)?
    };
    Ok(ItemForm::new(parts[0], parts[1], course, parts[3]))
}

impl Session {
    pub fn new(menu: Menu, display: DisplayConfig) -> Self {
        Session {
            menu,
            display,
            search: String::new(),
            category: CategoryFilter::default(),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Runs commands until input ends or `quit` is read. Unparseable lines
    /// and rejected dishes are reported on `out` and do not end the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            trace!("session line: {:?}", line);
            let cmd = match line.parse::<Command>() {
                Ok(cmd) => cmd,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };
            if self.execute(cmd, out)? == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow> {
        debug!("execute: {:?}", cmd);
        match cmd {
            Command::Add(name) => self.add_from_catalog(name, out)?,
            Command::Custom(form) => self.add_custom(form, out)?,
            Command::Remove(id) => match self.menu.execute(RemoveItem(id))? {
                Some(item) => writeln!(out, "Removed {:?} from your menu.", item.name())?,
                None => writeln!(out, "No dish {} on your menu.", id)?,
            },
            Command::Search(text) => {
                self.search = text;
                self.write_catalog(out)?;
            }
            Command::Category(category) => {
                self.category = category;
                self.write_catalog(out)?;
            }
            Command::Catalog => self.write_catalog(out)?,
            Command::Menu => self.write_menu(out)?,
            Command::Total => {
                writeln!(out, "{} dishes added", self.menu.query(TotalItems)?)?;
            }
            Command::Export => {
                let items = self.menu.query(ShowMenu)?;
                writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn add_from_catalog<W: Write>(&self, name: String, out: &mut W) -> Result<()> {
        if catalog::find_entry(self.menu.catalog(), &name).is_none() {
            writeln!(out, "{}", UnknownDish(name))?;
            return Ok(());
        }
        if self.menu.query(IsAlreadyAdded(name.clone()))? {
            writeln!(out, "{:?} is already on your menu.", name)?;
            return Ok(());
        }
        let item = self.menu.execute(AddFromCatalog(name))?;
        self.write_added(&item, out)
    }

    fn add_custom<W: Write>(&self, form: ItemForm, out: &mut W) -> Result<()> {
        match self.menu.execute(AddItem(form)) {
            Ok(item) => self.write_added(&item, out),
            Err(e) => match e.downcast::<ValidationError>() {
                Ok(invalid) => {
                    writeln!(out, "Not added. {}", invalid)?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
        }
    }

    fn write_added<W: Write>(&self, item: &MenuItem, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Added {:?} ({}, {}) as {}.",
            item.name(),
            item.course(),
            self.display.price(item.price()),
            item.id()
        )?;
        Ok(())
    }

    fn write_catalog<W: Write>(&self, out: &mut W) -> Result<()> {
        let listings = self.menu.query(BrowseCatalog {
            search: self.search.clone(),
            category: self.category,
        })?;
        let stats = catalog::stats(self.menu.catalog());
        writeln!(
            out,
            "Your items: {} | Available: {} | Categories: {}",
            self.menu.query(TotalItems)?,
            stats.available,
            stats.categories
        )?;
        writeln!(
            out,
            "Showing {} of {} dishes [search: {:?}, category: {}]",
            listings.len(),
            stats.available,
            self.search,
            self.category.short_label()
        )?;
        for listing in listings {
            let entry = listing.entry;
            writeln!(
                out,
                "[{}] {} ({}) {}",
                if listing.added { "x" } else { " " },
                entry.name,
                entry.course,
                self.display.price(entry.price)
            )?;
            writeln!(out, "      {}", entry.description)?;
        }
        Ok(())
    }

    fn write_menu<W: Write>(&self, out: &mut W) -> Result<()> {
        let total = self.menu.query(TotalItems)?;
        if total == 0 {
            writeln!(out, "No dishes added yet.")?;
            writeln!(
                out,
                "Start building your menu by adding dishes from the catalog!"
            )?;
            return Ok(());
        }
        writeln!(out, "Your Complete Menu: {} dishes added", total)?;
        for (course, items) in self.menu.query(MenuSections)? {
            writeln!(out, "{} ({} items)", course, items.len())?;
            for item in items {
                writeln!(
                    out,
                    "  {}  {}  [{}]",
                    item.name(),
                    self.display.price(item.price()),
                    item.id()
                )?;
                writeln!(out, "    {}", item.description())?;
            }
        }
        Ok(())
    }
}
