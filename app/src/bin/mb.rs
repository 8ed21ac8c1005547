use std::io;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use structopt::StructOpt;

use menubuilder::catalog::CategoryFilter;
use menubuilder::session::Command;

#[derive(Debug, StructOpt)]
#[structopt(name = "mb", about = "Assemble a restaurant menu.")]
struct Opt {
    /// Configuration file (TOML)
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "catalog", about = "Browse the dish catalog")]
    Catalog(CatalogOpt),
    #[structopt(name = "session", about = "Build a menu from commands on stdin")]
    Session,
}

#[derive(Debug, StructOpt)]
struct CatalogOpt {
    /// Only dishes whose name or description contains this text
    #[structopt(short = "s", long = "search", default_value = "")]
    search: String,
    /// All, or a course such as Desserts or Des
    #[structopt(short = "k", long = "category", default_value = "All")]
    category: CategoryFilter,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    #[serde(flatten)]
    menubuilder: menubuilder::config::Config,
    #[serde(default)]
    env_logger: menubuilder::config::EnvLogger,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let config: Config = menubuilder::config::load(opt.config.as_deref())?;
    config.env_logger.builder().init();
    let settings = config.menubuilder.with_env_overrides()?;

    let mb = menubuilder::MenuBuilder::new(&settings);
    let mut session = mb.session();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match opt.command {
        Commands::Catalog(CatalogOpt { search, category }) => {
            session.execute(Command::Search(search), &mut io::sink())?;
            session.execute(Command::Category(category), &mut io::sink())?;
            session.execute(Command::Catalog, &mut out)?;
        }
        Commands::Session => {
            let stdin = io::stdin();
            session.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
