use log::*;

pub mod catalog;
pub mod config;
pub mod form;
pub mod menu;
pub mod services;
pub mod session;

#[cfg(test)]
mod test;

#[derive(Debug, Clone)]
pub struct MenuBuilder {
    config: config::Config,
    menu: menu::Menu,
}

impl MenuBuilder {
    pub fn new(config: &config::Config) -> Self {
        debug!("Init menu builder with {:?}", config);
        let menu = menu::Menu::new();
        let config = config.clone();
        MenuBuilder { config, menu }
    }

    pub fn menu(&self) -> &menu::Menu {
        &self.menu
    }

    pub fn session(&self) -> session::Session {
        info!("Starting session");
        session::Session::new(self.menu.clone(), self.config.display.clone())
    }
}
