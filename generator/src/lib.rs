mod config;
mod error;
mod generator;
mod markdown;
mod nav;
mod template;

pub use config::{CONFIG_FILE, Config, MalformedPolicy};
pub use error::{Error, Result};
pub use generator::{Generator, Report};
pub use markdown::{SourcePage, TITLE_PREFIX, to_html};
pub use nav::Navigation;
pub use template::{BODY_TOKEN, NAV_TOKEN, TITLE_TOKEN, Template};

/// Load the template and navigation named by `config`, then render every source page.
pub fn build(config: &Config) -> Result<Report> {
    let (template, navigation) = Template::load(&config.template, &config.navigation)?;
    let generator = Generator::from_config(config, template, navigation);
    generator.build()
}
