use std::{fs, path::Path};

use crate::{
    error::{IoResultExt as _, Result},
    nav::Navigation,
};

pub const TITLE_TOKEN: &str = "{{{page.title}}}";
pub const NAV_TOKEN: &str = "{{{page.nav}}}";
pub const BODY_TOKEN: &str = "{{{page.body}}}";

/// The page skeleton every generated file is poured into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    html: String,
}

impl Template {
    /// Read the page template and the navigation fragment.
    pub fn load(
        template_path: impl AsRef<Path>,
        nav_path: impl AsRef<Path>,
    ) -> Result<(Self, Navigation)> {
        let template_path = template_path.as_ref();
        let nav_path = nav_path.as_ref();

        log::info!("read template from: {}", template_path.display());
        let html = fs::read_to_string(template_path).at(template_path)?;

        log::info!("read navigation from: {}", nav_path.display());
        let nav = fs::read_to_string(nav_path).at(nav_path)?;

        Ok((Self { html }, Navigation::parse(&nav)))
    }

    /// Fill in the three placeholders. Values are inserted as-is, without
    /// escaping, and tokens inside a value are never substituted.
    pub fn render(&self, title: &str, nav_html: &str, body_html: &str) -> String {
        let tokens = [
            (TITLE_TOKEN, title),
            (NAV_TOKEN, nav_html),
            (BODY_TOKEN, body_html),
        ];

        let mut out = String::with_capacity(self.html.len() + body_html.len());
        let mut rest = self.html.as_str();

        while let Some((pos, token, value)) = tokens
            .iter()
            .filter_map(|&(token, value)| rest.find(token).map(|pos| (pos, token, value)))
            .min_by_key(|&(pos, _, _)| pos)
        {
            out.push_str(&rest[..pos]);
            out.push_str(value);
            rest = &rest[pos + token.len()..];
        }
        out.push_str(rest);

        out
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }
}

impl From<String> for Template {
    fn from(html: String) -> Self {
        Self { html }
    }
}

impl From<&str> for Template {
    fn from(html: &str) -> Self {
        Self {
            html: html.to_string(),
        }
    }
}
