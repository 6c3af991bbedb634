const ITEM_TAG: &str = "<li>";
const ACTIVE_ITEM_TAG: &str = "<li class=\"active\">";

/// The site menu, one `<li>` entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Lines with their terminators.
    lines: Vec<String>,
}

impl Navigation {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Copy of the menu with the first entry mentioning `nav_name` marked active.
    ///
    /// Only the first matching line is touched, even if later lines match too.
    pub fn with_active(&self, nav_name: &str) -> Self {
        let mut lines = self.lines.clone();

        if let Some(line) = lines.iter_mut().find(|line| line.contains(nav_name)) {
            *line = line.replacen(ITEM_TAG, ACTIVE_ITEM_TAG, 1);
        }

        Self { lines }
    }

    pub fn render(&self) -> String {
        self.lines.concat().trim().to_string()
    }
}

impl From<&str> for Navigation {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = "<li><a href=\"index.html\">Home</a></li>\n\
                        <li><a href=\"docs/intro.html\">Intro</a></li>\n\
                        <li><a href=\"intro.html\">Other intro</a></li>\n";

    #[test]
    fn parse_keeps_terminators() {
        let nav = Navigation::parse("<li>a</li>\r\n<li>b</li>");
        assert_eq!(nav.lines(), ["<li>a</li>\r\n", "<li>b</li>"]);
    }

    #[test]
    fn marks_matching_entry() {
        let nav = Navigation::parse(MENU);
        let active = nav.with_active("index.html");

        assert_eq!(
            active.lines()[0],
            "<li class=\"active\"><a href=\"index.html\">Home</a></li>\n"
        );
        assert_eq!(active.lines()[1..], nav.lines()[1..]);
    }

    #[test]
    fn only_first_match_is_marked() {
        let nav = Navigation::parse(MENU);
        // `intro.html` is a substring of both the second and the third entry.
        let active = nav.with_active("intro.html");

        assert!(active.lines()[1].starts_with(ACTIVE_ITEM_TAG));
        assert_eq!(active.lines()[2], nav.lines()[2]);
        assert_eq!(active.lines()[0], nav.lines()[0]);
    }

    #[test]
    fn no_match_leaves_menu_untouched() {
        let nav = Navigation::parse(MENU);
        assert_eq!(nav.with_active("missing.html"), nav);
    }

    #[test]
    fn shared_menu_is_not_mutated() {
        let nav = Navigation::parse(MENU);
        let _ = nav.with_active("index.html");
        assert_eq!(nav, Navigation::parse(MENU));
    }

    #[test]
    fn render_joins_and_trims() {
        let nav = Navigation::parse("\n  <li>a</li>\n<li>b</li>\n\n");
        assert_eq!(nav.render(), "<li>a</li>\n<li>b</li>");
    }
}
