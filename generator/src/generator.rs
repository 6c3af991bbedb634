use std::{
    collections::HashSet,
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use crate::{
    config::{Config, MalformedPolicy},
    error::{Error, IoResultExt as _, Result},
    markdown::SourcePage,
    nav::Navigation,
    template::Template,
};

pub struct Generator {
    src_dir: PathBuf,
    dst_dir: PathBuf,
    template: Template,
    navigation: Navigation,
    skip: HashSet<PathBuf>,
    on_malformed: MalformedPolicy,
}

/// What a finished run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Written pages, in generation order.
    pub generated: Vec<PathBuf>,
    /// Source files left out because of a malformed header.
    pub skipped: Vec<PathBuf>,
}

impl Generator {
    pub fn new(
        src_dir: impl Into<PathBuf>,
        dst_dir: impl Into<PathBuf>,
        template: Template,
        navigation: Navigation,
    ) -> Self {
        Self {
            src_dir: src_dir.into(),
            dst_dir: dst_dir.into(),
            template,
            navigation,
            skip: HashSet::new(),
            on_malformed: MalformedPolicy::Halt,
        }
    }

    pub fn from_config(config: &Config, template: Template, navigation: Navigation) -> Self {
        Self::new(&config.source_dir, &config.output_dir, template, navigation)
            .with_skip(config.skip.iter().cloned())
            .on_malformed(config.on_malformed)
    }

    #[must_use]
    pub fn with_skip(mut self, skip: impl IntoIterator<Item = PathBuf>) -> Self {
        self.skip.extend(skip);
        self
    }

    #[must_use]
    pub fn on_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Render every file under the source dir. The first error aborts the
    /// run; pages written before it stay on disk.
    pub fn build(&self) -> Result<Report> {
        let mut report = Report::default();
        self.iter_dir(&self.src_dir, &mut report)?;
        Ok(report)
    }

    fn iter_dir(&self, cur_dir: &Path, report: &mut Report) -> Result<()> {
        let mut paths = fs::read_dir(cur_dir)
            .and_then(|entries| entries.map(|e| e.map(|e| e.path())).collect::<Result<Vec<_>, _>>())
            .at(cur_dir)?;
        // read_dir order is up to the filesystem
        paths.sort();

        for path in paths {
            let Ok(rel_path) = path.strip_prefix(&self.src_dir) else {
                log::warn!("cannot get relative path for {}", path.display());
                continue;
            };

            if self.skip.contains(rel_path) {
                log::info!("skip: {}", rel_path.display());
                continue;
            }

            // links to files are rendered, links to directories are not followed
            let file_type = fs::symlink_metadata(&path).at(&path)?.file_type();
            if file_type.is_dir() {
                self.iter_dir(&path, report)?;
            } else if file_type.is_file() || path.is_file() {
                self.handle_file(rel_path, report)?;
            } else if file_type.is_symlink() {
                log::info!("not following link: {}", rel_path.display());
            }
        }

        Ok(())
    }

    fn handle_file(&self, rel_path: &Path, report: &mut Report) -> Result<()> {
        let src_path = self.src_dir.join(rel_path);
        let dst_path = self.dst_dir.join(rel_path).with_extension("html");

        let page = match SourcePage::read(&src_path) {
            Ok(page) => page,
            Err(Error::MalformedHeader { path }) if self.on_malformed == MalformedPolicy::Skip => {
                log::warn!("{} has no '@title: ' header, skipped", path.display());
                report.skipped.push(path);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let nav = self.navigation.with_active(&nav_name(rel_path)).render();
        let content = self.template.render(&page.title, &nav, &page.body_html());

        log::info!("Generating {}.", dst_path.display());
        write_page(&dst_path, &content)?;
        report.generated.push(dst_path);

        Ok(())
    }
}

/// `docs/intro.md` -> `docs/intro.html`, always `/`-separated so it can be
/// looked up in the navigation fragment.
fn nav_name(rel_path: &Path) -> String {
    rel_path
        .with_extension("html")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn write_page(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }

    fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .at(path)
}
