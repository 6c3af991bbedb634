use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, IoResultExt as _, Result};

/// Looked up in the working directory when no config path is given.
pub const CONFIG_FILE: &str = "gen_basic.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: PathBuf,
    pub navigation: PathBuf,

    /// Paths relative to `source_dir` that are never rendered.
    pub skip: HashSet<PathBuf>,

    pub on_malformed: MalformedPolicy,
}

/// What to do with a source page whose first line isn't a `@title: ` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop the whole run.
    #[default]
    Halt,
    /// Warn and move on to the next file.
    Skip,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: "markdown".into(),
            output_dir: "output".into(),
            template: "gen_basic/template-basic.html".into(),
            navigation: "template-nav.html".into(),
            skip: HashSet::new(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path).at(path)?;
        serde_yaml::from_reader(file).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Use `path` if given, else [`CONFIG_FILE`] if it exists, else the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = Path::new(CONFIG_FILE);
        if default_path.is_file() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = Config::default();
        assert_eq!(config.source_dir, Path::new("markdown"));
        assert_eq!(config.output_dir, Path::new("output"));
        assert_eq!(config.template, Path::new("gen_basic/template-basic.html"));
        assert_eq!(config.navigation, Path::new("template-nav.html"));
        assert_eq!(config.on_malformed, MalformedPolicy::Halt);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "output_dir: public\non_malformed: skip\nskip:\n  - drafts/wip.md\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.output_dir, Path::new("public"));
        assert_eq!(config.source_dir, Path::new("markdown"));
        assert_eq!(config.on_malformed, MalformedPolicy::Skip);
        assert!(config.skip.contains(Path::new("drafts/wip.md")));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "sourcedir: md\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::discover(Some(Path::new("no/such/gen_basic.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
