use crate::domain::model::Page;
use crate::utils::error::{DocsError, Result};
use crate::utils::validation::{validate_file_extensions, Validate, PAGE_EXTENSIONS};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "backend-docs")]
#[command(about = "Substitute backend, contract and spec markers in markdown pages")]
pub struct CliConfig {
    /// JSON data file produced by the data builder
    #[arg(long, env = super::DATA_FILE_ENV)]
    pub data_file: Option<String>,

    /// Optional TOML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write processed pages into this directory
    #[arg(short, long, conflicts_with = "in_place")]
    pub output_dir: Option<String>,

    /// Overwrite each page with its processed markdown
    #[arg(long)]
    pub in_place: bool,

    /// Log format: compact or json
    #[arg(long)]
    pub log_format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Markdown pages; reads stdin when none are given
    pub pages: Vec<String>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn output_target(&self) -> OutputTarget {
        if self.in_place {
            OutputTarget::InPlace
        } else if let Some(dir) = &self.output_dir {
            OutputTarget::Directory(PathBuf::from(dir))
        } else {
            OutputTarget::Stdout
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.in_place && self.pages.is_empty() {
            return Err(DocsError::ConfigError {
                message: "--in-place needs at least one page".to_string(),
            });
        }
        if self.output_dir.is_some() && self.pages.is_empty() {
            return Err(DocsError::ConfigError {
                message: "--output-dir needs at least one page; stdin input is written to stdout"
                    .to_string(),
            });
        }
        validate_file_extensions("pages", &self.pages, PAGE_EXTENSIONS)?;

        if self.output_dir.is_some() {
            let mut seen = HashSet::new();
            for page in &self.pages {
                if !seen.insert(relative_output_path(page)?) {
                    return Err(DocsError::InvalidConfigValueError {
                        field: "pages".to_string(),
                        value: page.clone(),
                        reason: "Another page maps to the same output path".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Where processed pages go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Directory(PathBuf),
    InPlace,
}

/// Reads pages from disk and writes the processed markdown back out.
#[derive(Debug, Clone)]
pub struct PageStorage {
    target: OutputTarget,
}

impl PageStorage {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    pub fn read_page(&self, path: &str) -> Result<Page> {
        let markdown = fs::read_to_string(path)?;
        Ok(Page::new(path, markdown))
    }

    /// Returns the path written to, or `None` when nothing was written to disk.
    pub fn write_page(&self, page: &Page, markdown: &str) -> Result<Option<PathBuf>> {
        let full_path = match &self.target {
            OutputTarget::Stdout => {
                print!("{}", markdown);
                return Ok(None);
            }
            OutputTarget::InPlace => PathBuf::from(&page.name),
            OutputTarget::Directory(dir) => dir.join(relative_output_path(&page.name)?),
        };

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&full_path, markdown)?;
        Ok(Some(full_path))
    }
}

/// The page path as written, minus any root, `.` or `..` components.
pub fn relative_output_path(page: &str) -> Result<PathBuf> {
    let relative: PathBuf = Path::new(page)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    if relative.file_name().is_none() {
        return Err(DocsError::InvalidConfigValueError {
            field: "pages".to_string(),
            value: page.to_string(),
            reason: "Page path has no file name".to_string(),
        });
    }
    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_to_directory_keeps_relative_path() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("site");
        let storage = PageStorage::new(OutputTarget::Directory(out.clone()));
        let page = Page::new("docs/reference/backends.md", "");

        let written = storage.write_page(&page, "# Done\n").unwrap();
        let expected = out.join("docs").join("reference").join("backends.md");
        assert_eq!(written, Some(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), "# Done\n");
    }

    #[test]
    fn test_same_file_name_in_different_directories_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("site");
        let storage = PageStorage::new(OutputTarget::Directory(out.clone()));

        let a = storage
            .write_page(&Page::new("docs/a/index.md", ""), "A\n")
            .unwrap()
            .unwrap();
        let b = storage
            .write_page(&Page::new("docs/b/index.md", ""), "B\n")
            .unwrap()
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(fs::read_to_string(a).unwrap(), "A\n");
        assert_eq!(fs::read_to_string(b).unwrap(), "B\n");
    }

    #[test]
    fn test_relative_output_path_drops_root_and_parent_components() {
        assert_eq!(
            relative_output_path("/srv/docs/index.md").unwrap(),
            PathBuf::from("srv/docs/index.md")
        );
        assert_eq!(
            relative_output_path("../docs/./index.md").unwrap(),
            PathBuf::from("docs/index.md")
        );
        assert!(relative_output_path("..").is_err());
    }

    #[test]
    fn test_in_place_overwrites_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.md");
        fs::write(&path, "!!! specs\n").unwrap();

        let storage = PageStorage::new(OutputTarget::InPlace);
        let page = storage.read_page(path.to_str().unwrap()).unwrap();
        assert_eq!(page.markdown, "!!! specs\n");

        storage.write_page(&page, "\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "\n");
    }

    #[test]
    fn test_read_missing_page_is_io_error() {
        let storage = PageStorage::new(OutputTarget::Stdout);
        let err = storage.read_page("/nonexistent/page.md").unwrap_err();
        assert!(matches!(err, DocsError::IoError(_)));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parsing_and_validation() {
        let config = CliConfig::parse_from([
            "backend-docs",
            "--data-file",
            "data.json",
            "--output-dir",
            "site",
            "index.md",
        ]);
        assert_eq!(config.data_file.as_deref(), Some("data.json"));
        assert_eq!(
            config.output_target(),
            OutputTarget::Directory(PathBuf::from("site"))
        );
        assert!(config.validate().is_ok());

        let bad = CliConfig::parse_from(["backend-docs", "notes.txt"]);
        assert!(bad.validate().is_err());

        let in_place_without_pages = CliConfig::parse_from(["backend-docs", "--in-place"]);
        assert!(in_place_without_pages.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_output_dir_requires_pages() {
        let stdin_to_dir = CliConfig::parse_from(["backend-docs", "-o", "site"]);
        assert!(matches!(
            stdin_to_dir.validate(),
            Err(DocsError::ConfigError { .. })
        ));

        let stdin_to_stdout = CliConfig::parse_from(["backend-docs"]);
        assert_eq!(stdin_to_stdout.output_target(), OutputTarget::Stdout);
        assert!(stdin_to_stdout.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_colliding_output_paths_are_rejected() {
        let config = CliConfig::parse_from([
            "backend-docs",
            "-o",
            "site",
            "docs/index.md",
            "../docs/index.md",
        ]);
        assert!(matches!(
            config.validate(),
            Err(DocsError::InvalidConfigValueError { .. })
        ));

        let distinct =
            CliConfig::parse_from(["backend-docs", "-o", "site", "a/index.md", "b/index.md"]);
        assert!(distinct.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_data_file_from_environment() {
        use crate::config::toml_config::TomlConfig;
        use crate::config::{DocsConfig, DATA_FILE_ENV};

        std::env::set_var(DATA_FILE_ENV, "env.json");

        let from_env = CliConfig::parse_from(["backend-docs"]);
        let flag_wins = CliConfig::parse_from(["backend-docs", "--data-file", "flag.json"]);

        std::env::remove_var(DATA_FILE_ENV);

        assert_eq!(from_env.data_file.as_deref(), Some("env.json"));
        assert_eq!(flag_wins.data_file.as_deref(), Some("flag.json"));

        let toml = TomlConfig::from_toml_str("[data]\nfile = \"toml.json\"\n").unwrap();
        let resolved =
            DocsConfig::resolve(from_env.data_file.as_deref(), false, None, Some(&toml));
        assert_eq!(resolved.data_file, "env.json");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_output_dir_conflicts_with_in_place() {
        let result =
            CliConfig::try_parse_from(["backend-docs", "--in-place", "-o", "site", "index.md"]);
        assert!(result.is_err());
    }
}
