//! Man page locations
//!
//! A rendered man page view only remembers its URL; [`ManPageLocator`]
//! recovers the section and page from either the website URL or the GitHub
//! source URL so the page can be fetched again.

use regex::Regex;

use crate::core::RepositoryRef;

/// Directory holding man page markdown inside the repository
pub const MAN_PATH: &str = "Base/usr/share/man";

const WEBSITE_PATTERN: &str = r"^https://man\.serenityos\.org/man(\d+)/([\w.+-]+)\.html$";
const GITHUB_PATTERN: &str =
    r"^https://github\.com/([\w.-]+/[\w.-]+)/blob/[\w.-]+/([\w/.-]+)/man(\d+)/([\w.+-]+)\.md$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManPageLocator {
    pub section: String,
    pub page: String,
}

impl ManPageLocator {
    pub fn new(section: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            page: page.into(),
        }
    }

    /// Recover the locator from a website or GitHub URL
    ///
    /// GitHub URLs only count when they point into `repository`'s man directory.
    pub fn parse(url: &str, repository: &RepositoryRef) -> Option<Self> {
        let url = url.trim();

        if let Ok(re) = Regex::new(WEBSITE_PATTERN) {
            if let Some(caps) = re.captures(url) {
                return Some(Self::new(&caps[1], &caps[2]));
            }
        }

        if let Ok(re) = Regex::new(GITHUB_PATTERN) {
            if let Some(caps) = re.captures(url) {
                if caps[1] != repository.full_name() || &caps[2] != MAN_PATH {
                    return None;
                }
                return Some(Self::new(&caps[3], &caps[4]));
            }
        }

        None
    }

    /// Path of the markdown source inside the repository
    pub fn source_path(&self) -> String {
        format!("{MAN_PATH}/man{}/{}.md", self.section, self.page)
    }

    pub fn github_url(&self, repository: &RepositoryRef) -> String {
        format!(
            "https://github.com/{}/blob/master/{}",
            repository.full_name(),
            self.source_path()
        )
    }

    pub fn website_url(&self) -> String {
        format!(
            "https://man.serenityos.org/man{}/{}.html",
            self.section, self.page
        )
    }
}
