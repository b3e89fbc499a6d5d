//! Optional JSON configuration file for the generic report.
//!
//! Every key is optional; missing keys keep whatever the builder already
//! holds, so command-line flags applied afterwards still win.
//!
//! ```json
//! {
//!   "ignored_dirs": ["target", ".git"],
//!   "text_extensions": [".rs", ".toml", ".md"],
//!   "exclude_patterns": ["**/*.lock"],
//!   "max_file_size": 1048576,
//!   "follow_links": false
//! }
//! ```

use crate::error::ProjdocError;
use crate::options::ReportBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub ignored_dirs: Option<Vec<String>>,
    pub text_extensions: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
    pub follow_links: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjdocError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ProjdocError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| ProjdocError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply(self, mut builder: ReportBuilder) -> ReportBuilder {
        if let Some(dirs) = self.ignored_dirs {
            builder = builder.ignored_dirs(dirs);
        }
        if let Some(extensions) = self.text_extensions {
            builder = builder.text_extensions(extensions);
        }
        if let Some(patterns) = self.exclude_patterns {
            builder = builder.exclude_patterns(patterns);
        }
        if let Some(limit) = self.max_file_size {
            builder = builder.file_size_limit(Some(limit));
        }
        if let Some(follow) = self.follow_links {
            builder = builder.follow_links(follow);
        }
        builder
    }
}
