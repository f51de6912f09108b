//! Content categories and their ordering policy

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named content bucket with its own input directory, artifact and sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Blog,
    Projects,
}

/// One metadata field used to order a collection, newest/largest first
#[derive(Debug, Clone, Copy)]
pub struct SortField {
    pub key: &'static str,
    pub default: SortDefault,
}

/// Value used in place of a missing sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDefault {
    EmptyString,
    False,
}

impl SortDefault {
    pub fn value(self) -> Value {
        match self {
            SortDefault::EmptyString => Value::String(String::new()),
            SortDefault::False => Value::Bool(false),
        }
    }
}

const BLOG_ORDER: &[SortField] = &[SortField {
    key: "publishedDate",
    default: SortDefault::EmptyString,
}];

// featured first, then year
const PROJECTS_ORDER: &[SortField] = &[
    SortField {
        key: "featured",
        default: SortDefault::False,
    },
    SortField {
        key: "year",
        default: SortDefault::EmptyString,
    },
];

impl Category {
    /// Every known category, in the order `render_all` processes them
    pub const ALL: [Category; 2] = [Category::Blog, Category::Projects];

    pub fn name(self) -> &'static str {
        match self {
            Category::Blog => "blog",
            Category::Projects => "projects",
        }
    }

    /// Fields the collection is sorted by, most significant first.
    /// All fields sort descending.
    pub fn sort_fields(self) -> &'static [SortField] {
        match self {
            Category::Blog => BLOG_ORDER,
            Category::Projects => PROJECTS_ORDER,
        }
    }

    /// Categories selected by a name, `all` meaning every category
    pub fn parse_selection(name: &str) -> Result<Vec<Category>, Error> {
        if name.trim().eq_ignore_ascii_case("all") {
            return Ok(Category::ALL.to_vec());
        }
        Ok(vec![name.parse()?])
    }

    /// Artifact file name for this category, from a `:category` pattern
    pub fn artifact_name(self, pattern: &str) -> String {
        pattern.replace(":category", self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blog" => Ok(Category::Blog),
            "projects" => Ok(Category::Projects),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
