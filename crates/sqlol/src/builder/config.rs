//! Statement builder configuration.

use crate::case::camel_to_snake;

/// How record column names become SQL column names in INSERT and UPDATE
/// column lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Naming {
    /// Use the record's column names as declared.
    #[default]
    Preserve,
    /// Convert CamelCase names to snake_case.
    SnakeCase,
}

impl Naming {
    pub fn apply(self, name: &str) -> String {
        match self {
            Naming::Preserve => name.to_string(),
            Naming::SnakeCase => camel_to_snake(name),
        }
    }
}

/// Configuration shared by the INSERT and UPDATE builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Column naming convention. Default is [`Naming::Preserve`].
    pub naming: Naming,
    /// Columns left out when INSERT derives its column list from a record.
    pub insert_exclude: Vec<String>,
    /// Columns left out when UPDATE derives its column list from a record.
    pub update_exclude: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            naming: Naming::Preserve,
            insert_exclude: vec!["id".into(), "updated_by".into(), "updated_at".into()],
            update_exclude: vec!["created_by".into(), "created_at".into()],
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column naming convention.
    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Replace the INSERT exclusion list.
    pub fn with_insert_exclude<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_exclude = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the UPDATE exclusion list.
    pub fn with_update_exclude<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_exclude = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Record columns mapped to SQL names, minus an exclusion list.
    ///
    /// Returns `(record column, sql column)` pairs; the exclusion list is
    /// matched against the SQL name.
    pub(crate) fn column_pairs(&self, columns: &[String], exclude: &[String]) -> Vec<(String, String)> {
        columns
            .iter()
            .map(|c| (c.clone(), self.naming.apply(c)))
            .filter(|(_, sql)| !exclude.iter().any(|e| e == sql))
            .collect()
    }
}
