use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub sources: HashMap<String, SourceConfig>,
    #[serde(default)]
    pub options: ReconOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub file: String,
    #[serde(default)]
    pub format: SourceFormat,
    #[serde(default)]
    pub columns: Option<ColumnMapping>,
    #[serde(default)]
    pub filter: Option<RowFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Master,
    Reported,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Master => write!(f, "master"),
            Self::Reported => write!(f, "reported"),
        }
    }
}

/// How a roster file is read: `list` is free text split on
/// newline/comma/semicolon; `csv` uses a header-mapped facility column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    List,
    Csv,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self::List
    }
}

// ---------------------------------------------------------------------------
// Column mapping + Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub facility: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Options + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconOptions {
    /// Deduplicate both rosters (by normalized name, first spelling wins)
    /// before reconciliation.
    #[serde(default)]
    pub deduplicate: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let masters = self.count_kind(SourceKind::Master);
        let reported = self.count_kind(SourceKind::Reported);
        if masters != 1 || reported != 1 {
            return Err(ReconError::ConfigValidation(format!(
                "exactly one master and one reported source are required, found {masters} master / {reported} reported"
            )));
        }

        for (source_name, source) in &self.sources {
            match source.format {
                SourceFormat::Csv => {
                    if source.columns.is_none() {
                        return Err(ReconError::ConfigValidation(format!(
                            "source '{source_name}': csv format requires a [sources.{source_name}.columns] table"
                        )));
                    }
                }
                SourceFormat::List => {
                    if source.columns.is_some() {
                        return Err(ReconError::ConfigValidation(format!(
                            "source '{source_name}': columns only apply to csv format"
                        )));
                    }
                    if source.filter.is_some() {
                        return Err(ReconError::ConfigValidation(format!(
                            "source '{source_name}': filter requires csv format"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// The (name, config) of the single source of `kind`. Validation
    /// guarantees exactly one exists.
    pub fn source_of_kind(&self, kind: SourceKind) -> Result<(&str, &SourceConfig), ReconError> {
        self.sources
            .iter()
            .find(|(_, s)| s.kind == kind)
            .map(|(name, s)| (name.as_str(), s))
            .ok_or_else(|| ReconError::UnknownSource(format!("no source of kind '{kind}'")))
    }

    fn count_kind(&self, kind: SourceKind) -> usize {
        self.sources.values().filter(|s| s.kind == kind).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
