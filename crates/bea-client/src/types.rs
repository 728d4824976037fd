//! Query descriptors and result types for the BEA API.

use polars::prelude::{DataFrame, StringChunked};

/// A BEA API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeaMethod {
    /// Datasets currently offered.
    DataSetList,
    /// Required and optional parameters of a dataset.
    ParameterList,
    /// Valid values of one parameter.
    ParameterValues,
    /// Valid values of one parameter, filtered by other parameters.
    ParameterValuesFiltered,
    /// Data for a dataset.
    Data,
}

impl BeaMethod {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DataSetList => "GetDataSetList",
            Self::ParameterList => "GetParameterList",
            Self::ParameterValues => "GetParameterValues",
            Self::ParameterValuesFiltered => "GetParameterValuesFiltered",
            Self::Data => "GetData",
        }
    }

    /// Name of the `Results` node holding the records this method returns.
    ///
    /// `GetData` results span several nodes; this is the primary one.
    #[must_use]
    pub const fn result_node(&self) -> &'static str {
        match self {
            Self::DataSetList => "Dataset",
            Self::ParameterList => "Parameter",
            Self::ParameterValues | Self::ParameterValuesFiltered => "ParamValue",
            Self::Data => "Data",
        }
    }
}

/// Everything that determines a request URL apart from the credential.
///
/// Parameters are kept in insertion order and appended to the query string
/// in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaQuery {
    method: BeaMethod,
    dataset: Option<String>,
    params: Vec<(String, String)>,
}

impl BeaQuery {
    /// Start a query for the given method.
    #[must_use]
    pub const fn new(method: BeaMethod) -> Self {
        Self {
            method,
            dataset: None,
            params: Vec::new(),
        }
    }

    /// Set the dataset (`datasetname`).
    #[must_use]
    pub fn dataset(mut self, name: impl Into<String>) -> Self {
        self.dataset = Some(name.into());
        self
    }

    /// Append one named parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append several named parameters, preserving iteration order.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The method this query invokes.
    #[must_use]
    pub const fn method(&self) -> BeaMethod {
        self.method
    }

    /// The dataset name, if set.
    #[must_use]
    pub fn dataset_name(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Named parameters in the order they were added.
    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Result of a `GetData` call.
///
/// Dimensions describe the columns of `data`; each data record carries one
/// attribute per dimension. Notes are footnotes referenced from other nodes
/// through a `NoteRef` attribute.
#[derive(Debug, Clone)]
pub struct BeaData {
    /// Data records, one row per observation.
    pub data: DataFrame,
    /// Footnotes (`NoteRef`, `NoteText`). May be empty.
    pub notes: DataFrame,
    /// Dimension metadata (`Ordinal`, `Name`, `DataType`, `IsValue`). May be empty.
    pub dimensions: DataFrame,
}

impl BeaData {
    /// Name of the dimension holding the statistic of interest (`IsValue = 1`).
    #[must_use]
    pub fn value_dimension(&self) -> Option<String> {
        let names = text_column(&self.dimensions, "Name")?;
        let flags = text_column(&self.dimensions, "IsValue")?;
        names
            .into_iter()
            .zip(flags)
            .find(|(_, flag)| *flag == Some("1"))
            .and_then(|(name, _)| name.map(str::to_string))
    }

    /// Text of the footnote with the given `NoteRef`.
    #[must_use]
    pub fn note_text(&self, note_ref: &str) -> Option<String> {
        let refs = text_column(&self.notes, "NoteRef")?;
        let texts = text_column(&self.notes, "NoteText")?;
        refs.into_iter()
            .zip(texts)
            .find(|(r, _)| *r == Some(note_ref))
            .and_then(|(_, text)| text.map(str::to_string))
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
    df.column(name).ok()?.as_materialized_series().str().ok()
}
