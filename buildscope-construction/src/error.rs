use buildscope_types::FrameworkParseError;
use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("read project file {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("xml parse error in {path}: {message}")]
    Xml { path: Utf8PathBuf, message: String },

    /// The document parsed but contains no `Project` element.
    #[error("unrecognized project file format: {path}")]
    Format { path: Utf8PathBuf },

    #[error(transparent)]
    Framework(#[from] FrameworkParseError),
}

impl ProjectFileError {
    /// True when the document itself could not be understood (as opposed to an I/O failure).
    pub fn is_format_error(&self) -> bool {
        matches!(self, ProjectFileError::Xml { .. } | ProjectFileError::Format { .. })
    }
}
