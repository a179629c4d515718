// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(String),
    Image(String),
    Import(ImportError),
}

/// Failures specific to the gallery importer.
/// Kept separate so the CLI can report them without string matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The input folder does not exist or is not a directory.
    InputNotFound(String),

    /// The input folder contains no supported image files.
    NoImages(String),

    /// The target season is missing from the catalog.
    UnknownSeason(String),

    /// The `--date` value is not a `YYYY-MM-DD` date.
    InvalidDate(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::InputNotFound(path) => write!(f, "Input folder not found: {}", path),
            ImportError::NoImages(path) => write!(f, "No supported image files found in {}", path),
            ImportError::UnknownSeason(season) => {
                write!(f, "Season {} not found in catalog", season)
            }
            ImportError::InvalidDate(date) => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD", date)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Import(e) => write!(f, "Import Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ImportError> for Error {
    fn from(err: ImportError) -> Self {
        Error::Import(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn json_error_becomes_catalog_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn import_error_wraps_and_displays() {
        let err: Error = ImportError::UnknownSeason("9".into()).into();
        assert_eq!(
            format!("{}", err),
            "Import Error: Season 9 not found in catalog"
        );
    }

    #[test]
    fn invalid_date_mentions_expected_format() {
        let err = ImportError::InvalidDate("15/12/2024".into());
        assert!(format!("{}", err).contains("YYYY-MM-DD"));
    }
}
