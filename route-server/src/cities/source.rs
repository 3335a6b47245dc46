//! Where the city dataset comes from.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::CityDataError;

/// Dataset compiled into the binary.
const EMBEDDED_CITIES: &str = include_str!("../../data/cities.json");

/// Timeout for fetching a remote dataset.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A read-only source of city records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CitySource {
    /// The dataset shipped with the binary.
    #[default]
    Embedded,

    /// A JSON file on disk.
    File(PathBuf),

    /// A JSON document served over HTTP(S).
    Url(String),
}

impl CitySource {
    /// Read the raw dataset text.
    pub async fn read(&self) -> Result<String, CityDataError> {
        match self {
            CitySource::Embedded => Ok(EMBEDDED_CITIES.to_string()),
            CitySource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CityDataError::Io {
                    path: path.clone(),
                    source,
                }),
            CitySource::Url(url) => fetch(url).await,
        }
    }
}

impl fmt::Display for CitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitySource::Embedded => f.write_str("embedded dataset"),
            CitySource::File(path) => write!(f, "file {}", path.display()),
            CitySource::Url(url) => write!(f, "url {url}"),
        }
    }
}

/// Fetch the dataset body from a URL.
async fn fetch(url: &str) -> Result<String, CityDataError> {
    let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

    let response = http.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CityDataError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn embedded_is_json_array() {
        let text = CitySource::Embedded.read().await.unwrap();
        assert!(text.trim_start().starts_with('['));
    }

    #[tokio::test]
    async fn reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.json");
        std::fs::write(&path, r#"[{"city": "Kyiv", "lat": "50.45", "lng": "30.52"}]"#).unwrap();

        let text = CitySource::File(path).read().await.unwrap();
        assert!(text.contains("Kyiv"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = CitySource::File(PathBuf::from("/nonexistent/cities.json"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, CityDataError::Io { .. }));
    }

    #[test]
    fn display() {
        assert_eq!(CitySource::Embedded.to_string(), "embedded dataset");
        assert_eq!(
            CitySource::File(PathBuf::from("data/cities.json")).to_string(),
            "file data/cities.json"
        );
        assert_eq!(
            CitySource::Url("http://localhost/cities.json".into()).to_string(),
            "url http://localhost/cities.json"
        );
    }

    #[test]
    fn default_is_embedded() {
        assert_eq!(CitySource::default(), CitySource::Embedded);
    }
}
