//! Catalog sources: a local JSON file or (with the `http` feature) a
//! remote shop endpoint. The pipeline itself never fetches anything.

use std::path::Path;

use crate::catalog::ShopCatalog;
use crate::error::{Error, Result};

/// Read an already-fetched catalog from a JSON file.
pub fn read_catalog_file(path: &Path) -> Result<ShopCatalog> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| Error::CatalogData(format!("{}: {e}", path.display())))
}

/// Fetch the catalog from a shop endpoint. `token` is sent as the
/// `Authorization` header when present. No retries; a failed fetch is the
/// caller's problem to reschedule.
#[cfg(feature = "http")]
pub fn fetch_catalog(endpoint: &str, token: Option<&str>) -> Result<ShopCatalog> {
    use log::info;

    info!("fetching catalog from {endpoint}");
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| Error::Network(e.to_string()))?;

    let mut request = client.get(endpoint);
    if let Some(token) = token {
        request = request.header(reqwest::header::AUTHORIZATION, token);
    }
    let response = request.send().map_err(|e| Error::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "unexpected status code: {}",
            response.status()
        )));
    }
    let body = response.text().map_err(|e| Error::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| Error::CatalogData(format!("{endpoint}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_catalog_file() {
        let dir = std::env::temp_dir().join("shopgrid-source-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shop.json");
        std::fs::write(
            &path,
            r#"{"shop": [{"displayName": "X", "mainType": "emote"}],
                "lastUpdate": {"date": "2024-01-02 00:00:00"}}"#,
        )
        .unwrap();

        let catalog = read_catalog_file(&path).unwrap();
        assert_eq!(catalog.shop.len(), 1);
        assert_eq!(catalog.last_update.date, "2024-01-02 00:00:00");
    }

    #[test]
    fn malformed_json_is_catalog_data_error() {
        let dir = std::env::temp_dir().join("shopgrid-source-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            read_catalog_file(&path),
            Err(Error::CatalogData(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            read_catalog_file(Path::new("/definitely/not/here.json")),
            Err(Error::Io(_))
        ));
    }
}
