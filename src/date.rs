//! Catalog date handling: parsing the feed timestamp and formatting the
//! banner line and output file stem.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// The calendar day a catalog rotation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopDate(NaiveDate);

impl ShopDate {
    /// Parse the feed's `lastUpdate.date` value (`YYYY-MM-DD HH:MM:SS`;
    /// a bare date is accepted too).
    pub fn parse(raw: &str) -> Result<Self> {
        let date_part = raw.split_whitespace().next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| Error::CatalogData(format!("bad catalog date {raw:?}: {e}")))
    }

    /// Banner line drawn under the title.
    pub fn banner_line(&self) -> String {
        format!("DIA {}", self.0.format("%d/%m/%Y"))
    }

    /// File name stem handed to the image sink.
    pub fn file_stem(&self) -> String {
        self.0.format("%d-%m-%Y").to_string()
    }
}
