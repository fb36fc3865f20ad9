//! Catalog API response types.
//!
//! These types model the `GET /artworks` listing of the Art Institute of
//! Chicago public API. Only the fields the table displays are requested.

use serde::{Deserialize, Serialize};

/// The record fields requested from the listing endpoint.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Unique artwork identifier as assigned by the catalog.
pub type ArtworkId = u64;

/// A single artwork record.
///
/// Records are immutable once fetched; identity is the `id` field. The
/// catalog returns `null` for many descriptive fields, so everything except
/// the id is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// The catalog identifier.
    pub id: ArtworkId,
    /// The artwork title.
    #[serde(default)]
    pub title: Option<String>,
    /// Where the artwork was made.
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Artist name, nationality and dates as one display string.
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscriptions text.
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// Earliest year associated with the artwork.
    #[serde(default)]
    pub date_start: Option<i32>,
    /// Latest year associated with the artwork.
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Create a record with only an id and title set.
    #[cfg(test)]
    pub fn new(id: ArtworkId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Get the title, or an empty string.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Get the place of origin, or an empty string.
    pub fn place_of_origin(&self) -> &str {
        self.place_of_origin.as_deref().unwrap_or("")
    }

    /// Get the artist display string, or an empty string.
    pub fn artist_display(&self) -> &str {
        self.artist_display.as_deref().unwrap_or("")
    }

    /// Get the inscriptions, or an empty string.
    pub fn inscriptions(&self) -> &str {
        self.inscriptions.as_deref().unwrap_or("")
    }

    /// Get the start year formatted for display.
    pub fn date_start_display(&self) -> String {
        self.date_start.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Get the end year formatted for display.
    pub fn date_end_display(&self) -> String {
        self.date_end.map(|y| y.to_string()).unwrap_or_default()
    }
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of records in the collection.
    pub total: u64,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Zero-based offset of the first record.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Total number of pages at this limit.
    #[serde(default)]
    pub total_pages: Option<u64>,
    /// The 1-based page that was returned.
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// One page of artworks.
///
/// Returned by `GET /artworks?page={p}&limit={n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkPage {
    /// Records in server order.
    pub data: Vec<Artwork>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl ArtworkPage {
    /// Create a page from records and a total count.
    #[cfg(test)]
    pub fn new(data: Vec<Artwork>, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination {
                total,
                limit: None,
                offset: None,
                total_pages: None,
                current_page: None,
            },
        }
    }

    /// Total number of records reported by the server.
    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    /// Check if the page contains no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pagination": {
            "total": 129884,
            "limit": 2,
            "offset": 0,
            "total_pages": 64942,
            "current_page": 1,
            "next_url": "https://api.artic.edu/api/v1/artworks?page=2&limit=2"
        },
        "data": [
            {
                "id": 4,
                "title": "Priest and Boy",
                "place_of_origin": "Chicago",
                "artist_display": "Lawrence Carmichael Earle\nAmerican, 1845-1921",
                "inscriptions": null,
                "date_start": 1880,
                "date_end": 1890
            },
            {
                "id": 656,
                "title": "Skyscraper",
                "place_of_origin": null,
                "artist_display": "Unknown",
                "date_start": null,
                "date_end": null
            }
        ],
        "info": { "license_text": "..." }
    }"#;

    #[test]
    fn test_parse_listing_page() {
        let page: ArtworkPage = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(page.total(), 129884);
        assert_eq!(page.pagination.current_page, Some(1));
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, 4);
        assert_eq!(page.data[0].title(), "Priest and Boy");
        assert_eq!(page.data[0].date_start, Some(1880));
    }

    #[test]
    fn test_null_and_missing_fields_render_empty() {
        let page: ArtworkPage = serde_json::from_str(SAMPLE).unwrap();
        let art = &page.data[1];
        assert_eq!(art.place_of_origin(), "");
        assert_eq!(art.inscriptions(), "");
        assert_eq!(art.date_start_display(), "");
        assert_eq!(art.date_end_display(), "");
    }

    #[test]
    fn test_missing_pagination_is_malformed() {
        let body = r#"{ "data": [] }"#;
        assert!(serde_json::from_str::<ArtworkPage>(body).is_err());
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let body = r#"{ "data": [{ "title": "No id" }], "pagination": { "total": 1 } }"#;
        assert!(serde_json::from_str::<ArtworkPage>(body).is_err());
    }

    #[test]
    fn test_artwork_new() {
        let art = Artwork::new(7, "Seven");
        assert_eq!(art.id, 7);
        assert_eq!(art.title(), "Seven");
        assert_eq!(art.artist_display(), "");
    }

    #[test]
    fn test_field_list_matches_columns() {
        assert_eq!(ARTWORK_FIELDS.len(), 7);
        assert_eq!(ARTWORK_FIELDS[0], "id");
    }
}
