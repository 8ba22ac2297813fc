use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// Placeholder for optional fields that are absent from the source data
pub const NOT_AVAILABLE: &str = "N/A";

/// Raw catalog row as it appears in the source data
///
/// Column names follow the spreadsheet export the catalog comes from. Every column is
/// optional and scalar cells (numbers, booleans) are read as strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MovieRow {
    #[serde(rename = "Movie Title", default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "lenient_string")]
    pub genre: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(rename = "Duration", default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(rename = "Cast", default, deserialize_with = "lenient_string")]
    pub cast: Option<String>,
    #[serde(rename = "img", default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar cell, got {}",
            other
        ))),
    }
}

/// A single movie in the catalog
///
/// Created once when the catalog is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// Unique lookup key, empty if the source row had no title
    pub title: String,
    /// Genre tags, empty if the source row had none
    pub genre: String,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub cast: Option<String>,
    /// Poster URL, only kept when it is an absolute http(s) URL
    pub image: Option<Url>,
}

impl From<MovieRow> for MovieRecord {
    fn from(row: MovieRow) -> Self {
        let image = row.image.as_deref().and_then(parse_image_url);

        Self {
            title: row.title.unwrap_or_default(),
            genre: row.genre.unwrap_or_default(),
            rating: row.rating,
            duration: row.duration,
            cast: row.cast,
            image,
        }
    }
}

/// Parses an image cell, rejecting relative paths and non-http(s) schemes
fn parse_image_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// Recommendation result record returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub title: String,
    pub rating: String,
    pub duration: String,
    pub genre: String,
    pub cast: String,
    pub image: Option<String>,
}

impl From<&MovieRecord> for MovieResponse {
    fn from(movie: &MovieRecord) -> Self {
        let or_na = |field: &Option<String>| {
            field
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        Self {
            title: movie.title.clone(),
            rating: or_na(&movie.rating),
            duration: or_na(&movie.duration),
            genre: movie.genre.clone(),
            cast: or_na(&movie.cast),
            image: movie.image.as_ref().map(Url::to_string),
        }
    }
}
