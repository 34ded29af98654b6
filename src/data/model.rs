//! Show records before and after cleaning.

/// A cell of a numeric column as read from the source table.
///
/// The value stays untyped until the last cleaning step so that rows which
/// are dropped earlier never have to be converted.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Number(f64),
    Text(String),
}

/// Cell texts read as missing rather than as values.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl RawValue {
    /// Classify a text cell. NA markers and text that parses to NaN are missing.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if NA_TOKENS.contains(&text) || text.parse::<f64>().is_ok_and(f64::is_nan) {
            RawValue::Missing
        } else {
            RawValue::Text(text.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

/// One row of the source table, restricted to the columns we use.
#[derive(Debug, Clone, PartialEq)]
pub struct RawShow {
    pub title: String,
    pub year: i64,
    pub episodes: RawValue,
}

impl RawShow {
    pub fn new(title: impl Into<String>, year: i64, episodes: RawValue) -> Self {
        Self {
            title: title.into(),
            year,
            episodes,
        }
    }
}

/// A cleaned show record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub title: String,
    pub year: i64,
    pub episodes: i64,
}

impl From<Show> for RawShow {
    fn from(show: Show) -> Self {
        RawShow {
            title: show.title,
            year: show.year,
            episodes: RawValue::Number(show.episodes as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_markers_are_missing() {
        for token in ["NA", "N/A", "nan", "NaN", "NULL", "<NA>", "#N/A", " NA ", "NAN", ""] {
            assert_eq!(RawValue::from_text(token), RawValue::Missing, "{token:?}");
        }
    }

    #[test]
    fn other_text_is_kept_trimmed() {
        assert_eq!(RawValue::from_text(" 12 "), RawValue::Text("12".to_string()));
        assert_eq!(RawValue::from_text("many"), RawValue::Text("many".to_string()));
        assert_eq!(RawValue::from_text("inf"), RawValue::Text("inf".to_string()));
    }
}
