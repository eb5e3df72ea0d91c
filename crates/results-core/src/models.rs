use serde::{Deserialize, Deserializer};

/// Columns the figure renderer requires in its input table.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "method",
    "delay",
    "execute_horizon",
    "returned_episode_solved",
];

/// One evaluation trial read from a merged results table.
///
/// Numeric fields are `None` when the cell is empty, which happens when the
/// merged shards did not all carry the same columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRow {
    /// Identifier of the evaluated method, e.g. `"vlash"`.
    pub method: String,
    /// Inference delay the trial ran with.
    #[serde(deserialize_with = "deserialize_integer")]
    pub delay: Option<i64>,
    /// Execution horizon the trial ran with.
    #[serde(deserialize_with = "deserialize_integer")]
    pub execute_horizon: Option<i64>,
    /// Outcome in `[0, 1]`; `1.0` means solved.
    #[serde(rename = "returned_episode_solved", deserialize_with = "deserialize_outcome")]
    pub solved: Option<f64>,
}

impl ResultRow {
    /// Build a complete row with a boolean outcome.
    pub fn new(method: impl Into<String>, delay: i64, execute_horizon: i64, solved: bool) -> Self {
        Self {
            method: method.into(),
            delay: Some(delay),
            execute_horizon: Some(execute_horizon),
            solved: Some(if solved { 1.0 } else { 0.0 }),
        }
    }

    /// `true` when no numeric cell was empty.
    pub fn is_complete(&self) -> bool {
        self.delay.is_some() && self.execute_horizon.is_some() && self.solved.is_some()
    }
}

/// A schema-less table: a header row plus records in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

impl RawTable {
    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Index of `column` in the header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

// ── Field parsing ─────────────────────────────────────────────────────────────

/// Parse an integer cell. Integral floats such as `"3.0"` are accepted.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse an outcome cell into `[0, 1]`.
///
/// Accepts `true`/`false` in any case and numbers within `[0, 1]`.
pub fn parse_outcome(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "true" => return Some(1.0),
        "false" => return Some(0.0),
        _ => {}
    }
    let value = trimmed.parse::<f64>().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

// Empty cells become `None`; anything else must parse.

fn deserialize_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_integer(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, found {raw:?}")))
}

fn deserialize_outcome<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_outcome(&raw).map(Some).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "expected a boolean or a number in [0, 1], found {raw:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_rows(data: &str) -> Vec<std::result::Result<ResultRow, csv::Error>> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        reader.deserialize::<ResultRow>().collect()
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" -2 "), Some(-2));
        assert_eq!(parse_integer("4.0"), Some(4));
        assert_eq!(parse_integer("4.5"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("nan"), None);
        assert_eq!(parse_integer("three"), None);
    }

    #[test]
    fn test_parse_outcome() {
        assert_eq!(parse_outcome("True"), Some(1.0));
        assert_eq!(parse_outcome("FALSE"), Some(0.0));
        assert_eq!(parse_outcome("1"), Some(1.0));
        assert_eq!(parse_outcome("0.0"), Some(0.0));
        assert_eq!(parse_outcome("0.25"), Some(0.25));
        assert_eq!(parse_outcome("1.5"), None);
        assert_eq!(parse_outcome("-0.1"), None);
        assert_eq!(parse_outcome("yes"), None);
        assert_eq!(parse_outcome(""), None);
    }

    #[test]
    fn test_deserialize_rows_with_extra_columns() {
        let data = "\
method,seed,delay,execute_horizon,returned_episode_solved
vlash,0,1,4,True
naive,1,2.0,2,0
";
        let rows: Vec<ResultRow> = read_rows(data)
            .into_iter()
            .collect::<std::result::Result<_, _>>()
            .expect("rows parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ResultRow::new("vlash", 1, 4, true));
        assert_eq!(rows[1], ResultRow::new("naive", 2, 2, false));
    }

    #[test]
    fn test_deserialize_rejects_bad_outcome() {
        let data = "method,delay,execute_horizon,returned_episode_solved\nvlash,1,4,maybe\n";
        let rows = read_rows(data);
        let err = rows[0].as_ref().unwrap_err().to_string();
        assert!(err.contains("maybe"), "{err}");
    }

    #[test]
    fn test_deserialize_empty_cells_are_missing() {
        let data = "method,delay,execute_horizon,returned_episode_solved\nvlash,,4,1\nnaive,2, ,\n";
        let rows: Vec<ResultRow> = read_rows(data)
            .into_iter()
            .collect::<std::result::Result<_, _>>()
            .expect("empty cells parse");

        assert_eq!(rows[0].delay, None);
        assert_eq!(rows[0].execute_horizon, Some(4));
        assert!(!rows[0].is_complete());
        assert_eq!(rows[1].execute_horizon, None);
        assert_eq!(rows[1].solved, None);
        assert!(ResultRow::new("vlash", 1, 1, true).is_complete());
    }

    #[test]
    fn test_deserialize_rejects_non_integer() {
        let data = "method,delay,execute_horizon,returned_episode_solved\nvlash,one,4,1\n";
        let rows = read_rows(data);
        let err = rows[0].as_ref().unwrap_err().to_string();
        assert!(err.contains("one"), "{err}");
    }

    #[test]
    fn test_raw_table_helpers() {
        let table = RawTable {
            columns: vec!["a".to_string(), "b".to_string()],
            records: vec![
                csv::StringRecord::from(vec!["1", "2"]),
                csv::StringRecord::from(vec!["3", "4"]),
            ],
        };
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("c"), None);
    }
}
