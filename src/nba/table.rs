//! Tabular result sets and column resolution.
//!
//! The stats provider returns every query as an envelope of named result
//! sets, each an ordered header list plus row lists of heterogeneous JSON
//! cells. Column names vary between response shapes (`PTS` vs `PTS_PG`,
//! `OPP_PTS` vs `PTS`), so all header lookups go through [`ResultTable::resolve`]
//! with an ordered candidate list; downstream code never searches headers
//! itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named result set: headers plus rows.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResultTable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(rename = "rowSet", default)]
    pub rows: Vec<Vec<Value>>,
}

/// Resolved handle to a column within one table. Only meaningful for the
/// table that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column(usize);

impl ResultTable {
    /// Return the first candidate column present, or `None`.
    ///
    /// Absence is not an error here; required-column policy lives with the
    /// caller (rankings fail fast, game normalizers degrade to defaults).
    pub fn resolve(&self, candidates: &[&str]) -> Option<Column> {
        candidates
            .iter()
            .find_map(|c| self.headers.iter().position(|h| h == c))
            .map(Column)
    }

    /// Raw cell lookup; `None` when the column is absent or the row is short.
    pub fn cell<'a>(&self, row: &'a [Value], col: Option<Column>) -> Option<&'a Value> {
        row.get(col?.0)
    }

    /// Numeric extraction with a default. Cells may be JSON numbers, numeric
    /// strings, or null; anything unparseable yields the default.
    pub fn numeric(&self, row: &[Value], col: Option<Column>, default: f64) -> f64 {
        match self.cell(row, col) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Integer extraction, truncating; missing/unparseable yields the default.
    pub fn integer(&self, row: &[Value], col: Option<Column>, default: i64) -> i64 {
        match self.cell(row, col) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// String extraction; missing or non-string yields `None`.
    pub fn text(&self, row: &[Value], col: Option<Column>) -> Option<String> {
        match self.cell(row, col) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a minutes cell into decimal minutes.
///
/// Box scores report `"34:12"` (minutes:seconds); season tables report plain
/// numbers. Unparseable input is `None`, not zero, so a DNP stays
/// distinguishable from a zero-minute stint.
pub fn parse_minutes(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if let Some((m, sec)) = s.split_once(':') {
                let minutes: i64 = m.trim().parse().ok()?;
                let seconds: i64 = sec.trim().parse().ok()?;
                Some(((minutes as f64 + seconds as f64 / 60.0) * 100.0).round() / 100.0)
            } else {
                s.trim().parse().ok()
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(headers: &[&str], rows: Vec<Vec<Value>>) -> ResultTable {
        ResultTable {
            name: "Test".into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn resolve_prefers_earlier_candidates() {
        let t = table(&["TEAM_ID", "PTS", "PTS_PG"], vec![]);
        let col = t.resolve(&["PTS", "PTS_PG"]).unwrap();
        assert_eq!(t.headers[1], "PTS");
        assert_eq!(col, t.resolve(&["PTS"]).unwrap());
    }

    #[test]
    fn resolve_falls_through_to_later_candidates() {
        let t = table(&["TEAM_ID", "PTS_PG"], vec![]);
        assert!(t.resolve(&["PTS", "PTS_PG"]).is_some());
        assert!(t.resolve(&["OPP_PTS"]).is_none());
    }

    #[test]
    fn numeric_handles_numbers_strings_and_nulls() {
        let t = table(
            &["A", "B", "C"],
            vec![vec![json!(112.4), json!("0.478"), Value::Null]],
        );
        let row = &t.rows[0];
        assert_eq!(t.numeric(row, t.resolve(&["A"]), 0.0), 112.4);
        assert_eq!(t.numeric(row, t.resolve(&["B"]), 0.0), 0.478);
        assert_eq!(t.numeric(row, t.resolve(&["C"]), 0.0), 0.0);
        assert_eq!(t.numeric(row, t.resolve(&["MISSING"]), -1.0), -1.0);
    }

    #[test]
    fn integer_truncates_floats() {
        let t = table(&["W"], vec![vec![json!(42.0)]]);
        assert_eq!(t.integer(&t.rows[0], t.resolve(&["W"]), 0), 42);
    }

    #[test]
    fn minutes_parse_clock_and_decimal_forms() {
        assert_eq!(parse_minutes(&json!("34:12")), Some(34.2));
        assert_eq!(parse_minutes(&json!("12:30")), Some(12.5));
        assert_eq!(parse_minutes(&json!(31.5)), Some(31.5));
        assert_eq!(parse_minutes(&json!("28")), Some(28.0));
        assert_eq!(parse_minutes(&Value::Null), None);
        assert_eq!(parse_minutes(&json!("DNP")), None);
    }
}
