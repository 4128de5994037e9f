//! Value commit pipeline: masking and numeric coercion.
//!
//! Raw editor output is a string. Before it is compared against the stored
//! value and written back, it passes through [`normalize`]: formula-prefixed
//! input is left untouched, numeric columns coerce empty input, and columns
//! carrying a mask keep the raw numeric form in the data.

use crate::column::{Column, ColumnType};
use crate::value::CellValue;

/// Formula-prefixed input bypasses masking and numeric coercion entirely.
pub fn is_formula(raw: &str) -> bool {
    raw.starts_with('=')
}

/// Group/decimal separators inferred from a mask string.
///
/// `#,##0.00` style masks use `,` for grouping and `.` for decimals;
/// `#.##0,00` style masks are the other way around. When both characters
/// appear, whichever comes later in the mask is the decimal separator.
fn separators(mask: &str) -> (char, char) {
    let dot = mask.rfind('.');
    let comma = mask.rfind(',');
    match (dot, comma) {
        (Some(d), Some(c)) if c > d => ('.', ','),
        (Some(_), Some(_)) => (',', '.'),
        (None, Some(_)) => (',', '.'),
        _ => (',', '.'),
    }
}

/// Extract the numeric value of `raw` under `mask`.
///
/// Strips group separators, currency symbols and spaces, maps the mask's
/// decimal separator to `.`, and applies `%` scaling. Returns `None` when
/// nothing numeric remains, so callers can keep the raw text instead.
pub fn extract_number(raw: &str, mask: &str) -> Option<f64> {
    let (group, decimal) = separators(mask);
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            cleaned.push(ch);
        } else if ch == decimal {
            cleaned.push('.');
        } else if ch == '-' && cleaned.is_empty() {
            cleaned.push('-');
        } else if ch == group {
            // group separator, dropped
        }
        // anything else (currency symbol, space, %) is dropped
    }
    let mut number: f64 = cleaned.parse().ok()?;
    if mask.contains('%') {
        number /= 100.0;
    }
    Some(number)
}

/// Normalize raw text-editor output into the storable value for `column`.
pub fn normalize(column: Option<&Column>, raw: &str) -> CellValue {
    if is_formula(raw) {
        return CellValue::Text(raw.to_string());
    }

    let Some(column) = column else {
        return CellValue::Text(raw.to_string());
    };

    if column.kind == ColumnType::Numeric && raw.is_empty() {
        return if column.allow_empty {
            CellValue::Text(String::new())
        } else {
            CellValue::Number(0.0)
        };
    }

    if let Some(mask) = &column.mask {
        if !raw.is_empty() {
            if let Some(number) = extract_number(raw, mask) {
                return CellValue::Number(number);
            }
            tracing::debug!(raw, mask, "mask extraction produced nothing, keeping raw text");
        }
        return CellValue::Text(raw.to_string());
    }

    if column.kind == ColumnType::Numeric {
        if let Ok(number) = raw.trim().parse::<f64>() {
            return CellValue::Number(number);
        }
    }

    CellValue::Text(raw.to_string())
}
