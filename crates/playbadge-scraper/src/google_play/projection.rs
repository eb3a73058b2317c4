//! Projecting the parsed data array onto a flat record

use playbadge_core::{Field, PlayStoreRecord, FALLBACK_VALUE};
use serde_json::{Number, Value};
use tracing::debug;

/// Index path of every field inside the data array
pub static FIELD_PATHS: [(Field, &[usize]); 14] = [
    (Field::Name, &[1, 2, 0]),
    (Field::Installs, &[1, 2, 13, 0]),
    (Field::TotalInstalls, &[1, 2, 13, 2]),
    (Field::ShortInstalls, &[1, 2, 13, 3]),
    (Field::Version, &[1, 2, 140, 0, 0]),
    (Field::Updated, &[1, 2, 145, 0, 0]),
    (Field::TargetSdk, &[1, 2, 140, 1, 0, 0, 0]),
    (Field::TargetAndroid, &[1, 2, 140, 1, 0, 0, 1]),
    (Field::MinSdk, &[1, 2, 140, 1, 1, 0, 0, 0]),
    (Field::Android, &[1, 2, 140, 1, 1, 0, 0, 1]),
    (Field::Rating, &[1, 2, 51, 0, 0]),
    (Field::FloatRating, &[1, 2, 51, 0, 1]),
    (Field::Friendly, &[1, 2, 9, 0]),
    (Field::Published, &[1, 2, 10, 0]),
];

/// Index path for `field`
pub fn field_path(field: Field) -> &'static [usize] {
    FIELD_PATHS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, path)| *path)
        .unwrap_or(&[])
}

/// Follow `path` through nested arrays.
///
/// `None` when any step is out of range, lands on a non-array, or the
/// final value is `null`.
pub fn lookup<'a>(root: &'a Value, path: &[usize]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |value, &index| value.get(index))
        .filter(|value| !value.is_null())
}

/// Build the record, substituting the fallback for each missing field
pub fn project_record(data: &Value) -> PlayStoreRecord {
    PlayStoreRecord::from_fields(|field| match lookup(data, field_path(field)) {
        Some(value) => render_field(field, value),
        None => {
            debug!(%field, "field missing from listing data");
            FALLBACK_VALUE.to_string()
        }
    })
}

fn render_field(field: Field, value: &Value) -> String {
    match (field, value) {
        (Field::TotalInstalls, Value::Number(n)) => group_thousands(n),
        _ => render_value(value),
    }
}

/// Text form of a JSON value
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => FALLBACK_VALUE.to_string(),
        other => other.to_string(),
    }
}

/// Format a number with `,` between groups of three integer digits.
///
/// Fractions are rounded to at most three digits.
pub fn group_thousands(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        return group_digits(&u.to_string());
    }
    if let Some(i) = n.as_i64() {
        return format!("-{}", group_digits(&i.unsigned_abs().to_string()));
    }

    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    let rounded = format!("{:.3}", f.abs());
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    let sign = if f < 0.0 && trimmed != "0" { "-" } else { "" };

    match trimmed.split_once('.') {
        Some((int, frac)) => format!("{}{}.{}", sign, group_digits(int), frac),
        None => format!("{}{}", sign, group_digits(trimmed)),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
