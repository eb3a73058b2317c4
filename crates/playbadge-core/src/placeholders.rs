//! `$token` placeholders accepted in badge labels and messages

use crate::types::{Field, PlayStoreRecord};

/// A token recognised in label/message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Literal token, e.g. `$version`
    pub token: &'static str,

    /// Record field the token is replaced with
    pub field: Field,

    /// Human-readable description shown on the index page
    pub description: &'static str,
}

/// All placeholders, in substitution order
pub static PLACEHOLDERS: [Placeholder; 14] = [
    Placeholder { token: "$version", field: Field::Version, description: "App version" },
    Placeholder { token: "$installs", field: Field::Installs, description: "Installs" },
    Placeholder { token: "$totalinstalls", field: Field::TotalInstalls, description: "Precise installs" },
    Placeholder { token: "$shortinstalls", field: Field::ShortInstalls, description: "Shorter installs" },
    Placeholder { token: "$updated", field: Field::Updated, description: "Last update" },
    Placeholder { token: "$android", field: Field::Android, description: "Required min. Android version" },
    Placeholder { token: "$targetandroid", field: Field::TargetAndroid, description: "Target Android version" },
    Placeholder { token: "$minsdk", field: Field::MinSdk, description: "Required min. SDK" },
    Placeholder { token: "$targetsdk", field: Field::TargetSdk, description: "Target SDK" },
    Placeholder { token: "$rating", field: Field::Rating, description: "Rating" },
    Placeholder { token: "$floatrating", field: Field::FloatRating, description: "Precise rating" },
    Placeholder { token: "$name", field: Field::Name, description: "Name" },
    Placeholder { token: "$friendly", field: Field::Friendly, description: "Content Rating" },
    Placeholder { token: "$published", field: Field::Published, description: "First published" },
];

/// Replace the first occurrence of each token in `template`.
///
/// Tokens are visited in [`PLACEHOLDERS`] order and each one is replaced
/// at most once, so `"$version $version"` keeps its second token. A value
/// inserted by an earlier token can be matched by a later one.
pub fn substitute(template: &str, record: &PlayStoreRecord) -> String {
    PLACEHOLDERS.iter().fold(template.to_string(), |text, placeholder| {
        if text.contains(placeholder.token) {
            text.replacen(placeholder.token, record.get(placeholder.field), 1)
        } else {
            text
        }
    })
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
