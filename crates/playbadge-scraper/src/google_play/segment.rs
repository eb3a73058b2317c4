//! Locating the embedded data blob inside listing page HTML
//!
//! The page embeds several `AF_initDataCallback({key: ..., data: [...],
//! sideChannel: {}});` calls in script tags. None of this is valid
//! standalone JSON or parseable HTML, so the blob is cut out with plain
//! substring searches:
//!
//! 1. split on [`CALLBACK_MARKER`], drop everything before the first one
//! 2. cut each candidate at the first `</script>`
//! 3. pick the first candidate containing `["<package>"],`
//! 4. take the text between `data:` and `sideChannel:`, trimmed, minus
//!    its trailing comma
//!
//! Step 3 is a correlation heuristic. If several blocks mention the
//! package, the first one wins even when a later one is the real listing.

use tracing::debug;

use crate::error::{ExtractionError, Result};

/// Opens every data callback block
pub const CALLBACK_MARKER: &str = "AF_initDataCallback({";

const SCRIPT_END: &str = "</script>";
const DATA_KEY: &str = "data:";
const SIDE_CHANNEL_KEY: &str = "sideChannel:";

/// Candidate segments: text after each marker, up to its `</script>`
pub fn candidate_segments(html: &str) -> impl Iterator<Item = &str> {
    html.split(CALLBACK_MARKER)
        .skip(1)
        .map(|part| part.split_once(SCRIPT_END).map_or(part, |(head, _)| head))
}

/// Cut the JSON text of the data blob belonging to `package`
pub fn carve_data_blob<'a>(html: &'a str, package: &str) -> Result<&'a str> {
    let needle = format!("[\"{}\"],", package);
    let mut candidates = candidate_segments(html).peekable();

    if candidates.peek().is_none() {
        return Err(ExtractionError::NoCallbackBlocks);
    }

    let (index, segment) = candidates
        .enumerate()
        .find(|(_, segment)| segment.contains(&needle))
        .ok_or_else(|| ExtractionError::NoDataSegment {
            package: package.to_string(),
        })?;
    debug!(package, index, "selected data callback block");

    let (_, after_key) =
        segment
            .split_once(DATA_KEY)
            .ok_or_else(|| ExtractionError::MissingDataKey {
                package: package.to_string(),
            })?;

    let data = after_key
        .split_once(SIDE_CHANNEL_KEY)
        .map_or(after_key, |(data, _)| data)
        .trim();

    Ok(data.strip_suffix(',').unwrap_or(data))
}
