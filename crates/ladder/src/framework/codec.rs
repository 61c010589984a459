use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::domain::{Assessment, Milestone, TrackId};

/// Escapes everything outside ASCII alphanumerics and a handful of unreserved
/// marks. Commas must be escaped or free-text names would shift the positional
/// fields after them.
const FRAGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serializes an assessment to the share fragment: one decimal milestone per
/// track in fixed order, then the escaped name, then the escaped title.
pub fn encode(assessment: &Assessment) -> String {
    let mut fields: Vec<String> = TrackId::ordered()
        .iter()
        .map(|track| assessment.milestones.get(*track).get().to_string())
        .collect();
    fields.push(utf8_percent_encode(&assessment.name, FRAGMENT_SET).to_string());
    fields.push(utf8_percent_encode(&assessment.title, FRAGMENT_SET).to_string());
    fields.join(",")
}

/// Parses a share fragment back into an assessment.
///
/// Returns `None` only for an absent fragment ("use defaults"). Everything
/// else parses tolerantly: a leading `#` is stripped, malformed numeric fields
/// read as 0, out-of-range values clamp, and missing trailing fields keep
/// their defaults. Shared links from older or newer layouts must keep
/// decoding, so this never fails.
pub fn decode(fragment: &str) -> Option<Assessment> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return None;
    }

    let fields: Vec<&str> = raw.split(',').collect();
    let mut assessment = Assessment::empty();

    for (index, track) in TrackId::ordered().iter().enumerate() {
        let value = fields
            .get(index)
            .and_then(|field| field.trim().parse::<i64>().ok())
            .unwrap_or(0);
        assessment.milestones.set(*track, Milestone::clamped(value));
    }

    let track_count = TrackId::ordered().len();
    if let Some(name) = fields.get(track_count).filter(|field| !field.is_empty()) {
        assessment.name = percent_decode_str(name).decode_utf8_lossy().into_owned();
    }
    if let Some(title) = fields.get(track_count + 1).filter(|field| !field.is_empty()) {
        assessment.title = percent_decode_str(title).decode_utf8_lossy().into_owned();
    }

    Some(assessment)
}
