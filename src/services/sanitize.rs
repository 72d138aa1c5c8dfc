use unicode_normalization::UnicodeNormalization;

use crate::services::extractor::DocumentKind;

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3",
];

/// Stem used when nothing of the uploaded name survives sanitization.
pub const FALLBACK_STEM: &str = "document";

/// Reduces a client supplied file name to something safe to store.
///
/// Directory components are dropped and accented letters are decomposed to
/// their ASCII base letter. Whitespace runs become `_`, and only ASCII
/// letters, digits, `_`, `.` and `-` are kept. Leading and trailing dots and
/// underscores are stripped so the result can never be `..` or a hidden
/// file. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or("");

    let ascii: String = base.nfkd().filter(char::is_ascii).collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    let device = trimmed.split('.').next().unwrap_or("").to_ascii_uppercase();
    if !trimmed.is_empty() && WINDOWS_DEVICE_NAMES.contains(&device.as_str()) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Storage name for an accepted upload: the whole name is sanitized, then its
/// extension is replaced by the validated one.
pub fn storage_name(original: &str, kind: DocumentKind) -> String {
    let safe = secure_filename(original);
    let extension = kind.extension();

    let lowered = safe.to_ascii_lowercase();
    let stem = if lowered == extension {
        ""
    } else if lowered.ends_with(&format!(".{}", extension)) {
        &safe[..safe.len() - extension.len() - 1]
    } else {
        safe.as_str()
    };

    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    format!("{}.{}", stem, extension)
}
