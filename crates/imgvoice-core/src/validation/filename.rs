//! Upload filename checks: extension allowlist and storage-key sanitization.

use std::fmt::{Display, Formatter, Result as FmtResult};

pub const MAX_FILENAME_LENGTH: usize = 255;

/// Why an upload form submission was turned away before reaching storage.
///
/// These never produce an error body; the handler redirects back to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    MissingField,
    EmptyFilename,
    DisallowedExtension(String),
    UnsafeFilename,
}

impl Display for UploadRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadRejection::MissingField => write!(f, "file field missing"),
            UploadRejection::EmptyFilename => write!(f, "empty filename"),
            UploadRejection::DisallowedExtension(ext) if ext.is_empty() => {
                write!(f, "filename has no extension")
            }
            UploadRejection::DisallowedExtension(ext) => {
                write!(f, "extension '{}' not allowed", ext)
            }
            UploadRejection::UnsafeFilename => write!(f, "filename empty after sanitization"),
        }
    }
}

/// Lowercased text after the last `.`, if the name has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Case-insensitive extension check against an allowlist of lowercase extensions.
pub fn allowed_file(filename: &str, allowed_extensions: &[String]) -> bool {
    match file_extension(filename) {
        Some(extension) => allowed_extensions.iter().any(|allowed| *allowed == extension),
        None => false,
    }
}

/// Turn a client-supplied filename into a flat, safe storage key.
///
/// Path separators become word breaks, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, dot runs collapse to a single dot and leading or
/// trailing `.`/`_` are stripped. Case is preserved. Returns `None` when nothing
/// usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let spaced: String = filename
        .chars()
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let mut sanitized = String::with_capacity(joined.len());
    for c in joined.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-') {
            continue;
        }
        if c == '.' && sanitized.ends_with('.') {
            continue;
        }
        sanitized.push(c);
    }

    let mut sanitized = sanitized
        .trim_matches(|c| c == '.' || c == '_')
        .to_string();
    if sanitized.len() > MAX_FILENAME_LENGTH {
        sanitized = truncate_keeping_extension(&sanitized);
    }

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Shorten an ASCII name to `MAX_FILENAME_LENGTH`, cutting the stem so the `.{ext}`
/// suffix survives.
fn truncate_keeping_extension(name: &str) -> String {
    let trim = |s: &str| s.trim_end_matches(|c| c == '.' || c == '_').to_string();

    if let Some((stem, extension)) = name.rsplit_once('.') {
        let suffix_len = extension.len() + 1;
        if !stem.is_empty() && !extension.is_empty() && suffix_len < MAX_FILENAME_LENGTH {
            let stem = trim(&stem[..stem.len().min(MAX_FILENAME_LENGTH - suffix_len)]);
            if !stem.is_empty() {
                return format!("{}.{}", stem, extension);
            }
        }
    }

    trim(&name[..MAX_FILENAME_LENGTH])
}

/// Full check of an upload filename; returns the storage key on success.
///
/// The extension is checked on the raw name and again on the sanitized key, so a
/// name such as `.png` (which sanitizes to `png`) does not slip through without one.
pub fn validate_upload_filename(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, UploadRejection> {
    if filename.is_empty() {
        return Err(UploadRejection::EmptyFilename);
    }

    if !allowed_file(filename, allowed_extensions) {
        return Err(UploadRejection::DisallowedExtension(
            file_extension(filename).unwrap_or_default(),
        ));
    }

    match sanitize_filename(filename) {
        Some(key) if allowed_file(&key, allowed_extensions) => Ok(key),
        _ => Err(UploadRejection::UnsafeFilename),
    }
}
