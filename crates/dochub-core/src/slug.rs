//! URL-safe slug derivation.
//!
//! Slugs are assigned once, when a department or folder is created. Renames
//! never regenerate them, so links stay stable.

/// Lower-case `name`, collapse every run of non-alphanumeric ASCII into a
/// single hyphen, and strip leading/trailing hyphens.
///
/// Non-ASCII characters are treated as separators, so the result may be
/// empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive a slug for `name` that is not contained in `taken`.
///
/// An empty base falls back to `<fallback_prefix>-<unix timestamp>`.
/// Collisions get a numeric suffix: `report`, `report-1`, `report-2`, ...
pub fn derive_slug<S: AsRef<str>>(name: &str, fallback_prefix: &str, taken: &[S]) -> String {
    let mut base = slugify(name);
    if base.is_empty() {
        base = format!("{fallback_prefix}-{}", chrono::Utc::now().timestamp());
    }

    let is_taken = |candidate: &str| taken.iter().any(|s| s.as_ref() == candidate);

    if !is_taken(&base) {
        return base;
    }

    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
