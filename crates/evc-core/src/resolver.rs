//! Vegetation field resolution
//!
//! The catalog stores one likelihood column per vegetation type, but column
//! names do not match the type labels exactly and have drifted between
//! releases of the dataset. Resolution tries an exact match on a normalised
//! label first, then falls back to a fixed-length prefix search.
//!
//! Ties always go to the first field in the order supplied, so callers must
//! pass field names in a stable order.

/// Number of characters of the normalised label used for the fallback search
pub const PREFIX_LEN: usize = 15;

/// Normalise a vegetation type label into catalog column style
///
/// Lowercases, then rewrites `" and "` to `"_and_"`, `", "` to `"_"` and any
/// remaining space to `"_"`. Applying it twice gives the same result.
pub fn normalize_vegetation_type(vegetation_type: &str) -> String {
    vegetation_type
        .to_lowercase()
        .replace(" and ", "_and_")
        .replace(", ", "_")
        .replace(' ', "_")
}

/// Find the catalog field that holds likelihood codes for a vegetation type
///
/// Returns `None` when no field matches; callers treat that as "no data for
/// this type".
pub fn resolve_field<'a, I>(field_names: I, vegetation_type: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields: Vec<&'a str> = field_names.into_iter().collect();
    let normalized = normalize_vegetation_type(vegetation_type);

    if let Some(field) = fields.iter().find(|f| f.to_lowercase() == normalized) {
        return Some(*field);
    }

    let prefix: String = normalized.chars().take(PREFIX_LEN).collect();
    fields
        .iter()
        .find(|f| f.to_lowercase().contains(&prefix))
        .copied()
}
