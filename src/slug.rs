//! URL-safe slugs derived from display names.

/// Derive a URL-safe slug from a display name.
///
/// Deterministic and lossy: lowercase, common Latin diacritics folded to
/// ASCII, every other non-alphanumeric run collapsed to a single hyphen,
/// no leading or trailing hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(fold_ascii)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fold common Latin diacritics onto their ASCII base letter.
/// Anything unmapped passes through and is dropped by the hyphen pass.
const fn fold_ascii(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'æ' => 'a',
        'œ' => 'o',
        'ß' => 's',
        _ => c,
    }
}
