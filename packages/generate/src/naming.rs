//! Script identifiers derived from category and subcategory names.
//!
//! The data script and the style script must agree on these names
//! (`<Sub>Icon`, `<Sub>ShapeStyle`), and icon images are matched on them.

/// Turns a display name into a JavaScript identifier fragment.
///
/// Keeps ASCII alphanumerics and `_`. A result that would be empty or start
/// with a digit gets a leading `_`.
#[must_use]
pub fn ident(name: &str) -> String {
    let fragment = key_fragment(name);
    if fragment.is_empty() || fragment.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{fragment}")
    } else {
        fragment
    }
}

/// Normalized name: ASCII alphanumerics and `_` only.
///
/// Used as-is for icon image stems and for suffixes such as year keys
/// appended to a fixed prefix; [`ident`] adds the leading-digit guard
/// needed for a standalone variable name.
#[must_use]
pub fn key_fragment(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// CSS class for a subcategory's marker clusters: lowercase, spaces as `-`.
#[must_use]
pub fn css_class(name: &str) -> String {
    name.trim().replace(' ', "-").to_lowercase()
}

#[must_use]
pub fn icon_var(subcategory: &str) -> String {
    format!("{}Icon", ident(subcategory))
}

#[must_use]
pub fn shape_style_var(subcategory: &str) -> String {
    format!("{}ShapeStyle", ident(subcategory))
}

#[must_use]
pub fn cluster_var(subcategory: &str) -> String {
    format!("{}Markers", ident(subcategory))
}

#[must_use]
pub fn members_var(subcategory: &str) -> String {
    format!("{}Members", ident(subcategory))
}

#[must_use]
pub fn subcategory_layer_var(subcategory: &str) -> String {
    format!("{}Layer", ident(subcategory))
}

/// Category layers carry a `Category` infix so a category and a
/// subcategory sharing a name do not collide.
#[must_use]
pub fn category_layer_var(category: &str) -> String {
    format!("{}CategoryLayer", ident(category))
}
