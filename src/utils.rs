//! Utility functions for name formatting and path construction.

use std::path::PathBuf;

/// Capitalises a name the way brawler names are displayed: the first character
/// upper case, every other character lower case.
///
/// # Examples
///
/// ```
/// # use bs_api::utils::capitalize;
/// assert_eq!(capitalize("EL PRIMO"), "El primo");
/// ```
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Builds the path of a downloaded `.png` asset by appending the extension to
/// `path`. Parent directories are neither checked nor created.
///
/// # Examples
///
/// ```
/// # use bs_api::utils::png_path;
/// let path = png_path("icons/player");
/// assert_eq!(path.to_str(), Some("icons/player.png"));
/// ```
pub fn png_path(path: &str) -> PathBuf {
    PathBuf::from(format!("{}.png", path))
}
