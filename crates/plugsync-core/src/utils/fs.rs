use std::path::Path;

/// Final path component as an owned string, if it is valid UTF-8
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

/// Remove a build/version tag from a plugin file name.
///
/// The tag starts at the first `-` or `_` whose following token (up to the
/// next separator) begins with a digit and contains a dot, e.g.
/// `EssentialsX-3.4.5.jar` becomes `EssentialsX.jar` and
/// `Dynmap-3.7-beta-1-spigot.jar` becomes `Dynmap.jar`. Names without such a
/// tag are returned unchanged.
pub fn strip_version_suffix(file_name: &str, extension: &str) -> String {
    let (stem, ext) = match file_name.strip_suffix(extension) {
        Some(stem) => (stem, extension),
        None => (file_name, ""),
    };

    let separators: Vec<usize> = stem
        .char_indices()
        .filter(|(_, c)| *c == '-' || *c == '_')
        .map(|(i, _)| i)
        .collect();

    for &at in &separators {
        if at == 0 {
            continue;
        }
        let token = stem[at + 1..]
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        let starts_with_digit = token.chars().next().is_some_and(|c| c.is_ascii_digit());
        if starts_with_digit && token.contains('.') {
            return format!("{}{}", &stem[..at], ext);
        }
    }

    file_name.to_string()
}
