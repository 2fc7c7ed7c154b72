//! Virtual path utilities
//!
//! Every path inside the store is an absolute, slash-rooted string. These
//! helpers keep paths in that canonical form regardless of the host platform.

/// Normalize a path into canonical absolute form
///
/// Collapses repeated separators, resolves `.` and `..` components and
/// guarantees a leading `/`. `..` at the root stays at the root.
///
/// # Examples
/// ```
/// use vfsh::logic::path::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("demo//logs/"), "/demo/logs");
/// assert_eq!(normalize("/demo/./logs/../config"), "/demo/config");
/// assert_eq!(normalize("/.."), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    format!("/{}", parts.join("/"))
}

/// Join a name onto a directory path
///
/// An absolute `name` replaces the directory entirely, mirroring how shells
/// resolve paths.
///
/// # Examples
/// ```
/// use vfsh::logic::path::join;
///
/// assert_eq!(join("/", "sub"), "/sub");
/// assert_eq!(join("/demo", "notes.txt"), "/demo/notes.txt");
/// assert_eq!(join("/demo", "/etc"), "/etc");
/// ```
pub fn join(dir: &str, name: &str) -> String {
    if name.starts_with('/') {
        normalize(name)
    } else {
        normalize(&format!("{}/{}", dir, name))
    }
}

/// Path of a child named `name` inside `dir`
///
/// Unlike [`join`], a leading `/` in `name` does not escape `dir`.
///
/// # Examples
/// ```
/// use vfsh::logic::path::child;
///
/// assert_eq!(child("/", "sub"), "/sub");
/// assert_eq!(child("/demo", "/etc"), "/demo/etc");
/// ```
pub fn child(dir: &str, name: &str) -> String {
    normalize(&format!("{}/{}", dir, name))
}

/// Parent directory of a path (the root is its own parent)
pub fn parent(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Last component of a path, or `/` for the root
pub fn base_name(path: &str) -> String {
    let normalized = normalize(path);
    if normalized == "/" {
        return normalized;
    }
    normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Whether `path` lies strictly inside `ancestor`
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    let path = normalize(path);
    let ancestor = normalize(ancestor);
    if path == ancestor {
        return false;
    }
    if ancestor == "/" {
        return true;
    }
    path.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
