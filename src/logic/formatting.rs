//! Formatting and display logic
//!
//! Pure functions for formatting sizes, permissions and raw bytes for
//! human-readable display.

use crate::vfs::FileMode;

/// Marker shown in the size column for directories
pub const DIR_MARKER: &str = "<DIR>";
/// Marker shown in the size column for mount points
pub const MOUNT_MARKER: &str = "<MNT>";

/// Format a byte count with binary scaling
///
/// Below 1024 the exact byte count is shown; above that the value is divided
/// by 1024 until it fits and printed with one decimal place.
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// Formatted string like "512 B", "1.5 KB" or "3.0 GB"
///
/// # Examples
/// ```
/// use vfsh::logic::formatting::format_size_plain;
///
/// assert_eq!(format_size_plain(0), "0 B");
/// assert_eq!(format_size_plain(1023), "1023 B");
/// assert_eq!(format_size_plain(1536), "1.5 KB");
/// assert_eq!(format_size_plain(5 * 1024 * 1024), "5.0 MB");
/// ```
pub fn format_size_plain(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < 5 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", bytes as f64 / div as f64, suffix)
}

/// Format the size column of an entry
///
/// Mount points and directories show a marker instead of a size; the mount
/// check wins since every mount point is also a directory.
///
/// # Examples
/// ```
/// use vfsh::logic::formatting::format_size;
/// use vfsh::vfs::FileMode;
///
/// assert_eq!(format_size(1536, FileMode::file(0o644)), "1.5 KB");
/// assert_eq!(format_size(4096, FileMode::directory(0o755)), "<DIR>");
/// assert_eq!(format_size(4096, FileMode::mount_point(0o755)), "<MNT>");
/// ```
pub fn format_size(bytes: u64, mode: FileMode) -> String {
    if mode.is_mount() {
        MOUNT_MARKER.to_string()
    } else if mode.is_dir() {
        DIR_MARKER.to_string()
    } else {
        format_size_plain(bytes)
    }
}

/// Render mode bits as a ten character `ls`-style string
///
/// The leading character is `m` for mount points, `d` for directories and
/// `-` for files.
///
/// # Examples
/// ```
/// use vfsh::logic::formatting::format_permissions;
/// use vfsh::vfs::FileMode;
///
/// assert_eq!(format_permissions(FileMode::file(0o644)), "-rw-r--r--");
/// assert_eq!(format_permissions(FileMode::directory(0o755)), "drwxr-xr-x");
/// assert_eq!(format_permissions(FileMode::mount_point(0o700)), "mrwx------");
/// ```
pub fn format_permissions(mode: FileMode) -> String {
    let kind = if mode.is_mount() {
        'm'
    } else if mode.is_dir() {
        'd'
    } else {
        '-'
    };

    let perm = mode.perm();
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (perm >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// Canonical offset/hex/ASCII dump, 16 bytes per line
///
/// # Examples
/// ```
/// use vfsh::logic::formatting::hex_dump;
///
/// assert_eq!(
///     hex_dump(b"Download One"),
///     "00000000  44 6f 77 6e 6c 6f 61 64  20 4f 6e 65              |Download One|\n"
/// );
/// assert_eq!(hex_dump(b""), "");
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() / 16 * 79 + 79);

    for (line, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", line * 16));

        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }

        out.push_str(" |");
        for &b in chunk {
            out.push(if (0x20..=0x7e).contains(&b) { b as char } else { '.' });
        }
        out.push_str("|\n");
    }

    out
}
