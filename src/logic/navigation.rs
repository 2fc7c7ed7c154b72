//! Navigation selection logic
//!
//! Pure functions for cursor, scroll window and click-to-row calculations.
//! Unlike a wrapping menu, the file list clamps at both ends.

/// Rows of screen chrome around the file list (title, borders, status, input, help)
pub const RESERVED_ROWS: u16 = 8;
/// Smallest list window ever used, even on tiny terminals
pub const MIN_VISIBLE_LINES: usize = 5;
/// Screen row of the first file entry (title bar plus the list's top border)
pub const LIST_TOP: u16 = 2;
/// Cursor step for page up/down
pub const PAGE_STEP: isize = 10;

/// Number of list rows that fit in a viewport of the given height
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::visible_lines;
///
/// assert_eq!(visible_lines(40), 32);
/// assert_eq!(visible_lines(12), 5);
/// assert_eq!(visible_lines(0), 5);
/// ```
pub fn visible_lines(height: u16) -> usize {
    (height.saturating_sub(RESERVED_ROWS) as usize).max(MIN_VISIBLE_LINES)
}

/// Move the cursor by `delta` and keep it inside the scroll window
///
/// The cursor is clamped to `[0, len - 1]`; the offset is adjusted only as
/// much as needed so that `offset <= cursor < offset + visible`.
///
/// # Arguments
/// * `cursor` - Current cursor index
/// * `offset` - Current scroll offset
/// * `delta` - Signed step; `isize::MIN`/`isize::MAX` jump to the ends
/// * `len` - Number of entries
/// * `visible` - Rows in the window (treated as at least 1)
///
/// # Returns
/// `(cursor, offset)`; `(0, 0)` for an empty list
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::move_cursor;
///
/// assert_eq!(move_cursor(0, 0, 1, 3, 5), (1, 0));
/// assert_eq!(move_cursor(2, 0, 1, 3, 5), (2, 0));     // clamped at end
/// assert_eq!(move_cursor(0, 0, -1, 3, 5), (0, 0));    // clamped at start
/// assert_eq!(move_cursor(4, 0, 1, 20, 5), (5, 1));    // scrolls down
/// assert_eq!(move_cursor(5, 5, -1, 20, 5), (4, 4));   // scrolls up
/// assert_eq!(move_cursor(0, 0, isize::MAX, 20, 5), (19, 15));
/// assert_eq!(move_cursor(0, 0, 1, 0, 5), (0, 0));     // empty list
/// ```
pub fn move_cursor(
    cursor: usize,
    offset: usize,
    delta: isize,
    len: usize,
    visible: usize,
) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }

    let target = if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs())
    } else {
        cursor.saturating_add(delta as usize)
    };

    let cursor = target.min(len - 1);
    (cursor, scroll_to(cursor, offset, visible))
}

/// Smallest change of `offset` that brings `cursor` into the window
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::scroll_to;
///
/// assert_eq!(scroll_to(3, 0, 5), 0);
/// assert_eq!(scroll_to(7, 0, 5), 3);
/// assert_eq!(scroll_to(1, 4, 5), 1);
/// ```
pub fn scroll_to(cursor: usize, offset: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Clamp a cursor and offset after the entry list changed length
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::clamp_position;
///
/// assert_eq!(clamp_position(9, 6, 4, 5), (3, 3));
/// assert_eq!(clamp_position(2, 0, 10, 5), (2, 0));
/// assert_eq!(clamp_position(2, 1, 0, 5), (0, 0));
/// ```
pub fn clamp_position(cursor: usize, offset: usize, len: usize, visible: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let cursor = cursor.min(len - 1);
    let offset = offset.min(cursor);
    (cursor, scroll_to(cursor, offset, visible))
}

/// Map a clicked screen row to an entry index
///
/// # Returns
/// * `Some(index)` - The clicked entry
/// * `None` - Click above the list or past its last entry
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::click_index;
///
/// assert_eq!(click_index(2, 0, 10), Some(0));
/// assert_eq!(click_index(5, 4, 10), Some(7));
/// assert_eq!(click_index(1, 0, 10), None);
/// assert_eq!(click_index(20, 0, 10), None);
/// ```
pub fn click_index(row: u16, offset: usize, len: usize) -> Option<usize> {
    let relative = row.checked_sub(LIST_TOP)? as usize;
    let index = offset + relative;
    (index < len).then_some(index)
}

/// Slice of history lines to show in a terminal view
///
/// `scroll` counts lines up from the bottom; zero pins the view to the most
/// recent output.
///
/// # Returns
/// `(start, end)` line indices into the full history
///
/// # Examples
/// ```
/// use vfsh::logic::navigation::terminal_window;
///
/// assert_eq!(terminal_window(100, 10, 0), (90, 100));
/// assert_eq!(terminal_window(100, 10, 5), (85, 95));
/// assert_eq!(terminal_window(100, 10, 500), (0, 10));
/// assert_eq!(terminal_window(4, 10, 0), (0, 4));
/// ```
pub fn terminal_window(total: usize, available: usize, scroll: usize) -> (usize, usize) {
    let start = total.saturating_sub(available).saturating_sub(scroll);
    let end = (start + available).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariants_hold_for_move_sequences() {
        let len = 37;
        let visible = 7;
        let deltas = [1, 1, 10, -3, isize::MAX, -10, -10, 5, isize::MIN, 1, 50, -1];
        let (mut cursor, mut offset) = (0, 0);

        for delta in deltas {
            (cursor, offset) = move_cursor(cursor, offset, delta, len, visible);
            assert!(cursor < len);
            assert!(offset <= cursor);
            assert!(cursor < offset + visible);
        }
    }

    #[test]
    fn test_page_down_clamps() {
        assert_eq!(move_cursor(5, 0, PAGE_STEP, 8, 5), (7, 3));
    }

    #[test]
    fn test_home_resets_offset() {
        assert_eq!(move_cursor(15, 12, isize::MIN, 20, 5), (0, 0));
    }

    #[test]
    fn test_zero_visible_is_treated_as_one() {
        assert_eq!(move_cursor(0, 0, 3, 10, 0), (3, 3));
    }

    #[test]
    fn test_click_index_with_offset() {
        assert_eq!(click_index(LIST_TOP, 10, 20), Some(10));
        assert_eq!(click_index(LIST_TOP + 9, 10, 20), Some(19));
        assert_eq!(click_index(LIST_TOP + 10, 10, 20), None);
    }

    #[test]
    fn test_terminal_window_scroll_moves_up() {
        let (bottom_start, _) = terminal_window(50, 10, 0);
        let (scrolled_start, _) = terminal_window(50, 10, 3);
        assert!(scrolled_start < bottom_start);
    }
}
