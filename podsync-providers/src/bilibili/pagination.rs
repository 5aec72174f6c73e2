//! Page-size normalization for Bilibili listing endpoints.
//!
//! The endpoint families disagree on what an oversized request means:
//! `recArchivesByKeywords` and `series/archives` accept `ps=0` as "return
//! everything", while `seasons_archives_list` rejects it and caps at 100.

/// Largest page size any listing endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

const fn out_of_range(page_size: usize) -> bool {
    page_size == 0 || page_size > MAX_PAGE_SIZE
}

/// Normalize `(page_num, page_size)` for endpoints where `ps=0` means unbounded.
///
/// Out-of-range sizes become `(1, 0)`.
#[must_use]
pub const fn unbounded(page_num: usize, page_size: usize) -> (usize, usize) {
    if out_of_range(page_size) {
        (1, 0)
    } else {
        (page_num, page_size)
    }
}

/// Normalize `page_size` for the season endpoint, which has no unbounded mode.
#[must_use]
pub const fn capped(page_size: usize) -> usize {
    if out_of_range(page_size) {
        MAX_PAGE_SIZE
    } else {
        page_size
    }
}
