use crate::pagination::{PageQuery, PageWindow, DEFAULT_LIMIT, MAX_LIMIT};

#[test]
fn window_for_empty_table() {
    let w = PageWindow::compute(10, 1, 0);
    assert_eq!(w.offset, 0);
    assert_eq!(w.total_pages, 0);
    assert_eq!(w.total_rows, 0);
}

#[test]
fn window_rounds_partial_pages_up() {
    assert_eq!(PageWindow::compute(10, 1, 1).total_pages, 1);
    assert_eq!(PageWindow::compute(10, 1, 9).total_pages, 1);
    assert_eq!(PageWindow::compute(10, 1, 10).total_pages, 1);
    assert_eq!(PageWindow::compute(10, 1, 11).total_pages, 2);
    assert_eq!(PageWindow::compute(10, 1, 95).total_pages, 10);
    assert_eq!(PageWindow::compute(7, 1, 100).total_pages, 15);
}

#[test]
fn offset_is_zero_based_page_times_limit() {
    assert_eq!(PageWindow::compute(10, 1, 100).offset, 0);
    assert_eq!(PageWindow::compute(10, 3, 100).offset, 20);
    assert_eq!(PageWindow::compute(25, 4, 100).offset, 75);
}

#[test]
fn overrun_page_keeps_true_totals() {
    // Page far past the end: offset runs off the table, totals stay honest
    let w = PageWindow::compute(10, 9, 15);
    assert_eq!(w.offset, 80);
    assert_eq!(w.total_pages, 2);
    assert_eq!(w.total_rows, 15);
    assert!(w.page > w.total_pages);
}

#[test]
fn huge_page_saturates_offset_instead_of_overflowing() {
    let w = PageWindow::compute(MAX_LIMIT, i64::MAX, 15);
    assert_eq!(w.offset, i64::MAX);
    assert_eq!(w.total_rows, 15);
    assert!(w.page > w.total_pages);
}

#[test]
fn resolve_applies_defaults() {
    let (limit, page) = PageQuery::default().resolve().unwrap();
    assert_eq!(limit, DEFAULT_LIMIT);
    assert_eq!(page, 1);
}

#[test]
fn resolve_rejects_limit_above_maximum() {
    let query = PageQuery { limit: Some(MAX_LIMIT + 1), page: None };
    let err = query.resolve().unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::BadRequest);
    assert!(err.message().contains("50"));
}

#[test]
fn resolve_accepts_limit_at_maximum() {
    let query = PageQuery { limit: Some(MAX_LIMIT), page: Some(2) };
    assert_eq!(query.resolve().unwrap(), (MAX_LIMIT, 2));
}

#[test]
fn resolve_falls_back_on_non_positive_values() {
    let query = PageQuery { limit: Some(0), page: Some(0) };
    assert_eq!(query.resolve().unwrap(), (DEFAULT_LIMIT, 1));
    let query = PageQuery { limit: Some(-3), page: Some(-7) };
    assert_eq!(query.resolve().unwrap(), (DEFAULT_LIMIT, 1));
}
