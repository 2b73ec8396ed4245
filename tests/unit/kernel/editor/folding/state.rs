use super::*;

fn nested() -> FoldState {
    FoldState::new(vec![
        FoldRange::new(0, 10, 6, 0),
        FoldRange::new(1, 12, 3, 4),
        FoldRange::new(4, 8, 5, 4),
    ])
}

#[test]
fn toggle_collapses_and_expands_known_starts() {
    let mut state = nested();
    assert_eq!(state.marker_char(1), Some('▾'));
    assert!(state.toggle(1));
    assert!(state.is_folded(1));
    assert_eq!(state.marker_char(1), Some('▸'));
    assert_eq!(state.hidden_ranges(), &[(2, 3)]);
    assert!(state.is_line_hidden(2));
    assert!(state.is_line_hidden(3));
    assert!(!state.is_line_hidden(4));

    assert!(state.toggle(1));
    assert!(!state.is_folded(1));
    assert!(state.hidden_ranges().is_empty());
}

#[test]
fn toggle_ignores_rows_without_a_fold() {
    let mut state = nested();
    assert!(!state.toggle(2));
    assert!(!state.collapse(2));
    assert_eq!(state.marker_char(2), None);
}

#[test]
fn hidden_ranges_merge_when_adjacent() {
    let mut state = nested();
    assert!(state.collapse(1));
    assert!(state.collapse(4));
    assert_eq!(state.hidden_ranges(), &[(2, 3), (5, 5)]);

    assert!(state.collapse(0));
    assert_eq!(state.hidden_ranges(), &[(1, 6)]);
    assert!(!state.collapse(0));

    assert!(state.expand_all());
    assert!(state.hidden_ranges().is_empty());
    assert!(!state.expand_all());
}

#[test]
fn target_start_row_picks_innermost_enclosing_fold() {
    let state = nested();
    assert_eq!(state.target_start_row_for(1), Some(1));
    assert_eq!(state.target_start_row_for(2), Some(1));
    assert_eq!(state.target_start_row_for(5), Some(4));
    assert_eq!(state.target_start_row_for(6), Some(0));
    assert_eq!(state.target_start_row_for(7), None);
}

#[test]
fn set_ranges_drops_collapsed_rows_that_no_longer_fold() {
    let mut state = nested();
    state.collapse(1);
    state.collapse(4);

    state.set_ranges(vec![FoldRange::new(4, 8, 7, 0)]);
    assert!(!state.is_folded(1));
    assert!(state.is_folded(4));
    assert_eq!(state.fold_end(4), Some(7));
    assert_eq!(state.hidden_ranges(), &[(5, 7)]);
}
