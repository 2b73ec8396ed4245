//! Fold strategies: which lines open or close a collapsible region, and how far it reaches.

mod cstyle;
mod java;
mod state;

pub use cstyle::CStyleFoldMode;
pub use java::JavaFoldMode;
pub use state::FoldState;

use crate::kernel::session::EditSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldWidget {
    Start,
    End,
}

/// `MarkBegin` only offers widgets on opening lines; `MarkBeginEnd` also on closing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldStyle {
    #[default]
    MarkBegin,
    MarkBeginEnd,
}

/// Columns are char offsets within the line. The folded text is everything between
/// `(start_row, start_column)` and `(end_row, end_column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoldRange {
    pub start_row: usize,
    pub start_column: usize,
    pub end_row: usize,
    pub end_column: usize,
}

impl FoldRange {
    pub fn new(start_row: usize, start_column: usize, end_row: usize, end_column: usize) -> Self {
        Self {
            start_row,
            start_column,
            end_row,
            end_column,
        }
    }

    pub fn is_multi_line(&self) -> bool {
        self.end_row > self.start_row
    }
}

pub trait FoldingStrategy: Send + Sync {
    fn fold_widget(&self, session: &EditSession, style: FoldStyle, row: usize)
        -> Option<FoldWidget>;

    fn fold_widget_range(
        &self,
        session: &EditSession,
        style: FoldStyle,
        row: usize,
    ) -> Option<FoldRange>;

    /// Every multi-line region opened by a `Start` widget, in row order.
    fn fold_ranges(&self, session: &EditSession) -> Vec<FoldRange> {
        let style = FoldStyle::MarkBegin;
        (0..session.len_lines())
            .filter(|&row| self.fold_widget(session, style, row) == Some(FoldWidget::Start))
            .filter_map(|row| self.fold_widget_range(session, style, row))
            .filter(FoldRange::is_multi_line)
            .collect()
    }
}

fn byte_to_column(line: &str, byte: usize) -> usize {
    line[..byte.min(line.len())].chars().count()
}
