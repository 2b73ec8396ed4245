use rustc_hash::{FxHashMap, FxHashSet};

use super::FoldRange;

/// Session-side fold bookkeeping: known fold starts, which of them are collapsed and the
/// resulting hidden line ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    ranges: Vec<FoldRange>,
    fold_starts: FxHashMap<usize, usize>,
    collapsed: FxHashSet<usize>,
    hidden_ranges: Vec<(usize, usize)>,
}

impl FoldState {
    pub fn new(ranges: Vec<FoldRange>) -> Self {
        let fold_starts = Self::build_fold_starts(&ranges);
        Self {
            ranges,
            fold_starts,
            collapsed: FxHashSet::default(),
            hidden_ranges: Vec::new(),
        }
    }

    /// Replace the known ranges, keeping collapsed rows that still start a fold.
    pub fn set_ranges(&mut self, ranges: Vec<FoldRange>) {
        self.fold_starts = Self::build_fold_starts(&ranges);
        self.ranges = ranges;
        let fold_starts = &self.fold_starts;
        self.collapsed.retain(|start| fold_starts.contains_key(start));
        self.hidden_ranges = Self::build_hidden_ranges(&self.collapsed, &self.fold_starts);
    }

    pub fn ranges(&self) -> &[FoldRange] {
        &self.ranges
    }

    pub fn hidden_ranges(&self) -> &[(usize, usize)] {
        &self.hidden_ranges
    }

    fn build_fold_starts(ranges: &[FoldRange]) -> FxHashMap<usize, usize> {
        let mut out: FxHashMap<usize, usize> = FxHashMap::default();
        out.reserve(ranges.len().min(1024));

        for range in ranges {
            out.entry(range.start_row)
                .and_modify(|end| *end = (*end).max(range.end_row))
                .or_insert(range.end_row);
        }

        out
    }

    fn build_hidden_ranges(
        collapsed: &FxHashSet<usize>,
        fold_starts: &FxHashMap<usize, usize>,
    ) -> Vec<(usize, usize)> {
        let mut ranges = Vec::with_capacity(collapsed.len().min(512));

        for start in collapsed {
            let Some(&end) = fold_starts.get(start) else {
                continue;
            };
            let hidden_start = start.saturating_add(1);
            if end < hidden_start {
                continue;
            }
            ranges.push((hidden_start, end));
        }

        ranges.sort_unstable();

        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match merged.last_mut() {
                Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                    *last_end = (*last_end).max(end);
                }
                _ => merged.push((start, end)),
            }
        }

        merged
    }

    pub fn marker_char(&self, row: usize) -> Option<char> {
        if !self.fold_starts.contains_key(&row) {
            return None;
        }
        if self.collapsed.contains(&row) {
            Some('▸')
        } else {
            Some('▾')
        }
    }

    pub fn is_folded(&self, start_row: usize) -> bool {
        self.collapsed.contains(&start_row)
    }

    pub fn fold_end(&self, start_row: usize) -> Option<usize> {
        self.fold_starts.get(&start_row).copied()
    }

    pub fn is_line_hidden(&self, row: usize) -> bool {
        let idx = self.hidden_ranges.partition_point(|&(_, end)| end < row);
        self.hidden_ranges
            .get(idx)
            .is_some_and(|&(start, _)| start <= row)
    }

    /// The innermost fold that starts at or encloses `row`.
    pub fn target_start_row_for(&self, row: usize) -> Option<usize> {
        if self.fold_starts.contains_key(&row) {
            return Some(row);
        }

        self.ranges
            .iter()
            .filter(|range| range.start_row < row && range.end_row >= row)
            .map(|range| range.start_row)
            .max()
    }

    pub fn toggle(&mut self, start_row: usize) -> bool {
        if !self.fold_starts.contains_key(&start_row) {
            return false;
        }
        if !self.collapsed.insert(start_row) {
            self.collapsed.remove(&start_row);
        }
        self.hidden_ranges = Self::build_hidden_ranges(&self.collapsed, &self.fold_starts);
        true
    }

    pub fn collapse(&mut self, start_row: usize) -> bool {
        if !self.fold_starts.contains_key(&start_row) {
            return false;
        }
        let changed = self.collapsed.insert(start_row);
        if changed {
            self.hidden_ranges = Self::build_hidden_ranges(&self.collapsed, &self.fold_starts);
        }
        changed
    }

    pub fn expand(&mut self, start_row: usize) -> bool {
        let changed = self.collapsed.remove(&start_row);
        if changed {
            self.hidden_ranges = Self::build_hidden_ranges(&self.collapsed, &self.fold_starts);
        }
        changed
    }

    pub fn expand_all(&mut self) -> bool {
        if self.collapsed.is_empty() {
            return false;
        }
        self.collapsed.clear();
        self.hidden_ranges.clear();
        true
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/folding/state.rs"]
mod tests;
