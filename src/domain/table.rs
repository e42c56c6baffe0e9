use crate::domain::record::Record;

pub const RECORDS_PER_PAGE: usize = 10;

/// How many page-number buttons the pagination strip renders at once.
const MAX_VISIBLE_PAGES: usize = 5;

/// In-memory view over the flattened record list: substring search,
/// fixed-size pagination, and selection of the rows a CSV export covers.
/// Pages are 1-based. The source list is never mutated, only filtered
/// and sliced.
#[derive(Debug, Clone)]
pub struct RecordTable {
    records: Vec<Record>,
    search_term: String,
    current_page: usize,
    // Indices into `records`, in original order.
    filtered: Vec<usize>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordTable {
    pub fn new(records: Vec<Record>) -> Self {
        let filtered = (0..records.len()).collect();
        Self {
            records,
            search_term: String::new(),
            current_page: 1,
            filtered,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Updates the term, recomputes the filtered view, and resets the
    /// active page to 1. No other side effects.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(&self.search_term))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(RECORDS_PER_PAGE)
    }

    pub fn next_page(&mut self) {
        self.current_page = (self.current_page + 1).min(self.total_pages().max(1));
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Direct jump. Callers pass a value they got from `page_numbers`,
    /// so no clamping happens here.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Records on the active page, at most `RECORDS_PER_PAGE` of them.
    pub fn current_records(&self) -> Vec<&Record> {
        let start = (self.current_page - 1) * RECORDS_PER_PAGE;
        self.filtered
            .iter()
            .skip(start)
            .take(RECORDS_PER_PAGE)
            .map(|&i| &self.records[i])
            .collect()
    }

    /// 1-based display bounds for "Showing X to Y of Z results".
    /// Returns (0, 0) when the filtered view is empty.
    pub fn page_range(&self) -> (usize, usize) {
        if self.filtered.is_empty() {
            return (0, 0);
        }
        let first = (self.current_page - 1) * RECORDS_PER_PAGE + 1;
        let last = (self.current_page * RECORDS_PER_PAGE).min(self.filtered.len());
        (first, last)
    }

    /// Page numbers for the pagination strip. All of them when five or
    /// fewer pages exist, otherwise a five-wide window that keeps the
    /// active page visible: the first five near the start, the last
    /// five near the end, a centered window in between.
    pub fn page_numbers(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total <= MAX_VISIBLE_PAGES {
            (1..=total).collect()
        } else if self.current_page <= 3 {
            (1..=MAX_VISIBLE_PAGES).collect()
        } else if self.current_page + 2 >= total {
            (total - MAX_VISIBLE_PAGES + 1..=total).collect()
        } else {
            (self.current_page - 2..=self.current_page + 2).collect()
        }
    }

    /// True when a non-blank search term is active, which switches the
    /// CSV export from the full set to the filtered one.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Rows a CSV export covers: the full set with no active search
    /// term, the filtered view otherwise.
    pub fn export_rows(&self) -> Vec<&Record> {
        if self.is_filtered() {
            self.filtered.iter().map(|&i| &self.records[i]).collect()
        } else {
            self.records.iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Requirement, Sentiment};

    fn record(id: usize, app: &str, review: &str) -> Record {
        Record {
            id: id.to_string(),
            app: app.to_string(),
            review: review.to_string(),
            date: format!("2023-{:02}", (id % 12) + 1),
            requirements: vec![Requirement {
                requirement: format!("req {}", id),
                sentiment: Sentiment::Neutral,
            }],
        }
    }

    fn table_with(n: usize) -> RecordTable {
        RecordTable::new((0..n).map(|i| record(i, "App", "fine")).collect())
    }

    #[test]
    fn test_empty_search_is_identity() {
        let mut table = table_with(23);
        table.set_search_term("");
        assert_eq!(table.filtered_count(), table.total_count());
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut table = RecordTable::new(vec![
            record(0, "Alpha", "good"),
            record(1, "Beta", "bad"),
            record(2, "Alpha", "ok"),
            record(3, "Gamma", "good"),
        ]);
        table.set_search_term("alpha");
        let ids: Vec<&str> = table
            .export_rows()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "2"]);
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = table_with(45);
        table.go_to_page(4);
        table.set_search_term("fine");
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_pages_partition_filtered_view() {
        let mut table = table_with(37);
        let mut seen = Vec::new();
        for page in 1..=table.total_pages() {
            table.go_to_page(page);
            let records = table.current_records();
            assert!(records.len() <= RECORDS_PER_PAGE);
            seen.extend(records.iter().map(|r| r.id.clone()));
        }
        let expected: Vec<String> = (0..37).map(|i| i.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut table = table_with(25); // 3 pages
        table.prev_page();
        assert_eq!(table.current_page(), 1);
        table.next_page();
        table.next_page();
        table.next_page();
        table.next_page();
        assert_eq!(table.current_page(), 3);
    }

    #[test]
    fn test_page_numbers_all_when_few() {
        let table = table_with(42); // 5 pages
        assert_eq!(table.page_numbers(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_numbers_window() {
        let mut table = table_with(95); // 10 pages
        assert_eq!(table.page_numbers(), vec![1, 2, 3, 4, 5]);

        table.go_to_page(3);
        assert_eq!(table.page_numbers(), vec![1, 2, 3, 4, 5]);

        table.go_to_page(6);
        assert_eq!(table.page_numbers(), vec![4, 5, 6, 7, 8]);

        table.go_to_page(8);
        assert_eq!(table.page_numbers(), vec![6, 7, 8, 9, 10]);

        table.go_to_page(10);
        assert_eq!(table.page_numbers(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_range_display_bounds() {
        let mut table = table_with(25);
        assert_eq!(table.page_range(), (1, 10));
        table.go_to_page(3);
        assert_eq!(table.page_range(), (21, 25));

        table.set_search_term("no such text");
        assert_eq!(table.page_range(), (0, 0));
        assert_eq!(table.total_pages(), 0);
    }

    #[test]
    fn test_export_rows_follow_filter() {
        let mut table = RecordTable::new(vec![
            record(0, "Alpha", "good"),
            record(1, "Beta", "bad"),
        ]);
        assert_eq!(table.export_rows().len(), 2);

        table.set_search_term("beta");
        assert_eq!(table.export_rows().len(), 1);
        assert!(table.is_filtered());

        // Blank terms count as no filter.
        table.set_search_term("   ");
        assert!(!table.is_filtered());
        assert_eq!(table.export_rows().len(), 2);
    }
}
