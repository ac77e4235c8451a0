//! Filtered views over the task store.
//!
//! What the user looks at is usually a subsequence of the stored tasks, so
//! mutation requests arrive as positions *within that subsequence*. The
//! scan that produces the visible list also records, per visible entry,
//! the absolute store index it came from. That map is rebuilt after every
//! mutation and every criteria change; absolute positions shift when a
//! task is deleted, so a stale map must never be consulted.
//!
//! Resolution is positional, never by value. Tasks carry no id and two
//! tasks may be field-for-field identical; looking a visible task up in
//! the store by equality can land on the wrong record and corrupt a task
//! the user never selected.

use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::Task;

/// Sentinel value shown in category selectors for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Category criterion: everything, or one category by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Parse a selector value, treating the "All" sentinel as no filter.
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value.to_string())
        }
    }

    /// The selector value this filter corresponds to.
    pub fn as_selector(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Exact(c) => c,
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(c) => c == category,
        }
    }
}

/// The filtered view controller.
///
/// Owns the [`TaskStore`] plus the current search/category criteria and
/// the position map for the visible subsequence. Presentation layers issue
/// every command through this type and never touch store positions
/// directly.
pub struct TaskView {
    store: TaskStore,
    search: String,
    category: CategoryFilter,
    positions: Vec<usize>,
}

impl TaskView {
    /// Wrap a loaded store with match-all criteria.
    pub fn new(store: TaskStore) -> Self {
        let mut view = TaskView {
            store,
            search: String::new(),
            category: CategoryFilter::All,
            positions: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Read-only access to the underlying store (totals, detail views).
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// True when the criteria are at their match-all defaults and the view
    /// aliases the store one to one.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.category == CategoryFilter::All
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Replace both criteria and rebuild the view.
    pub fn set_criteria(&mut self, search: &str, category: CategoryFilter) {
        self.search = search.to_string();
        self.category = category;
        self.recompute();
    }

    /// Rescan the store against the current criteria.
    ///
    /// A task is visible iff the search text is empty or a
    /// case-insensitive substring of its title or description, and the
    /// category filter accepts its category. For each visible task the
    /// map records its absolute index as of this scan.
    pub fn recompute(&mut self) {
        let needle = self.search.to_lowercase();
        self.positions = self
            .store
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                (needle.is_empty()
                    || t.title.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle))
                    && self.category.accepts(&t.category)
            })
            .map(|(i, _)| i)
            .collect();
    }

    /// Number of visible tasks.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate the visible tasks in store order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.positions.iter().map(|&i| &self.store.tasks()[i])
    }

    /// The visible task at `view_index`.
    pub fn get(&self, view_index: usize) -> Option<&Task> {
        self.positions
            .get(view_index)
            .map(|&i| &self.store.tasks()[i])
    }

    /// Translate a position in the visible list into the task's absolute
    /// index in the store.
    ///
    /// When no filter is active the view is the store and the index passes
    /// through unchanged; either way the index is validated against the
    /// current view first.
    pub fn resolve_absolute(&self, view_index: usize) -> Result<usize> {
        if view_index >= self.positions.len() {
            return Err(Error::SelectionOutOfRange {
                index: view_index,
                len: self.positions.len(),
            });
        }
        if self.is_unfiltered() {
            Ok(view_index)
        } else {
            Ok(self.positions[view_index])
        }
    }

    /// Append a task and rebuild the view.
    ///
    /// Title validation happens at the presentation boundary; `category`
    /// falls back to "General" when blank.
    pub fn add(&mut self, title: &str, description: &str, category: &str) -> Result<()> {
        self.store.add(title, description, category)?;
        self.recompute();
        Ok(())
    }

    /// Delete the task shown at `view_index`.
    pub fn request_delete(&mut self, view_index: usize) -> Result<()> {
        let absolute = self.resolve_absolute(view_index)?;
        self.store.delete_at(absolute)?;
        self.recompute();
        Ok(())
    }

    /// Toggle completion on the task shown at `view_index`.
    pub fn request_toggle(&mut self, view_index: usize) -> Result<()> {
        let absolute = self.resolve_absolute(view_index)?;
        self.store.toggle_at(absolute)?;
        self.recompute();
        Ok(())
    }

    /// Distinct categories across the whole store in first-seen order,
    /// preceded by the "All" sentinel. Drives category selectors, so it
    /// reflects the full store rather than the current view.
    pub fn available_categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for task in self.store.tasks() {
            if !categories.iter().any(|c| c == &task.category) {
                categories.push(task.category.clone());
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_in(dir: &std::path::Path) -> TaskView {
        TaskView::new(TaskStore::load(&dir.join("tasks.json")).unwrap())
    }

    fn titles(view: &TaskView) -> Vec<&str> {
        view.tasks().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn unfiltered_resolution_is_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("a", "", "").unwrap();
        view.add("b", "", "").unwrap();
        view.add("c", "", "").unwrap();

        assert!(view.is_unfiltered());
        for i in 0..view.len() {
            assert_eq!(view.resolve_absolute(i).unwrap(), i);
        }
    }

    #[test]
    fn filter_matches_title_or_description_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("Buy milk", "", "Errand").unwrap();
        view.add("Write report", "Quarterly numbers", "Work").unwrap();
        view.add("Call dentist", "", "Errand").unwrap();

        // Empty search matches everything.
        view.set_criteria("", CategoryFilter::All);
        assert_eq!(view.len(), 3);

        // Description-only match, mixed case.
        view.set_criteria("QUARTERLY", CategoryFilter::All);
        assert_eq!(titles(&view), ["Write report"]);

        // Matches neither field.
        view.set_criteria("garden", CategoryFilter::All);
        assert!(view.is_empty());

        // Category exact match combined with search.
        view.set_criteria("", CategoryFilter::Exact("Errand".into()));
        assert_eq!(titles(&view), ["Buy milk", "Call dentist"]);

        // Category with no members.
        view.set_criteria("", CategoryFilter::Exact("Home".into()));
        assert!(view.is_empty());

        // Both criteria at once.
        view.set_criteria("call", CategoryFilter::Exact("Errand".into()));
        assert_eq!(titles(&view), ["Call dentist"]);
    }

    #[test]
    fn category_match_is_exact_not_substring() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("a", "", "Work").unwrap();
        view.add("b", "", "Workshop").unwrap();

        view.set_criteria("", CategoryFilter::Exact("Work".into()));
        assert_eq!(titles(&view), ["a"]);
    }

    #[test]
    fn position_map_targets_the_selected_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        // Two field-for-field identical tasks around a distinct one.
        view.add("dup", "", "").unwrap();
        view.add("other", "", "").unwrap();
        view.add("dup", "", "").unwrap();

        view.set_criteria("dup", CategoryFilter::All);
        assert_eq!(view.len(), 2);
        assert_eq!(view.resolve_absolute(0).unwrap(), 0);
        assert_eq!(view.resolve_absolute(1).unwrap(), 2);

        // Deleting the second visible duplicate must remove absolute
        // position 2. A value-based lookup would find the equal record at
        // absolute 0 and delete that instead, leaving ["other", "dup"].
        view.request_delete(1).unwrap();

        let store = view.store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, "dup");
        assert_eq!(store.get(1).unwrap().title, "other");
    }

    #[test]
    fn deleting_first_duplicate_leaves_the_second_intact() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("same", "x", "General").unwrap();
        view.add("same", "x", "General").unwrap();

        view.set_criteria("same", CategoryFilter::All);
        view.request_delete(0).unwrap();

        assert_eq!(view.store().len(), 1);
        assert_eq!(view.len(), 1);
        assert_eq!(view.resolve_absolute(0).unwrap(), 0);
    }

    #[test]
    fn map_is_rebuilt_after_deletion_shifts_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("alpha", "", "").unwrap();
        view.add("beta", "", "").unwrap();
        view.add("alpha again", "", "").unwrap();

        view.set_criteria("alpha", CategoryFilter::All);
        assert_eq!(view.resolve_absolute(1).unwrap(), 2);

        // After deleting absolute 0 the record formerly at 2 sits at 1,
        // and the recomputed map reflects that.
        view.request_delete(0).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.resolve_absolute(0).unwrap(), 1);
        assert_eq!(view.store().get(1).unwrap().title, "alpha again");
    }

    #[test]
    fn out_of_range_selection_is_rejected_and_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("only", "", "").unwrap();

        view.set_criteria("nothing matches this", CategoryFilter::All);
        assert!(matches!(
            view.resolve_absolute(0),
            Err(Error::SelectionOutOfRange { index: 0, len: 0 })
        ));
        assert!(matches!(
            view.request_delete(0),
            Err(Error::SelectionOutOfRange { .. })
        ));
        assert!(matches!(
            view.request_toggle(3),
            Err(Error::SelectionOutOfRange { .. })
        ));
        assert_eq!(view.store().len(), 1);

        // Same on the unfiltered path.
        view.set_criteria("", CategoryFilter::All);
        assert!(matches!(
            view.resolve_absolute(1),
            Err(Error::SelectionOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn available_categories_are_unique_in_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("a", "", "Work").unwrap();
        view.add("b", "", "Errand").unwrap();
        view.add("c", "", "Work").unwrap();
        view.add("d", "", "").unwrap();

        assert_eq!(view.available_categories(), ["All", "Work", "Errand", "General"]);

        // Reflects the full store even while a filter is active.
        view.set_criteria("", CategoryFilter::Exact("Errand".into()));
        assert_eq!(view.available_categories(), ["All", "Work", "Errand", "General"]);
    }

    #[test]
    fn end_to_end_toggle_through_a_filtered_view_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = view_in(dir.path());
        view.add("Buy milk", "", "Errand").unwrap();
        view.add("Write report", "Quarterly", "Work").unwrap();

        view.set_criteria("", CategoryFilter::All);
        assert_eq!(titles(&view), ["Buy milk", "Write report"]);

        view.set_criteria("report", CategoryFilter::All);
        assert_eq!(titles(&view), ["Write report"]);
        assert_eq!(view.resolve_absolute(0).unwrap(), 1);

        view.request_toggle(0).unwrap();

        let reloaded = view_in(dir.path());
        assert!(!reloaded.store().get(0).unwrap().completed);
        assert!(reloaded.store().get(1).unwrap().completed);
    }

    #[test]
    fn category_filter_selector_round_trip() {
        assert_eq!(CategoryFilter::from_selector("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_selector("Work"),
            CategoryFilter::Exact("Work".into())
        );
        assert_eq!(CategoryFilter::All.as_selector(), "All");
        assert_eq!(CategoryFilter::Exact("Work".into()).as_selector(), "Work");
    }
}
