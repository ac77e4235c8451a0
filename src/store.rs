//! File-backed task storage.
//!
//! `TaskStore` owns the authoritative ordered task sequence and the JSON
//! file that mirrors it. Every mutation rewrites the whole file before the
//! operation is acknowledged; when the write fails the in-memory change is
//! rolled back, so memory never runs ahead of disk by a committed
//! operation.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::task::Task;

/// Ordered, file-backed collection of tasks.
///
/// Positions are 0-based insertion order and are the only identity a task
/// has. Deleting a task shifts every later position down by one.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
}

impl TaskStore {
    /// Load the store from `path`.
    ///
    /// A missing file is a valid initial state (empty list). A file that
    /// exists but does not parse is reported as corrupt rather than being
    /// silently replaced; the caller decides how to recover.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(TaskStore {
                tasks: Vec::new(),
                path: path.to_path_buf(),
            });
        }
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|e| Error::Persistence {
                path: path.to_path_buf(),
                source: e,
            })?;
        let tasks = serde_json::from_str(&buf).map_err(|e| Error::CorruptState {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(TaskStore {
            tasks,
            path: path.to_path_buf(),
        })
    }

    /// Write the full task list to disk, replacing prior contents.
    /// Uses a temp file + rename so a failed write leaves the old file.
    pub fn save(&self) -> Result<()> {
        self.write_all().map_err(|e| Error::Persistence {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_all(&self) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(&self.tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)
    }

    /// Append a new task and persist.
    ///
    /// The caller validates that `title` is non-empty before calling; a
    /// blank `category` falls back to "General". On success the new task
    /// sits at position `len() - 1`.
    pub fn add(&mut self, title: &str, description: &str, category: &str) -> Result<()> {
        self.tasks.push(Task::new(title, description, category));
        if let Err(e) = self.save() {
            self.tasks.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the task at `index`, shifting later tasks down by one, then
    /// persist. Out-of-range indices are a no-op; callers validate against
    /// the current view before forwarding here.
    pub fn delete_at(&mut self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Ok(());
        }
        let removed = self.tasks.remove(index);
        if let Err(e) = self.save() {
            self.tasks.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    /// Flip the completion flag on the task at `index`, then persist.
    /// Out-of-range indices are a no-op.
    pub fn toggle_at(&mut self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Ok(());
        }
        self.tasks[index].completed = !self.tasks[index].completed;
        if let Err(e) = self.save() {
            self.tasks[index].completed = !self.tasks[index].completed;
            return Err(e);
        }
        Ok(())
    }

    /// The full task sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at an absolute position.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> TaskStore {
        TaskStore::load(&dir.join("tasks.json")).unwrap()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.is_empty());
    }

    #[test]
    fn save_load_round_trip_preserves_fields_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add("Buy milk", "", "Errand").unwrap();
        store.add("Write report", "Quarterly", "Work").unwrap();
        store.add("No category", "", "").unwrap();

        let reloaded = store_in(dir.path());
        assert_eq!(reloaded.tasks(), store.tasks());
        assert_eq!(reloaded.get(0).unwrap().title, "Buy milk");
        assert_eq!(reloaded.get(1).unwrap().description, "Quarterly");
        assert_eq!(reloaded.get(2).unwrap().category, "General");
        assert!(!reloaded.get(1).unwrap().completed);
    }

    #[test]
    fn corrupt_file_is_reported_not_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();
        match TaskStore::load(&path) {
            Err(Error::CorruptState { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CorruptState, got {other:?}"),
        }
        // The bad file is left in place for the user to recover.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn delete_shifts_later_positions_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add("a", "", "").unwrap();
        store.add("b", "", "").unwrap();
        store.add("c", "", "").unwrap();

        store.delete_at(1).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, "a");
        assert_eq!(store.get(1).unwrap().title, "c");
    }

    #[test]
    fn out_of_range_mutations_are_noops() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add("a", "", "").unwrap();
        store.delete_at(5).unwrap();
        store.toggle_at(5).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.get(0).unwrap().completed);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add("a", "", "").unwrap();
        store.toggle_at(0).unwrap();
        assert!(store.get(0).unwrap().completed);

        let reloaded = store_in(dir.path());
        assert!(reloaded.get(0).unwrap().completed);

        store.toggle_at(0).unwrap();
        assert!(!store.get(0).unwrap().completed);
    }

    #[test]
    fn failed_save_rolls_back_the_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add("a", "", "").unwrap();

        // Point the store at a path whose parent does not exist so the
        // temp-file create fails.
        store.path = dir.path().join("gone").join("tasks.json");
        assert!(matches!(
            store.add("b", "", ""),
            Err(Error::Persistence { .. })
        ));
        assert_eq!(store.len(), 1);

        assert!(matches!(store.delete_at(0), Err(Error::Persistence { .. })));
        assert_eq!(store.len(), 1);

        assert!(matches!(store.toggle_at(0), Err(Error::Persistence { .. })));
        assert!(!store.get(0).unwrap().completed);
    }

    #[test]
    fn partial_records_load_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"[{"title": "bare"}]"#).unwrap();
        let store = TaskStore::load(&path).unwrap();
        let task = store.get(0).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.category, "General");
        assert!(!task.completed);
    }
}
