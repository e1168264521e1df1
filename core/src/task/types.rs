use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::AssemblyError;
use crate::query::{Format, Query};

/// One unit of work: a query and where its results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpTask {
    /// Output directory relative to the dump root, `/`-separated.
    pub directory: String,
    pub name: String,
    pub query: Query,
}

impl DumpTask {
    pub fn new(directory: impl Into<String>, name: impl Into<String>, query: Query) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
            query,
        }
    }

    pub fn file_name(&self, format: Format) -> String {
        format!("{}.{}", self.name, format.ext())
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        self.directory
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .fold(root.to_path_buf(), |acc, part| acc.join(part))
    }

    pub fn output_path(&self, root: &Path, format: Format) -> PathBuf {
        self.output_dir(root).join(self.file_name(format))
    }
}

/// Hyphen-joins the non-empty parts, in order.
pub fn name_join<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Joins a child segment onto a relative directory, treating `.` as the root.
pub fn join_dir(parent: &str, child: &str) -> String {
    if parent.is_empty() || parent == "." {
        child.to_string()
    } else {
        format!("{parent}/{child}")
    }
}

/// Ordered list of tasks for one run.
///
/// Grows only during assembly. A (directory, name) pair may appear once;
/// a second one would silently overwrite the first task's files.
#[derive(Debug, Default)]
pub struct WorkQueue {
    tasks: Vec<DumpTask>,
    seen: HashSet<(String, String)>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: DumpTask) -> Result<(), AssemblyError> {
        let key = (task.directory.clone(), task.name.clone());
        if !self.seen.insert(key) {
            return Err(AssemblyError::DuplicateTask {
                directory: task.directory,
                name: task.name,
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn append(&mut self, other: WorkQueue) -> Result<(), AssemblyError> {
        for task in other.tasks {
            self.push(task)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[DumpTask] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DumpTask> {
        self.tasks.iter()
    }
}

impl<'a> IntoIterator for &'a WorkQueue {
    type Item = &'a DumpTask;
    type IntoIter = std::slice::Iter<'a, DumpTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
