//! Priority-ordered task storage.

use std::sync::Arc;

use super::TickerTask;

/// Tasks ordered by descending priority.
///
/// Insertion keeps the list sorted; tasks of equal priority keep their
/// insertion order.
#[derive(Default)]
pub struct TaskList {
    tasks: Vec<Arc<dyn TickerTask>>,
}

impl TaskList {
    /// Creates an empty task list.
    #[must_use]
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Inserts `task` according to its priority.
    ///
    /// A single insertion pass shifts strictly-lower-priority entries
    /// right, so a new task lands after any existing task of the same
    /// priority.
    pub fn add(&mut self, task: Arc<dyn TickerTask>) {
        let mut i = self.tasks.len();
        while i > 0 && self.tasks[i - 1].priority() < task.priority() {
            i -= 1;
        }
        self.tasks.insert(i, task);
    }

    /// Removes every disposed task, calling `dispose` exactly once per
    /// removal. The relative order of surviving tasks is preserved.
    pub fn sweep(&mut self) {
        self.tasks.retain(|task| {
            if !task.disposed() {
                return true;
            }
            task.dispose();
            false
        });
    }

    /// Removes a specific task by identity, disposing it.
    ///
    /// Returns whether the task was present.
    pub fn remove(&mut self, task: &Arc<dyn TickerTask>) -> bool {
        let Some(index) = self.tasks.iter().position(|t| Arc::ptr_eq(t, task)) else {
            return false;
        };
        let removed = self.tasks.remove(index);
        removed.dispose();
        true
    }

    /// Removes every task without disposing any of them.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// A snapshot of the current order (cheap `Arc` clones).
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn TickerTask>> {
        self.tasks.clone()
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use rustc_hash::FxHashSet;
    use silt_utils::BlockPos;

    use super::*;

    #[derive(Default)]
    struct TestTask {
        priority: i32,
        disposed: AtomicBool,
        dispose_calls: AtomicUsize,
    }

    impl TestTask {
        fn new(priority: i32) -> Arc<Self> {
            Arc::new(Self {
                priority,
                ..Self::default()
            })
        }
    }

    impl TickerTask for TestTask {
        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&self) -> Option<FxHashSet<BlockPos>> {
            None
        }

        fn disposed(&self) -> bool {
            self.disposed.load(Ordering::Relaxed)
        }

        fn dispose(&self) {
            self.dispose_calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn priorities(list: &TaskList) -> Vec<i32> {
        list.snapshot().iter().map(|task| task.priority()).collect()
    }

    #[test]
    fn test_sorted_by_descending_priority() {
        let mut list = TaskList::new();
        list.add(TestTask::new(2));
        list.add(TestTask::new(1));
        list.add(TestTask::new(3));

        assert_eq!(priorities(&list), vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let mut list = TaskList::new();
        let first: Arc<dyn TickerTask> = TestTask::new(5);
        let second: Arc<dyn TickerTask> = TestTask::new(5);
        list.add(first.clone());
        list.add(TestTask::new(3));
        list.add(second.clone());

        let snapshot = list.snapshot();
        assert_eq!(priorities(&list), vec![5, 5, 3]);
        assert!(Arc::ptr_eq(&snapshot[0], &first));
        assert!(Arc::ptr_eq(&snapshot[1], &second));
    }

    #[test]
    fn test_sweep_disposes_exactly_once() {
        let mut list = TaskList::new();
        let keep_low = TestTask::new(1);
        let drop_mid = TestTask::new(2);
        let keep_high = TestTask::new(3);
        let drop_top = TestTask::new(4);
        drop_mid.disposed.store(true, Ordering::Relaxed);
        drop_top.disposed.store(true, Ordering::Relaxed);

        for task in [&keep_low, &drop_mid, &keep_high, &drop_top] {
            list.add(task.clone());
        }

        list.sweep();
        list.sweep();

        assert_eq!(priorities(&list), vec![3, 1]);
        assert_eq!(drop_mid.dispose_calls.load(Ordering::Relaxed), 1);
        assert_eq!(drop_top.dispose_calls.load(Ordering::Relaxed), 1);
        assert_eq!(keep_low.dispose_calls.load(Ordering::Relaxed), 0);
        assert_eq!(keep_high.dispose_calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut list = TaskList::new();
        let task = TestTask::new(1);
        let other = TestTask::new(1);
        list.add(task.clone());

        let task: Arc<dyn TickerTask> = task;
        let other: Arc<dyn TickerTask> = other;
        assert!(list.remove(&task));
        assert!(!list.remove(&other));
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear_does_not_dispose() {
        let mut list = TaskList::new();
        let task = TestTask::new(1);
        list.add(task.clone());

        list.clear();

        assert!(list.is_empty());
        assert_eq!(task.dispose_calls.load(Ordering::Relaxed), 0);
    }
}
