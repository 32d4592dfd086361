use super::memory::SystemMemorySnapshot;
use super::process::ProcessSample;

/// One sampling pass: processes in canonical order plus the system state
/// their percentages were computed against.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub processes: Vec<ProcessSample>,
    pub system: Option<SystemMemorySnapshot>,
    pub total_memory: u64,
}

impl Snapshot {
    pub fn new(
        processes: Vec<ProcessSample>,
        system: Option<SystemMemorySnapshot>,
        total_memory: u64,
    ) -> Self {
        Snapshot {
            processes: aggregate(processes),
            system,
            total_memory,
        }
    }

    /// The `n` largest consumers, or every process when `n` is `None` or
    /// exceeds the count.
    pub fn top(&self, n: Option<usize>) -> &[ProcessSample] {
        let len = self.processes.len();
        let n = n.map_or(len, |n| n.min(len));
        &self.processes[..n]
    }
}

/// Orders by resident memory, largest first. Equal sizes keep their
/// enumeration order.
pub fn aggregate(mut processes: Vec<ProcessSample>) -> Vec<ProcessSample> {
    processes.sort_by(|a, b| b.memory_bytes.cmp(&a.memory_bytes));
    processes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::STATUS_RUNNING;

    fn sample(pid: u32, memory_bytes: u64) -> ProcessSample {
        ProcessSample {
            pid,
            name: format!("proc{pid}"),
            memory_bytes,
            memory_percent: 0.0,
            thread_count: 1,
            status: STATUS_RUNNING,
        }
    }

    fn pids(processes: &[ProcessSample]) -> Vec<u32> {
        processes.iter().map(|p| p.pid).collect()
    }

    #[test]
    fn aggregate_sorts_descending() {
        let ordered = aggregate(vec![sample(1, 10), sample(2, 30), sample(3, 20)]);
        assert_eq!(pids(&ordered), vec![2, 3, 1]);
    }

    #[test]
    fn aggregate_keeps_enumeration_order_for_ties() {
        let ordered = aggregate(vec![
            sample(9, 5),
            sample(4, 7),
            sample(2, 5),
            sample(7, 5),
            sample(1, 7),
        ]);
        assert_eq!(pids(&ordered), vec![4, 1, 9, 2, 7]);
    }

    #[test]
    fn top_truncates_or_returns_everything() {
        let snapshot = Snapshot::new(vec![sample(1, 1), sample(2, 3), sample(3, 2)], None, 100);
        assert_eq!(pids(snapshot.top(Some(2))), vec![2, 3]);
        assert_eq!(pids(snapshot.top(Some(3))), vec![2, 3, 1]);
        assert_eq!(pids(snapshot.top(Some(50))), vec![2, 3, 1]);
        assert_eq!(pids(snapshot.top(None)), vec![2, 3, 1]);
        assert!(snapshot.top(Some(0)).is_empty());
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot = Snapshot::new(Vec::new(), None, 1);
        assert!(snapshot.top(Some(20)).is_empty());
    }
}
