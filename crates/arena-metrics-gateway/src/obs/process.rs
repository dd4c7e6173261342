//! Process gauges sampled on scrape.
//!
//! Resident memory comes from `sysinfo`; the live task count comes from the
//! current tokio runtime. Both are refreshed right before a snapshot so no
//! background task is needed.

use parking_lot::Mutex;
use sysinfo::{Pid, System};

use arena_metrics_core::Collector;

pub struct ProcessSampler {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl ProcessSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "process metrics unavailable: no current pid");
                None
            }
        };
        Self {
            pid,
            system: Mutex::new(System::new()),
        }
    }

    /// Resident memory in bytes, if the platform reports it.
    pub fn memory_bytes(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut sys = self.system.lock();
        if !sys.refresh_process(pid) {
            return None;
        }
        sys.process(pid).map(|p| p.memory())
    }

    /// Live tasks on the current tokio runtime, if called from inside one.
    pub fn runtime_tasks(&self) -> Option<usize> {
        tokio::runtime::Handle::try_current()
            .ok()
            .map(|h| h.metrics().num_alive_tasks())
    }

    /// Push fresh values into the collector's process gauges.
    pub fn refresh(&self, collector: &Collector) {
        if let Some(bytes) = self.memory_bytes() {
            collector.set_process_memory(bytes);
        }
        if let Some(tasks) = self.runtime_tasks() {
            collector.set_runtime_tasks(tasks);
        }
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessSampler").field("pid", &self.pid).finish()
    }
}
