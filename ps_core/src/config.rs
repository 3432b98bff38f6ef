//! Configuration knobs this core recognizes. Loading values from a CLI,
//! environment, or config file is an external concern; this module only
//! holds the resulting value type, the same split `fantoch::config` draws
//! between `Config` and whatever constructs one.

/// Recognized knobs. `sync` picks [`crate::factory::ServerFactory`]'s
/// output type; `backup_worker_ratio` is declared but never consulted by
/// the coordination engine. It's reserved for straggler mitigation that
/// this core doesn't implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    sync: bool,
    backup_worker_ratio: u8,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&self) -> bool {
        self.sync
    }

    pub fn set_sync(&mut self, sync: bool) -> &mut Self {
        self.sync = sync;
        self
    }

    /// Percentage of backup workers (0-100). Unused by this core; see the
    /// module doc.
    pub fn backup_worker_ratio(&self) -> u8 {
        self.backup_worker_ratio
    }

    pub fn set_backup_worker_ratio(&mut self, ratio: u8) -> &mut Self {
        assert!(ratio <= 100, "backup_worker_ratio must be a percentage");
        self.backup_worker_ratio = ratio;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: false,
            backup_worker_ratio: 0,
        }
    }
}
