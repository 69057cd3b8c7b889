// Schedule view state
//
// Tracks one mounted view of the schedule: a load is started, and its result
// is applied only if the view is still mounted and no newer load began.

use crate::grid::{ColorMap, ScheduleGrid};
use crate::models::ScheduleTable;

/// What the presentation layer should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready(ScheduleGrid),
    Empty,
    Failed(String),
}

/// Handle for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct ScheduleView {
    state: ViewState,
    mounted: bool,
    generation: u64,
}

impl Default for ScheduleView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            mounted: false,
            generation: 0,
        }
    }

    pub fn mount(&mut self) {
        self.mounted = true;
        self.state = ViewState::Loading;
    }

    /// Tear the view down; results of pending loads are discarded
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Start a load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if self.mounted {
            self.state = ViewState::Loading;
        }
        LoadTicket(self.generation)
    }

    /// Apply a load result. Returns false if it was discarded.
    ///
    /// A failure keeps the whole cause chain in its message.
    pub fn complete<E: Into<anyhow::Error>>(
        &mut self,
        ticket: LoadTicket,
        result: Result<ScheduleTable, E>,
        colors: &ColorMap,
    ) -> bool {
        if !self.mounted {
            log::warn!("discarding schedule load: view is no longer mounted");
            return false;
        }
        if ticket.0 != self.generation {
            log::warn!("discarding stale schedule load {} (current {})", ticket.0, self.generation);
            return false;
        }

        self.state = match result {
            Ok(table) if table.is_empty() => ViewState::Empty,
            Ok(table) => ViewState::Ready(ScheduleGrid::build(&table, colors)),
            Err(e) => ViewState::Failed(format!("{:#}", Into::<anyhow::Error>::into(e))),
        };
        true
    }
}
