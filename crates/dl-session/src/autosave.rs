//! Interval-based auto-save.

use tracing::instrument;

use crate::error::SessionResult;
use crate::repository::SaveRepository;
use crate::state::GameState;

/// Saves the game every `interval_ticks` ticks while running.
///
/// The service is an ordinary value owned by the session. Nothing happens
/// until [`start`](Self::start) is called, and [`stop`](Self::stop) halts it
/// without forgetting when it last saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveService {
    interval_ticks: u64,
    running: bool,
    last_saved_tick: Option<u64>,
}

impl AutoSaveService {
    /// A stopped service. An interval of 0 never saves.
    pub fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks,
            running: false,
            last_saved_tick: None,
        }
    }

    /// Begin saving on the interval.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop saving. The last saved tick is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the service is started.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks between saves. Zero disables saving.
    pub fn interval_ticks(&self) -> u64 {
        self.interval_ticks
    }

    /// Tick of the last save this service made, or was told about.
    pub fn last_saved_tick(&self) -> Option<u64> {
        self.last_saved_tick
    }

    /// Record a save made outside the service, restarting the interval.
    pub fn mark_saved(&mut self, tick: u64) {
        self.last_saved_tick = Some(tick);
    }

    /// Whether a save is due at `tick`.
    pub fn is_due(&self, tick: u64) -> bool {
        if !self.running || self.interval_ticks == 0 {
            return false;
        }
        let since = self.last_saved_tick.unwrap_or(0);
        tick.saturating_sub(since) >= self.interval_ticks
    }

    /// Save `state` to its slot if a save is due. Returns whether it saved.
    #[instrument(skip_all, name = "autosave", fields(tick = tick))]
    pub fn maybe_save(
        &mut self,
        tick: u64,
        state: &GameState,
        repo: &mut dyn SaveRepository,
    ) -> SessionResult<bool> {
        if !self.is_due(tick) {
            return Ok(false);
        }
        repo.save(&state.slot_name, state)?;
        self.last_saved_tick = Some(tick);
        tracing::info!(slot = %state.slot_name, "auto-saved");
        Ok(true)
    }
}
