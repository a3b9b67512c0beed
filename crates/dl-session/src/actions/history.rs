//! Action history storage, queries, and export.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::Utc;
use dl_core::GridPos;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{ActionCategory, ActionKind, FarmingActivity, PlayerAction};
use crate::error::{SessionError, SessionResult};

/// Rough serialized size of one action, for archival decisions.
pub const BYTES_PER_ACTION: usize = 250;

/// An append-only, turn-ordered log of player actions.
///
/// Entries are never changed or removed once recorded, and
/// `total_action_count` always equals the number of stored actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistoryData", into = "HistoryData")]
pub struct ActionHistory {
    actions: Vec<PlayerAction>,
    last_action_id: Option<Uuid>,
    total_action_count: usize,
}

/// An empty history: no actions, no last id, zero count.
pub fn create_empty_action_history() -> ActionHistory {
    ActionHistory::default()
}

/// Heuristic byte size of a history at [`BYTES_PER_ACTION`] per action.
pub fn estimate_action_history_size(history: &ActionHistory) -> usize {
    history.total_action_count() * BYTES_PER_ACTION
}

impl ActionHistory {
    /// Append an action for `turn`, stamping it with a fresh id and the
    /// current time.
    ///
    /// Timestamps never go backwards: if the wall clock is behind the last
    /// entry, the last entry's timestamp is reused. A turn lower than the
    /// last recorded turn is rejected.
    pub fn record(
        &mut self,
        kind: ActionKind,
        turn: u64,
        position: GridPos,
    ) -> SessionResult<&PlayerAction> {
        let now = Utc::now();
        let timestamp = match self.actions.last() {
            Some(last) if turn < last.turn => {
                return Err(SessionError::ActionOutOfOrder {
                    turn,
                    last: last.turn,
                });
            }
            Some(last) => last.timestamp.max(now),
            None => now,
        };

        let action = PlayerAction {
            id: Uuid::new_v4(),
            timestamp,
            turn,
            position,
            kind,
        };
        tracing::trace!(id = %action.id, turn, category = %action.category(), "action recorded");

        let index = self.actions.len();
        self.last_action_id = Some(action.id);
        self.actions.push(action);
        self.total_action_count += 1;
        Ok(&self.actions[index])
    }

    /// All actions, oldest first.
    pub fn actions(&self) -> &[PlayerAction] {
        &self.actions
    }

    /// Id of the most recent action.
    pub fn last_action_id(&self) -> Option<Uuid> {
        self.last_action_id
    }

    /// Number of actions ever recorded.
    pub fn total_action_count(&self) -> usize {
        self.total_action_count
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions of one category, oldest first.
    pub fn actions_of_kind(&self, category: ActionCategory) -> impl Iterator<Item = &PlayerAction> {
        self.actions.iter().filter(move |a| a.category() == category)
    }

    /// Actions recorded on or after `turn`.
    pub fn actions_since_turn(&self, turn: u64) -> &[PlayerAction] {
        let start = self.actions.partition_point(|a| a.turn < turn);
        &self.actions[start..]
    }

    /// Number of actions per category. Categories never seen are absent.
    pub fn count_by_kind(&self) -> BTreeMap<ActionCategory, usize> {
        let mut counts = BTreeMap::new();
        for action in &self.actions {
            *counts.entry(action.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Export the history as markdown, one line per action.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Action History\n\n");
        for action in &self.actions {
            let _ = write!(out, "- **Turn {}** {} ", action.turn, action.position);
            match &action.kind {
                ActionKind::Combat {
                    enemy,
                    damage_dealt,
                    damage_taken,
                    victory,
                    fled,
                } => {
                    let _ = write!(
                        out,
                        "fought {enemy}: dealt {damage_dealt:.0}, took {damage_taken:.0}"
                    );
                    if *victory {
                        out.push_str(", won");
                    } else if *fled {
                        out.push_str(", fled");
                    }
                }
                ActionKind::Harvesting {
                    item_id,
                    quantity,
                    source,
                } => {
                    let _ = write!(out, "harvested {quantity}x {item_id} from {source}");
                }
                ActionKind::Crafting { recipe_id, success } => {
                    let verb = if *success { "made" } else { "failed to make" };
                    let _ = write!(out, "{verb} {recipe_id}");
                }
                ActionKind::ItemUsage { item_id, quantity } => {
                    let _ = write!(out, "used {quantity}x {item_id}");
                }
                ActionKind::SkillUsage { skill, success } => {
                    let result = if *success { "success" } else { "failure" };
                    let _ = write!(out, "used skill {skill} ({result})");
                }
                ActionKind::Movement { from, to } => {
                    let _ = write!(out, "moved {from} -> {to}");
                }
                ActionKind::Exploration { chunk, first_visit } => {
                    let _ = write!(out, "entered chunk {chunk}");
                    if *first_visit {
                        out.push_str(" for the first time");
                    }
                }
                ActionKind::Farming { chunk, activity } => match activity {
                    FarmingActivity::Plant { species } => {
                        let _ = write!(out, "planted {species} in {chunk}");
                    }
                    FarmingActivity::Water { ticks } => {
                        let _ = write!(out, "watered {chunk} for {ticks:.0} ticks");
                    }
                    FarmingActivity::Fertilize { amount } => {
                        let _ = write!(out, "fertilized {chunk} ({amount:.2})");
                    }
                },
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryData {
    actions: Vec<PlayerAction>,
    last_action_id: Option<Uuid>,
    total_action_count: usize,
}

impl TryFrom<HistoryData> for ActionHistory {
    type Error = SessionError;

    fn try_from(data: HistoryData) -> Result<Self, Self::Error> {
        if data.total_action_count != data.actions.len() {
            return Err(SessionError::CorruptHistory(format!(
                "count {} but {} actions stored",
                data.total_action_count,
                data.actions.len()
            )));
        }
        if data.last_action_id != data.actions.last().map(|a| a.id) {
            return Err(SessionError::CorruptHistory(
                "last action id does not match the final action".into(),
            ));
        }
        if data.actions.windows(2).any(|w| w[1].turn < w[0].turn) {
            return Err(SessionError::CorruptHistory("actions out of turn order".into()));
        }
        Ok(Self {
            actions: data.actions,
            last_action_id: data.last_action_id,
            total_action_count: data.total_action_count,
        })
    }
}

impl From<ActionHistory> for HistoryData {
    fn from(history: ActionHistory) -> Self {
        Self {
            actions: history.actions,
            last_action_id: history.last_action_id,
            total_action_count: history.total_action_count,
        }
    }
}
