// In crates/mutations/src/types.rs

use std::fmt;

/// The four remote operations the coordinator wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Sell,
    Delete,
}

impl MutationKind {
    pub const ALL: [MutationKind; 4] = [
        MutationKind::Create,
        MutationKind::Update,
        MutationKind::Sell,
        MutationKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Sell => "sell",
            MutationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a mutation kind is in its request cycle.
///
/// `Idle -> Pending -> Succeeded | Failed`, and back to `Pending` on the next
/// request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// The phase of every mutation kind, as observed by the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStatus {
    pub create: MutationPhase,
    pub update: MutationPhase,
    pub sell: MutationPhase,
    pub delete: MutationPhase,
}

impl MutationStatus {
    pub fn get(&self, kind: MutationKind) -> MutationPhase {
        match kind {
            MutationKind::Create => self.create,
            MutationKind::Update => self.update,
            MutationKind::Sell => self.sell,
            MutationKind::Delete => self.delete,
        }
    }

    pub fn set(&mut self, kind: MutationKind, phase: MutationPhase) {
        let slot = match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Sell => &mut self.sell,
            MutationKind::Delete => &mut self.delete,
        };
        *slot = phase;
    }

    /// True while any mutation is pending. Row actions and the creation form
    /// are disabled while busy.
    pub fn busy(&self) -> bool {
        MutationKind::ALL
            .iter()
            .any(|kind| self.get(*kind) == MutationPhase::Pending)
    }
}
