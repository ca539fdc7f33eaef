//! Opaque identifier for source sets within a graph.

/// Index of a [`SourceSet`](crate::SourceSet) in its owning
/// [`SourceSetGraph`](crate::SourceSetGraph).
///
/// Ids are assigned in declaration order and are only meaningful for the
/// graph that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct SourceSetId(u32);

impl SourceSetId {
    /// Creates a `SourceSetId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
