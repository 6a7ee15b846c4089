/// Options for [`super::DropNode`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DropNodeOptions {
    /// Length in seconds of the window in which placeholder updates are coalesced.
    ///
    /// Only the last show (or hide) requested in a window is applied, when the window ends.
    pub placeholder_throttle_secs: f64,

    /// Fraction of a droppable row's height that counts as "drop before" at the top, and as
    /// "drop after" at the bottom. The remainder in the middle means "drop inside".
    ///
    /// Clamped to `0.0..=0.5`. Rows that don't accept children are always split in half.
    pub edge_fraction: f32,

    /// Type tags of non-tree payloads (see [`super::ExternalPayload::kind`]) that may be dropped.
    ///
    /// Empty means strict typing: only tree nodes are accepted.
    pub extra_accept_types: Vec<String>,

    /// If true, the most recent placeholder request wins: scheduling a show cancels a pending
    /// hide and vice versa.
    ///
    /// If false, show and hide are rate-limited completely independently and a hide scheduled
    /// just before a show may be applied after it.
    pub coalesce_placeholder_updates: bool,
}

impl Default for DropNodeOptions {
    fn default() -> Self {
        Self {
            placeholder_throttle_secs: 0.3,
            edge_fraction: 1.0 / 3.0,
            extra_accept_types: Vec::new(),
            coalesce_placeholder_updates: true,
        }
    }
}

impl DropNodeOptions {
    /// Also accept external payloads tagged `kind`.
    #[must_use]
    pub fn accept(mut self, kind: impl Into<String>) -> Self {
        self.extra_accept_types.push(kind.into());
        self
    }

    pub(super) fn accepts_kind(&self, kind: &str) -> bool {
        self.extra_accept_types.iter().any(|accepted| accepted == kind)
    }
}
