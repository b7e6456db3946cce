//! Grouping of markers and shapes by temporal rule and year key.

use std::collections::BTreeMap;

use worldmap_records_models::{MarkerRecord, RecordId, ShapeRecord, TemporalKind};

/// Record identifiers grouped by [`TemporalKind`] and group key.
///
/// `start` and `iso` groups are keyed by year, `range` groups by
/// `<start>_<end>`. Every marker and shape lands in exactly one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalGroups {
    pub start: BTreeMap<String, Vec<RecordId>>,
    pub iso: BTreeMap<String, Vec<RecordId>>,
    pub range: BTreeMap<String, Vec<RecordId>>,
}

impl TemporalGroups {
    #[must_use]
    pub fn build(markers: &[MarkerRecord], shapes: &[ShapeRecord]) -> Self {
        let mut groups = Self::default();
        let details = markers
            .iter()
            .enumerate()
            .map(|(i, m)| (RecordId::Marker(i), &m.details))
            .chain(
                shapes
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (RecordId::Shape(i), &s.details)),
            );

        for (id, details) in details {
            let temporal = details.temporal();
            groups
                .kind_mut(temporal.kind())
                .entry(temporal.group_key())
                .or_default()
                .push(id);
        }

        groups
    }

    #[must_use]
    pub const fn kind(&self, kind: TemporalKind) -> &BTreeMap<String, Vec<RecordId>> {
        match kind {
            TemporalKind::Start => &self.start,
            TemporalKind::Iso => &self.iso,
            TemporalKind::Range => &self.range,
        }
    }

    const fn kind_mut(&mut self, kind: TemporalKind) -> &mut BTreeMap<String, Vec<RecordId>> {
        match kind {
            TemporalKind::Start => &mut self.start,
            TemporalKind::Iso => &mut self.iso,
            TemporalKind::Range => &mut self.range,
        }
    }

    /// Every `(kind, key)` group that lists `id`.
    #[must_use]
    pub fn locate(&self, id: RecordId) -> Vec<(TemporalKind, &str)> {
        [TemporalKind::Start, TemporalKind::Iso, TemporalKind::Range]
            .into_iter()
            .flat_map(move |kind| {
                self.kind(kind)
                    .iter()
                    .filter(move |(_, ids)| ids.contains(&id))
                    .map(move |(key, _)| (kind, key.as_str()))
            })
            .collect()
    }
}
