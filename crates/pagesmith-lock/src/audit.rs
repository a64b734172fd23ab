//! Checks that a generated document carries every locked region.

use pagesmith_core::LockedRegion;
use serde::Serialize;

/// How often one region's markup occurs in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionAudit {
    pub id: String,
    pub occurrences: usize,
    /// Byte offset of the first occurrence.
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LockAudit {
    pub regions: Vec<RegionAudit>,
}

impl LockAudit {
    /// Every region occurs exactly once.
    pub fn is_intact(&self) -> bool {
        self.regions.iter().all(|r| r.occurrences == 1)
    }

    /// Regions appear in the order they were locked.
    pub fn in_order(&self) -> bool {
        let positions: Vec<usize> = self.regions.iter().filter_map(|r| r.position).collect();
        positions.windows(2).all(|w| w[0] < w[1])
    }

    /// Ids of regions missing from the document.
    pub fn missing(&self) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.occurrences == 0)
            .map(|r| r.id.as_str())
            .collect()
    }
}

/// Count each region's verbatim markup in `document`.
pub fn audit(document: &str, regions: &[LockedRegion]) -> LockAudit {
    let regions = regions
        .iter()
        .map(|region| {
            let (occurrences, position) = if region.html.is_empty() {
                (0, None)
            } else {
                (document.matches(region.html.as_str()).count(), document.find(region.html.as_str()))
            };
            RegionAudit {
                id: region.id.clone(),
                occurrences,
                position,
            }
        })
        .collect();
    LockAudit { regions }
}
