//! Contiguous segment placement with a single bump cursor.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::constants::UNALLOCATED;

/// Where a segment ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Base(i64),
    Unallocated,
}

impl Placement {
    /// Convert to the reported form (-1 when unallocated, base address otherwise)
    pub fn to_output(&self) -> i64 {
        match self {
            Placement::Base(base) => *base,
            Placement::Unallocated => UNALLOCATED,
        }
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, Placement::Base(_))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_output())
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_output())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: usize,
    pub size: i64,
    /// Set once by [`allocate`]; `None` until then.
    pub placement: Option<Placement>,
}

impl Segment {
    pub fn new(id: usize, size: i64) -> Self {
        Segment { id, size, placement: None }
    }
}

/// Build segments from a size list, numbering them by position.
pub fn segments_from_sizes(sizes: &[i64]) -> Vec<Segment> {
    sizes.iter().enumerate().map(|(id, &size)| Segment::new(id, size)).collect()
}

/// Segment id to placement, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<usize, Placement>);

impl Allocation {
    pub fn get(&self, id: usize) -> Option<Placement> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Placement)> + '_ {
        self.0.iter().map(|(&id, &placement)| (id, placement))
    }

    pub fn allocated_count(&self) -> usize {
        self.0.values().filter(|p| p.is_allocated()).count()
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (id, placement)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", id, placement)?;
        }
        f.write_str("}")
    }
}

/// Place segments in input order at a single forward cursor.
///
/// A segment that fits at the cursor gets it as its base and the cursor moves
/// past it. A segment that does not fit is marked unallocated and the cursor
/// stays put, so a later, smaller segment may still land there. There is no
/// search for holes and no reclamation.
pub fn allocate(segments: &mut [Segment], memory_size: i64) -> Allocation {
    let mut cursor: i64 = 0;
    let mut allocation = BTreeMap::new();

    for segment in segments.iter_mut() {
        let end = cursor.checked_add(segment.size);
        let placement = match end {
            Some(end) if end <= memory_size => {
                let base = cursor;
                cursor = end;
                Placement::Base(base)
            }
            _ => Placement::Unallocated,
        };
        trace!(id = segment.id, size = segment.size, %placement, cursor, "segment placed");
        segment.placement = Some(placement);
        allocation.insert(segment.id, placement);
    }

    debug!(segments = segments.len(), memory_size, used = cursor, "allocation finished");
    Allocation(allocation)
}
