use domain::{Edge, FamilyAggregate};

/// Peak rise of every arc band (meters).
pub const ARC_PEAK_HEIGHT: f64 = 120.0;
/// Vertical clearance between stacked bands (meters).
pub const ARC_BAND_SPACING: f64 = 40.0;
/// Lateral distance between family lanes at the base band (meters).
pub const LANE_SPACING_M: f64 = 10.0;

/// What one arc of an edge represents.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcLane {
    /// A product-family aggregate at the base band.
    Family {
        family_id: String,
        color: String,
        volume: f64,
    },
    /// A non-commercial relationship-type tag in its own height band.
    Tag { tag: String },
    /// The fallback base arc: an edge with nothing else to show still
    /// renders exactly one arc.
    Generic,
}

/// One arc's slot: which lane it is, and where it sits.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSlot {
    pub lane: ArcLane,
    pub base_height: f64,
    pub lateral_offset_m: f64,
}

/// The full arc layout of one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub slots: Vec<ArcSlot>,
    /// Extrusion height for the single hit volume covering every band.
    pub hit_height: f64,
}

/// Assigns every arc of `edge` a disjoint (base height, lateral lane) pair.
///
/// Ordering contract:
/// - Family lanes are stable-sorted by family id and centered around zero:
///   `offset_i = (i - (n-1)/2) * LANE_SPACING_M`. Offsets sum to zero and
///   are pairwise distinct.
/// - Non-commercial tags, in sorted order, occupy bands
///   `(k+1) * (ARC_PEAK_HEIGHT + ARC_BAND_SPACING)` for `k = 0..m-1`. Band
///   `k` tops out at `base + ARC_PEAK_HEIGHT`, below band `k+1`'s base, so
///   bands never intersect.
pub fn layout_edge(edge: &Edge) -> EdgeLayout {
    let mut slots = Vec::new();

    let mut families: Vec<&FamilyAggregate> = edge.families.iter().collect();
    families.sort_by(|a, b| a.family_id.cmp(&b.family_id));

    if families.is_empty() {
        let has_stacked_tags = edge.stacked_tags().next().is_some();
        if edge.has_commercial_tag() || !has_stacked_tags {
            slots.push(ArcSlot {
                lane: ArcLane::Generic,
                base_height: 0.0,
                lateral_offset_m: 0.0,
            });
        }
    } else {
        let n = families.len() as f64;
        for (i, family) in families.iter().enumerate() {
            slots.push(ArcSlot {
                lane: ArcLane::Family {
                    family_id: family.family_id.clone(),
                    color: family.color.clone(),
                    volume: family.volume,
                },
                base_height: 0.0,
                lateral_offset_m: (i as f64 - (n - 1.0) / 2.0) * LANE_SPACING_M,
            });
        }
    }

    let mut stacked = 0usize;
    for (k, tag) in edge.stacked_tags().enumerate() {
        stacked = k + 1;
        slots.push(ArcSlot {
            lane: ArcLane::Tag {
                tag: tag.to_string(),
            },
            base_height: (k as f64 + 1.0) * (ARC_PEAK_HEIGHT + ARC_BAND_SPACING),
            lateral_offset_m: 0.0,
        });
    }

    EdgeLayout {
        slots,
        hit_height: (1 + stacked) as f64 * (ARC_PEAK_HEIGHT + ARC_BAND_SPACING),
    }
}
