//! First-fit decreasing placement.
//!
//! Polygons are packed in decreasing order of bounding-box area, each
//! onto the first sheet that admits it. Compared to next-fit, first-fit
//! keeps earlier sheets open, so a large shape that closes out one sheet
//! does not stop later small shapes from filling it.
//!
//! Per polygon and sheet, a sweep over evenly spaced rotations computes
//! the inner-fit polygon of the sheet and the no-fit polygons against
//! everything already placed, enumerates the candidate vertices, and
//! scores each with the incremental bounding-box heuristic plus a small
//! lower-left tiebreaker. The best candidate across all rotations is
//! committed and the search moves to the next polygon.

use std::f64::consts::PI;

use platenest_core::geometry as exact;
use platenest_core::transform::Transform as ExactTransform;
use platenest_core::Result;

use crate::boundary::Sheet;
use crate::candidates::CandidatePoints;
use crate::geometry::{Point, PolygonWithHoles};
use crate::heuristic::{Aabb, BoundingBoxHeuristic};
use crate::nfp::{ifp, nfp_cached};
use crate::placement::{Placement, Transform};
use crate::state::{CanonicalId, PackingState};

/// Weight of the lower-left tiebreaker added to every candidate score:
/// small enough to lose against any real heuristic difference, but it
/// breaks symmetric ties deterministically.
const TIEBREAK_EPSILON: f64 = 0.01;

/// Packing options.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// With `false`, any unplaceable polygon makes the whole call
    /// infeasible (empty result). With `true`, unplaceable polygons are
    /// skipped and the rest are packed.
    pub partial: bool,
    /// Number of evenly spaced rotations tried per polygon.
    pub rotations: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            partial: false,
            rotations: 4,
        }
    }
}

impl PackConfig {
    pub fn new() -> Self {
        PackConfig::default()
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub fn with_rotations(mut self, rotations: usize) -> Self {
        self.rotations = rotations.max(1);
        self
    }
}

/// A shape sitting on a sheet: a canonical polygon plus the transform
/// that places it.
struct TransformedShape {
    base: CanonicalId,
    translation: exact::Vector,
    rotation: f64,
}

/// Packs `polygons` onto `sheets` in decreasing bounding-box-area order.
///
/// Returns one placement list per sheet actually used. When the packing
/// is infeasible and `config.partial` is false, the outer list is empty.
/// The `state` may be reused across calls to amortize NFP computation.
pub fn pack_decreasing(
    sheets: &[Sheet],
    polygons: &[PolygonWithHoles],
    state: &mut PackingState,
    config: &PackConfig,
) -> Result<Vec<Vec<Placement>>> {
    for sheet in sheets {
        sheet.validate()?;
    }

    let mut canonical = Vec::with_capacity(polygons.len());
    let mut bbox_areas = Vec::with_capacity(polygons.len());
    for polygon in polygons {
        let promoted = polygon.to_exact()?;
        let bounds = promoted
            .bounds()
            .expect("validated polygon has vertices");
        bbox_areas.push(bounds.area());
        // Canonical form: first outer vertex at the origin.
        let first = promoted
            .first_vertex()
            .expect("validated polygon has vertices")
            .clone();
        canonical.push(state.intern(promoted.translated(&first.to_vector().neg())));
    }

    // Stable sort, largest first; ties keep input order.
    let mut order: Vec<usize> = (0..polygons.len()).collect();
    order.sort_by(|&i, &j| bbox_areas[j].cmp(&bbox_areas[i]));

    pack_ordered_first_fit(sheets, &order, &canonical, state, config)
}

/// The placement loop proper, consuming polygons in the given order.
fn pack_ordered_first_fit(
    sheets: &[Sheet],
    order: &[usize],
    canonical: &[CanonicalId],
    state: &mut PackingState,
    config: &PackConfig,
) -> Result<Vec<Vec<Placement>>> {
    let rotations = config.rotations.max(1);
    let mut sheet_placements: Vec<Vec<Placement>> = Vec::new();
    let mut sheet_parts: Vec<Vec<TransformedShape>> = Vec::new();
    let mut sheet_heuristics: Vec<BoundingBoxHeuristic> = Vec::new();
    let mut used_sheets = 0usize;

    for &polygon_id in order {
        let current = canonical[polygon_id];
        let mut placed = false;

        for (sheet_id, sheet) in sheets.iter().enumerate() {
            if placed {
                break;
            }

            // First touch of this sheet: record its holes as placed
            // shapes and seed the heuristic.
            if sheet_id == used_sheets {
                used_sheets += 1;
                sheet_parts.push(Vec::new());
                sheet_placements.push(Vec::new());
                for hole in &sheet.holes {
                    let promoted = hole.to_exact()?;
                    let first = promoted
                        .first_vertex()
                        .expect("validated hole has vertices")
                        .clone();
                    let shift = first.to_vector();
                    let id = state.intern(promoted.translated(&shift.neg()));
                    sheet_parts[sheet_id].push(TransformedShape {
                        base: id,
                        translation: shift,
                        rotation: 0.0,
                    });
                }
                sheet_heuristics.push(BoundingBoxHeuristic::for_sheet(sheet));
                log::debug!(
                    "sheet {} materialized with {} holes",
                    sheet_id,
                    sheet.holes.len()
                );
            }

            let sheet_rect = sheet.boundary_polygon()?;
            let mut best: Option<(exact::Point, usize, f64)> = None;

            for i in 0..rotations {
                let angle = i as f64 * 2.0 * PI / rotations as f64;
                let rotated = state
                    .canonical(current)
                    .transformed(&ExactTransform::rotation(angle));

                let inner_fit = ifp(&sheet_rect, &rotated);
                let mut candidates = CandidatePoints::new();
                candidates.set_boundary(inner_fit.outer_boundary().clone());
                for shape in &sheet_parts[sheet_id] {
                    let nfp = nfp_cached(
                        state,
                        shape.base,
                        &shape.translation,
                        shape.rotation,
                        current,
                        angle,
                    )?;
                    candidates.add_nfp(nfp);
                }

                let points = candidates.points()?;
                if points.is_empty() {
                    continue;
                }

                let part_bounds = rotated
                    .bounds()
                    .expect("rotated canonical polygon has vertices");
                for point in points {
                    let trial = Aabb::from_bounds(&part_bounds.translated(&point.to_vector()));
                    let (px, py) = point.to_f64();
                    let score = sheet_heuristics[sheet_id].eval_if_added(&trial)
                        + TIEBREAK_EPSILON * (px + py);
                    let better = match &best {
                        None => true,
                        Some((_, _, best_score)) => score < *best_score,
                    };
                    if better {
                        best = Some((point, i, score));
                    }
                }
            }

            if let Some((point, i, score)) = best {
                let angle = i as f64 * 2.0 * PI / rotations as f64;
                let committed = state
                    .canonical(current)
                    .transformed(&ExactTransform::rotation(angle))
                    .translated(&point.to_vector());
                let bounds = committed
                    .bounds()
                    .expect("committed polygon has vertices");
                sheet_heuristics[sheet_id].commit(&Aabb::from_bounds(&bounds));

                let (px, py) = point.to_f64();
                sheet_parts[sheet_id].push(TransformedShape {
                    base: current,
                    translation: point.to_vector(),
                    rotation: angle,
                });
                sheet_placements[sheet_id].push(Placement::new(
                    polygon_id,
                    Transform::new(
                        Point::new(px, py),
                        i as f64 * 360.0 / rotations as f64,
                    ),
                ));
                placed = true;
                log::debug!(
                    "polygon {} placed on sheet {} at ({}, {}) rotation step {} (score {})",
                    polygon_id,
                    sheet_id,
                    px,
                    py,
                    i,
                    score
                );
            }
        }

        if !placed {
            if !config.partial {
                log::debug!("polygon {} fits no sheet, packing infeasible", polygon_id);
                return Ok(Vec::new());
            }
            log::debug!("polygon {} fits no sheet, skipped", polygon_id);
        }
    }

    Ok(sheet_placements)
}
