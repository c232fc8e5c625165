//! Polygon index runs and their decomposition into triangles
//!
//! A polygon line is `N i0 i1 ...` for a triangle fan or `-1 N i0 i1 ...`
//! for a triangle strip, where `N` declares how many indices follow.

use crate::tokens::parse_indices;
use mdltoobj_core::Face;

/// How an index run is decomposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every triangle shares the first index
    Fan,
    /// Each index closes a triangle with the two before it
    Strip,
}

/// One decoded polygon line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonRun {
    pub mode: RunMode,
    pub indices: Vec<i32>,
}

impl PolygonRun {
    /// Decode a polygon line, or `None` when it is malformed.
    ///
    /// The declared count must match the number of indices. Strip lines may
    /// also declare their triangle count instead.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens = parse_indices(line);
        let first = *tokens.first()?;
        let (mode, declared, offset) = if first < 0 {
            (RunMode::Strip, *tokens.get(1)?, 2)
        } else {
            (RunMode::Fan, first, 1)
        };

        let indices = tokens[offset..].to_vec();
        let declared = i64::from(declared);
        let index_count = indices.len() as i64;
        let accepted = declared == index_count
            || (mode == RunMode::Strip && index_count >= 2 && declared == index_count - 2);

        if accepted {
            Some(Self { mode, indices })
        } else {
            None
        }
    }

    /// Number of triangles the run expands to
    pub fn triangle_count(&self) -> usize {
        self.indices.len().saturating_sub(2)
    }

    /// Expand the run into triangles
    pub fn triangles(&self) -> Vec<Face> {
        match self.mode {
            RunMode::Fan => expand_fan(&self.indices),
            RunMode::Strip => expand_strip(&self.indices),
        }
    }
}

/// Fan triangulation: `(r0, ri, ri+1)` for each inner index
pub fn expand_fan(run: &[i32]) -> Vec<Face> {
    if run.len() < 3 {
        return Vec::new();
    }
    let anchor = run[0];
    run[1..]
        .windows(2)
        .map(|pair| vec![anchor, pair[0], pair[1]])
        .collect()
}

/// Strip triangulation.
///
/// Triangle `k` is `(r[k], r[k+1], r[k+2])` for even `k` and
/// `(r[k], r[k+2], r[k+1])` for odd `k`, so neighbours keep a consistent
/// orientation.
pub fn expand_strip(run: &[i32]) -> Vec<Face> {
    run.windows(3)
        .enumerate()
        .map(|(k, w)| {
            if k % 2 == 1 {
                vec![w[0], w[2], w[1]]
            } else {
                vec![w[0], w[1], w[2]]
            }
        })
        .collect()
}
