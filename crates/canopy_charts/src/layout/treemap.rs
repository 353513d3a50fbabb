use canopy_core::Rect;
use serde::{Deserialize, Serialize};

use crate::data::TreeNode;

/// Target aspect ratio for squarified rows.
const PHI: f32 = 1.618_034;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tiling {
    /// Rows of near-square cells.
    #[default]
    Squarify,
    /// Alternate horizontal and vertical strips per depth.
    SliceDice,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreemapPadding {
    /// Gap between siblings.
    pub inner: f32,
    /// Gap between a parent's edge and its children.
    pub outer: f32,
}

/// A positioned leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct TreemapCell {
    /// `/`-joined names below the root, unique per leaf.
    pub path: String,
    pub name: String,
    /// Name of the top-level ancestor (the leaf itself at depth 1).
    pub group: String,
    pub depth: usize,
    pub value: f32,
    pub rect: Rect,
}

/// Lay out the leaves of `root` inside `bounds`. Children are placed by
/// descending weight; zero-weight subtrees get no cells.
pub fn treemap(root: &TreeNode, bounds: Rect, tiling: Tiling, padding: TreemapPadding) -> Vec<TreemapCell> {
    let mut out = Vec::with_capacity(root.leaf_count());
    if root.is_leaf() {
        if root.weight() > 0.0 {
            out.push(TreemapCell {
                path: root.name.clone(),
                name: root.name.clone(),
                group: root.name.clone(),
                depth: 0,
                value: root.weight(),
                rect: bounds.inset(padding.outer, padding.outer),
            });
        }
        return out;
    }
    let content = bounds.inset(padding.outer, padding.outer);
    place_children(root, content, 0, "", None, tiling, padding, &mut out);
    out
}

#[allow(clippy::too_many_arguments)]
fn place_children(
    node: &TreeNode,
    area: Rect,
    depth: usize,
    prefix: &str,
    group: Option<&str>,
    tiling: Tiling,
    padding: TreemapPadding,
    out: &mut Vec<TreemapCell>,
) {
    let mut order: Vec<(usize, f32)> = node
        .children
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.weight()))
        .filter(|(_, w)| *w > 0.0)
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    let weights: Vec<f32> = order.iter().map(|(_, w)| *w).collect();

    let rects = match tiling {
        Tiling::Squarify => squarify(&weights, area),
        Tiling::SliceDice => slice_dice(&weights, area, depth % 2 == 0),
    };

    let half = padding.inner * 0.5;
    for ((i, w), rect) in order.into_iter().zip(rects) {
        let child = &node.children[i];
        // Repeated sibling names get `#n` so every path stays unique.
        let repeats = node.children[..i].iter().filter(|c| c.name == child.name).count();
        let segment = if repeats == 0 {
            child.name.clone()
        } else {
            format!("{}#{repeats}", child.name)
        };
        let path = if prefix.is_empty() {
            segment
        } else {
            format!("{prefix}/{segment}")
        };
        let group = group.unwrap_or(&child.name);
        let rect = rect.inset(half, half);
        if child.is_leaf() {
            out.push(TreemapCell {
                path,
                name: child.name.clone(),
                group: group.to_string(),
                depth: depth + 1,
                value: w,
                rect,
            });
        } else {
            let inner = rect.inset(padding.outer, padding.outer);
            place_children(child, inner, depth + 1, &path, Some(group), tiling, padding, out);
        }
    }
}

/// Strips along x when `horizontal`, along y otherwise.
fn slice_dice(weights: &[f32], area: Rect, horizontal: bool) -> Vec<Rect> {
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return vec![Rect::new(area.x(), area.y(), 0.0, 0.0); weights.len()];
    }
    let mut cur = 0.0;
    weights
        .iter()
        .map(|w| {
            let t0 = cur / total;
            cur += w;
            let t1 = cur / total;
            if horizontal {
                Rect::from_corners(
                    area.x() + area.width() * t0,
                    area.y(),
                    area.x() + area.width() * t1,
                    area.bottom(),
                )
            } else {
                Rect::from_corners(
                    area.x(),
                    area.y() + area.height() * t0,
                    area.right(),
                    area.y() + area.height() * t1,
                )
            }
        })
        .collect()
}

/// Squarified tiling of descending `weights`.
fn squarify(weights: &[f32], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(weights.len());
    let (mut x0, mut y0) = (area.x(), area.y());
    let (x1, y1) = (area.right(), area.bottom());
    let mut remaining: f32 = weights.iter().sum();
    let n = weights.len();
    let mut i0 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let mut i1 = i0 + 1;
        let mut sum = weights[i0];
        let mut min = sum;
        let mut max = sum;
        let alpha = if dx > 0.0 && dy > 0.0 && remaining > 0.0 {
            (dy / dx).max(dx / dy) / (remaining * PHI)
        } else {
            0.0
        };
        let worst = |sum: f32, min: f32, max: f32| {
            let beta = sum * sum * alpha;
            if beta <= 0.0 || min <= 0.0 {
                f32::INFINITY
            } else {
                (max / beta).max(beta / min)
            }
        };
        let mut best = worst(sum, min, max);
        while i1 < n {
            let w = weights[i1];
            let ratio = worst(sum + w, min.min(w), max.max(w));
            if ratio > best {
                break;
            }
            sum += w;
            min = min.min(w);
            max = max.max(w);
            best = ratio;
            i1 += 1;
        }

        let row = &weights[i0..i1];
        let share = if remaining > 0.0 { sum / remaining } else { 1.0 };
        if dx < dy {
            // Row spans the width; cells laid along x.
            let h = dy * share;
            rects.extend(slice_dice(row, Rect::from_corners(x0, y0, x1, y0 + h), true));
            y0 += h;
        } else {
            let w = dx * share;
            rects.extend(slice_dice(row, Rect::from_corners(x0, y0, x0 + w, y1), false));
            x0 += w;
        }
        remaining -= sum;
        i0 = i1;
    }
    rects
}
