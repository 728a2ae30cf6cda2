//! Swept AABB time-of-impact.
//!
//! ```text
//!   mover ──d──▶          target
//!   ┌───┐               ┌───────┐
//!   │   │ ─ ─ ─ ─ ─ ─ ─▶│       │
//!   └───┘  entry t      └───────┘
//! ```
//!
//! For each axis the mover overlaps the target during a time interval
//! `[entry, exit]`, measured in fractions of `d`. The boxes touch when all
//! intervals overlap: overall entry is the latest axis entry, overall exit
//! the earliest axis exit. A hit needs `entry <= exit` and `entry` in
//! `[0, 1]`. An axis with no motion never limits the interval, so it is
//! rejected up front if the boxes are already apart on it.

use super::aabb::Aabb;

/// Earliest contact between a moving box and a static one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit<const N: usize> {
    /// Fraction of the displacement travelled before contact, in `[0, 1]`.
    pub time: f32,
    /// Unit axis normal pointing from the target toward the mover.
    pub normal: [f32; N],
}

/// Unit vector along `axis` with the given sign.
pub(crate) fn axis_normal<const N: usize>(axis: usize, sign: f32) -> [f32; N] {
    let mut normal = [0.0; N];
    normal[axis] = if sign < 0.0 { -1.0 } else { 1.0 };
    normal
}

/// Sweep `mover` by `displacement` against a stationary `target`.
///
/// Boxes that already overlap report `time == 0` with the normal of the
/// shallowest penetration axis. Otherwise the normal lies on the axis whose
/// entry came last, opposite the motion on that axis. Ties go to the
/// earlier axis (X, then Y, then Z).
pub fn sweep<const N: usize>(
    mover: &Aabb<N>,
    target: &Aabb<N>,
    displacement: [f32; N],
) -> Option<SweepHit<N>> {
    if displacement.iter().all(|&d| d == 0.0) {
        return None;
    }

    for axis in 0..N {
        let apart = mover.max[axis] <= target.min[axis] || mover.min[axis] >= target.max[axis];
        if displacement[axis] == 0.0 && apart {
            return None;
        }
    }

    if let Some((axis, push)) = mover.penetration(target) {
        return Some(SweepHit {
            time: 0.0,
            normal: axis_normal(axis, push),
        });
    }

    let mut entry_time = f32::NEG_INFINITY;
    let mut exit_time = f32::INFINITY;
    let mut entry_axis = 0;

    for axis in 0..N {
        let d = displacement[axis];
        if d == 0.0 {
            continue;
        }
        let (inv_entry, inv_exit) = if d > 0.0 {
            (target.min[axis] - mover.max[axis], target.max[axis] - mover.min[axis])
        } else {
            (target.max[axis] - mover.min[axis], target.min[axis] - mover.max[axis])
        };
        let entry = inv_entry / d;
        if entry > entry_time {
            entry_time = entry;
            entry_axis = axis;
        }
        exit_time = exit_time.min(inv_exit / d);
    }

    if entry_time > exit_time || !(0.0..=1.0).contains(&entry_time) {
        return None;
    }

    Some(SweepHit {
        time: entry_time,
        normal: axis_normal(entry_axis, -displacement[entry_axis]),
    })
}
