//! Principal-axis analysis for automatic camera orientation.
//!
//! The solver fits an orthonormal frame to a point set: covariance of the
//! centered points, eigen-decomposition via cyclic Jacobi rotation, and a
//! handedness correction that pins down the sign ambiguity so repeated
//! calls on the same atoms produce the same view. The camera then looks
//! along the axis of least spread, with the middle axis up, framing the
//! two dominant axes.

use glam::Vec3;

/// Fixed sweep count; empirically sufficient for 3x3 real symmetric
/// matrices.
const JACOBI_SWEEPS: usize = 50;

/// Rotations are skipped when the target off-diagonal entry is already
/// below this, avoiding an unstable tangent on near-zero input.
const JACOBI_EPS: f64 = 1e-15;

/// Orthonormal viewing frame fitted to a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    /// Centroid of the points.
    pub center: Vec3,
    /// Direction the camera should face (axis of least spread).
    pub view: Vec3,
    /// Up direction (axis of middle spread).
    pub up: Vec3,
    /// Full extent of the points across the two framed axes.
    pub extent: f32,
}

/// Fit a principal-axis frame to `points`. Returns `None` for an empty
/// set. Rank-deficient input (a single point, collinear or coplanar
/// points) still yields a valid orthonormal frame; the degenerate
/// directions are arbitrary but deterministic.
#[must_use]
pub fn principal_frame(points: &[Vec3]) -> Option<OrientationFrame> {
    if points.is_empty() {
        return None;
    }

    let inv_n = 1.0 / points.len() as f64;
    let mut centroid = [0.0f64; 3];
    for p in points {
        centroid[0] += f64::from(p.x);
        centroid[1] += f64::from(p.y);
        centroid[2] += f64::from(p.z);
    }
    for c in &mut centroid {
        *c *= inv_n;
    }

    // Covariance of the centered points; symmetric by construction.
    let mut cov = [[0.0f64; 3]; 3];
    for p in points {
        let d = [
            f64::from(p.x) - centroid[0],
            f64::from(p.y) - centroid[1],
            f64::from(p.z) - centroid[2],
        ];
        for (i, di) in d.iter().enumerate() {
            for (j, dj) in d.iter().enumerate() {
                cov[i][j] += di * dj * inv_n;
            }
        }
    }

    let (eigenvalues, eigenvectors) = jacobi_eigen(cov);

    // Sort eigenpairs by eigenvalue descending (largest variance first).
    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| {
        eigenvalues[j]
            .partial_cmp(&eigenvalues[i])
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    let axis = |k: usize| {
        Vec3::new(
            eigenvectors[0][order[k]] as f32,
            eigenvectors[1][order[k]] as f32,
            eigenvectors[2][order[k]] as f32,
        )
    };
    let major = axis(0);
    let up = axis(1);
    let mut view = axis(2);

    // Handedness correction: without it the view axis sign is arbitrary
    // and can flip between numerically close eigen-solutions.
    if up.cross(view).dot(major) < 0.0 {
        view = -view;
    }

    let center = Vec3::new(
        centroid[0] as f32,
        centroid[1] as f32,
        centroid[2] as f32,
    );
    let mut max_proj = 0.0f32;
    for p in points {
        let d = *p - center;
        max_proj = max_proj.max(d.dot(major).abs()).max(d.dot(up).abs());
    }

    Some(OrientationFrame {
        center,
        view,
        up,
        extent: max_proj * 2.0,
    })
}

/// Eigen-decompose a symmetric 3x3 matrix by cyclic Jacobi rotation:
/// sweep the off-diagonal pairs (0,1), (0,2), (1,2) in fixed order for
/// [`JACOBI_SWEEPS`] sweeps. Returns eigenvalues and the matching
/// eigenvectors as columns.
fn jacobi_eigen(mut a: [[f64; 3]; 3]) -> ([f64; 3], [[f64; 3]; 3]) {
    let mut v = [[0.0f64; 3]; 3];
    v[0][0] = 1.0;
    v[1][1] = 1.0;
    v[2][2] = 1.0;

    const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];
    for _ in 0..JACOBI_SWEEPS {
        for &(p, q) in &PAIRS {
            let apq = a[p][q];
            if apq.abs() < JACOBI_EPS {
                continue;
            }
            let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
            let t = theta.signum()
                / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;

            // A <- A G (columns p and q)
            for k in 0..3 {
                let akp = a[k][p];
                let akq = a[k][q];
                a[k][p] = c * akp - s * akq;
                a[k][q] = s * akp + c * akq;
            }
            // A <- G^T A (rows p and q)
            for k in 0..3 {
                let apk = a[p][k];
                let aqk = a[q][k];
                a[p][k] = c * apk - s * aqk;
                a[q][k] = s * apk + c * aqk;
            }
            // V <- V G accumulates eigenvectors as columns.
            for row in &mut v {
                let vp = row[p];
                let vq = row[q];
                row[p] = c * vp - s * vq;
                row[q] = s * vp + c * vq;
            }
        }
    }

    ([a[0][0], a[1][1], a[2][2]], v)
}
