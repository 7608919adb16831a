//! Assembly of the lower-triangular factor and its derivative tensors.
//!
//! The network emits the factor as two flat streams: `ld` with the `d`
//! diagonal entries and `lo` with the `d(d-1)/2` strictly-below-diagonal
//! entries. Assembly is per-row concatenation, never in-place index
//! assignment, so the strictly-above-diagonal zeros are exact by
//! construction.
//!
//! Packing order: rows are processed top to bottom and `lo` is consumed
//! left to right; row `i` takes the next `i` unconsumed values as its
//! sub-diagonal columns `0..i`. For `d = 3` the layout is
//!
//! ```text
//! [ ld0   0    0  ]
//! [ lo0  ld1   0  ]
//! [ lo1  lo2  ld2 ]
//! ```

use burn::prelude::Backend;
use burn::tensor::Tensor;

/// The assembled factor `L` together with its time- and
/// configuration-derivative tensors, all for one batch.
#[derive(Debug, Clone)]
pub struct LowerFactor<B: Backend> {
    /// Lower-triangular factor `L`, `[n, d, d]`.
    pub l: Tensor<B, 3>,

    /// Time derivative `dL/dt`, `[n, d, d]`.
    pub dl_dt: Tensor<B, 3>,

    /// Configuration derivatives `dL/dq_i`, `[n, d, d, d]`; the trailing
    /// axis indexes which `q_i` the derivative is taken with respect to.
    pub dl_dq: Tensor<B, 4>,
}

/// Number of strictly-below-diagonal entries of a `d x d` matrix.
#[must_use]
pub const fn off_diagonal_width(dof: usize) -> usize {
    dof * (dof - 1) / 2
}

/// Assembles a lower-triangular `[n, d, d]` matrix from a diagonal stream
/// `[n, d]` and an off-diagonal stream `[n, d(d-1)/2]`.
///
/// Also used for `dL/dt` by feeding the time-derivative streams.
///
/// # Panics
///
/// Panics if the off-diagonal stream does not have `d(d-1)/2` columns.
pub fn assemble_lower<B: Backend>(
    diagonal: Tensor<B, 2>,
    off_diagonal: Tensor<B, 2>,
) -> Tensor<B, 3> {
    let [n, d] = diagonal.dims();
    let [_, off_width] = off_diagonal.dims();
    assert_eq!(
        off_width,
        off_diagonal_width(d),
        "off-diagonal stream must have d(d-1)/2 columns"
    );

    let device = diagonal.device();
    let mut rows = Vec::with_capacity(d);
    let mut cursor = 0;
    for i in 0..d {
        let mut parts = Vec::with_capacity(3);
        if i > 0 {
            parts.push(off_diagonal.clone().slice([0..n, cursor..cursor + i]));
            cursor += i;
        }
        parts.push(diagonal.clone().slice([0..n, i..i + 1]));
        if i + 1 < d {
            parts.push(Tensor::zeros([n, d - 1 - i], &device));
        }
        rows.push(Tensor::cat(parts, 1));
    }
    Tensor::stack::<3>(rows, 1)
}

/// Assembles the configuration-derivative tensor `dL/dq_i`, `[n, d, d, d]`,
/// from derivative streams `dld/dq` `[n, d, d]` and `dlo/dq`
/// `[n, d(d-1)/2, d]` (trailing axis = which `q_i`).
///
/// The packing is identical to [`assemble_lower`], applied per `q_i` slice.
///
/// # Panics
///
/// Panics if the off-diagonal stream does not have `d(d-1)/2` rows.
pub fn assemble_lower_dq<B: Backend>(
    diagonal_dq: Tensor<B, 3>,
    off_diagonal_dq: Tensor<B, 3>,
) -> Tensor<B, 4> {
    let [n, d, _] = diagonal_dq.dims();
    let [_, off_width, _] = off_diagonal_dq.dims();
    assert_eq!(
        off_width,
        off_diagonal_width(d),
        "off-diagonal stream must have d(d-1)/2 rows"
    );

    let device = diagonal_dq.device();
    let mut rows = Vec::with_capacity(d);
    let mut cursor = 0;
    for i in 0..d {
        let mut parts = Vec::with_capacity(3);
        if i > 0 {
            parts.push(
                off_diagonal_dq
                    .clone()
                    .slice([0..n, cursor..cursor + i, 0..d]),
            );
            cursor += i;
        }
        parts.push(diagonal_dq.clone().slice([0..n, i..i + 1, 0..d]));
        if i + 1 < d {
            parts.push(Tensor::zeros([n, d - 1 - i, d], &device));
        }
        rows.push(Tensor::cat(parts, 1));
    }
    Tensor::stack::<4>(rows, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn device() -> <TestBackend as Backend>::Device {
        <TestBackend as Backend>::Device::default()
    }

    #[test]
    fn off_diagonal_widths() {
        assert_eq!(off_diagonal_width(1), 0);
        assert_eq!(off_diagonal_width(2), 1);
        assert_eq!(off_diagonal_width(3), 3);
        assert_eq!(off_diagonal_width(4), 6);
    }

    #[test]
    fn assemble_packing_order_d3() {
        let ld = Tensor::<TestBackend, 2>::from_data([[1.0, 2.0, 3.0]], &device());
        let lo = Tensor::<TestBackend, 2>::from_data([[4.0, 5.0, 6.0]], &device());

        let l = assemble_lower(ld, lo);
        assert_eq!(l.dims(), [1, 3, 3]);

        let entries = l.into_data().to_vec::<f32>().unwrap();
        assert_eq!(
            entries,
            vec![
                1.0, 0.0, 0.0, //
                4.0, 2.0, 0.0, //
                5.0, 6.0, 3.0, //
            ]
        );
    }

    #[test]
    fn assemble_strictly_lower_triangular() {
        let ld = Tensor::<TestBackend, 2>::from_data([[0.7, 1.3], [2.1, 0.4]], &device());
        let lo = Tensor::<TestBackend, 2>::from_data([[-0.5], [9.9]], &device());

        let l = assemble_lower(ld, lo);
        let entries = l.into_data().to_vec::<f32>().unwrap();

        // Above-diagonal entries are exact zeros, not merely small.
        assert_eq!(entries[1], 0.0);
        assert_eq!(entries[5], 0.0);
        assert_eq!(entries, vec![0.7, 0.0, -0.5, 1.3, 2.1, 0.0, 9.9, 0.4]);
    }

    #[test]
    fn assemble_dq_packing_matches_lower() {
        // d = 2, one sample; derivative of each stream entry w.r.t. q0 and q1.
        let dld_dq =
            Tensor::<TestBackend, 3>::from_data([[[1.0, 2.0], [3.0, 4.0]]], &device());
        let dlo_dq = Tensor::<TestBackend, 3>::from_data([[[5.0, 6.0]]], &device());

        let dl_dq = assemble_lower_dq(dld_dq, dlo_dq);
        assert_eq!(dl_dq.dims(), [1, 2, 2, 2]);

        // Layout [n, row, col, q]: diagonal entries carry dld/dq, the
        // (1, 0) entry carries dlo/dq, above-diagonal stays zero.
        let entries = dl_dq.into_data().to_vec::<f32>().unwrap();
        assert_eq!(
            entries,
            vec![
                1.0, 2.0, // (0,0) d/dq0, d/dq1
                0.0, 0.0, // (0,1)
                5.0, 6.0, // (1,0)
                3.0, 4.0, // (1,1)
            ]
        );
    }

    #[test]
    #[should_panic(expected = "d(d-1)/2")]
    fn assemble_rejects_wrong_off_width() {
        let ld = Tensor::<TestBackend, 2>::from_data([[1.0, 2.0, 3.0]], &device());
        let lo = Tensor::<TestBackend, 2>::from_data([[4.0, 5.0]], &device());
        let _ = assemble_lower(ld, lo);
    }
}
