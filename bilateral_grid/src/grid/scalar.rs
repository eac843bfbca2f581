//! Straightforward reference implementation.

use super::{check_contract, grid_dims, CELL, KERNEL};
use crate::buffer::ImageF32;
use crate::candidate::Candidate;
use crate::error::Error;
use crate::params::FilterParams;

/// Clear nested-loop rendition of the transform. The tuned and parallel
/// variants are held to numerical agreement with this one.
#[derive(Debug, Default)]
pub struct ScalarFilter;

impl Candidate for ScalarFilter {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn label(&self) -> &'static str {
        "Scalar reference"
    }

    fn run(
        &self,
        input: &ImageF32,
        params: &FilterParams,
        output: &mut ImageF32,
    ) -> Result<(), Error> {
        let r = check_contract(input, params, output)?;
        let (w, h) = (input.width(), input.height());
        let dims = grid_dims(w, h, r);
        let (gw, gh, gd) = (dims.gw, dims.gh, dims.gd);
        let cells = gw * gh * gd;
        let at = |x: usize, y: usize, z: usize| (z * gh + y) * gw + x;

        // Scatter homogeneous (value, weight) pairs into the grid.
        let mut grid = vec![[0.0f32; 2]; cells];
        for y in 0..h {
            for x in 0..w {
                let v = input.get(x, y, 0).clamp(0.0, 1.0);
                let xi = (x + CELL / 2) / CELL;
                let yi = (y + CELL / 2) / CELL;
                let zi = (v / r + 0.5) as usize;
                let cell = &mut grid[at(xi, yi, zi)];
                cell[0] += v;
                cell[1] += 1.0;
            }
        }

        // Separable blur: the same kernel along z, then x, then y. Taps
        // outside the grid read zero.
        let mut front = grid;
        let mut back = vec![[0.0f32; 2]; cells];
        for (step, extent) in [(gw * gh, gd), (1, gw), (gw, gh)] {
            for i in 0..cells {
                let pos = (i / step) % extent;
                let mut acc = [0.0f32; 2];
                for (k, kw) in KERNEL.iter().enumerate() {
                    let tap = pos as isize + k as isize - 2;
                    if tap >= 0 && (tap as usize) < extent {
                        let j = (i as isize + (tap - pos as isize) * step as isize) as usize;
                        acc[0] += kw * front[j][0];
                        acc[1] += kw * front[j][1];
                    }
                }
                back[i] = acc;
            }
            std::mem::swap(&mut front, &mut back);
        }
        let grid = front;

        // Slice: trilinear interpolation of (sum, weight), then normalize.
        for y in 0..h {
            let yi = y / CELL;
            let fy = (y % CELL) as f32 / CELL as f32;
            for x in 0..w {
                let xi = x / CELL;
                let fx = (x % CELL) as f32 / CELL as f32;
                let v = input.get(x, y, 0).clamp(0.0, 1.0);
                let zv = v / r;
                let zi = zv as usize;
                let fz = zv - zi as f32;

                let mut acc = [0.0f32; 2];
                for (dz, wz) in [(0usize, 1.0 - fz), (1, fz)] {
                    for (dy, wy) in [(0usize, 1.0 - fy), (1, fy)] {
                        for (dx, wx) in [(0usize, 1.0 - fx), (1, fx)] {
                            let cell = grid[at(xi + dx, yi + dy, zi + dz)];
                            let wgt = wz * wy * wx;
                            acc[0] += wgt * cell[0];
                            acc[1] += wgt * cell[1];
                        }
                    }
                }
                output.set(x, y, 0, acc[0] / acc[1]);
            }
        }
        Ok(())
    }
}
