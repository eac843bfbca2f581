//! Manually tuned implementation.

use super::{check_contract, grid_dims, CELL, KERNEL};
use crate::buffer::ImageF32;
use crate::candidate::Candidate;
use crate::error::Error;
use crate::params::FilterParams;

/// Hand-optimized variant. The grid lives in two planar f32 arrays so the
/// blur passes run over contiguous slices, the x-pass has a branch-free
/// interior loop, and the per-column slice weights are hoisted out of the
/// pixel loop.
#[derive(Debug, Default)]
pub struct ManualFilter;

impl Candidate for ManualFilter {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn label(&self) -> &'static str {
        "Manually-tuned"
    }

    fn run(
        &self,
        input: &ImageF32,
        params: &FilterParams,
        output: &mut ImageF32,
    ) -> Result<(), Error> {
        let r = check_contract(input, params, output)?;
        let (w, h) = (input.width(), input.height());
        let step = input.channels();
        let dims = grid_dims(w, h, r);
        let (gw, gh, gd) = (dims.gw, dims.gh, dims.gd);
        let slab = gw * gh;
        let cells = slab * gd;

        let mut sum = vec![0.0f32; cells];
        let mut cnt = vec![0.0f32; cells];

        for y in 0..h {
            let base = ((y + CELL / 2) / CELL) * gw;
            for (x, px) in input.row(y).iter().step_by(step).enumerate() {
                let v = px.clamp(0.0, 1.0);
                let at = ((v / r + 0.5) as usize) * slab + base + (x + CELL / 2) / CELL;
                sum[at] += v;
                cnt[at] += 1.0;
            }
        }

        let mut scratch = vec![0.0f32; cells];
        for plane in [&mut sum, &mut cnt] {
            blur_z(plane, &mut scratch, slab, gd);
            blur_x(&scratch, plane, gw);
            blur_y(plane, &mut scratch, gw, gh, gd);
            std::mem::swap(plane, &mut scratch);
        }

        let cols: Vec<(usize, f32)> = (0..w)
            .map(|x| (x / CELL, (x % CELL) as f32 / CELL as f32))
            .collect();
        for y in 0..h {
            let yi = y / CELL;
            let fy = (y % CELL) as f32 / CELL as f32;
            let row_base = yi * gw;
            let irow = input.row(y);
            let orow = output.row_mut(y);
            for (o, (px, &(xi, fx))) in orow
                .iter_mut()
                .zip(irow.iter().step_by(step).zip(&cols))
            {
                let v = px.clamp(0.0, 1.0);
                let zv = v / r;
                let zi = zv as usize;
                let fz = zv - zi as f32;

                let w00 = (1.0 - fx) * (1.0 - fy);
                let w10 = fx * (1.0 - fy);
                let w01 = (1.0 - fx) * fy;
                let w11 = fx * fy;

                let i0 = zi * slab + row_base + xi;
                let i1 = i0 + slab;
                let s0 = w00 * sum[i0] + w10 * sum[i0 + 1] + w01 * sum[i0 + gw] + w11 * sum[i0 + gw + 1];
                let s1 = w00 * sum[i1] + w10 * sum[i1 + 1] + w01 * sum[i1 + gw] + w11 * sum[i1 + gw + 1];
                let c0 = w00 * cnt[i0] + w10 * cnt[i0 + 1] + w01 * cnt[i0 + gw] + w11 * cnt[i0 + gw + 1];
                let c1 = w00 * cnt[i1] + w10 * cnt[i1 + 1] + w01 * cnt[i1 + gw] + w11 * cnt[i1 + gw + 1];

                *o = (s0 + fz * (s1 - s0)) / (c0 + fz * (c1 - c0));
            }
        }
        Ok(())
    }
}

fn blur_z(src: &[f32], dst: &mut [f32], slab: usize, gd: usize) {
    for z in 0..gd {
        let drow = &mut dst[z * slab..(z + 1) * slab];
        let center = &src[z * slab..(z + 1) * slab];
        for (d, s) in drow.iter_mut().zip(center) {
            *d = 6.0 * s;
        }
        for (dz, kw) in [(-2isize, 1.0f32), (-1, 4.0), (1, 4.0), (2, 1.0)] {
            let zz = z as isize + dz;
            if !(0..gd as isize).contains(&zz) {
                continue;
            }
            let other = &src[zz as usize * slab..(zz as usize + 1) * slab];
            for (d, s) in drow.iter_mut().zip(other) {
                *d += kw * s;
            }
        }
    }
}

/// Guarded 5-tap sum for positions near a row boundary.
#[inline]
fn blur_tap(row: &[f32], x: usize) -> f32 {
    let n = row.len();
    let mut acc = 0.0;
    for xx in x.saturating_sub(2)..=(x + 2).min(n - 1) {
        acc += KERNEL[xx + 2 - x] * row[xx];
    }
    acc
}

fn blur_x(src: &[f32], dst: &mut [f32], gw: usize) {
    for (srow, drow) in src.chunks_exact(gw).zip(dst.chunks_exact_mut(gw)) {
        if gw < 5 {
            for x in 0..gw {
                drow[x] = blur_tap(srow, x);
            }
            continue;
        }
        drow[0] = blur_tap(srow, 0);
        drow[1] = blur_tap(srow, 1);
        for x in 2..gw - 2 {
            drow[x] =
                srow[x - 2] + 4.0 * srow[x - 1] + 6.0 * srow[x] + 4.0 * srow[x + 1] + srow[x + 2];
        }
        drow[gw - 2] = blur_tap(srow, gw - 2);
        drow[gw - 1] = blur_tap(srow, gw - 1);
    }
}

fn blur_y(src: &[f32], dst: &mut [f32], gw: usize, gh: usize, gd: usize) {
    for z in 0..gd {
        let base = z * gw * gh;
        for y in 0..gh {
            let drow = &mut dst[base + y * gw..base + (y + 1) * gw];
            let center = &src[base + y * gw..base + (y + 1) * gw];
            for (d, s) in drow.iter_mut().zip(center) {
                *d = 6.0 * s;
            }
            for (dy, kw) in [(-2isize, 1.0f32), (-1, 4.0), (1, 4.0), (2, 1.0)] {
                let yy = y as isize + dy;
                if !(0..gh as isize).contains(&yy) {
                    continue;
                }
                let other = &src[base + yy as usize * gw..base + (yy as usize + 1) * gw];
                for (d, s) in drow.iter_mut().zip(other) {
                    *d += kw * s;
                }
            }
        }
    }
}
