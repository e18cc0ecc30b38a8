use super::{lit, relative_degree, Cutoff, ZpkFormatFilter};
use alloc::vec::Vec;
use core::iter;
use nalgebra::Complex;
use num_traits::{Float, FloatConst, NumAssign};
use xfilter_core::{Error, Result};

/// Move a lowpass prototype with unit cutoff onto a lowpass corner at `wo` rad/s.
///
/// Every root is scaled by `wo` and the gain by `wo^degree`, where `degree` is the pole excess.
pub fn lp2lp_zpk<F>(zpk: ZpkFormatFilter<F>, wo: F) -> Result<ZpkFormatFilter<F>>
where
    F: Float + NumAssign,
{
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    Ok(ZpkFormatFilter {
        z: zpk.z.iter().map(|z| *z * wo).collect(),
        p: zpk.p.iter().map(|p| *p * wo).collect(),
        k: zpk.k * wo.powi(degree as i32),
    })
}

/// Turn a lowpass prototype with unit cutoff into a highpass with corner `wo` rad/s.
///
/// Roots are inverted through `s -> wo / s`, the pole excess reappears as zeros at the origin and
/// the gain is corrected so the passband level is unchanged.
pub fn lp2hp_zpk<F>(zpk: ZpkFormatFilter<F>, wo: F) -> Result<ZpkFormatFilter<F>>
where
    F: Float + NumAssign,
{
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let wo_c = Complex::new(wo, F::zero());
    let zero = Complex::new(F::zero(), F::zero());
    let one = Complex::new(F::one(), F::zero());

    let prod_neg = |roots: &[Complex<F>]| roots.iter().fold(one, |acc, r| acc * -*r);
    let k = zpk.k * (prod_neg(&zpk.z) / prod_neg(&zpk.p)).re;

    let z = zpk
        .z
        .iter()
        .map(|z| wo_c / *z)
        .chain(iter::repeat(zero).take(degree))
        .collect();
    let p = zpk.p.iter().map(|p| wo_c / *p).collect();
    Ok(ZpkFormatFilter { z, p, k })
}

/// Turn a lowpass prototype with unit cutoff into a bandpass centred on `wo` with width `bw`.
///
/// Each root `r` is scaled by `bw / 2` and split into the pair `r ± sqrt(r² - wo²)`, so the
/// result carries twice as many poles. The pole excess is restored with zeros at the origin.
pub fn lp2bp_zpk<F>(zpk: ZpkFormatFilter<F>, wo: F, bw: F) -> Result<ZpkFormatFilter<F>>
where
    F: Float + NumAssign,
{
    let degree = relative_degree(&zpk.z, &zpk.p)?;
    let half_bw = bw / lit(2.0);
    let wo2 = Complex::new(wo * wo, F::zero());
    let zero = Complex::new(F::zero(), F::zero());

    let split = |roots: &[Complex<F>]| -> Vec<Complex<F>> {
        let scaled = roots.iter().map(|r| *r * half_bw).collect::<Vec<_>>();
        let offsets = scaled
            .iter()
            .map(|r| (*r * *r - wo2).sqrt())
            .collect::<Vec<_>>();
        let upper = scaled.iter().zip(&offsets).map(|(r, d)| *r + *d);
        let lower = scaled.iter().zip(&offsets).map(|(r, d)| *r - *d);
        upper.chain(lower).collect()
    };

    let mut z = split(&zpk.z);
    z.extend(iter::repeat(zero).take(degree));
    let p = split(&zpk.p);
    Ok(ZpkFormatFilter {
        z,
        p,
        k: zpk.k * bw.powi(degree as i32),
    })
}

/// Map an analog lowpass prototype onto the band selected by a Nyquist-normalized cutoff.
///
/// The cutoff is validated, pre-warped with `2 fs tan(pi w / fs)` for the internal sample rate
/// `fs = 2` used by the bilinear step, and handed to [`lp2lp_zpk`], [`lp2hp_zpk`] or
/// [`lp2bp_zpk`]. A bandpass uses `wo = sqrt(w0 w1)` and `bw = w1 - w0` on the warped edges.
///
/// # Errors
/// [`Error::InvalidCutoff`] when an edge falls outside `(0, 1)` or `low >= high`.
pub fn band_transform<F>(
    prototype: ZpkFormatFilter<F>,
    cutoff: Cutoff<F>,
) -> Result<ZpkFormatFilter<F>>
where
    F: Float + FloatConst + NumAssign,
{
    cutoff.check_normalized().map_err(Error::from)?;
    let fs = lit::<F>(2.0);
    let warp = |w: F| lit::<F>(2.0) * fs * (F::PI() * w / fs).tan();
    match cutoff {
        Cutoff::Lowpass(w) => lp2lp_zpk(prototype, warp(w)),
        Cutoff::Highpass(w) => lp2hp_zpk(prototype, warp(w)),
        Cutoff::Bandpass(lo, hi) => {
            let (w0, w1) = (warp(lo), warp(hi));
            lp2bp_zpk(prototype, Float::sqrt(w0 * w1), w1 - w0)
        }
    }
}
