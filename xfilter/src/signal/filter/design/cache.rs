use super::{butter_ba, BaFormatFilter, Cutoff, FilterBandType};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use xfilter_core::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DesignKey {
    band: FilterBandType,
    order: usize,
    edges: (u64, u64),
    fs: u64,
}

impl DesignKey {
    fn new(order: usize, cutoff: Cutoff<f64>, fs: f64) -> Self {
        let edges = match cutoff {
            Cutoff::Lowpass(w) | Cutoff::Highpass(w) => (w.to_bits(), 0),
            Cutoff::Bandpass(lo, hi) => (lo.to_bits(), hi.to_bits()),
        };
        Self {
            band: cutoff.band(),
            order,
            edges,
            fs: fs.to_bits(),
        }
    }
}

/// Caller-owned memo of Butterworth designs keyed by band, order, cutoff and sample rate.
///
/// Keys compare the exact bit patterns of the floating point parameters. Failed designs are not
/// stored.
///
/// ```
/// use xfilter::signal::filter::design::{Cutoff, DesignCache};
///
/// let mut cache = DesignCache::new();
/// let first = cache.get_or_design(2, Cutoff::Lowpass(0.25), 1.0).unwrap().clone();
/// let second = cache.get_or_design(2, Cutoff::Lowpass(0.25), 1.0).unwrap();
/// assert_eq!(&first, second);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DesignCache {
    designs: HashMap<DesignKey, BaFormatFilter<f64>>,
}

impl DesignCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached design or run [`butter_ba`] and remember the result.
    ///
    /// # Errors
    /// Whatever [`butter_ba`] reports for the parameters.
    pub fn get_or_design(
        &mut self,
        order: usize,
        cutoff: Cutoff<f64>,
        fs: f64,
    ) -> Result<&BaFormatFilter<f64>> {
        match self.designs.entry(DesignKey::new(order, cutoff, fs)) {
            Entry::Occupied(entry) => {
                debug!("design cache hit: {:?} order={} fs={}", cutoff, order, fs);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!("design cache miss: {:?} order={} fs={}", cutoff, order, fs);
                let ba = butter_ba(order, cutoff, fs)?;
                Ok(entry.insert(ba))
            }
        }
    }

    /// Number of stored designs.
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Drop every stored design.
    pub fn clear(&mut self) {
        self.designs.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use xfilter_core::Error;

    #[test]
    fn second_lookup_reuses_the_design() {
        let mut cache = DesignCache::new();
        assert!(cache.is_empty());
        let first = cache
            .get_or_design(3, Cutoff::Lowpass(0.1), 1.0)
            .unwrap()
            .clone();
        let second = cache
            .get_or_design(3, Cutoff::Lowpass(0.1), 1.0)
            .unwrap()
            .clone();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn band_type_is_part_of_the_key() {
        let mut cache = DesignCache::new();
        let lp = cache
            .get_or_design(2, Cutoff::Lowpass(0.25), 1.0)
            .unwrap()
            .clone();
        let hp = cache
            .get_or_design(2, Cutoff::Highpass(0.25), 1.0)
            .unwrap()
            .clone();
        assert_ne!(lp.b, hp.b);
        assert_eq!(cache.len(), 2);

        cache.get_or_design(2, Cutoff::Lowpass(0.25), 2.0).unwrap();
        cache.get_or_design(3, Cutoff::Lowpass(0.25), 1.0).unwrap();
        assert_eq!(cache.len(), 4);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_designs_are_not_stored() {
        let mut cache = DesignCache::new();
        assert_eq!(
            cache.get_or_design(0, Cutoff::Lowpass(0.25), 1.0),
            Err(Error::InvalidOrder { order: 0 })
        );
        assert!(cache.is_empty());
    }
}
