/// Intensity histogram over `[0, max]` with equal-width bins.
///
/// Bin `i` covers `[i * max / n, (i + 1) * max / n)`; the last bin is closed
/// so the maximum intensity lands in it.
pub(crate) struct IntensityHistogram {
    counts: Vec<u64>,
    max: u8,
}

impl IntensityHistogram {
    pub(crate) fn new(num_bins: usize, max: u8) -> Self {
        assert!(num_bins > 0, "intensity histogram requires at least one bin");
        IntensityHistogram {
            counts: vec![0; num_bins],
            max,
        }
    }

    pub(crate) fn from_pixels(pixels: impl Iterator<Item = u8>, num_bins: usize, max: u8) -> Self {
        let mut hist = Self::new(num_bins, max);
        for v in pixels {
            hist.accumulate(v);
        }
        hist
    }

    fn bin_of(&self, v: u8) -> usize {
        let n = self.counts.len();
        if self.max == 0 {
            return 0;
        }
        (v.min(self.max) as usize * n / self.max as usize).min(n - 1)
    }

    pub(crate) fn accumulate(&mut self, v: u8) {
        let idx = self.bin_of(v);
        self.counts[idx] += 1;
    }

    /// Left edge of bin `index` truncated to an intensity.
    pub(crate) fn bin_intensity(&self, index: usize) -> u8 {
        (index * self.max as usize / self.counts.len()) as u8
    }

    #[cfg(test)]
    pub(crate) fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Zero every bin holding fewer than `min_count` pixels.
    pub(crate) fn suppress_below(&mut self, min_count: u64) {
        for c in self.counts.iter_mut() {
            if *c < min_count {
                *c = 0;
            }
        }
    }

    /// `(count, intensity)` for every bin, most populated first. Ties go to
    /// the brighter bin.
    pub(crate) fn ranked(&self) -> Vec<(u64, u8)> {
        let mut ranked: Vec<(u64, u8)> = (0..self.counts.len())
            .map(|i| (self.counts[i], self.bin_intensity(i)))
            .collect();
        ranked.sort_by(|a, b| b.cmp(a));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::IntensityHistogram;

    #[test]
    fn extremes_land_in_first_and_last_bin() {
        let hist = IntensityHistogram::from_pixels([0u8, 255, 255].into_iter(), 25, 255);
        assert_eq!(hist.counts()[0], 1);
        assert_eq!(hist.counts()[24], 2);
        assert_eq!(hist.bin_intensity(24), 244);
    }

    #[test]
    fn all_black_image_uses_single_bin() {
        let hist = IntensityHistogram::from_pixels(std::iter::repeat(0u8).take(10), 25, 0);
        assert_eq!(hist.counts()[0], 10);
        assert_eq!(hist.bin_intensity(0), 0);
    }

    #[test]
    fn ranking_orders_by_count_then_intensity() {
        let mut hist = IntensityHistogram::new(4, 200);
        for v in [0u8, 0, 60, 60, 199, 199, 199] {
            hist.accumulate(v);
        }
        hist.suppress_below(2);
        let ranked = hist.ranked();
        assert_eq!(ranked[0], (3, 150));
        assert_eq!(ranked[1], (2, 50));
        assert_eq!(ranked[2], (2, 0));
        assert_eq!(ranked[3], (0, 100));
    }
}
