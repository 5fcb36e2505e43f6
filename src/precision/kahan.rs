//! Compensated (Kahan) summation.

/// Running sum with a compensation term for lost low-order bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        self.sum
    }
}

impl Extend<f64> for KahanSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl FromIterator<f64> for KahanSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = KahanSum::new();
        sum.extend(iter);
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_small_increments() {
        let n = 1_000_000;
        let naive: f64 = std::iter::once(1e8)
            .chain(std::iter::repeat_n(1e-8, n))
            .sum();
        let kahan: KahanSum = std::iter::once(1e8)
            .chain(std::iter::repeat_n(1e-8, n))
            .collect();

        let exact = 1e8 + 1e-2;
        assert!((kahan.total() - exact).abs() < 1e-6);
        assert!((naive - exact).abs() > (kahan.total() - exact).abs());
    }
}
