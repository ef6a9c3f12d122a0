//! Single-pass summary statistics
//!
//! Values arrive in batches of any size. Mean and variance follow Welford's online
//! update, so nothing is retained besides the running moments.

/// Running count, sum, extremes, mean and variance.
///
/// ```
/// use gdalraster::RunningStats;
///
/// let mut rs = RunningStats::new(true);
/// rs.update(&[1.0, 2.0, f64::NAN]);
/// rs.update(&[3.0]);
/// assert_eq!(rs.get_count(), 3);
/// assert_eq!(rs.get_mean(), 2.0);
/// assert_eq!(rs.get_var(), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RunningStats {
    na_rm: bool,
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
    sum: f64,
}

impl RunningStats {
    /// With `na_rm`, NaN values are skipped. Otherwise a single NaN poisons every result.
    pub fn new(na_rm: bool) -> Self {
        RunningStats {
            na_rm,
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
        }
    }

    pub fn update(&mut self, values: &[f64]) {
        for &x in values {
            if x.is_nan() && self.na_rm {
                continue;
            }
            self.count += 1;
            let delta = x - self.mean;
            self.mean += delta / self.count as f64;
            self.m2 += delta * (x - self.mean);
            self.sum += x;
            if x.is_nan() {
                self.min = f64::NAN;
                self.max = f64::NAN;
            } else {
                if !self.min.is_nan() && x < self.min {
                    self.min = x;
                }
                if !self.max.is_nan() && x > self.max {
                    self.max = x;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = RunningStats::new(self.na_rm);
    }

    pub fn get_count(&self) -> u64 {
        self.count
    }

    /// NaN until a value has been seen.
    pub fn get_mean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.mean
    }

    pub fn get_min(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.min
    }

    pub fn get_max(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.max
    }

    pub fn get_sum(&self) -> f64 {
        self.sum
    }

    /// Sample variance, NaN with fewer than two values.
    pub fn get_var(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        self.m2 / (self.count - 1) as f64
    }

    pub fn get_sd(&self) -> f64 {
        self.get_var().sqrt()
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        RunningStats::new(true)
    }
}
