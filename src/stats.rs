/// Running mean and variance (Welford's algorithm).
#[derive(Debug, Default)]
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

#[derive(Debug)]
pub struct AccumulatorReport {
    pub n_vals: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    /// Report the mean and sample standard deviation.
    ///
    /// Both are NaN until enough values have been added.
    pub fn report(&self) -> AccumulatorReport {
        AccumulatorReport {
            n_vals: self.n_vals,
            mean: if self.n_vals > 0 { self.mean } else { f64::NAN },
            std_dev: if self.n_vals > 1 {
                (self.diff_2_sum / (self.n_vals - 1) as f64).sqrt()
            } else {
                f64::NAN
            },
        }
    }
}

/// Accumulate the fraction of ones in every row of an indicator matrix.
///
/// Empty rows are skipped.
pub fn on_fraction<'a, I>(rows: I) -> Accumulator
where
    I: IntoIterator<Item = &'a Vec<u8>>,
{
    let mut acc = Accumulator::new();
    for row in rows {
        if row.is_empty() {
            continue;
        }
        let n_on: usize = row.iter().map(|&val| val as usize).sum();
        acc.add(n_on as f64 / row.len() as f64);
    }
    acc
}
