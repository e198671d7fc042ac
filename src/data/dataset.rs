/// A single mileage/price observation (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered, in-memory dataset.
///
/// Samples keep the order they were loaded in, so every pass over the
/// dataset visits them the same way and error traces are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates a new dataset from owned samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Builds a dataset from `(x, y)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            samples: pairs.into_iter().map(Sample::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_keeps_insertion_order() {
        let ds = Dataset::from_pairs([(3.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(ds.len(), 3);

        let xs: Vec<f64> = ds.iter().map(|s| s.x).collect();
        assert_eq!(xs, [3.0, 1.0, 2.0]);
        assert_eq!(ds.samples()[1], Sample::new(1.0, 2.0));
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
    }
}
