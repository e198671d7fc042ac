use serde::Serialize;

/// The MSE observed at one epoch.
///
/// It is measured before that epoch's update, so epoch 0 holds the error of
/// the untrained `(0, 0)` model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceEntry {
    pub epoch: usize,
    pub mse: f64,
}

/// Append-only per-epoch error history of a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorTrace {
    entries: Vec<TraceEntry>,
}

impl ErrorTrace {
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            entries: Vec::with_capacity(epochs),
        }
    }

    /// Records the MSE of the next epoch, epochs are numbered from 0.
    pub fn push(&mut self, mse: f64) {
        let epoch = self.entries.len();
        self.entries.push(TraceEntry { epoch, mse });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&TraceEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// Smallest and largest MSE recorded, `None` while empty.
    pub fn mse_range(&self) -> Option<(f64, f64)> {
        let first = self.entries.first()?.mse;

        let range = self.entries.iter().fold((first, first), |(lo, hi), e| {
            (lo.min(e.mse), hi.max(e.mse))
        });

        Some(range)
    }
}
