use crate::ModeTieBreak;

/// Fixed-size bin counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u32>,
}

/// Why a histogram has no usable mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoMode {
    Empty,
    Tie,
}

impl Histogram {
    pub fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
        }
    }

    /// Count one sample; out-of-range bins clamp to the last bin.
    pub fn add(&mut self, bin: usize) {
        if let Some(last) = self.counts.len().checked_sub(1) {
            self.counts[bin.min(last)] += 1;
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Bin with the highest count, resolving ties per `tie_break`.
    ///
    /// `None` for an empty histogram or a rejected tie.
    pub fn mode(&self, tie_break: ModeTieBreak) -> Option<usize> {
        self.try_mode(tie_break).ok()
    }

    pub(crate) fn try_mode(&self, tie_break: ModeTieBreak) -> Result<usize, NoMode> {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Err(NoMode::Empty);
        }
        let mut peaks = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == max)
            .map(|(i, _)| i);
        let first = peaks.next().ok_or(NoMode::Empty)?;
        let last = peaks.last();
        match (tie_break, last) {
            (_, None) | (ModeTieBreak::LowestBin, Some(_)) => Ok(first),
            (ModeTieBreak::HighestBin, Some(last)) => Ok(last),
            (ModeTieBreak::Reject, Some(_)) => Err(NoMode::Tie),
        }
    }
}
