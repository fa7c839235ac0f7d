//! Anytime trajectories and the visualization hand-off.

/// One point of an anytime trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Best cost known when the sample was taken.
    pub best_cost: f64,
    /// Seconds since the run started.
    pub elapsed_secs: f64,
}

/// Per-iteration best-cost samples and, optionally, selection masks.
///
/// Masks are only captured when the run was configured to record them;
/// their meaning depends on the strategy (black hole, current state,
/// generation best or Lagrangian primal cover).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    samples: Vec<Sample>,
    masks: Vec<Vec<bool>>,
    record_masks: bool,
}

impl Trajectory {
    pub fn new(record_masks: bool) -> Self {
        Self {
            samples: Vec::new(),
            masks: Vec::new(),
            record_masks,
        }
    }

    /// Appends a sample and, when recording, a copy of `mask`.
    pub fn record(&mut self, best_cost: f64, elapsed_secs: f64, mask: &[bool]) {
        self.samples.push(Sample {
            best_cost,
            elapsed_secs,
        });
        if self.record_masks {
            self.masks.push(mask.to_vec());
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn masks(&self) -> &[Vec<bool>] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Best costs in sample order.
    pub fn costs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.best_cost).collect()
    }

    /// Elapsed time of the last sample, or 0.
    pub fn elapsed_secs(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.elapsed_secs)
    }

    /// Appends `other`, shifting its timestamps by this trajectory's last
    /// elapsed time.
    pub fn extend_shifted(&mut self, other: &Trajectory) {
        let offset = self.elapsed_secs();
        self.samples.extend(other.samples.iter().map(|s| Sample {
            best_cost: s.best_cost,
            elapsed_secs: s.elapsed_secs + offset,
        }));
        self.masks.extend(other.masks.iter().cloned());
        self.record_masks |= other.record_masks;
    }

    /// Hands the recorded masks to a visualization sink.
    pub fn emit_to<S: MaskSink + ?Sized>(&self, sink: &mut S, run_name: &str) {
        sink.consume(run_name, &self.masks);
    }
}

/// Receiver of per-iteration selection masks, e.g. a frame renderer.
pub trait MaskSink {
    fn consume(&mut self, run_name: &str, masks: &[Vec<bool>]);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Vec<(String, usize)>);

    impl MaskSink for Collect {
        fn consume(&mut self, run_name: &str, masks: &[Vec<bool>]) {
            self.0.push((run_name.to_string(), masks.len()));
        }
    }

    #[test]
    fn test_record_without_masks() {
        let mut t = Trajectory::new(false);
        t.record(10.0, 0.1, &[true]);
        t.record(8.0, 0.2, &[false]);
        assert_eq!(t.len(), 2);
        assert!(t.masks().is_empty());
        assert_eq!(t.costs(), vec![10.0, 8.0]);
    }

    #[test]
    fn test_extend_shifted() {
        let mut a = Trajectory::new(true);
        a.record(10.0, 1.0, &[true, false]);
        let mut b = Trajectory::new(true);
        b.record(9.0, 0.5, &[false, true]);
        b.record(7.0, 2.0, &[false, true]);

        a.extend_shifted(&b);
        let times: Vec<f64> = a.samples().iter().map(|s| s.elapsed_secs).collect();
        assert_eq!(times, vec![1.0, 1.5, 3.0]);
        assert_eq!(a.masks().len(), 3);
    }

    #[test]
    fn test_emit_to_sink() {
        let mut t = Trajectory::new(true);
        t.record(3.0, 0.0, &[true]);
        let mut sink = Collect(Vec::new());
        t.emit_to(&mut sink, "run");
        assert_eq!(sink.0, vec![("run".to_string(), 1)]);
    }
}
