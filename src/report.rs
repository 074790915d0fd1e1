use crate::sampler::{Sample, SampleCollection};

/// Mean of one metric, or `Unavailable` when it was never read
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    Mean(f64),
    Unavailable,
}

impl Aggregate {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            Self::Unavailable
        } else {
            Self::Mean(sum / count as f64)
        }
    }

    pub fn mean(self) -> Option<f64> {
        match self {
            Self::Mean(v) => Some(v),
            Self::Unavailable => None,
        }
    }
}

/// Per-metric means over a finalized collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateReport {
    pub samples: usize,
    pub cpu_util: Aggregate,
    pub gpu_util: Aggregate,
    pub gpu_temp: Aggregate,
    pub gpu_power: Aggregate,
}

impl AggregateReport {
    pub fn from_collection(collection: &SampleCollection) -> Self {
        let samples = collection.samples();

        Self {
            samples: samples.len(),
            cpu_util: metric(samples, |s| Some(s.cpu_util)),
            gpu_util: metric(samples, |s| s.gpu_util),
            gpu_temp: metric(samples, |s| s.gpu_temp),
            gpu_power: metric(samples, |s| s.gpu_power),
        }
    }
}

fn metric(samples: &[Sample], field: impl Fn(&Sample) -> Option<f64>) -> Aggregate {
    Aggregate::of(samples.iter().filter_map(field))
}
