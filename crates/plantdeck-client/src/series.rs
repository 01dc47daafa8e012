//! Capped telemetry series backing the rolling dashboard chart.

use std::collections::VecDeque;

use plantdeck_types::SensorReading;

/// How many samples each series retains.
pub const SERIES_CAPACITY: usize = 60;

/// The four metrics tracked on the rolling chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Light,
    Soil,
}

impl Metric {
    /// All tracked metrics, in chart legend order.
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Light,
        Metric::Soil,
    ];

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temp °C",
            Metric::Humidity => "Humidity %",
            Metric::Light => "Light lux",
            Metric::Soil => "Soil %",
        }
    }
}

/// One chart sample: the tracked subset of a [`SensorReading`].
///
/// Fields stay optional so a missing sensor leaves a gap in the chart
/// instead of a fabricated zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSample {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub soil: Option<f64>,
}

impl From<&SensorReading> for MetricSample {
    fn from(reading: &SensorReading) -> Self {
        Self {
            temperature: reading.temperature_c,
            humidity: reading.humidity_pct,
            light: reading.light_lux,
            soil: reading.soil_moisture_pct,
        }
    }
}

/// Fixed-capacity parallel sequences for the rolling chart.
///
/// Invariant: the label sequence and every metric sequence have equal length
/// at all times. Appending beyond [`SERIES_CAPACITY`] evicts the oldest
/// element from every sequence in the same call (FIFO), so the invariant
/// holds even mid-eviction.
#[derive(Debug, Clone)]
pub struct TelemetrySeries {
    capacity: usize,
    labels: VecDeque<String>,
    temperature: VecDeque<Option<f64>>,
    humidity: VecDeque<Option<f64>>,
    light: VecDeque<Option<f64>>,
    soil: VecDeque<Option<f64>>,
}

impl Default for TelemetrySeries {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySeries {
    /// Create an empty series with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(SERIES_CAPACITY)
    }

    /// Create an empty series with a custom capacity (tests use small ones).
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must be positive");
        Self {
            capacity,
            labels: VecDeque::with_capacity(capacity + 1),
            temperature: VecDeque::with_capacity(capacity + 1),
            humidity: VecDeque::with_capacity(capacity + 1),
            light: VecDeque::with_capacity(capacity + 1),
            soil: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Number of retained samples (identical across all sequences).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no samples are retained yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append one sample to every sequence, evicting the oldest sample from
    /// every sequence once capacity is exceeded.
    pub fn push(&mut self, label: impl Into<String>, sample: MetricSample) {
        self.labels.push_back(label.into());
        self.temperature.push_back(sample.temperature);
        self.humidity.push_back(sample.humidity);
        self.light.push_back(sample.light);
        self.soil.push_back(sample.soil);

        while self.labels.len() > self.capacity {
            self.labels.pop_front();
            self.temperature.pop_front();
            self.humidity.pop_front();
            self.light.pop_front();
            self.soil.pop_front();
        }
    }

    /// Drop every retained sample.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.temperature.clear();
        self.humidity.clear();
        self.light.clear();
        self.soil.clear();
    }

    /// Time labels, oldest first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Raw values for one metric, oldest first.
    pub fn values(&self, metric: Metric) -> impl Iterator<Item = Option<f64>> + '_ {
        self.sequence(metric).iter().copied()
    }

    /// Chart points for one metric as `(index, value)`, skipping samples
    /// where the sensor was absent. An empty series yields an empty vec.
    pub fn chart_points(&self, metric: Metric) -> Vec<(f64, f64)> {
        self.sequence(metric)
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect()
    }

    /// Most recent value for one metric, if any sample holds one.
    pub fn latest(&self, metric: Metric) -> Option<f64> {
        self.sequence(metric).back().copied().flatten()
    }

    fn sequence(&self, metric: Metric) -> &VecDeque<Option<f64>> {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::Light => &self.light,
            Metric::Soil => &self.soil,
        }
    }
}
