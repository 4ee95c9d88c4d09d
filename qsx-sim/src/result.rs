//! Run results and outcome aggregation

use std::collections::HashMap;
use std::fmt;

/// Result of one circuit execution
///
/// `probabilities[i]` is the probability of basis state `i`; `outcome[q]` is
/// the measured value of qubit q (LSB convention). Textual rendering puts
/// the most significant qubit first, so a 3-qubit outcome reads
/// "q2 q1 q0".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Number of qubits in the run
    pub num_qubits: usize,
    /// Probability of each basis state; length 2^num_qubits
    pub probabilities: Vec<f64>,
    /// One sampled outcome, one bit per qubit
    pub outcome: Vec<u8>,
}

impl RunResult {
    /// The outcome as a basis-state index
    pub fn outcome_index(&self) -> usize {
        self.outcome
            .iter()
            .enumerate()
            .fold(0usize, |acc, (q, &bit)| acc | ((bit as usize) << q))
    }

    /// The outcome as a bitstring, most significant qubit first
    ///
    /// # Example
    /// ```
    /// use qsx_sim::RunResult;
    ///
    /// let r = RunResult {
    ///     num_qubits: 3,
    ///     probabilities: vec![0.0; 8],
    ///     outcome: vec![1, 0, 0], // qubit 0 measured 1
    /// };
    /// assert_eq!(r.bitstring(), "001");
    /// assert_eq!(r.outcome_index(), 1);
    /// ```
    pub fn bitstring(&self) -> String {
        self.outcome
            .iter()
            .rev()
            .map(|&bit| if bit == 0 { '0' } else { '1' })
            .collect()
    }
}

/// Outcome-string counts accumulated over a shot loop
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeCounts {
    counts: HashMap<String, usize>,
    total_shots: usize,
}

impl OutcomeCounts {
    /// Create an empty counts table
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            total_shots: 0,
        }
    }

    /// Record one outcome
    pub fn record(&mut self, bitstring: String) {
        *self.counts.entry(bitstring).or_insert(0) += 1;
        self.total_shots += 1;
    }

    /// Count observed for a bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Empirical probability of a bitstring
    pub fn frequency(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Total shots recorded
    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Number of distinct outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// The full counts table
    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    /// Outcomes sorted by count (descending), ties by bitstring
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(bs, &count)| (bs.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome
    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.sorted().into_iter().next()
    }
}

impl Default for OutcomeCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "counts ({} shots):", self.total_shots)?;
        for (bitstring, count) in self.sorted() {
            writeln!(
                f,
                "  {}: {} ({:.2}%)",
                bitstring,
                count,
                count as f64 / self.total_shots as f64 * 100.0
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitstring_is_most_significant_first() {
        let r = RunResult {
            num_qubits: 3,
            probabilities: vec![0.0; 8],
            outcome: vec![1, 1, 0],
        };
        assert_eq!(r.bitstring(), "011");
        assert_eq!(r.outcome_index(), 3);
    }

    #[test]
    fn counts_accumulate() {
        let mut counts = OutcomeCounts::new();
        counts.record("00".into());
        counts.record("11".into());
        counts.record("11".into());
        assert_eq!(counts.get("11"), 2);
        assert_eq!(counts.get("00"), 1);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 3);
        assert!((counts.frequency("11") - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sorted_is_deterministic() {
        let mut counts = OutcomeCounts::new();
        counts.record("01".into());
        counts.record("10".into());
        counts.record("10".into());
        let sorted = counts.sorted();
        assert_eq!(sorted[0], ("10", 2));
        assert_eq!(sorted[1], ("01", 1));
        assert_eq!(counts.most_common(), Some(("10", 2)));
    }
}
