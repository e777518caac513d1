/// The result of a successful MIP solve
#[derive(Debug, Clone)]
pub struct MipSolution {
    /// Solved value for each variable, in declaration order
    pub values: Vec<f64>,
    /// Achieved objective value
    pub objective_value: f64,
}

impl MipSolution {
    pub fn value(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    /// Whether a binary variable came back as 1. Backends report integer
    /// values as floats, so compare against 0.5 rather than exactly 1.0.
    pub fn is_selected(&self, idx: usize) -> bool {
        self.values[idx] > 0.5
    }

    /// Indices of all variables set to 1.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.5)
            .map(|(idx, _)| idx)
    }
}
