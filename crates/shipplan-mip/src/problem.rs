/// A minimization problem over binary (0/1) decision variables
#[derive(Debug, Clone)]
pub struct MipProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function coefficients (costs)
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
    /// Variables pinned to zero at build time (known-unusable choices)
    fixed_zero: Vec<bool>,
}

/// Linear minimization objective
#[derive(Debug, Clone)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// (variable index, coefficient) pairs; variables not listed have
    /// coefficient zero. Assignment models touch only a handful of
    /// variables per row, so rows are stored sparsely.
    pub terms: Vec<(usize, f64)>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl MipProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
            },
            constraints: Vec::new(),
            fixed_zero: vec![false; n],
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>) {
        self.objective = Objective { coefficients };
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(usize, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            terms,
            op,
            rhs,
        });
    }

    /// Pin a variable to zero. The coefficient stays in the objective; the
    /// variable simply cannot enter any solution.
    pub fn fix_zero(&mut self, idx: usize) {
        self.fixed_zero[idx] = true;
    }

    pub fn is_fixed_zero(&self, idx: usize) -> bool {
        self.fixed_zero[idx]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}
