use serde::{Serialize, Deserialize};

/// The three Iris species, in one-hot vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Labels as they appear in the dataset file.
    pub const LABELS: [&'static str; 3] = ["setosa", "versicolor", "virginica"];

    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Exact, case-sensitive match against [`Species::LABELS`].
    pub fn from_label(label: &str) -> Option<Species> {
        Self::LABELS.iter().position(|&l| l == label).map(|i| Self::ALL[i])
    }

    pub fn one_hot(self) -> Vec<f64> {
        let mut v = vec![0.0; Self::ALL.len()];
        v[self.index()] = 1.0;
        v
    }

    /// Encodes a label; unrecognised labels give an all-zero vector.
    pub fn encode(label: &str) -> Vec<f64> {
        Self::from_label(label).map_or_else(|| vec![0.0; Self::ALL.len()], Species::one_hot)
    }

    /// The species whose output is largest. `None` for an all-zero vector,
    /// for output that is not three values wide, or when nothing compares.
    pub fn from_output(output: &[f64]) -> Option<Species> {
        if output.len() != Self::ALL.len() || output.iter().all(|&v| v == 0.0) {
            return None;
        }
        output.iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| Self::ALL[i])
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
