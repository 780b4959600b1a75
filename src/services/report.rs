use std::fmt;
use std::path::PathBuf;

/// What happened to one colormap.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted {
        name: String,
        nodes: usize,
        path: PathBuf,
        /// Largest reconstruction error per channel, R, G, B, A
        max_error: [f64; 4],
    },
    Skipped {
        name: String,
        reason: String,
    },
}

impl ConversionOutcome {
    pub fn name(&self) -> &str {
        match self {
            ConversionOutcome::Converted { name, .. } | ConversionOutcome::Skipped { name, .. } => {
                name
            }
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

/// Tally of one batch run, in input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConversionReport {
    outcomes: Vec<ConversionOutcome>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: ConversionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ConversionOutcome] {
        &self.outcomes
    }

    pub fn converted(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| o.is_converted())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_converted())
    }

    pub fn converted_count(&self) -> usize {
        self.converted().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// True if nothing was skipped.
    pub fn is_success(&self) -> bool {
        self.skipped_count() == 0
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converted {} colormap(s).", self.converted_count())?;
        if !self.is_success() {
            write!(f, "\nSkipped {}:", self.skipped_count())?;
            for outcome in self.skipped() {
                if let ConversionOutcome::Skipped { name, reason } = outcome {
                    write!(f, "\n  {name}: {reason}")?;
                }
            }
        }
        Ok(())
    }
}
