//! Sync reports

use std::fmt;

use porclr_fs::NormalizedPath;

/// How artifacts are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hard link from Portainer's volume, stacks listed by the API
    Link,
    /// Content fetched from the API and written out
    Copy,
    /// Hard link from Portainer's volume, stacks derived from the volume
    Scan,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Link => "link",
            Self::Copy => "copy",
            Self::Scan => "scan",
        };
        f.write_str(name)
    }
}

/// What happened to one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new artifact was created
    Created,
    /// An artifact was already present and left untouched
    Skipped,
    /// `scan` could not assign the compose file to a stack
    Unmapped { reason: String },
}

/// Result for a single stack (or, for [`Outcome::Unmapped`], a single
/// compose file in Portainer's volume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutcome {
    /// Stack name, or the volume subdirectory for unmapped files
    pub stack: String,
    /// Artifact path, or the unmapped source compose file
    pub path: NormalizedPath,
    /// Whether the stack directory was created during this run
    pub dir_created: bool,
    pub outcome: Outcome,
}

/// Report from a link, copy or scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub strategy: Strategy,
    pub entries: Vec<StackOutcome>,
}

impl SyncReport {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, entry: StackOutcome) {
        self.entries.push(entry);
    }

    /// Number of artifacts created by this run.
    pub fn created_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped))
    }

    pub fn unmapped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unmapped { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.outcome)).count()
    }

    /// One-line summary of what changed.
    ///
    /// # Example
    ///
    /// ```
    /// use porclr_core::{Strategy, SyncReport};
    ///
    /// assert_eq!(SyncReport::new(Strategy::Copy).summary(), "Nothing to update.");
    /// ```
    pub fn summary(&self) -> String {
        let count = self.created_count();
        match (self.strategy, count) {
            (_, 0) => "Nothing to update.".to_string(),
            (Strategy::Copy, 1) => "Created 1 new Compose file.".to_string(),
            (Strategy::Copy, n) => format!("Created {} new Compose files.", n),
            (_, 1) => "Created 1 new link to Compose file.".to_string(),
            (_, n) => format!("Created {} new links to Compose files.", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn report(strategy: Strategy, outcomes: &[Outcome]) -> SyncReport {
        let mut report = SyncReport::new(strategy);
        for (i, outcome) in outcomes.iter().enumerate() {
            report.push(StackOutcome {
                stack: format!("stack-{}", i),
                path: NormalizedPath::new(format!("/srv/stack-{}/docker-compose.yml", i)),
                dir_created: false,
                outcome: outcome.clone(),
            });
        }
        report
    }

    #[rstest]
    #[case(Strategy::Link, 0, "Nothing to update.")]
    #[case(Strategy::Link, 1, "Created 1 new link to Compose file.")]
    #[case(Strategy::Link, 3, "Created 3 new links to Compose files.")]
    #[case(Strategy::Scan, 2, "Created 2 new links to Compose files.")]
    #[case(Strategy::Copy, 0, "Nothing to update.")]
    #[case(Strategy::Copy, 1, "Created 1 new Compose file.")]
    #[case(Strategy::Copy, 2, "Created 2 new Compose files.")]
    fn summary_wording(#[case] strategy: Strategy, #[case] created: usize, #[case] expected: &str) {
        let outcomes = vec![Outcome::Created; created];
        assert_eq!(report(strategy, &outcomes).summary(), expected);
    }

    #[test]
    fn counts_by_outcome() {
        let report = report(
            Strategy::Scan,
            &[
                Outcome::Created,
                Outcome::Skipped,
                Outcome::Skipped,
                Outcome::Unmapped {
                    reason: "no stack for heimdall".into(),
                },
            ],
        );

        assert_eq!(report.created_count(), 1);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.unmapped_count(), 1);
    }
}
