use energy_dashboard::LoadReport;

/// Result of the latest load. Each load gets a ticket so a superseded one
/// cannot report over a newer one.
#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: u64,
    report: Option<LoadReport>,
}

impl LoadTracker {
    /// Starts a load and returns its ticket.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.report = None;
        self.generation
    }

    /// Stores `report` if `ticket` belongs to the latest load.
    pub fn finish(&mut self, ticket: u64, report: LoadReport) -> bool {
        if ticket != self.generation {
            tracing::debug!(ticket, latest = self.generation, "dropping superseded load");
            return false;
        }
        self.report = Some(report);
        true
    }

    /// `None` while the latest load is still running.
    pub const fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rendered: usize) -> LoadReport {
        LoadReport {
            rendered,
            ..LoadReport::default()
        }
    }

    #[test]
    fn refresh_ignores_the_older_load() {
        let mut tracker = LoadTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.finish(first, report(11)));
        assert!(tracker.report().is_none());

        assert!(tracker.finish(second, report(21)));
        assert_eq!(tracker.report().map(|report| report.rendered), Some(21));
    }

    #[test]
    fn begin_clears_the_previous_report() {
        let mut tracker = LoadTracker::default();
        let ticket = tracker.begin();
        tracker.finish(ticket, report(3));
        tracker.begin();
        assert!(tracker.report().is_none());
    }
}
