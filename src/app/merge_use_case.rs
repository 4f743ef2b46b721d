use std::sync::Arc;

use tracing::{debug, info};

use crate::app::ports::{NoopProgress, ProgressPort, ProgressStage};
use crate::config::MergeConfig;
use crate::error::Result;
use crate::pipeline::ingestion::{load_records, Table, COL_DESCRIPTION};
use crate::pipeline::processing::link::{link_records, normalize_flags};
use crate::pipeline::processing::merge::merge;
use crate::pipeline::processing::names::resolve_display_names;
use crate::pipeline::processing::output::render_output;
use crate::pipeline::processing::products::build_products_label;

/// Use case for deduplicating one customer list.
///
/// Each run is a pure function of the input table to an output table plus a
/// sequence of progress notifications; no state is shared across calls.
pub struct MergeUseCase {
    config: MergeConfig,
    progress: Arc<dyn ProgressPort>,
}

/// Result of one merge run.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The deduplicated, display-formatted table
    pub table: Table,
    /// Row accounting for the run
    pub stats: MergeStats,
}

/// Row accounting reported after a run.
#[derive(Debug, Clone, Copy)]
pub struct MergeStats {
    /// Rows in the input table
    pub input_rows: usize,
    /// Rows dropped because no canonical phone key could be derived
    pub unlinkable_rows: usize,
    /// Unique customers in the output
    pub unique_customers: usize,
}

impl MergeUseCase {
    pub fn new(config: MergeConfig) -> Self {
        Self {
            config,
            progress: Arc::new(NoopProgress),
        }
    }

    pub fn with_progress(config: MergeConfig, progress: Arc<dyn ProgressPort>) -> Self {
        Self { config, progress }
    }

    /// Runs the full pipeline: load, link, normalize flags, merge, resolve
    /// names, build product labels, render. Fails only on a missing
    /// mandatory column; every row-level anomaly degrades to filtering or a
    /// fallback value.
    pub fn run(&self, input: &Table) -> Result<MergeOutcome> {
        let with_description = input.has_column(COL_DESCRIPTION);

        let records = load_records(input, &self.config)?;
        let input_rows = records.len();
        info!(rows = input_rows, "customer list loaded");
        self.progress.report(ProgressStage::LoadComplete);

        let (mut linked, unlinkable_rows) = link_records(records);
        info!(
            linked = linked.len(),
            dropped = unlinkable_rows,
            "phone numbers normalized"
        );
        self.progress.report(ProgressStage::PhonesNormalized);

        normalize_flags(&mut linked, &self.config);
        debug!("product flags normalized");
        self.progress.report(ProgressStage::FlagsNormalized);

        let mut customers = merge(&linked, &self.config);
        info!(customers = customers.len(), "duplicate records merged");
        self.progress.report(ProgressStage::MergeComplete);

        resolve_display_names(&mut customers, &linked, &self.config);
        self.progress.report(ProgressStage::NamesResolved);

        let product_labels: Vec<String> = customers
            .iter()
            .map(|customer| build_products_label(customer, &self.config))
            .collect();
        self.progress.report(ProgressStage::ProductsBuilt);

        let table = render_output(&customers, &product_labels, &self.config, with_description);
        self.progress.report(ProgressStage::FormattingComplete);

        Ok(MergeOutcome {
            stats: MergeStats {
                input_rows,
                unlinkable_rows,
                unique_customers: customers.len(),
            },
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use std::sync::Mutex;

    struct RecordingProgress {
        stages: Mutex<Vec<ProgressStage>>,
    }

    impl RecordingProgress {
        fn new() -> Self {
            Self {
                stages: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProgressPort for RecordingProgress {
        fn report(&self, stage: ProgressStage) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn reports_every_checkpoint_in_order() {
        let progress = Arc::new(RecordingProgress::new());
        let use_case =
            MergeUseCase::with_progress(MergeConfig::default(), progress.clone());

        let input = table(&["numberr", "name"], &[&["09123456789", "Ali"]]);
        use_case.run(&input).unwrap();

        let stages = progress.stages.lock().unwrap().clone();
        assert_eq!(
            stages,
            vec![
                ProgressStage::LoadComplete,
                ProgressStage::PhonesNormalized,
                ProgressStage::FlagsNormalized,
                ProgressStage::MergeComplete,
                ProgressStage::NamesResolved,
                ProgressStage::ProductsBuilt,
                ProgressStage::FormattingComplete,
            ]
        );
    }

    #[test]
    fn missing_mandatory_column_halts_the_run() {
        let use_case = MergeUseCase::new(MergeConfig::default());
        let input = table(&["phone", "name"], &[&["09123456789", "Ali"]]);

        let err = use_case.run(&input).unwrap_err();
        assert!(matches!(err, MergeError::MissingColumn(_)));
    }

    #[test]
    fn stats_account_for_dropped_and_merged_rows() {
        let use_case = MergeUseCase::new(MergeConfig::default());
        let input = table(
            &["numberr", "name"],
            &[
                &["09123456789", "Ali"],
                &["12345", "Bad Phone"],
                &["9123456789", "Ali"],
            ],
        );

        let outcome = use_case.run(&input).unwrap();
        assert_eq!(outcome.stats.input_rows, 3);
        assert_eq!(outcome.stats.unlinkable_rows, 1);
        assert_eq!(outcome.stats.unique_customers, 1);
        assert_eq!(outcome.table.rows.len(), 1);
    }

    #[test]
    fn description_column_carries_through_only_when_present() {
        let use_case = MergeUseCase::new(MergeConfig::default());

        let without = table(&["numberr", "name"], &[&["09123456789", "Ali"]]);
        let outcome = use_case.run(&without).unwrap();
        assert!(!outcome.table.has_column("description"));

        let with = table(
            &["numberr", "name", "description"],
            &[&["09123456789", "Ali", "called"]],
        );
        let outcome = use_case.run(&with).unwrap();
        let idx = outcome.table.column_index("description").unwrap();
        assert_eq!(outcome.table.rows[0][idx], "called");
    }
}
