use std::fmt;

/// Pipeline checkpoints at which progress is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    LoadComplete,
    PhonesNormalized,
    FlagsNormalized,
    MergeComplete,
    NamesResolved,
    ProductsBuilt,
    FormattingComplete,
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Checkpoints fire after their stage finishes, so every description
        // reports completed work
        let description = match self {
            ProgressStage::LoadComplete => "Customer list loaded",
            ProgressStage::PhonesNormalized => "Phone numbers cleaned and standardized",
            ProgressStage::FlagsNormalized => "Product columns normalized",
            ProgressStage::MergeComplete => "Duplicate records merged",
            ProgressStage::NamesResolved => "Customer names resolved",
            ProgressStage::ProductsBuilt => "Products list built",
            ProgressStage::FormattingComplete => "Processing completed successfully!",
        };
        f.write_str(description)
    }
}

/// Caller-provided sink for progress notifications. Called synchronously at
/// each checkpoint; purely advisory and must not affect the output. The GUI
/// or CLI shell owns any thread-marshaling.
pub trait ProgressPort: Send + Sync {
    fn report(&self, stage: ProgressStage);
}

/// Progress sink that discards every notification.
pub struct NoopProgress;

impl ProgressPort for NoopProgress {
    fn report(&self, _stage: ProgressStage) {}
}
