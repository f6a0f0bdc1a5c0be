use super::{Dataset, Slice};
use crate::error::DatasetError;

/// Sizes of the three contiguous slices, taken in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub training: usize,
    pub validation: usize,
    pub test: usize,
}

impl SplitSizes {
    pub fn total(&self) -> usize {
        self.training + self.validation + self.test
    }

    /// Fail unless the slices cover exactly `total` samples.
    pub fn check(&self, total: usize) -> Result<(), DatasetError> {
        if self.total() != total {
            return Err(DatasetError::SplitMismatch {
                training: self.training,
                validation: self.validation,
                test: self.test,
                total,
            });
        }
        Ok(())
    }
}

/// Training, validation and test views over one dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSplit<'a> {
    pub training: Slice<'a>,
    pub validation: Slice<'a>,
    pub test: Slice<'a>,
}

/// Split `dataset` into training → validation → test without copying.
pub fn split_dataset(dataset: &Dataset, sizes: SplitSizes) -> Result<DatasetSplit<'_>, DatasetError> {
    sizes.check(dataset.len())?;
    for (name, size) in [
        ("training", sizes.training),
        ("validation", sizes.validation),
        ("test", sizes.test),
    ] {
        if size == 0 {
            return Err(DatasetError::EmptySlice(name));
        }
    }

    let validation_start = sizes.training;
    let test_start = validation_start + sizes.validation;
    Ok(DatasetSplit {
        training: dataset.slice(0, validation_start),
        validation: dataset.slice(validation_start, test_start),
        test: dataset.slice(test_start, dataset.len()),
    })
}
