//! One-hot encoding of classification targets.
//!
//! Independent of the deduplicator: it turns a sequence of class labels into
//! a dense `samples x classes` matrix with a single 1 per row.

use thiserror::Error;

/// Errors that can occur during one-hot encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The label count differs from the requested number of samples.
    #[error("expected {expected} labels, got {found}")]
    SampleCountMismatch {
        /// Requested number of samples
        expected: usize,
        /// Number of labels supplied
        found: usize,
    },

    /// A label does not fit the requested number of classes.
    #[error("label {label} at row {row} is out of range for {num_classes} classes")]
    LabelOutOfRange {
        /// Row of the offending label
        row: usize,
        /// The label value
        label: usize,
        /// Requested number of classes
        num_classes: usize,
    },
}

/// One-hot encode `labels` into a `num_samples x num_classes` matrix.
///
/// Row `i` holds a 1 at column `labels[i]` and 0 elsewhere.
///
/// # Errors
///
/// Returns `EncodeError` if `labels.len() != num_samples` or any label is
/// `>= num_classes`.
///
/// # Example
///
/// ```
/// use tabdupe::encode::one_hot_encode;
///
/// let m = one_hot_encode(&[0, 2, 1], 3, 3).unwrap();
/// assert_eq!(m, vec![vec![1, 0, 0], vec![0, 0, 1], vec![0, 1, 0]]);
/// ```
pub fn one_hot_encode(
    labels: &[usize],
    num_samples: usize,
    num_classes: usize,
) -> Result<Vec<Vec<u8>>, EncodeError> {
    if labels.len() != num_samples {
        return Err(EncodeError::SampleCountMismatch {
            expected: num_samples,
            found: labels.len(),
        });
    }

    labels
        .iter()
        .enumerate()
        .map(|(row, &label)| {
            if label >= num_classes {
                return Err(EncodeError::LabelOutOfRange {
                    row,
                    label,
                    num_classes,
                });
            }
            let mut encoded = vec![0u8; num_classes];
            encoded[label] = 1;
            Ok(encoded)
        })
        .collect()
}
