// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::RowId;

/// Error returned when no reuse identifier can be determined for a row.
///
/// This happens when the helper has no fixed identifier and the delegate
/// does not resolve one for the row. It is a configuration mistake in the
/// calling code rather than a runtime condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MissingReuseIdentifier {
    /// The row that could not be resolved.
    pub row: RowId,
}

impl fmt::Display for MissingReuseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no reuse identifier for row {}: set a fixed identifier or resolve one in the delegate",
            self.row
        )
    }
}

impl core::error::Error for MissingReuseIdentifier {}
