// Constants for the script interpreter

/// Marker skipped once when it opens the source
pub const OPEN_TAG: &str = "<?php";

/// Decimal places used when formatting arithmetic results
pub const RESULT_PRECISION: usize = 2;
