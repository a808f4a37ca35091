//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | recon            | Reconciliation-specific codes            |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Recon (3-9)
// =============================================================================

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 3;

/// Reconciliation ran, but master facilities are missing or reported
/// entries could not be matched. Like `diff(1)`, a non-zero exit here
/// means "the lists differ", not that the run failed.
pub const EXIT_RECON_INCOMPLETE: u8 = 4;

/// Runtime failure (file IO, CSV decode, output write).
pub const EXIT_RECON_RUNTIME: u8 = 5;

/// `check` found no match for the name pair.
/// Like `diff(1)`, exit 1 means "the names differ."
pub const EXIT_CHECK_NO_MATCH: u8 = 1;
