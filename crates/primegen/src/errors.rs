//! Error handling and exit codes.

use primegen_core::constants::exit_codes;
use primegen_core::error::PrimeError;

/// Map a pipeline error to its process exit code.
pub fn handle_error(err: &PrimeError) -> i32 {
    match err {
        PrimeError::Config(_) => exit_codes::ERROR_CONFIG,
        PrimeError::Io { .. } | PrimeError::Parse { .. } | PrimeError::Worker(_) => {
            exit_codes::ERROR_GENERIC
        }
        // Cancellation is a normal way for a run to end.
        PrimeError::Cancelled => exit_codes::SUCCESS,
    }
}

/// Exit code for an application error, looking through `anyhow` context.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<PrimeError>())
        .map_or(exit_codes::ERROR_GENERIC, handle_error);
    u8::try_from(code).unwrap_or(1)
}
