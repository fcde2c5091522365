//! Exit code constants for the strip-instructions CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Input (or backup to restore) not found
//! - 3: Backup already exists, in-place rewrite refused
//! - 4: Read/write failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid configuration file.
pub const USER_ERROR: i32 = 1;

/// The input file does not exist or is not a regular file.
pub const NOT_FOUND: i32 = 2;

/// A backup from an earlier in-place rewrite is still present.
pub const ALREADY_EXISTS: i32 = 3;

/// Any underlying I/O failure while reading or writing.
pub const IO_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, NOT_FOUND, ALREADY_EXISTS, IO_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
