//! Shared error plumbing for the deLib crates.
//!
//! Only the `Result` alias lives here. The session and API crates define
//! their own error enums and wrap them in a rootcause `Report`, so a view can
//! still reach the typed context when it decides what to show the user.

use rootcause::Report;

/// Result alias carrying a rootcause report with context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_values_pass_through() {
        let ok: Result<&str> = Ok("abc123");
        assert_eq!(ok.expect("should be ok"), "abc123");
    }
}
