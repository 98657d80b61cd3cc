//! Process environment probes.

/// Environment variable whose presence marks a UI test run.
pub const UI_TEST_VAR: &str = "RILL_UI_TEST";

/// Returns `true` when the process runs under a UI test harness.
///
/// Only the presence of [`UI_TEST_VAR`] matters, not its value.
pub fn is_ui_test() -> bool {
    std::env::var_os(UI_TEST_VAR).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_is_enough() {
        figment::Jail::expect_with(|jail| {
            assert!(!is_ui_test());
            jail.set_env(UI_TEST_VAR, "");
            assert!(is_ui_test());
            Ok(())
        });
    }
}
