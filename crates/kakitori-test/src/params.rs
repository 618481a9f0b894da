//! Regression test parameters and operations

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index and success status.
pub struct RegParams {
    /// Name of the test (e.g., "stroke")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "recognize")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never matches
        if !(diff <= delta) {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Check that a condition holds
    ///
    /// # Arguments
    ///
    /// * `condition` - Value of the checked condition
    /// * `what` - Short description used in the failure message
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} failed: {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Compare two binary data arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let first = data1.iter().zip(data2).position(|(a, b)| a != b);
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}, first difference at {:?}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len(),
                first
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 10.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_check_and_strings() {
        let mut rp = RegParams::new("test");
        assert!(rp.check(true, "holds"));
        assert!(rp.compare_strings(b"abc", b"abc"));
        assert!(rp.is_success());
        assert!(!rp.compare_strings(b"abc", b"abd"));
        assert!(!rp.check(false, "does not hold"));
        assert!(!rp.cleanup());
    }
}
