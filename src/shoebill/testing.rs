//! Testing utilities
//!
//! Test content comes from the verified files under `samples/`, shared with
//! the integration tests, rather than from markup pasted into each test.

pub mod samples {
    pub const SIMPLE: &str = include_str!("../../samples/simple.htpy");
    pub const WITH_EXEC: &str = include_str!("../../samples/with_exec.htpy");
    pub const WITH_CONTAINER: &str = include_str!("../../samples/with_container.htpy");
    pub const WITH_END_MARKER: &str = include_str!("../../samples/with_end_marker.htpy");
    pub const PYTHON_SCRIPT: &str = include_str!("../../samples/python_script.py");
    pub const IS_CAT: &str = include_str!("../../samples/is_cat.py");
}

#[cfg(test)]
mod tests {
    use super::samples;
    use crate::shoebill::comments::HostLanguage;
    use crate::shoebill::processor::{parse_text, Processor};

    #[test]
    fn every_markup_sample_parses() {
        for sample in [
            samples::SIMPLE,
            samples::WITH_EXEC,
            samples::WITH_CONTAINER,
            samples::WITH_END_MARKER,
        ] {
            assert!(parse_text(sample).is_ok());
        }
    }

    #[test]
    fn every_script_sample_parses() {
        let processor = Processor::default();
        for sample in [samples::PYTHON_SCRIPT, samples::IS_CAT] {
            assert!(processor.parse_source(sample, HostLanguage::Python).is_ok());
        }
    }
}
