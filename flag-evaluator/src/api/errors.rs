use thiserror::Error;

/// Errors raised while building rule objects.
///
/// Evaluation itself never fails: anything that goes wrong at evaluation time
/// resolves to the `control` treatment instead of surfacing one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("missing required properties: {}", .0.join(", "))]
    MissingRequiredProperties(Vec<&'static str>),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("partition percentage {0} is outside of [0, 100]")]
    InvalidPercentage(i32),
}

impl FlagError {
    /// Returns a short error code for structured logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FlagError::MissingRequiredProperties(_) => "missing_required_properties",
            FlagError::InvalidArgument(_) => "invalid_argument",
            FlagError::InvalidPercentage(_) => "invalid_percentage",
        }
    }

    /// The names of the missing fields, if this is a missing-field error.
    pub fn missing_properties(&self) -> &[&'static str] {
        match self {
            FlagError::MissingRequiredProperties(fields) => fields,
            _ => &[],
        }
    }
}

/// Collects the names of unset required fields so that one error can report all of them.
#[derive(Debug, Default)]
pub(crate) struct MissingProperties(Vec<&'static str>);

impl MissingProperties {
    pub(crate) fn check<T>(&mut self, value: &Option<T>, name: &'static str) {
        if value.is_none() {
            self.0.push(name);
        }
    }

    pub(crate) fn push(&mut self, name: &'static str) {
        self.0.push(name);
    }

    pub(crate) fn into_error(self) -> FlagError {
        FlagError::MissingRequiredProperties(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_properties_lists_every_field() {
        let mut missing = MissingProperties::default();
        missing.check(&None::<i32>, "seed");
        missing.check(&Some(true), "killed");
        missing.check(&None::<String>, "default_treatment");

        let err = missing.into_error();
        assert_eq!(err.missing_properties(), &["seed", "default_treatment"]);
        assert_eq!(
            err.to_string(),
            "missing required properties: seed, default_treatment"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FlagError::InvalidArgument("label".to_string()).error_code(),
            "invalid_argument"
        );
        assert_eq!(FlagError::InvalidPercentage(101).error_code(), "invalid_percentage");
        assert_eq!(
            FlagError::MissingRequiredProperties(vec!["seed"]).error_code(),
            "missing_required_properties"
        );
        assert!(FlagError::InvalidPercentage(-1).missing_properties().is_empty());
    }
}
