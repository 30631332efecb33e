use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    NotPositive {
        field: &'static str,
    },
    NoLineItems,
    InvalidUrl {
        field: &'static str,
        input: String,
    },
    LineItem {
        index: usize,
        source: Box<ValidationError>,
    },
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Flatten into the individual problems (a single error yields itself).
    pub fn problems(&self) -> Vec<&ValidationError> {
        match self {
            Self::Multiple(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is required"),
            Self::NotPositive { field } => write!(f, "{field} must be greater than 0"),
            Self::NoLineItems => write!(f, "at least one line item is required"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::LineItem { index, source } => write!(f, "lineItems[{index}]: {source}"),
            Self::Multiple(errors) => {
                for (idx, err) in errors.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field problems so one call reports all of them.
#[derive(Debug, Default)]
pub(crate) struct Problems(Vec<ValidationError>);

impl Problems {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub(crate) fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(ValidationError::Empty { field });
        }
    }

    pub(crate) fn require_positive(&mut self, field: &'static str, value: i64) {
        if value <= 0 {
            self.push(ValidationError::NotPositive { field });
        }
    }

    pub(crate) fn require_url(&mut self, field: &'static str, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(ValidationError::Empty { field });
        } else if url::Url::parse(trimmed).is_err() {
            self.push(ValidationError::InvalidUrl {
                field,
                input: trimmed.to_owned(),
            });
        }
    }

    pub(crate) fn finish(mut self) -> Result<(), ValidationError> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(ValidationError::Multiple(self.0)),
        }
    }
}
