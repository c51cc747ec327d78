use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KsvizResult<T> = Result<T, KsvizError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KsvizErrorCategory {
    Success,
    UserError,
    NotFoundError,
    FormatError,
    RangeError,
    IoSystemError,
    InternalError,
}

impl KsvizErrorCategory {
    pub const fn exit_status(self) -> ExitStatusMapping {
        match self {
            Self::Success => ExitStatusMapping {
                exit_code: 0,
                rust_category: "Success",
            },
            Self::UserError => ExitStatusMapping {
                exit_code: 2,
                rust_category: "UserError",
            },
            Self::NotFoundError => ExitStatusMapping {
                exit_code: 3,
                rust_category: "NotFoundError",
            },
            Self::FormatError => ExitStatusMapping {
                exit_code: 4,
                rust_category: "FormatError",
            },
            Self::RangeError => ExitStatusMapping {
                exit_code: 5,
                rust_category: "RangeError",
            },
            Self::IoSystemError => ExitStatusMapping {
                exit_code: 6,
                rust_category: "IoSystemError",
            },
            Self::InternalError => ExitStatusMapping {
                exit_code: 7,
                rust_category: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_status().exit_code
    }

    pub const fn rust_category(self) -> &'static str {
        self.exit_status().rust_category
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatusMapping {
    pub exit_code: i32,
    pub rust_category: &'static str,
}

/// Failure raised anywhere in the orbital pipeline.
///
/// `code` is a stable dotted identifier (`FORMAT.ORBITAL_FILE_NAME`) that
/// tests and scripts can match on without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KsvizError {
    category: KsvizErrorCategory,
    code: &'static str,
    message: String,
}

impl KsvizError {
    pub fn new(category: KsvizErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::UserError, code, message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::NotFoundError, code, message)
    }

    pub fn format(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::FormatError, code, message)
    }

    pub fn range(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::RangeError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KsvizErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> KsvizErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }
}

impl Display for KsvizError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.rust_category(),
            self.code,
            self.message
        )
    }
}

impl Error for KsvizError {}

#[cfg(test)]
mod tests {
    use super::{KsvizError, KsvizErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (KsvizErrorCategory::Success, 0, "Success"),
            (KsvizErrorCategory::UserError, 2, "UserError"),
            (KsvizErrorCategory::NotFoundError, 3, "NotFoundError"),
            (KsvizErrorCategory::FormatError, 4, "FormatError"),
            (KsvizErrorCategory::RangeError, 5, "RangeError"),
            (KsvizErrorCategory::IoSystemError, 6, "IoSystemError"),
            (KsvizErrorCategory::InternalError, 7, "InternalError"),
        ];

        for (category, exit_code, rust_category) in cases {
            let mapping = category.exit_status();
            assert_eq!(mapping.exit_code, exit_code);
            assert_eq!(mapping.rust_category, rust_category);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_line() {
        let error = KsvizError::user(
            "USER.NO_ORBITAL_FILES",
            "no orbital files found for atom Xx",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.message(), "no orbital files found for atom Xx");
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [USER.NO_ORBITAL_FILES] no orbital files found for atom Xx"
        );
        assert_eq!(
            error.to_string(),
            "UserError [USER.NO_ORBITAL_FILES] no orbital files found for atom Xx"
        );
    }
}
