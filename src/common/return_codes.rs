use std::fmt;

/// Process return codes
///
/// The numeric values are part of the tool's external contract and must not
/// be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    Ok = 0,
    ErrGeneric = 1,
    ErrLoadConfig = 2,
    ErrLoginSuseManager = 3,
    ErrMandatoryInput = 4,
    ErrNotFound = 5,
    ErrPredecessorNotReady = 6,
    ErrSuseManagerCall = 7,
    ErrTimeout = 8,
}

impl ReturnCode {
    /// Numeric exit code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Symbolic name
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnCode::Ok => "Ok",
            ReturnCode::ErrGeneric => "ErrGeneric",
            ReturnCode::ErrLoadConfig => "ErrLoadConfig",
            ReturnCode::ErrLoginSuseManager => "ErrLoginSuseManager",
            ReturnCode::ErrMandatoryInput => "ErrMandatoryInput",
            ReturnCode::ErrNotFound => "ErrNotFound",
            ReturnCode::ErrPredecessorNotReady => "ErrPredecessorNotReady",
            ReturnCode::ErrSuseManagerCall => "ErrSuseManagerCall",
            ReturnCode::ErrTimeout => "ErrTimeout",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.code())
    }
}

impl From<ReturnCode> for std::process::ExitCode {
    fn from(code: ReturnCode) -> Self {
        std::process::ExitCode::from(code.code() as u8)
    }
}
