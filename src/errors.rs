//! Unified error handling.
//!
//! Error types are generated by a macro so every variant carries a stable
//! code and a type name alongside its message.

use std::fmt;

macro_rules! define_siabsen_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SiabsenError {
            $($variant(String),)*
        }

        impl SiabsenError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(SiabsenError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SiabsenError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(SiabsenError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SiabsenError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SiabsenError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_siabsen_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Recognition("E011", "Recognition Service Error"),
}

impl SiabsenError {
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SiabsenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SiabsenError {}

impl From<sea_orm::DbErr> for SiabsenError {
    fn from(err: sea_orm::DbErr) -> Self {
        SiabsenError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SiabsenError {
    fn from(err: std::io::Error) -> Self {
        SiabsenError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SiabsenError {
    fn from(err: serde_json::Error) -> Self {
        SiabsenError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SiabsenError {
    fn from(err: chrono::ParseError) -> Self {
        SiabsenError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiabsenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SiabsenError::database_config("test").code(), "E001");
        assert_eq!(SiabsenError::validation("test").code(), "E005");
        assert_eq!(SiabsenError::authentication("test").code(), "E009");
        assert_eq!(SiabsenError::recognition("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SiabsenError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SiabsenError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SiabsenError::validation("NIM is required");
        assert_eq!(err.message(), "NIM is required");
    }

    #[test]
    fn test_format_simple() {
        let err = SiabsenError::authorization("role mismatch");
        let formatted = err.format_simple();
        assert!(formatted.contains("Authorization Error"));
        assert!(formatted.contains("role mismatch"));
    }
}
