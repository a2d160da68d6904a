//! # Environment Variables
//!
//! Reading and parsing of environment variables. An empty value counts as missing.

use std::env;
use std::str::FromStr;

/// Get a required environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Get an environment variable, falling back to `default` when unset or empty.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse a required environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Parse an optional environment variable. Unset yields `default`, a present but
/// unparsable value is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env(name) {
        Ok(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} environment variable is not set"),
            Error::WrongFormat(name) => write!(fmt, "{name} environment variable has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn test_missing_and_empty_are_both_missing() {
        env::remove_var("LIB_UTILS_TEST_UNSET");
        env::set_var("LIB_UTILS_TEST_EMPTY", "  ");

        assert_eq!(get_env("LIB_UTILS_TEST_UNSET"), Err(Error::MissingEnv("LIB_UTILS_TEST_UNSET")));
        assert_eq!(get_env("LIB_UTILS_TEST_EMPTY"), Err(Error::MissingEnv("LIB_UTILS_TEST_EMPTY")));
        assert_eq!(get_env_or("LIB_UTILS_TEST_EMPTY", "info"), "info");
    }

    #[test]
    fn test_parse_present_and_default() {
        env::set_var("LIB_UTILS_TEST_PORT", "8080");
        env::set_var("LIB_UTILS_TEST_BAD_PORT", "eighty");
        env::remove_var("LIB_UTILS_TEST_NO_TTL");

        assert_eq!(get_env_parse::<u16>("LIB_UTILS_TEST_PORT"), Ok(8080));
        assert_eq!(
            get_env_parse::<u16>("LIB_UTILS_TEST_BAD_PORT"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_PORT"))
        );
        assert_eq!(get_env_parse_or::<i64>("LIB_UTILS_TEST_NO_TTL", 15), Ok(15));
        assert_eq!(
            get_env_parse_or::<i64>("LIB_UTILS_TEST_BAD_PORT", 15),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_PORT"))
        );
    }
}
