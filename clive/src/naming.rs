//! Flag and environment variable naming.
//!
//! The synthesizer and the extractor both call [`flag_name`]; values are
//! looked up by name after parsing, so the two sides must never derive names
//! independently.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// Field-name prefix that marks a record field as a command-line flag.
pub const FLAG_PREFIX: &str = "flag_";

/// Returns `true` when `field` carries the [`FLAG_PREFIX`] marker.
#[must_use]
pub fn is_flag_field(field: &str) -> bool {
    field.starts_with(FLAG_PREFIX)
}

/// Derives the long flag name for `field`.
///
/// A non-empty `name_override` wins and is kebab-cased as given. Otherwise the
/// [`FLAG_PREFIX`] is stripped from `field` and the remainder kebab-cased.
///
/// # Examples
///
/// ```
/// use clive::naming::flag_name;
/// assert_eq!(flag_name("flag_listen_addr", None), "listen-addr");
/// assert_eq!(flag_name("flag_db", Some("databaseURL")), "database-url");
/// ```
#[must_use]
pub fn flag_name(field: &str, name_override: Option<&str>) -> String {
    match name_override.filter(|name| !name.is_empty()) {
        Some(name) => name.to_kebab_case(),
        None => field
            .strip_prefix(FLAG_PREFIX)
            .unwrap_or(field)
            .to_kebab_case(),
    }
}

/// Derives the environment variable bound to `flag`.
///
/// # Examples
///
/// ```
/// use clive::naming::env_name;
/// assert_eq!(env_name("listen-addr"), "LISTEN_ADDR");
/// ```
#[must_use]
pub fn env_name(flag: &str) -> String {
    flag.to_shouty_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("flag_port", None, "port")]
    #[case("flag_listen_addr", None, "listen-addr")]
    #[case("flag_http2", None, "http2")]
    #[case("flag_port", Some(""), "port")]
    #[case("flag_port", Some("bindPort"), "bind-port")]
    #[case("flag_port", Some("bind_port"), "bind-port")]
    #[case("flag_port", Some("bind-port"), "bind-port")]
    fn derives_flag_names(
        #[case] field: &str,
        #[case] name_override: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(flag_name(field, name_override), expected);
    }

    #[rstest]
    #[case("port", "PORT")]
    #[case("listen-addr", "LISTEN_ADDR")]
    #[case("max-retry-count", "MAX_RETRY_COUNT")]
    fn derives_env_names(#[case] flag: &str, #[case] expected: &str) {
        assert_eq!(env_name(flag), expected);
    }

    #[rstest]
    #[case("flag_port", true)]
    #[case("flag_", true)]
    #[case("port", false)]
    #[case("flagport", false)]
    #[case("command", false)]
    fn detects_flag_fields(#[case] field: &str, #[case] expected: bool) {
        assert_eq!(is_flag_field(field), expected);
    }

    #[test]
    fn naming_is_deterministic() {
        let first = flag_name("flag_request_timeout", None);
        let second = flag_name("flag_request_timeout", None);
        assert_eq!(first, second);
        assert_eq!(env_name(&first), env_name(&second));
    }
}
