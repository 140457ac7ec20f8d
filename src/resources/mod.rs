//! Resource wrappers
//!
//! Each wrapper fixes its host, authentication and paths in a
//! `ResourceConfig` and forwards calls to a `Dispatcher`.

mod legs;

pub use legs::Legs;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a caller-supplied path segment (everything but RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode an id so it stays a single path segment
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("leg-123_abc.~", "leg-123_abc.~" ; "unreserved")]
    #[test_case("a/b", "a%2Fb" ; "slash")]
    #[test_case("id?x=1#frag", "id%3Fx%3D1%23frag" ; "query and fragment")]
    #[test_case("é d", "%C3%A9%20d" ; "non ascii and space")]
    fn test_path_segment(input: &str, expected: &str) {
        assert_eq!(path_segment(input), expected);
    }
}
