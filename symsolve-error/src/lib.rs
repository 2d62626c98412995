//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

#[cfg(test)]
extern crate self as symsolve_error;

use ariadne::{Color, Report};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    ///
    /// `spans` may be empty for errors that do not originate from source text, such as an
    /// algebraic pass giving up. The report then points at the start of the source.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not tied to any source region.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    use ariadne::Source;
    use pretty_assertions::assert_eq;
    use symsolve_attrs::ErrorKind;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown function `{}`", name),
        labels = ["this function"],
        help = "try `sin`, `cos` or `log`",
    )]
    struct UnknownName {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "gave up", labels = ["here"])]
    struct GaveUp;

    /// Renders the report of an error to plain text.
    fn render(error: &Error, src: &str) -> String {
        let mut out = Vec::new();
        error.build_report("input")
            .write(("input", Source::from(src)), &mut out)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn message_with_fields() {
        let error = Error::new(vec![0..3], UnknownName { name: "tan".to_string() });
        assert_eq!(error.to_string(), "unknown function `tan`");

        let rendered = render(&error, "tan(x)");
        assert!(rendered.contains("unknown function `tan`"));
        assert!(rendered.contains("this function"));
        assert!(rendered.contains("try `sin`, `cos` or `log`"));
    }

    #[test]
    fn spanless_report() {
        let error = Error::spanless(GaveUp);
        assert_eq!(error.to_string(), "gave up");
        assert!(render(&error, "x + 1").contains("gave up"));
    }
}
