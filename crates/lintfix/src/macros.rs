/// Strip the `$0` marker from a test source and return its offset.
#[doc(hidden)]
pub fn marked(source: &str) -> Option<(String, usize)> {
    let offset = source.find("$0")?;
    Some((source.replacen("$0", "", 1), offset))
}

/// Macro to test that a diagnostic's primary fix turns the source into
/// the expected text. The diagnostic offset is marked with `$0`.
#[macro_export]
macro_rules! test_fix {
    ($name:ident, $tool:expr, $message:expr, $source:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let (text, offset) = $crate::macros::marked($source).expect("missing $0 marker");
            let mut file = $crate::source::GoFile::parse(text).unwrap();
            let diagnostic = $crate::diagnostic::Diagnostic::new($tool, $message, offset);
            let result = $crate::linter::suggest_fix(&file, &diagnostic).unwrap();
            let fix = result.into_primary().expect("no fix offered");
            fix.apply(&mut file).unwrap();
            pretty_assertions::assert_eq!(file.text(), $expected, "(message: {})", $message);
        }
    };
}

/// Macro to test that a diagnostic gets no applicable fix.
#[macro_export]
macro_rules! test_no_fix {
    ($name:ident, $tool:expr, $message:expr, $source:expr) => {
        #[test]
        fn $name() {
            let (text, offset) = $crate::macros::marked($source).expect("missing $0 marker");
            let file = $crate::source::GoFile::parse(text).unwrap();
            let diagnostic = $crate::diagnostic::Diagnostic::new($tool, $message, offset);
            let result = $crate::linter::suggest(&file, &diagnostic);
            assert!(result.primary().is_none(), "(message: {})", $message);
        }
    };
}
