//! Micro-grammars for the free-text messages of each tool.
//!
//! Every parser returns `None` when its markers are missing; none of them
//! look at the syntax tree.

/// A name (or piece of code) and what the tool suggests instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'m> {
    pub current: &'m str,
    pub suggested: &'m str,
}

/// The back-tick quoted span starting at or after `from`, and the offset
/// just past its closing back-tick.
fn quoted(message: &str, from: usize) -> Option<(&str, usize)> {
    let start = from + message.get(from..)?.find('`')? + 1;
    let len = message.get(start..)?.find('`')?;
    Some((message.get(start..start + len)?, start + len + 1))
}

/// The first two back-tick quoted spans.
fn quoted_pair(message: &str) -> Option<Suggestion<'_>> {
    let (current, next) = quoted(message, 0)?;
    let (suggested, _) = quoted(message, next)?;
    Some(Suggestion { current, suggested })
}

/// Everything after the last space, without back-tick quoting.
fn last_token(message: &str) -> Option<&str> {
    let token = message.trim_end().rsplit(' ').next()?.trim_matches('`');
    (!token.is_empty()).then_some(token)
}

/// Text up to the next space, or to the end.
fn word(text: &str) -> Option<&str> {
    let word = text.split(' ').next()?;
    (!word.is_empty()).then_some(word)
}

/// structcheck, varcheck, deadcode, unused: `` `x` is unused `` or
/// ``func `helper` is unused``. Methods are quoted as `T.m`; only the last
/// segment names the declaration.
pub fn unused_name(message: &str) -> Option<&str> {
    if !message.trim_end().ends_with("is unused") {
        return None;
    }
    let (quoted, _) = quoted(message, 0)?;
    let name = quoted.rsplit('.').next()?;
    (!name.is_empty()).then_some(name)
}

/// ineffassign: ``ineffectual assignment to `x` ``.
pub fn ineffectual_assignment(message: &str) -> Option<&str> {
    if !message.starts_with("ineffectual assignment to") {
        return None;
    }
    last_token(message)
}

/// interfacer: `` `w` can be `io.Writer` ``.
pub fn parameter_type(message: &str) -> Option<&str> {
    last_token(message)
}

/// gocritic: ``assignOp: replace `x = x + 1` with `x++` ``.
pub fn assign_op(message: &str) -> Option<Suggestion<'_>> {
    if !message.starts_with("assignOp: replace") {
        return None;
    }
    quoted_pair(message)
}

/// gocritic: `sloppyLen: len(s) <= 0 can be len(s) == 0`. Yields the
/// suggested expression.
pub fn sloppy_len(message: &str) -> Option<&str> {
    const MARKER: &str = "can be ";
    if !message.starts_with("sloppyLen:") {
        return None;
    }
    let start = message.find(MARKER)? + MARKER.len();
    let suggestion = message.get(start..)?.trim();
    (!suggestion.is_empty()).then_some(suggestion)
}

/// gocritic: `unslice: could simplify s[:] to s`.
pub fn unslice(message: &str) -> Option<()> {
    message.starts_with("unslice:").then_some(())
}

/// golint: ``var `fooId` should be `fooID` `` (or `const`).
pub fn declaration_name(message: &str) -> Option<Suggestion<'_>> {
    if !(message.starts_with("var ") || message.starts_with("const ")) {
        return None;
    }
    quoted_pair(message)
}

/// golint: `receiver name x should be consistent with previous receiver
/// name y for T`. Without a second `receiver name`, the word after
/// `should be ` is the suggestion.
pub fn receiver_name(message: &str) -> Option<Suggestion<'_>> {
    const MARKER: &str = "receiver name ";
    const SHOULD_BE: &str = "should be ";

    let rest = message.strip_prefix(MARKER)?;
    let current = word(rest)?;
    let after = rest.get(current.len()..)?;
    let suggested = match after.find(MARKER) {
        Some(idx) => word(after.get(idx + MARKER.len()..)?)?,
        None => word(after.get(after.find(SHOULD_BE)? + SHOULD_BE.len()..)?)?,
    };
    Some(Suggestion { current, suggested })
}

/// golint: `type name will be used as http.HTTPServer by other packages,
/// and that stutters; consider calling this Server`.
pub fn type_stutter(message: &str) -> Option<&str> {
    if !message.starts_with("type name will be used as ") {
        return None;
    }
    last_token(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion<'m>(current: &'m str, suggested: &'m str) -> Option<Suggestion<'m>> {
        Some(Suggestion { current, suggested })
    }

    #[test]
    fn unused() {
        assert_eq!(unused_name("`debug` is unused"), Some("debug"));
        assert_eq!(unused_name("func `helper` is unused"), Some("helper"));
        assert_eq!(unused_name("func `(*T).m` is unused"), Some("m"));
        assert_eq!(unused_name("is unused"), None);
        assert_eq!(unused_name("`x` is used"), None);
    }

    #[test]
    fn ineffassign() {
        assert_eq!(ineffectual_assignment("ineffectual assignment to `err`"), Some("err"));
        assert_eq!(ineffectual_assignment("ineffectual assignment to err"), Some("err"));
        assert_eq!(ineffectual_assignment("assignment to `err`"), None);
        assert_eq!(ineffectual_assignment("ineffectual assignment to ``"), None);
    }

    #[test]
    fn interfacer() {
        assert_eq!(parameter_type("`w` can be `io.Writer`"), Some("io.Writer"));
        assert_eq!(parameter_type(""), None);
    }

    #[test]
    fn gocritic_assign_op() {
        assert_eq!(
            assign_op("assignOp: replace `x = x + 1` with `x++`"),
            suggestion("x = x + 1", "x++")
        );
        assert_eq!(
            assign_op("assignOp: replace `n = n * 2` with `n *= 2`"),
            suggestion("n = n * 2", "n *= 2")
        );
        assert_eq!(assign_op("assignOp: replace `x = x + 1` with `x++"), None);
        assert_eq!(assign_op("assignOp: replace x = x + 1 with x++"), None);
        assert_eq!(assign_op("sloppyLen: replace `a` with `b`"), None);
    }

    #[test]
    fn gocritic_sloppy_len() {
        assert_eq!(
            sloppy_len("sloppyLen: len(arr) <= 0 can be len(arr) == 0"),
            Some("len(arr) == 0")
        );
        assert_eq!(sloppy_len("sloppyLen: len(arr) <= 0 is odd"), None);
        assert_eq!(sloppy_len("len(arr) <= 0 can be len(arr) == 0"), None);
    }

    #[test]
    fn gocritic_unslice() {
        assert_eq!(unslice("unslice: could simplify s[:] to s"), Some(()));
        assert_eq!(unslice("could simplify s[:] to s"), None);
    }

    #[test]
    fn golint_names() {
        assert_eq!(
            declaration_name("var `oldName` should be `newName`"),
            suggestion("oldName", "newName")
        );
        assert_eq!(
            declaration_name("const `maxId` should be `maxID`"),
            suggestion("maxId", "maxID")
        );
        assert_eq!(declaration_name("func `fooId` should be `fooID`"), None);
        assert_eq!(declaration_name("var `oldName` should be"), None);
    }

    #[test]
    fn golint_receiver() {
        assert_eq!(
            receiver_name(
                "receiver name s should be consistent with previous receiver name srv for Server"
            ),
            suggestion("s", "srv")
        );
        assert_eq!(receiver_name("receiver name x should be y"), suggestion("x", "y"));
        assert_eq!(
            receiver_name("receiver name should not be an underscore, omit the name if it is unused"),
            None
        );
        assert_eq!(
            receiver_name("receiver name should be a reflection of its identity"),
            None
        );
        assert_eq!(receiver_name("receiver name x"), None);
    }

    #[test]
    fn golint_stutter() {
        assert_eq!(
            type_stutter(
                "type name will be used as http.HTTPServer by other packages, and that stutters; consider calling this Server"
            ),
            Some("Server")
        );
        assert_eq!(type_stutter("type name is fine"), None);
    }
}
