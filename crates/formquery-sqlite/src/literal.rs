//! Typed literal rewriting.

const TYPED_LITERALS: [&str; 2] = ["TIMESTAMP", "DATE"];

/// Rewrites `DATE '…'` and `TIMESTAMP '…'` to plain `'…'` string literals.
///
/// Keywords inside quoted text and inside longer identifiers are left alone.
pub fn rewrite_typed_literals(clause: &str) -> String {
    let bytes = clause.as_bytes();
    let mut out = String::with_capacity(clause.len());
    let mut copied = 0;
    let mut in_quote = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\'' {
            // `''` inside a literal toggles twice and stays quoted.
            in_quote = !in_quote;
        } else if !in_quote {
            if let Some(len) = typed_literal_prefix(bytes, i) {
                out.push_str(&clause[copied..i]);
                i += len;
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&clause[copied..]);
    out
}

/// Length of a `KEYWORD<whitespace>` prefix at `start` that introduces a
/// quoted literal.
fn typed_literal_prefix(bytes: &[u8], start: usize) -> Option<usize> {
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }

    let rest = &bytes[start..];
    let keyword = TYPED_LITERALS
        .iter()
        .find(|kw| rest.len() > kw.len() && rest[..kw.len()].eq_ignore_ascii_case(kw.as_bytes()))?;

    let mut end = keyword.len();
    if !rest[end].is_ascii_whitespace() {
        return None;
    }
    while end < rest.len() && rest[end].is_ascii_whitespace() {
        end += 1;
    }
    (end < rest.len() && rest[end] == b'\'').then_some(end)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range() {
        assert_eq!(
            rewrite_typed_literals("1=1 AND InspectedOn BETWEEN DATE '2024-01-01' AND DATE '2024-01-31'"),
            "1=1 AND InspectedOn BETWEEN '2024-01-01' AND '2024-01-31'"
        );
    }

    #[test]
    fn test_timestamp_any_case() {
        assert_eq!(
            rewrite_typed_literals("Seen > timestamp  '2024-03-05 10:00:00'"),
            "Seen > '2024-03-05 10:00:00'"
        );
    }

    #[test]
    fn test_leaves_text_and_identifiers() {
        let clause = "Note = 'DATE ''2024-01-01''' AND UpdateDate = 3 AND DATE_KEY = 'x'";
        assert_eq!(rewrite_typed_literals(clause), clause);
    }

    #[test]
    fn test_keyword_without_literal() {
        assert_eq!(rewrite_typed_literals("DATE = 1"), "DATE = 1");
        assert_eq!(rewrite_typed_literals("x = DATE"), "x = DATE");
    }
}
