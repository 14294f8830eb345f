//! Lenient `Link` header value parser.

/// Returns the target of the first link whose `rel` is `next`.
///
/// Accepts `<uri>; key=value; key="value", <uri>; ...`. Unquoted values are
/// allowed. Parsing stops at the first `next` link, or as soon as the input
/// stops matching that shape.
pub fn parse_link_rel_next(value: &str) -> Option<String> {
    let mut rest = value;
    loop {
        let (uri, after) = take_uri_reference(rest)?;
        rest = after;

        while let Some((key, value, after)) = take_param(rest) {
            rest = after;
            if key == "rel" && value == "next" {
                return Some(uri.to_string());
            }
        }

        rest = rest.strip_prefix(',')?;
    }
}

/// `\s*<uri>\s*`
fn take_uri_reference(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start().strip_prefix('<')?;
    let end = input.find('>')?;
    if end == 0 {
        return None;
    }
    Some((&input[..end], input[end + 1..].trim_start()))
}

/// `;\s*key\s*=\s*("quoted"|unquoted)\s*`
fn take_param(input: &str) -> Option<(&str, &str, &str)> {
    let input = input.strip_prefix(';')?.trim_start();

    let key_len = input
        .find(|c: char| c == ';' || c == '=' || c.is_whitespace())
        .unwrap_or(input.len());
    if key_len == 0 {
        return None;
    }
    let (key, input) = input.split_at(key_len);
    let input = input.trim_start().strip_prefix('=')?.trim_start();

    let (value, input) = take_quoted(input).or_else(|| take_unquoted(input))?;
    Some((key, value, input.trim_start()))
}

fn take_quoted(input: &str) -> Option<(&str, &str)> {
    let inner = input.strip_prefix('"')?;
    let end = inner.find('"')?;
    if end == 0 {
        return None;
    }
    Some((&inner[..end], &inner[end + 1..]))
}

fn take_unquoted(input: &str) -> Option<(&str, &str)> {
    let len = input
        .find(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .unwrap_or(input.len());
    if len == 0 {
        return None;
    }
    Some(input.split_at(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_next_first() {
        let header = "<https://api.example/page2>; rel=\"next\", <https://api.example/page1>; rel=\"prev\"";
        assert_eq!(parse_link_rel_next(header).as_deref(), Some("https://api.example/page2"));
    }

    #[test]
    fn next_in_later_group() {
        let header = "<https://api.example/page1>; rel=\"prev\", <https://api.example/page3>; rel=\"next\"";
        assert_eq!(parse_link_rel_next(header).as_deref(), Some("https://api.example/page3"));
    }

    #[test]
    fn unquoted_value_and_extra_params() {
        let header = "<https://h/x?page=3>; title=\"Page 3\"; rel=next; type=text/html";
        assert_eq!(parse_link_rel_next(header).as_deref(), Some("https://h/x?page=3"));
    }

    #[test]
    fn whitespace_around_tokens() {
        let header = "  <https://h/a> ;  rel =  \"next\"  ";
        assert_eq!(parse_link_rel_next(header).as_deref(), Some("https://h/a"));
    }

    #[test]
    fn first_next_wins() {
        let header = "<https://h/1>; rel=next, <https://h/2>; rel=next";
        assert_eq!(parse_link_rel_next(header).as_deref(), Some("https://h/1"));
    }

    #[test]
    fn no_next_link() {
        let header = "<https://api.example/page1>; rel=\"prev\", <https://api.example/last>; rel=\"last\"";
        assert_eq!(parse_link_rel_next(header), None);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse_link_rel_next(""), None);
        assert_eq!(parse_link_rel_next("https://h/a; rel=next"), None);
        assert_eq!(parse_link_rel_next("<>; rel=next"), None);
        assert_eq!(parse_link_rel_next("<https://h/a; rel=next"), None);
    }

    #[test]
    fn stops_at_garbage_between_groups() {
        let header = "<https://h/1>; rel=prev garbage, <https://h/2>; rel=next";
        assert_eq!(parse_link_rel_next(header), None);
    }

    #[test]
    fn rel_must_be_exactly_next() {
        assert_eq!(parse_link_rel_next("<https://h/1>; rel=\"next prev\""), None);
        assert_eq!(parse_link_rel_next("<https://h/1>; rel=nextpage"), None);
    }
}
