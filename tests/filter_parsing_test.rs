//! Integration tests for the filter parser against representative RFC 7644
//! §3.4.2.2 examples, independent of the unit tests living alongside each
//! parser module.

use scim_filter::{parse_filter, ParseErrorKind};

#[test]
fn parses_rfc_example_filters() {
    let cases = [
        r#"userName eq "bjensen""#,
        r#"name.familyName co "O'Malley""#,
        r#"userName sw "J""#,
        r#"urn:ietf:params:scim:schemas:core:2.0:User:userName sw "J""#,
        r#"title pr"#,
        r#"meta.lastModified gt "2011-05-13T04:42:34Z""#,
        r#"meta.lastModified ge "2011-05-13T04:42:34Z""#,
        r#"meta.lastModified lt "2011-05-13T04:42:34Z""#,
        r#"meta.lastModified le "2011-05-13T04:42:34Z""#,
        r#"title pr and userType eq "Employee""#,
        r#"title pr or userType eq "Intern""#,
        r#"userType eq "Employee" and (emails co "example.com" or emails.value co "example.org")"#,
        r#"userType ne "Employee" and not (emails co "example.com" or emails.value co "example.org")"#,
        r#"emails[type eq "work" and value co "@example.com"]"#,
        r#"emails[type eq "work" and value co "@example.com"] or ims[type eq "xmpp" and value co "@foo.com"]"#,
    ];
    for src in cases {
        parse_filter(src).unwrap_or_else(|e| panic!("failed to parse {src:?}: {e}"));
    }
}

#[test]
fn rejects_a_bare_path_with_no_operator() {
    let err = parse_filter("userName").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
}

#[test]
fn rejects_unterminated_string() {
    let err = parse_filter(r#"userName eq "alice"#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
}

#[test]
fn rejects_mismatched_brackets() {
    let err = parse_filter(r#"emails[type eq "work""#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::BracketMismatch);
}

#[test]
fn rejects_not_without_parens() {
    let err = parse_filter(r#"not userType eq "Employee""#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn whitespace_variations_parse_identically() {
    let tight = scim_filter::parse_filter(r#"userName eq "bjensen""#).unwrap();
    let loose = scim_filter::parse_filter("  userName   eq   \"bjensen\"  ").unwrap();
    assert_eq!(tight, loose);
}
