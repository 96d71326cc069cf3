/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use pretty_assertions::assert_eq;

use super::*;
use crate::NodeType;
use crate::text::TextFormat;

fn kinds(parser: &Parser) -> Vec<WarningKind> {
    parser.warnings().iter().map(|warning| warning.kind).collect()
}

fn check_xml(input: &str, expected: &str, warnings: &[WarningKind]) {
    let mut parser = Parser::new();
    let doc = parser.parse_xml(input);
    assert_eq!(kinds(&parser), warnings);
    assert_eq!(doc.to_string(), expected);
}

fn check_json_warnings(input: &str, warnings: &[WarningKind]) -> Document {
    let mut parser = Parser::new();
    let doc = parser.parse_json(input);
    assert_eq!(kinds(&parser), warnings);
    doc
}

#[test]
fn cursor_columns() {
    let mut pos = ParserPos::new("a\tb", 4);
    pos += 2;
    assert_eq!(pos.current(), b'b');
    assert_eq!(pos.row(), 1);
    assert_eq!(pos.column(), 5);

    let mut pos = ParserPos::new("line1\r\nline2", 4);
    pos += 7;
    assert_eq!(pos.current(), b'l');
    assert_eq!((pos.row(), pos.column()), (2, 1));
    pos -= 1;
    assert_eq!(pos.current(), b'\n');
    assert_eq!((pos.row(), pos.column()), (1, 6));

    let mut pos = ParserPos::new("a\rb", 4);
    pos += 2;
    assert_eq!((pos.row(), pos.column()), (2, 1));

    let mut pos = ParserPos::new("\u{e9}x", 4);
    pos += 2;
    assert_eq!(pos.current(), b'x');
    assert_eq!(pos.column(), 2);
}

#[test]
fn cursor_ends() {
    let mut pos = ParserPos::new("ab\0cd", 4);
    assert!(pos.is_sof());
    pos += 5;
    assert!(pos.is_eof());
    assert_eq!(pos.location().bytes, 2);
    assert_eq!(pos.peek(1), 0);

    let start = ParserPos::new("abc", 4);
    let mut end = ParserPos::unresolved("abc", 4);
    assert!(end.is_eof());
    assert_eq!(end.offset(), None);
    let location = end.location();
    assert_eq!((location.bytes, location.row, location.column), (3, 0, 0));
    assert_eq!(end - start, 3);
    assert_eq!(end.distance(&start), 3);
    assert_eq!(start.distance(&end), 0);
    end -= 1;
    assert_eq!(end.current(), b'c');
    assert_eq!(end.column(), 3);
    assert_eq!(end, start + 2);

    let mut pos = ParserPos::new("x", 4);
    pos.retreat(10);
    assert!(pos.is_sof());
    pos.set_eof();
    assert_eq!(pos.offset(), Some(1));
}

#[test]
fn cursor_strings() {
    let pos = ParserPos::new("<?XML v", 4);
    assert!(pos.is_string("<?xml", false));
    assert!(!pos.is_string("<?xml", true));
    assert!(!pos.is_string("<?XML version", true));
    assert_eq!((pos + 6).rest(), "v");
}

#[test]
fn elements_and_attributes() {
    check_xml(
        "<a b=\"1\" c='x &amp; y'>hi<!--c--><![CDATA[<raw>]]></a>",
        "<a b=\"1\" c=\"x &amp; y\">hi<!--c--><![CDATA[<raw>]]></a>",
        &[],
    );
    check_xml("<a><b/><c>text</c></a>", "<a><b/><c>text</c></a>", &[]);
    check_xml("<a\n  x = 'y'\n></a >", "<a x=\"y\"/>", &[]);
}

#[test]
fn prolog() {
    check_xml(
        "<?xml version=\"1.0\"?><r/>",
        "<?xml version=\"1.0\" ?><r/>",
        &[],
    );
    check_xml(
        "<!DOCTYPE html><?pi data?><r/>",
        "<!DOCTYPE html><?pi data?><r/>",
        &[],
    );
    check_xml("<?xml-stylesheet href='a'?><r/>", "<?xml-stylesheet href='a'?><r/>", &[]);
    check_xml("  <r/>\n", "<r/>", &[]);
}

#[test]
fn text_is_stored_raw() {
    let doc = Document::from_xml("<a>1 &lt; 2</a>");
    let a = doc.first_child(doc.root()).unwrap();
    let text = doc.first_child(a).unwrap();
    assert_eq!(doc.value(text), "1 &lt; 2");
    assert_eq!(doc.text_format(text), TextFormat::EntityEncoded);
    assert_eq!(doc.text_decoded(a), "1 < 2");

    let doc = Document::from_xml("<a><![CDATA[1 < 2]]></a>");
    let a = doc.first_child(doc.root()).unwrap();
    let text = doc.first_child(a).unwrap();
    assert_eq!(doc.value(text), "1 < 2");
    assert_eq!(doc.text_format(text), TextFormat::Cdata);
}

#[test]
fn bad_markup() {
    use WarningKind::*;

    check_xml("hello<r/>", "hello<r/>", &[TextOutsideElement]);
    check_xml("<a><b></a></b>", "<a><b/></a>", &[MismatchedEndTag, MismatchedEndTag]);
    check_xml("<a><b>", "<a><b/></a>", &[NoEndTagFound, NoEndTagFound]);
    check_xml(
        "<a b c=d/>",
        "<a b=\"\" c=\"d\"/>",
        &[AttributeWithoutValue, AttributeValueNotQuoted],
    );
    check_xml("<a x=\"1\" x=\"2\"/>", "<a x=\"2\"/>", &[DuplicateAttribute]);
    check_xml("<a></a x>", "<a/>", &[ContentAfterCloseElementName]);
    check_xml(
        "<a><!-- unterminated",
        "<a><!-- unterminated--></a>",
        &[NoEndCommentFound, NoEndTagFound],
    );

    let mut parser = Parser::new();
    parser.parse_xml("<a x=\"1/>");
    assert_eq!(kinds(&parser), [NoEndQuoteFound, NoEndBracketFound]);
    parser.parse_xml("<a><![CDATA[xx");
    assert_eq!(kinds(&parser), [NoEndCdataFound, NoEndTagFound]);
    parser.parse_xml("<?xml version=\"1.0\">");
    assert_eq!(kinds(&parser), [NotProperEndDeclaration]);
    parser.parse_xml("<?xml version=\"1.0\"");
    assert_eq!(kinds(&parser), [NoEndDeclarationFound]);
    parser.parse_xml("<!DOCTYPE");
    assert_eq!(kinds(&parser), [NoEndUnknownTagFound]);
    parser.parse_xml("<a><1></a>");
    assert_eq!(kinds(&parser), [IllegalElementName]);
    parser.parse_xml("<a \"x\"/>");
    assert_eq!(kinds(&parser), [IllegalAttributeName]);
    parser.parse_xml("<a/>");
    assert!(parser.warnings().is_empty());
}

#[test]
fn warning_location() {
    let mut parser = Parser::new();
    parser.parse_xml("<a>\n  <b x=1/>\n</a>");
    let warning = parser.warnings()[0];
    assert_eq!(warning.kind, WarningKind::AttributeValueNotQuoted);
    assert_eq!(warning.location.row, 2);
    assert_eq!(warning.location.column, 8);
    assert_eq!(warning.location.bytes, 11);
    assert!(warning.to_string().contains("line: 2"));
}

#[test]
fn case_insensitive_names() {
    let mut parser = Parser::with_options(ParserOptions::default().with_case_sensitivity(false, false));
    let doc = parser.parse_xml("<A X='1'></a>");
    assert!(parser.warnings().is_empty());
    let a = doc.first_child(doc.root()).unwrap();
    assert_eq!(doc.attribute_value(a, "x"), Some("1"));
    assert!(!doc.element_names_case_sensitive());

    let mut parser = Parser::new();
    parser.parse_xml("<A></a>");
    assert_eq!(kinds(&parser), [WarningKind::MismatchedEndTag]);
}

#[test]
fn depth_guard() {
    let mut parser = Parser::with_options(ParserOptions::default().with_max_depth(8));
    let doc = parser.parse_xml(&"<a>".repeat(20));
    assert_eq!(kinds(&parser), [WarningKind::ExceededMaxDepth]);
    let elements = doc
        .descendant_or_self(doc.root())
        .filter(|id| doc.node_type(*id) == NodeType::Element)
        .count();
    assert_eq!(elements, 8);

    let mut parser = Parser::with_options(ParserOptions::default().with_max_depth(4));
    parser.parse_json(r#"{"a":{"b":{"c":{"d":{"e":1}}}}}"#);
    assert_eq!(kinds(&parser), [WarningKind::ExceededMaxDepth]);
}

#[test]
fn deep_input_is_cut_off() {
    let input = "<a>".repeat(100_000);
    let mut parser = Parser::new();
    let doc = parser.parse_xml(&input);
    assert_eq!(kinds(&parser), [WarningKind::ExceededMaxDepth]);
    assert_eq!(doc.node_count(), DEFAULT_MAX_DEPTH + 1);
}

#[test]
fn json_scalars() {
    let doc = check_json_warnings(
        r##"{"root":{"$id":"7","name":"x","n":5,"flag":true,"empty":null,"#text":"hi"}}"##,
        &[],
    );
    let root = doc.first_child(doc.root()).unwrap();
    assert_eq!(doc.name(root), "root");
    assert_eq!(doc.attribute_value(root, "id"), Some("7"));

    let n = doc.find_first_child_element(root, "n").unwrap();
    let number = doc.first_child(n).unwrap();
    assert_eq!(doc.text_format(number), TextFormat::JsonNumberEncoded);
    assert_eq!(doc.value(number), "5");

    let empty = doc.find_first_child_element(root, "empty").unwrap();
    assert!(!doc.has_children(empty));

    let last = doc.last_child(root).unwrap();
    assert_eq!(doc.text_format(last), TextFormat::JsonStringEncoded);
    assert_eq!(doc.value(last), "hi");

    assert_eq!(
        doc.to_string(),
        "<root id=\"7\"><name>x</name><n>5</n><flag>true</flag><empty/>hi</root>"
    );
}

#[test]
fn json_arrays() {
    let doc = check_json_warnings(r#"{"r":{"item":[1,"two",{"x":"3"}]}}"#, &[]);
    assert_eq!(
        doc.to_string(),
        "<r><item>1</item><item>two</item><item><x>3</x></item></r>"
    );

    let doc = check_json_warnings(r#"{"r":{"m":[[1,2],3]}}"#, &[]);
    assert_eq!(doc.to_string(), "<r><m><m>1</m><m>2</m></m><m>3</m></r>");

    let doc = check_json_warnings(r#"{"r":{"e":[]}}"#, &[]);
    assert_eq!(doc.to_string(), "<r/>");
}

#[test]
fn json_strings() {
    let doc = check_json_warnings(r#"{"a":"line\nbreak é","b":{"$t":"x\"y"}}"#, &[]);
    let a = doc.first_child(doc.root()).unwrap();
    assert_eq!(doc.text(a), r"line\nbreak é");
    assert_eq!(doc.text_decoded(a), "line\nbreak \u{e9}");
    let b = doc.next_sibling(a).unwrap();
    assert_eq!(doc.attribute_value(b, "t"), Some("x\"y"));

    let doc = check_json_warnings(r#"{"$x":"1"}"#, &[]);
    assert_eq!(doc.to_string(), "<$x>1</$x>");
}

#[test]
fn json_custom_keys() {
    let options = ParserOptions::default()
        .with_json_attribute_prefix('@')
        .with_json_text_key("_");
    let mut parser = Parser::with_options(options);
    let doc = parser.parse_json(r#"{"a":{"@k":"v","_":"t","$x":"y"}}"#);
    assert!(parser.warnings().is_empty());
    assert_eq!(doc.to_string(), "<a k=\"v\">t<$x>y</$x></a>");
}

#[test]
fn json_bare_attribute_values() {
    let doc = check_json_warnings(r#"{"a":{"$id":5,"$ok":true,"$s":"5","$n":null}}"#, &[]);
    let a = doc.first_child(doc.root()).unwrap();
    let id = doc.find_attribute(a, "id").unwrap();
    assert_eq!(doc.value(id), "5");
    assert!(!doc.is_quoted(id));
    assert!(!doc.is_quoted(doc.find_attribute(a, "ok").unwrap()));
    assert!(doc.is_quoted(doc.find_attribute(a, "s").unwrap()));
    assert!(doc.is_quoted(doc.find_attribute(a, "n").unwrap()));
    assert_eq!(doc.to_string(), "<a id=\"5\" ok=\"true\" s=\"5\" n=\"\"/>");

    // A later string value requotes a duplicate
    let mut parser = Parser::new();
    let doc = parser.parse_json(r#"{"a":{"$id":5,"$id":"6"}}"#);
    assert_eq!(kinds(&parser), &[WarningKind::DuplicateAttribute]);
    let a = doc.first_child(doc.root()).unwrap();
    assert!(doc.is_quoted(doc.find_attribute(a, "id").unwrap()));
}

#[test]
fn json_missing_values() {
    use WarningKind::*;

    let doc = check_json_warnings(r#"{"r":{"a":}}"#, &[JsonUnexpectedCharacter]);
    assert_eq!(doc.to_string(), "<r/>");
    let doc = check_json_warnings(r#"{"r":{"a":,"b":1}}"#, &[JsonUnexpectedCharacter]);
    assert_eq!(doc.to_string(), "<r><b>1</b></r>");
    let doc = check_json_warnings(r#"{"r":{"i":[1,x,2]}}"#, &[JsonUnexpectedCharacter]);
    assert_eq!(doc.to_string(), "<r><i>1</i><i>2</i></r>");
    let doc = check_json_warnings(r#"{"r":{"i":[,]}}"#, &[JsonUnexpectedCharacter]);
    assert_eq!(doc.to_string(), "<r/>");
    let doc = check_json_warnings(r#"{"r":{"i":[1}}"#, &[JsonNoEndArrayFound]);
    assert_eq!(doc.to_string(), "<r><i>1</i></r>");
}

#[test]
fn json_warnings() {
    use WarningKind::*;

    let doc = check_json_warnings(r#"{"a" 1}"#, &[JsonMissingColon]);
    assert_eq!(doc.to_string(), "<a>1</a>");
    check_json_warnings(r#"{"a":1"#, &[JsonNoEndObjectFound]);
    check_json_warnings(r#"{"a":"x}"#, &[JsonUnterminatedString, JsonNoEndObjectFound]);
    check_json_warnings(r#"{"a":1} x"#, &[JsonContentAfterDocument]);
    let doc = check_json_warnings("[1]", &[JsonUnexpectedCharacter]);
    assert!(!doc.has_children(doc.root()));

    let doc = check_json_warnings(r#"{"a":{"$b":{"c":1}}}"#, &[JsonIllegalAttributeValue]);
    let a = doc.first_child(doc.root()).unwrap();
    assert!(!doc.has_attributes(a));
    assert!(!doc.has_children(a));
    assert_eq!(doc.node_count(), 2);

    let doc = check_json_warnings("", &[]);
    assert!(!doc.has_children(doc.root()));
}

#[test]
fn take_warnings() {
    let mut parser = Parser::new();
    parser.parse_xml("<a>");
    let warnings = parser.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(parser.warnings().is_empty());
    assert_eq!(parser.options().tab_size, DEFAULT_TAB_SIZE);
}
