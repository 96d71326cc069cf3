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
use proptest::prelude::*;

use super::error::description;
use super::*;

fn check_doc_xml(doc: &Document, expected: &str) {
    let xml = doc.to_string();
    assert_eq!(xml, expected);
    // Verify that the capacity is measured correctly
    assert_eq!(xml.len(), xml.capacity());
    assert_eq!(doc.str_size(), expected.len());
    // Verify that the Display and to_string are same
    let xml2 = format!("{}", doc);
    assert_eq!(xml2, expected);
}

// Every link must have its mirror link.
fn check_links(doc: &Document, parent: NodeId) {
    for attributes in [false, true] {
        let node = doc.node(parent);
        let (first, last) = if attributes {
            (node.first_attribute, node.last_attribute)
        } else {
            (node.first_child, node.last_child)
        };
        let mut previous = None;
        let mut current = first;
        while let Some(id) = current {
            let child = doc.node(id);
            assert_eq!(child.parent, Some(parent));
            assert_eq!(child.previous, previous);
            assert_eq!(child.is_attribute(), attributes);
            if !attributes {
                check_links(doc, id);
            }
            previous = Some(id);
            current = child.next;
        }
        assert_eq!(last, previous);
    }
}

fn element(doc: &mut Document, parent: NodeId, name: &str) -> NodeId {
    let id = doc.create_element(name);
    doc.adopt_as_last_child(parent, id);
    id
}

#[test]
fn it_works() {
    let mut doc = Document::new();
    let root = doc.root();
    let html = element(&mut doc, root, "html");
    let p = element(&mut doc, html, "p");
    let b = element(&mut doc, p, "b");
    let blink = element(&mut doc, b, "blink");
    let lala = doc.create_text("lala");
    doc.adopt_as_last_child(blink, lala);

    let foo = doc.create_text("foo&");
    doc.adopt_as_next_sibling(p, foo);
    let p2 = doc.create_element("p2");
    doc.adopt_as_next_sibling(foo, p2);
    let bar = doc.create_text("bar");
    doc.adopt_as_previous_sibling(p2, bar);
    let p3 = doc.create_element("p3");
    doc.adopt_as_previous_sibling(bar, p3);

    check_doc_xml(
        &doc,
        "<html><p><b><blink>lala</blink></b></p>foo&amp;<p3/>bar<p2/></html>",
    );
    check_links(&doc, root);
    assert_eq!(doc.node_count(), 10);
}

#[test]
fn adoption() {
    let mut doc = Document::new();
    let root = doc.root();
    let r = element(&mut doc, root, "r");
    let a = element(&mut doc, r, "a");
    let b = element(&mut doc, r, "b");
    let c = doc.create_element("c");
    doc.adopt_as_first_child(r, c);
    check_doc_xml(&doc, "<r><c/><a/><b/></r>");

    // Moving keeps the subtree
    let x = element(&mut doc, a, "x");
    doc.adopt_as_last_child(b, a);
    check_doc_xml(&doc, "<r><c/><b><a><x/></a></b></r>");
    assert_eq!(doc.parent(x), Some(a));

    doc.adopt_as_previous_sibling(c, x);
    check_doc_xml(&doc, "<r><x/><c/><b><a/></b></r>");

    // Adopting next to itself does nothing
    doc.adopt_as_next_sibling(c, c);
    doc.adopt_as_previous_sibling(c, c);
    check_doc_xml(&doc, "<r><x/><c/><b><a/></b></r>");

    doc.orphan(b);
    check_doc_xml(&doc, "<r><x/><c/></r>");
    assert_eq!(doc.parent(b), None);
    assert_eq!(doc.next_sibling(c), None);
    assert_eq!(doc.last_child(r), Some(c));
    // Orphaning twice is harmless
    doc.orphan(b);
    assert_eq!(doc.node_ref(b).to_string(), "<b><a/></b>");

    doc.adopt_as_first_child(r, b);
    check_doc_xml(&doc, "<r><b><a/></b><x/><c/></r>");
    check_links(&doc, root);
}

#[test]
fn attribute_chain() {
    let mut doc = Document::new();
    let root = doc.root();
    let r = element(&mut doc, root, "r");
    let child = element(&mut doc, r, "c");

    assert!(!doc.set_attribute(r, "b", "2"));
    let a = doc.create_attribute("a", "1");
    doc.adopt_as_first_child(r, a);
    let c = doc.create_attribute("c", "3");
    doc.adopt_as_next_sibling(a, c);
    check_doc_xml(&doc, "<r a=\"1\" c=\"3\" b=\"2\"><c/></r>");

    // Attributes never mix with the children
    assert_eq!(doc.first_child(r), Some(child));
    assert_eq!(doc.first_attribute(r), Some(a));
    assert_eq!(doc.last_attribute(r), doc.find_attribute(r, "b"));
    check_links(&doc, root);

    // A newcomer replaces the attribute with the same name
    let dup = doc.create_attribute("a", "new");
    doc.adopt_as_last_child(r, dup);
    assert!(!doc.contains(a));
    check_doc_xml(&doc, "<r c=\"3\" b=\"2\" a=\"new\"><c/></r>");
    check_links(&doc, root);
}

#[test]
fn attribute_quoting() {
    let mut doc = Document::new();
    let r = doc.create_element("r");
    doc.set_attribute(r, "n", "1");
    let n = doc.find_attribute(r, "n").unwrap();
    assert!(doc.is_quoted(n));

    doc.set_quoted(n, false);
    doc.set_attribute(r, "n", "2");
    assert!(!doc.is_quoted(n));

    let copy = doc.clone_node(r);
    let copied = doc.find_attribute(copy, "n").unwrap();
    assert!(!doc.is_quoted(copied));
    assert_eq!(doc.value(copied), "2");
}

#[test]
#[should_panic(expected = "node is not an attribute")]
fn element_is_not_quoted() {
    let mut doc = Document::new();
    let r = doc.create_element("r");
    doc.is_quoted(r);
}

#[test]
fn relinking_detached_nodes() {
    let mut doc = Document::from_xml("<r b=\"2\"><m/></r>");
    let root = doc.root();
    let r = doc.first_child_element(root).unwrap();
    let m = doc.first_child(r).unwrap();
    let b = doc.first_attribute(r).unwrap();

    let first = doc.create_element("first");
    doc.link_before(r, m, first, false);
    let last = doc.create_element("last");
    doc.link_after(r, m, last, false);
    let between = doc.create_text("t");
    doc.link_after(r, first, between, false);
    let a = doc.create_attribute("a", "1");
    doc.link_before(r, b, a, true);
    let c = doc.create_attribute("c", "3");
    doc.link_after(r, b, c, true);

    check_doc_xml(&doc, "<r a=\"1\" b=\"2\" c=\"3\"><first/>t<m/><last/></r>");
    assert_eq!(doc.first_child(r), Some(first));
    assert_eq!(doc.last_child(r), Some(last));
    assert_eq!(doc.first_attribute(r), Some(a));
    assert_eq!(doc.last_attribute(r), Some(c));
    check_links(&doc, root);
}

#[test]
fn attributes() {
    let mut doc = Document::new();
    let root = doc.root();
    let r = element(&mut doc, root, "r");

    assert!(!doc.set_attribute(r, "i", "1"));
    assert!(!doc.set_attribute(r, "j", "2"));
    assert!(doc.set_attribute(r, "i", "3"));
    check_doc_xml(&doc, "<r i=\"3\" j=\"2\"/>");
    assert!(doc.has_attributes(r));
    assert!(!doc.has_children(r));

    assert_eq!(doc.attribute_value(r, "i"), Some("3"));
    assert_eq!(doc.attribute_value(r, "k"), None);
    assert_eq!(doc.attribute_value_checked(r, "j"), Ok("2"));
    assert_eq!(
        doc.attribute_value_checked(r, "k"),
        Err(DomError::CheckFailed(description::NO_ATTRIBUTE))
    );
    let pairs: Vec<(&str, &str)> = doc.attributes(r).collect();
    assert_eq!(pairs, vec![("i", "3"), ("j", "2")]);

    let node = doc.create_attribute("j", "4");
    assert!(doc.set_attribute_node(r, node));
    let other = doc.create_attribute("k", "5");
    assert!(!doc.set_attribute_node(r, other));
    assert!(!doc.set_attribute_node(r, other));
    check_doc_xml(&doc, "<r i=\"3\" j=\"4\" k=\"5\"/>");

    assert!(doc.delete_attribute(r, "i"));
    assert!(!doc.delete_attribute(r, "i"));
    assert_eq!(doc.last_attribute_checked(r), Ok(other));
    assert!(doc.delete_attribute(r, "j"));
    assert!(doc.delete_attribute(r, "k"));
    assert_eq!(
        doc.last_attribute_checked(r),
        Err(DomError::CheckFailed(description::NO_ATTRIBUTE))
    );
    check_doc_xml(&doc, "<r/>");

    let declaration = doc.create_declaration();
    doc.adopt_as_first_child(root, declaration);
    doc.set_attribute(declaration, "version", "1.0");
    doc.set_attribute(declaration, "encoding", "UTF-8");
    check_doc_xml(&doc, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?><r/>");
}

#[test]
fn node_properties() {
    let mut doc = Document::new();
    let root = doc.root();
    let r = element(&mut doc, root, "r");
    let attribute = doc.create_attribute("a", "1");
    doc.adopt_as_last_child(r, attribute);
    let comment = doc.create_comment(" c ");
    doc.adopt_as_last_child(r, comment);
    let unknown = doc.create_unknown("!DOCTYPE r");
    doc.adopt_as_first_child(root, unknown);

    assert_eq!(doc.node_type(root), NodeType::Document);
    assert_eq!(doc.node_type(r), NodeType::Element);
    assert_eq!(doc.kind(r), NodeKind::Element { name: "r" });
    assert_eq!(doc.kind(attribute), NodeKind::Attribute { name: "a", value: "1" });
    assert_eq!(doc.kind(comment), NodeKind::Comment { value: " c " });
    assert_eq!(doc.kind(unknown), NodeKind::Unknown { value: "!DOCTYPE r" });
    assert_eq!(doc.kind(root), NodeKind::Document);

    assert_eq!(doc.name(r), "r");
    assert_eq!(doc.value(r), "r");
    assert_eq!(doc.name(comment), "");
    assert_eq!(doc.value(root), "");

    doc.set_name(r, "s");
    doc.set_name(attribute, "b");
    doc.set_value(attribute, "2");
    doc.set_value(comment, "x");
    doc.set_value(unknown, "!DOCTYPE s");
    check_doc_xml(&doc, "<!DOCTYPE s><s b=\"2\"><!--x--></s>");

    assert_eq!(doc.user_data(r), 0);
    doc.set_user_data(r, 42);
    assert_eq!(doc.user_data(r), 42);
}

#[test]
#[should_panic(expected = "only elements and attributes have names")]
fn comment_has_no_name() {
    let mut doc = Document::new();
    let comment = doc.create_comment("c");
    doc.set_name(comment, "x");
}

#[test]
#[should_panic(expected = "documents and declarations have no value")]
fn document_has_no_value() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_value(root, "x");
}

#[test]
fn navigation() {
    let mut doc = Document::from_xml("<a><b/>t<c><d/></c><!--x--><b/>u</a>");
    let root = doc.root();
    let a = doc.first_child_element(root).unwrap();
    let b1 = doc.first_child(a).unwrap();
    let t = doc.next_sibling(b1).unwrap();
    let c = doc.next_sibling_element(b1).unwrap();
    let d = doc.first_child(c).unwrap();
    let b2 = doc.last_child_element(a).unwrap();
    let u = doc.last_child(a).unwrap();

    assert_eq!(doc.name(c), "c");
    assert_eq!(doc.previous_sibling(c), Some(t));
    assert_eq!(doc.previous_sibling_element(c), Some(b1));
    assert_eq!(doc.next_sibling(u), None);
    assert_eq!(doc.first_sibling(u), b1);
    assert_eq!(doc.last_sibling(b1), u);
    assert_eq!(doc.first_sibling_element(u), Some(b1));
    assert_eq!(doc.last_sibling_element(t), Some(b2));

    assert_eq!(doc.parent(d), Some(c));
    assert_eq!(doc.parent_element(d), Some(c));
    assert_eq!(doc.parent_element(a), None);
    assert_eq!(doc.root_of(d), root);
    assert_eq!(doc.root_element(d), Some(a));

    assert_eq!(doc.find_first_child_element(a, "b"), Some(b1));
    assert_eq!(doc.find_last_child_element(a, "b"), Some(b2));
    assert_eq!(doc.find_next_sibling_element(b1, "b"), Some(b2));
    assert_eq!(doc.find_previous_sibling_element(b2, "b"), Some(b1));
    assert_eq!(doc.find_previous_sibling_element(b1, "b"), None);
    assert_eq!(doc.find_first_child_element(a, "z"), None);

    // Detached subtrees are their own roots
    doc.orphan(c);
    assert_eq!(doc.root_of(d), c);
    assert_eq!(doc.root_element(d), Some(c));
    assert_eq!(doc.first_sibling(c), c);
}

#[test]
fn checked_lookups() {
    let doc = Document::from_xml("<a><b/>t</a>");
    let root = doc.root();
    let a = doc.first_child_element_checked(root).unwrap();
    let b = doc.first_child_checked(a).unwrap();
    let t = doc.last_child_checked(a).unwrap();

    assert_eq!(doc.parent_checked(b), Ok(a));
    assert_eq!(doc.next_sibling_checked(b), Ok(t));
    assert_eq!(doc.previous_sibling_checked(t), Ok(b));
    assert_eq!(doc.find_first_child_element_checked(a, "b"), Ok(b));

    let no_parent = Err(DomError::CheckFailed(description::NO_PARENT));
    let no_child = Err(DomError::CheckFailed(description::NO_CHILD));
    let no_sibling = Err(DomError::CheckFailed(description::NO_SIBLING));
    let no_element = Err(DomError::CheckFailed(description::NO_ELEMENT));
    assert_eq!(doc.parent_checked(root), no_parent);
    assert_eq!(doc.parent_element_checked(a), no_parent);
    assert_eq!(doc.first_child_checked(b), no_child);
    assert_eq!(doc.last_child_checked(t), no_child);
    assert_eq!(doc.previous_sibling_checked(b), no_sibling);
    assert_eq!(doc.next_sibling_checked(t), no_sibling);
    assert_eq!(doc.next_sibling_element_checked(b), no_element);
    assert_eq!(doc.previous_sibling_element_checked(b), no_element);
    assert_eq!(doc.last_child_element_checked(b), no_element);
    assert_eq!(doc.find_last_child_element_checked(a, "t"), no_element);
    assert_eq!(doc.find_next_sibling_element_checked(b, "b"), no_element);
    assert_eq!(doc.find_previous_sibling_element_checked(t, "a"), no_element);
    assert_eq!(doc.first_sibling_element_checked(t), Ok(b));
    assert_eq!(doc.last_sibling_element_checked(t), Ok(b));
    assert_eq!(doc.root_element_checked(t), Ok(a));
    let empty = Document::new();
    assert_eq!(empty.root_element_checked(empty.root()), no_element);

    let error = doc.parent_checked(root).unwrap_err();
    assert_eq!(error.to_string(), "lookup failed: node has no parent");
}

#[test]
fn case_insensitive_names() {
    let mut doc = Document::with_case_sensitivity(false, false);
    assert!(!doc.element_names_case_sensitive());
    assert!(!doc.attribute_names_case_sensitive());
    let root = doc.root();
    let a = element(&mut doc, root, "Item");
    assert_eq!(doc.find_first_child_element(root, "ITEM"), Some(a));

    doc.set_attribute(a, "Key", "1");
    assert!(doc.set_attribute(a, "KEY", "2"));
    assert_eq!(doc.attribute_value(a, "key"), Some("2"));
    check_doc_xml(&doc, "<Item Key=\"2\"/>");

    let mut doc = Document::new();
    let root = doc.root();
    let a = element(&mut doc, root, "Item");
    assert_eq!(doc.find_first_child_element(root, "item"), None);
    doc.set_attribute(a, "Key", "1");
    assert!(!doc.set_attribute(a, "key", "2"));
    check_doc_xml(&doc, "<Item Key=\"1\" key=\"2\"/>");
}

#[test]
fn texts() {
    let mut doc = Document::new();
    let root = doc.root();
    let a = element(&mut doc, root, "a");
    let plain = doc.create_text("1 < 2");
    doc.adopt_as_last_child(a, plain);
    let cdata = doc.create_text_with_format("&x", TextFormat::Cdata);
    doc.adopt_as_last_child(a, cdata);
    let json = doc.create_text_with_format("\\u0041\\n", TextFormat::JsonStringEncoded);
    doc.adopt_as_last_child(a, json);

    assert_eq!(doc.value(plain), "1 &lt; 2");
    assert_eq!(doc.text_format(plain), TextFormat::EntityEncoded);
    assert_eq!(doc.text_value_decoded(plain), "1 < 2");
    assert_eq!(doc.text_value_decoded(json), "A\n");
    assert_eq!(
        doc.text_value_in_format(plain, TextFormat::JsonStringEncoded, false, false),
        "1 < 2"
    );
    assert_eq!(
        doc.text_value_in_format(cdata, TextFormat::EntityEncoded, false, false),
        "&amp;x"
    );
    assert_eq!(doc.text(a), "1 &lt; 2&x\\u0041\\n");
    assert_eq!(doc.text_decoded(a), "1 < 2&xA\n");
    check_doc_xml(&doc, "<a>1 &lt; 2<![CDATA[&x]]>A\n</a>");

    doc.set_text_value_and_entity_encode(json, "<>");
    assert_eq!(doc.value(json), "&lt;&gt;");
    doc.set_text_value_and_json_encode(plain, "\"q\"");
    assert_eq!(doc.value(plain), "\\\"q\\\"");
    assert_eq!(doc.text_format(plain), TextFormat::JsonStringEncoded);
    doc.set_text_value(cdata, "5", TextFormat::JsonNumberEncoded);
    assert_eq!(doc.text_output_format(cdata), TextFormat::JsonNumberEncoded);

    doc.set_text_output_format(cdata, TextFormat::Cdata);
    assert_eq!(doc.text_format(cdata), TextFormat::JsonNumberEncoded);
    assert_eq!(doc.text_output_format(cdata), TextFormat::Cdata);
    check_doc_xml(&doc, "<a>&quot;q&quot;<![CDATA[5]]>&lt;&gt;</a>");
}

#[test]
#[should_panic(expected = "node is not a text node")]
fn element_has_no_text_format() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.text_format(a);
}

#[test]
fn removals() {
    let mut doc = Document::from_xml("<a x='1'><b><c/>t</b><d/><!--e--></a>");
    let root = doc.root();
    let a = doc.first_child(root).unwrap();
    let b = doc.first_child(a).unwrap();
    let c = doc.first_child(b).unwrap();
    let count = doc.node_count();

    doc.delete(b);
    assert!(!doc.contains(b));
    assert!(!doc.contains(c));
    assert_eq!(doc.node_count(), count - 3);
    check_doc_xml(&doc, "<a x=\"1\"><d/><!--e--></a>");

    doc.remove_children(a);
    check_doc_xml(&doc, "<a x=\"1\"/>");
    assert_eq!(doc.node_count(), 3);

    doc.set_user_data(a, 7);
    doc.clear(a);
    check_doc_xml(&doc, "<a/>");
    assert_eq!(doc.user_data(a), 0);
    assert_eq!(doc.node_count(), 2);

    let comment = doc.create_comment("gone");
    doc.adopt_as_last_child(a, comment);
    doc.clear(comment);
    check_doc_xml(&doc, "<a><!----></a>");

    doc.clear(root);
    check_doc_xml(&doc, "");
    assert_eq!(doc.node_count(), 1);

    // Freed slots are reused
    let stats = doc.arena_stats();
    assert_eq!(stats.nr_live, 1);
    assert!(stats.nr_free > 0);
    doc.create_element("new");
    assert_eq!(doc.arena_stats().nr_slots, stats.nr_slots);
}

#[test]
#[should_panic(expected = "document root cannot be deleted")]
fn root_delete() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.delete(root);
}

#[test]
#[should_panic(expected = "node handle does not refer to a live node")]
fn stale_handle() {
    let mut doc = Document::from_xml("<a/>");
    let a = doc.first_child(doc.root()).unwrap();
    doc.delete(a);
    doc.name(a);
}

#[test]
#[should_panic(expected = "attribute, text, comment and unknown nodes cannot have children")]
fn text_with_children() {
    let mut doc = Document::new();
    let text = doc.create_text("t");
    let a = doc.create_element("a");
    doc.adopt_as_last_child(text, a);
}

#[test]
#[should_panic(expected = "declarations can only have attributes")]
fn declaration_with_children() {
    let mut doc = Document::new();
    let declaration = doc.create_declaration();
    let a = doc.create_element("a");
    doc.adopt_as_first_child(declaration, a);
}

#[test]
#[should_panic(expected = "documents cannot have attributes")]
fn document_with_attributes() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_attribute(root, "a", "1");
}

#[test]
#[should_panic(expected = "document nodes cannot be adopted")]
fn adopt_document() {
    let mut doc = Document::new();
    let root = doc.root();
    let a = doc.create_element("a");
    doc.adopt_as_last_child(a, root);
}

#[test]
#[should_panic(expected = "a node cannot be adopted under itself")]
fn adopt_ancestor() {
    let mut doc = Document::from_xml("<a><b><c/></b></a>");
    let a = doc.first_child(doc.root()).unwrap();
    let c = doc.first_child(doc.first_child(a).unwrap()).unwrap();
    doc.adopt_as_last_child(c, a);
}

#[test]
#[should_panic(expected = "a node cannot be adopted under itself")]
fn adopt_itself() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    doc.adopt_as_first_child(a, a);
}

#[test]
#[should_panic(expected = "a node cannot be adopted under itself")]
fn adopt_ancestor_as_sibling() {
    let mut doc = Document::from_xml("<a><b><c/></b></a>");
    let a = doc.first_child(doc.root()).unwrap();
    let b = doc.first_child(a).unwrap();
    let c = doc.first_child(b).unwrap();
    doc.adopt_as_next_sibling(c, a);
}

#[test]
#[should_panic(expected = "node without a parent cannot have siblings")]
fn detached_sibling() {
    let mut doc = Document::new();
    let a = doc.create_element("a");
    let b = doc.create_element("b");
    doc.adopt_as_next_sibling(a, b);
}

#[test]
#[should_panic(expected = "attributes can only be siblings of attributes")]
fn mixed_siblings() {
    let mut doc = Document::from_xml("<a><b/></a>");
    let a = doc.first_child(doc.root()).unwrap();
    let b = doc.first_child(a).unwrap();
    let x = doc.create_attribute("x", "1");
    doc.adopt_as_previous_sibling(b, x);
}

#[test]
fn clone_subtree() {
    let mut doc = Document::from_xml("<a x='1'><b y='2'>t<c/></b><d/></a>");
    let root = doc.root();
    let a = doc.first_child(root).unwrap();
    let b = doc.first_child(a).unwrap();
    let count = doc.node_count();

    let copy = doc.clone_node(b);
    assert_eq!(doc.parent(copy), None);
    assert_eq!(doc.node_ref(copy).to_string(), "<b y=\"2\">t<c/></b>");
    assert_eq!(doc.node_count(), count + 4);

    // The copy is independent from the original
    doc.set_attribute(copy, "y", "3");
    doc.adopt_as_last_child(a, copy);
    check_doc_xml(
        &doc,
        "<a x=\"1\"><b y=\"2\">t<c/></b><d/><b y=\"3\">t<c/></b></a>",
    );
    check_links(&doc, root);

    let whole = doc.clone_node(root);
    assert_eq!(doc.node_type(whole), NodeType::Document);
    assert_eq!(doc.node_ref(whole).to_string(), doc.to_string());
}

#[test]
fn deep_clone() {
    const DEPTH: usize = 100_000;

    let mut doc = Document::new();
    let mut parent = doc.root();
    for _ in 0..DEPTH {
        parent = element(&mut doc, parent, "e");
    }
    let top = doc.first_child(doc.root()).unwrap();
    let copy = doc.clone_node(top);
    assert_eq!(doc.node_count(), DEPTH * 2 + 1);
    assert_eq!(doc.descendant_or_self(copy).count(), DEPTH);

    doc.delete(top);
    doc.delete(copy);
    assert_eq!(doc.node_count(), 1);
}

#[test]
fn iterators() {
    let doc = Document::from_xml("<a x='1' y='2'><b><c/>t</b><d/></a>");
    let a = doc.first_child(doc.root()).unwrap();

    let names: Vec<&str> = doc.children(a).map(|id| doc.name(id)).collect();
    assert_eq!(names, vec!["b", "d"]);
    let names: Vec<&str> = doc.attributes(a).map(|(name, _)| name).collect();
    assert_eq!(names, vec!["x", "y"]);

    let all: Vec<NodeType> = doc.descendant_or_self(a).map(|id| doc.node_type(id)).collect();
    assert_eq!(
        all,
        vec![
            NodeType::Element,
            NodeType::Element,
            NodeType::Element,
            NodeType::Text,
            NodeType::Element,
        ]
    );
    let b = doc.first_child(a).unwrap();
    assert_eq!(doc.descendant_or_self(b).count(), 3);
    assert_eq!(doc.children(doc.first_child(b).unwrap()).count(), 0);
}

#[test]
fn node_refs() {
    let doc: Document = "<a x='1'><b>t</b><c/></a>".parse().unwrap();
    let a = doc.node_ref(doc.root()).first_child().unwrap();
    assert_eq!(a.name(), "a");
    assert_eq!(a.attribute("x"), Some("1"));
    assert_eq!(a.kind(), NodeKind::Element { name: "a" });

    let b = a.first_child_element().unwrap();
    assert_eq!(b.to_string(), "<b>t</b>");
    assert_eq!(b.str_size(), 8);
    assert_eq!(b.first_child().unwrap().value(), "t");
    assert_eq!(b.next_sibling_element().unwrap().name(), "c");
    assert_eq!(a.find_first_child_element("c").unwrap().id(), a.last_child().unwrap().id());
    assert_eq!(b.parent().unwrap().id(), a.id());
    assert!(b.previous_sibling().is_none());
    assert_eq!(a.children().count(), 2);
    assert_eq!(format!("{}", a), "<a x=\"1\"><b>t</b><c/></a>");
}

fn is_above(doc: &Document, candidate: NodeId, id: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(node) = current {
        if node == candidate {
            return true;
        }
        current = doc.parent(node);
    }
    false
}

proptest! {
    #[test]
    fn links_stay_consistent(ops in prop::collection::vec((0..5u8, 0..9usize, 0..9usize), 1..60)) {
        let mut doc = Document::new();
        let mut nodes = vec![doc.root()];
        for i in 0..8 {
            nodes.push(doc.create_element(&format!("e{i}")));
        }

        for (op, i, j) in ops {
            let (target, node) = (nodes[i], nodes[j]);
            if node == doc.root() || is_above(&doc, node, target) {
                continue;
            }
            match op {
                0 => doc.adopt_as_first_child(target, node),
                1 => doc.adopt_as_last_child(target, node),
                2 | 3 if doc.parent(target).is_none() => continue,
                2 => doc.adopt_as_previous_sibling(target, node),
                3 => doc.adopt_as_next_sibling(target, node),
                _ => doc.orphan(node),
            }
        }

        // Every node is reachable from exactly one detached top
        let mut reached = 0;
        for &top in nodes.iter().filter(|id| doc.parent(**id).is_none()) {
            check_links(&doc, top);
            reached += doc.descendant_or_self(top).count();
        }
        prop_assert_eq!(reached, nodes.len());
        prop_assert_eq!(doc.node_count(), nodes.len());
    }
}
