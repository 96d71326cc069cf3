/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Returned NodeRef cannot outlive the Document:
/// ```compile_fail
/// use dualdom::Document;
/// use dualdom::NodeRef;
/// let r: NodeRef;
/// {
///     let doc = Document::from_xml("<a><b/></a>");
///     r = doc.node_ref(doc.root());
/// }
/// println!("{}", r);
/// ```
///
/// Document cannot be edited while a NodeRef borrows it:
/// ```compile_fail
/// use dualdom::Document;
/// let mut doc = Document::from_xml("<a><b/></a>");
/// let r = doc.node_ref(doc.root());
/// let c = doc.create_element("c");
/// doc.adopt_as_last_child(doc.root(), c);
/// println!("{}", r);
/// ```
///
/// Iterators borrow the Document too:
/// ```compile_fail
/// use dualdom::Document;
/// let mut doc = Document::from_xml("<a><b/><c/></a>");
/// let a = doc.first_child(doc.root()).unwrap();
/// for child in doc.children(a) {
///     doc.delete(child);
/// }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
