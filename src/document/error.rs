/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Error returned by the lookups which must find something.
///
/// Only the `*_checked` accessors return this. Structural misuse of
/// the tree, like giving a child to a text node, panics instead.
#[derive(Debug, Eq, PartialEq, Copy, Clone, thiserror::Error)]
pub enum DomError {
    #[error("lookup failed: {0}")]
    CheckFailed(&'static str),
}

pub(crate) mod description {
    pub(crate) const NO_PARENT: &str = "node has no parent";
    pub(crate) const NO_CHILD: &str = "node has no children";
    pub(crate) const NO_SIBLING: &str = "node has no sibling in that direction";
    pub(crate) const NO_ELEMENT: &str = "no matching element";
    pub(crate) const NO_ATTRIBUTE: &str = "no matching attribute";

    pub(crate) const LEAF_CHILDREN: &str =
        "attribute, text, comment and unknown nodes cannot have children";
    pub(crate) const DECLARATION_CHILDREN: &str = "declarations can only have attributes";
    pub(crate) const DOCUMENT_ATTRIBUTES: &str = "documents cannot have attributes";
    pub(crate) const ADOPT_DOCUMENT: &str = "document nodes cannot be adopted";
    pub(crate) const ADOPT_ANCESTOR: &str = "a node cannot be adopted under itself";
    pub(crate) const PARENTLESS_SIBLING: &str = "node without a parent cannot have siblings";
    pub(crate) const MIXED_SIBLINGS: &str = "attributes can only be siblings of attributes";
    pub(crate) const DELETE_ROOT: &str = "document root cannot be deleted";
    pub(crate) const NOT_TEXT: &str = "node is not a text node";
    pub(crate) const NOT_ATTRIBUTE: &str = "node is not an attribute";
    pub(crate) const NO_NAME: &str = "only elements and attributes have names";
    pub(crate) const NO_VALUE: &str = "documents and declarations have no value";
}
