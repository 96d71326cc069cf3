/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::arena::NodeId;

use super::Document;
use super::NodePayload;

pub struct Attributes<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(document: &'a Document, first: Option<NodeId>) -> Self {
        Attributes {
            document,
            current: first,
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.document.node(self.current?);
        self.current = node.next;
        match &node.payload {
            NodePayload::Attribute { name, value, .. } => Some((name.as_str(), value.as_str())),
            _ => None,
        }
    }
}

pub struct Children<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl<'a> Children<'a> {
    pub(super) fn new(document: &'a Document, first: Option<NodeId>) -> Self {
        Children {
            document,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.document.node(current).next;
        Some(current)
    }
}

pub struct DescendantOrSelf<'a> {
    document: &'a Document,
    start: NodeId,
    current: Option<NodeId>,
}

impl<'a> DescendantOrSelf<'a> {
    pub(super) fn new(document: &'a Document, start: NodeId) -> Self {
        DescendantOrSelf {
            document,
            start,
            current: Some(start),
        }
    }
}

impl Iterator for DescendantOrSelf<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let node = self.document.node(current);
        if let Some(child) = node.first_child {
            self.current = Some(child);
            return Some(current);
        }
        let mut climb = current;
        self.current = loop {
            if climb == self.start {
                break None;
            }
            let node = self.document.node(climb);
            if let Some(next) = node.next {
                break Some(next);
            }
            match node.parent {
                Some(parent) => climb = parent,
                None => break None,
            }
        };
        Some(current)
    }
}
