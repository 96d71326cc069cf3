/*
** This file is a part of Dualdom (XML and JSON document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Dualdom is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

// Arena faults are caller contract violations and abort with these
// messages instead of returning an error value.
pub(crate) mod description {
    pub(crate) const STALE_HANDLE: &str = "node handle does not refer to a live node";
    pub(crate) const TOO_MANY_NODES: &str = "arena cannot hold more than u32::MAX nodes";
}
