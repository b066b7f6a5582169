// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Resolving a devfile together with the chain of parents it imports.

use crate::{Devfile, DevfileCtx, Result};

#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;

/// A loaded devfile and the context it was resolved with.
#[derive(Debug, Clone)]
pub struct DevfileObj {
    pub ctx: DevfileCtx,
    pub data: Devfile,
}

/// Options for parse behavior.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Validate each devfile against the schema for its version.
    pub validate: bool,

    /// Load the devfiles named by `parent.uri`.
    pub follow_parents: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            validate: true,
            follow_parents: true,
        }
    }
}

/// Resolve, validate and decode a devfile and every parent it imports.
///
/// Returns the devfiles in import order, starting with the one `ctx` was
/// created for. Parents are loaded but not merged.
pub fn parse(ctx: DevfileCtx) -> Result<Vec<DevfileObj>> {
    parse_with_options(ctx, &ParserOptions::default())
}

pub fn parse_with_options(mut ctx: DevfileCtx, options: &ParserOptions) -> Result<Vec<DevfileObj>> {
    let mut chain = Vec::new();

    loop {
        ctx.resolve()?;
        if options.validate {
            ctx.validate()?;
        }
        let data = ctx.parse_devfile()?;

        let parent = match data.parent_uri() {
            Some(uri) if options.follow_parents => {
                tracing::debug!(source = %ctx.source_name(), parent = uri, "following parent devfile");
                Some(ctx.child(uri)?)
            }
            _ => None,
        };
        chain.push(DevfileObj { ctx, data });

        match parent {
            Some(parent) => ctx = parent,
            None => break,
        }
    }

    Ok(chain)
}
