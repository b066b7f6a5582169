// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `devfile check` command.

use clap::Args;
use colored::Colorize;
use miette::Result;

/// Resolve and validate a devfile and its parents
#[derive(Debug, Args)]
pub struct CmdCheck {
    #[clap(flatten)]
    source: crate::SourceFlags,
}

impl CmdCheck {
    pub fn run(&mut self) -> Result<i32> {
        let chain = devfile::parse(self.source.context())?;

        for (depth, obj) in chain.iter().enumerate() {
            let role = if depth == 0 { "devfile" } else { "parent" };
            println!(
                "✓ {} {} (schemaVersion {})",
                role,
                obj.ctx.source_name().cyan(),
                obj.ctx.schema_version().green()
            );
        }
        println!("{}", "OK".bold());

        Ok(0)
    }
}
