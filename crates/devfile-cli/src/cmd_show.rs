// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `devfile show` command.

use clap::Args;
use colored::Colorize;
use devfile::{Component, Devfile};
use miette::Result;

/// Display the components of a devfile
#[derive(Debug, Args)]
pub struct CmdShow {
    #[clap(flatten)]
    source: crate::SourceFlags,

    /// Output format: table, yaml
    #[clap(long, default_value = "table")]
    format: String,
}

impl CmdShow {
    pub fn run(&mut self) -> Result<i32> {
        let (ctx, devfile) = self.source.load()?;

        match self.format.as_str() {
            "yaml" => print!("{}", devfile.to_yaml()?),
            "table" => {
                println!("{} {}", "Devfile:".bold(), ctx.source_name().cyan());
                println!("Schema version: {}", ctx.schema_version().green());
                if let Some(uri) = devfile.parent_uri() {
                    println!("Parent: {}", uri.cyan());
                }
                println!();
                self.show_components_table(&devfile);
            }
            other => return Err(miette::miette!("Unknown output format: {other}")),
        }

        Ok(0)
    }

    fn show_components_table(&self, devfile: &Devfile) {
        println!("{}", "Components:".bold());
        println!();

        if devfile.components.is_empty() {
            println!("  {}", "(no components)".dimmed());
        }

        for (i, component) in devfile.components.iter().enumerate() {
            println!(
                "  {}. {} [{}]",
                i + 1,
                component.name.cyan(),
                component_kind(component).yellow()
            );

            let Some(container) = &component.container else {
                continue;
            };
            println!("     image: {}", container.image.green());
            for mount in &container.volume_mounts {
                let path = if mount.path.is_empty() {
                    "(default path)".dimmed().to_string()
                } else {
                    mount.path.clone()
                };
                println!("     mount: {} -> {}", mount.name, path);
            }
        }

        println!();
        println!("Total: {} component(s)", devfile.components.len());
    }
}

fn component_kind(component: &Component) -> &str {
    if component.container.is_some() {
        "container"
    } else if component.volume.is_some() {
        "volume"
    } else {
        component
            .other
            .keys()
            .find(|key| key.as_str() != "attributes")
            .map(String::as_str)
            .unwrap_or("unknown")
    }
}
