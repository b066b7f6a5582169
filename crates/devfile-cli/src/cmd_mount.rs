// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `devfile mount` commands.

use clap::{Args, Subcommand};
use colored::Colorize;
use devfile::{Devfile, DevfileCtx, VolumeMount};
use miette::Result;

#[cfg(test)]
#[path = "./cmd_mount_test.rs"]
mod cmd_mount_test;

/// Add, remove or look up volume mounts
#[derive(Debug, Args)]
pub struct CmdMount {
    #[clap(subcommand)]
    cmd: MountCommand,
}

#[derive(Debug, Subcommand)]
enum MountCommand {
    /// Mount volumes into every container component with the given name
    Add(CmdMountAdd),

    /// Remove a volume mount from all container components
    Rm(CmdMountRm),

    /// Print the path a volume is mounted at in a component
    Path(CmdMountPath),
}

impl CmdMount {
    pub fn run(&mut self) -> Result<i32> {
        match &mut self.cmd {
            MountCommand::Add(cmd) => cmd.run(),
            MountCommand::Rm(cmd) => cmd.run(),
            MountCommand::Path(cmd) => cmd.run(),
        }
    }
}

#[derive(Debug, Args)]
pub struct CmdMountAdd {
    #[clap(flatten)]
    source: crate::SourceFlags,

    /// Write the result back to the devfile instead of printing it
    #[clap(long)]
    write: bool,

    /// Container component to mount into
    component: String,

    /// Mounts to add, as NAME:PATH
    #[clap(required = true, value_parser = parse_mount)]
    mounts: Vec<VolumeMount>,
}

impl CmdMountAdd {
    pub fn run(&mut self) -> Result<i32> {
        let (ctx, mut devfile) = self.source.load()?;
        devfile.add_volume_mounts(&self.component, &self.mounts)?;
        emit(&ctx, &devfile, self.write)?;
        Ok(0)
    }
}

#[derive(Debug, Args)]
pub struct CmdMountRm {
    #[clap(flatten)]
    source: crate::SourceFlags,

    /// Write the result back to the devfile instead of printing it
    #[clap(long)]
    write: bool,

    /// Name of the volume mount to remove
    name: String,
}

impl CmdMountRm {
    pub fn run(&mut self) -> Result<i32> {
        let (ctx, mut devfile) = self.source.load()?;
        devfile.delete_volume_mount(&self.name)?;
        emit(&ctx, &devfile, self.write)?;
        Ok(0)
    }
}

#[derive(Debug, Args)]
pub struct CmdMountPath {
    #[clap(flatten)]
    source: crate::SourceFlags,

    /// Name of the volume mount
    name: String,

    /// Container component to look in
    component: String,
}

impl CmdMountPath {
    pub fn run(&mut self) -> Result<i32> {
        let (_, devfile) = self.source.load()?;
        let path = devfile.get_volume_mount_path(&self.name, &self.component)?;
        println!("{path}");
        Ok(0)
    }
}

/// Parse a `NAME:PATH` mount argument.
fn parse_mount(value: &str) -> std::result::Result<VolumeMount, String> {
    match value.split_once(':') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok(VolumeMount::new(name, path))
        }
        _ => Err(format!("expected NAME:PATH, got '{value}'")),
    }
}

fn emit(ctx: &DevfileCtx, devfile: &Devfile, write: bool) -> Result<()> {
    let yaml = devfile.to_yaml()?;
    if !write {
        print!("{yaml}");
        return Ok(());
    }

    let Some(path) = ctx.abs_path() else {
        return Err(miette::miette!(
            help = "Remove --write to print the updated devfile instead",
            "Cannot write back to {}",
            ctx.source_name()
        ));
    };
    std::fs::write(path, yaml)
        .map_err(|e| miette::miette!("Failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "updated devfile");
    eprintln!("✓ Updated {}", path.display().to_string().cyan());
    Ok(())
}
