// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! devfile - Devfile inspection and editing CLI

use clap::{Args, Parser, Subcommand};
use devfile::{Devfile, DevfileCtx};
use miette::Result;

mod cmd_check;
mod cmd_mount;
mod cmd_show;

use cmd_check::CmdCheck;
use cmd_mount::CmdMount;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "devfile",
    about = "Devfile inspection and editing",
    version,
    long_about = "Resolve, validate and edit devfiles from local paths or urls"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

/// Where to load the devfile from and the session settings to resolve it with.
#[derive(Args, Clone, Debug)]
pub struct SourceFlags {
    /// Devfile path, directory or http(s) url
    #[clap(short = 'f', long, default_value = ".")]
    pub file: String,

    /// Registry urls used when resolving imports
    #[clap(long = "registry-url", env = "DEVFILE_REGISTRY_URL")]
    pub registry_urls: Vec<String>,

    /// Default namespace for cluster-hosted imports
    #[clap(long, env = "DEVFILE_NAMESPACE")]
    pub namespace: Option<String>,
}

impl SourceFlags {
    pub fn context(&self) -> DevfileCtx {
        let ctx = if is_url(&self.file) {
            DevfileCtx::from_url(self.file.as_str())
        } else {
            DevfileCtx::new(self.file.as_str())
        };
        let ctx = ctx.with_registry_urls(self.registry_urls.clone());
        match &self.namespace {
            Some(namespace) => ctx.with_default_namespace(namespace.as_str()),
            None => ctx,
        }
    }

    /// Resolve, validate and decode the selected devfile.
    pub fn load(&self) -> Result<(DevfileCtx, Devfile)> {
        let mut ctx = self.context();
        ctx.resolve()?;
        ctx.validate()?;
        let devfile = ctx.parse_devfile()?;
        Ok((ctx, devfile))
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[derive(Subcommand)]
enum Command {
    /// Resolve and validate a devfile and its parents
    Check(CmdCheck),

    /// Display the components of a devfile
    Show(CmdShow),

    /// Add, remove or look up volume mounts
    Mount(CmdMount),
}

impl Opt {
    fn run(self) -> Result<i32> {
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        match self.cmd {
            Command::Check(mut cmd) => cmd.run(),
            Command::Show(mut cmd) => cmd.run(),
            Command::Mount(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
