//! The `wg-cni` chained plugin.
//!
//! `ADD` creates and configures the WireGuard interface inside the container
//! and passes the previous plugin's result on. `DEL` removes the interface
//! again and succeeds if it is already gone.

mod args;
mod conf;
mod output;

pub use args::{CmdArgs, Command};
pub use conf::{parse_config, PeerConf, PluginConf, DEFAULT_INTERFACE_NAME};
pub use output::{pass_through, ErrorResult, VersionResult, CURRENT_VERSION, SUPPORTED_VERSIONS};

use crate::configurator::{Backend, DeviceConfigurator};
use crate::err::{PluginError, SetupError};
use crate::setup::{setup_interface, teardown_interface};
use crate::NetNs;
use log::{debug, error, info};
use serde::Deserialize;
use std::io::{self, Read, Write};

/// Reads `CNI_*` variables and stdin, runs the command and writes the result
/// or error object to `stdout`. Returns the process exit code.
pub fn plugin_main<R: Read, W: Write>(mut stdin: R, mut stdout: W) -> i32 {
    let mut input = vec![];
    let result = CmdArgs::from_env().and_then(|(command, args)| {
        if command != Command::Version {
            stdin
                .read_to_end(&mut input)
                .map_err(PluginError::ReadStdin)?;
        }
        run(command, &args, &input, &mut stdout)
    });

    let code = match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err);
            let result = ErrorResult::new(&request_version(&input), &err);
            if let Err(write_err) = serde_json::to_writer(&mut stdout, &result) {
                error!("could not write error result: {}", write_err);
            }
            1
        }
    };

    if let Err(err) = stdout.flush() {
        error!("could not flush stdout: {}", err);
    }

    code
}

/// Runs one command against already collected input.
pub fn run<W: Write>(
    command: Command,
    args: &CmdArgs,
    stdin: &[u8],
    stdout: W,
) -> Result<(), PluginError> {
    info!("{:?} for container {}", command, args.container_id);

    match command {
        Command::Add => {
            let result = cmd_add(args, stdin)?;
            serde_json::to_writer(stdout, &result).map_err(PluginError::WriteResult)
        }
        Command::Del => cmd_del(args, stdin),
        Command::Check => {
            parse_config(stdin)?;
            Err(PluginError::NotImplemented)
        }
        Command::Version => serde_json::to_writer(stdout, &VersionResult::default())
            .map_err(PluginError::WriteResult),
    }
}

fn cmd_add(args: &CmdArgs, stdin: &[u8]) -> Result<serde_json::Value, PluginError> {
    let conf = parse_config(stdin)?;
    let result = pass_through(&conf)?;

    let address = conf.address()?;
    let device = conf.device_config()?;
    debug!(
        "configuring {} in {} with {} peer(s)",
        link_name(args, &conf),
        args.netns,
        device.peers().len()
    );

    let netns = NetNs::open(&args.netns).map_err(SetupError::Namespace)?;
    let mut configurator = Backend::connect().map_err(SetupError::Connect)?;
    setup_interface(&mut configurator, &device, &address, &netns)?;

    Ok(result)
}

fn cmd_del(args: &CmdArgs, stdin: &[u8]) -> Result<(), PluginError> {
    let conf = parse_config(stdin)?;

    if args.netns.is_empty() {
        debug!("no network namespace given, nothing to delete");
        return Ok(());
    }

    let netns = match NetNs::open(&args.netns) {
        Ok(netns) => netns,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("namespace {} is gone, nothing to delete", args.netns);
            return Ok(());
        }
        Err(err) => return Err(SetupError::Namespace(err).into()),
    };

    teardown_interface(link_name(args, &conf), &netns)?;

    Ok(())
}

/// The WireGuard link is named by `interfaceName`. `CNI_IFNAME` is only
/// logged when it disagrees.
fn link_name<'a>(args: &CmdArgs, conf: &'a PluginConf) -> &'a str {
    if args.ifname != conf.interface_name {
        debug!(
            "CNI_IFNAME {:?} differs from interfaceName {:?}, using {:?}",
            args.ifname, conf.interface_name, conf.interface_name
        );
    }
    &conf.interface_name
}

/// Best effort: the version to report errors with, even if the rest of the
/// configuration is broken.
fn request_version(stdin: &[u8]) -> String {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Version {
        cni_version: String,
    }

    serde_json::from_slice::<Version>(stdin)
        .map(|version| version.cni_version)
        .unwrap_or_else(|_| CURRENT_VERSION.to_string())
}
