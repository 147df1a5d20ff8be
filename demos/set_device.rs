//! Prints the WG_CMD_SET_DEVICE payload for a CNI network configuration and,
//! with `--apply`, sends it to an existing interface.
//!
//!   cargo run --example set_device -- conf.json [--apply]

use anyhow::Context;
use std::env;
use std::fs;
use wireguard_cni::cni::parse_config;
use wireguard_cni::set::SetDeviceRequest;
use wireguard_cni::WgSocket;

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let path = args.next().context("usage: set_device <conf.json> [--apply]")?;
    let apply = args.any(|arg| arg == "--apply");

    let raw = fs::read(&path).with_context(|| format!("Failed to read {}", path))?;
    let device = parse_config(&raw)?.device_config()?;

    let request = SetDeviceRequest::build(&device)?;
    for line in request.as_bytes().chunks(16) {
        let hex: Vec<String> = line.iter().map(|byte| format!("{:02x}", byte)).collect();
        println!("{}", hex.join(" "));
    }

    if apply {
        WgSocket::connect()?.send_request(&request)?;
        println!("configured {}", device.interface_name());
    }

    Ok(())
}
