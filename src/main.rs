use std::process;

#[cfg(target_os = "linux")]
fn main() {
    use std::io;

    // stdout carries the CNI result, so logs go to stderr only.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let code = wireguard_cni::cni::plugin_main(io::stdin().lock(), io::stdout().lock());
    process::exit(code);
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("wg-cni needs the Linux WireGuard module");
    process::exit(1);
}
