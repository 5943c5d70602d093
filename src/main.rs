mod api;
mod config;
mod http;
mod ip;
mod reconcile;

use std::process::Command;

use clap::{CommandFactory, Parser};
use log::error;

use config::{ApiCredentials, Config};
use ip::SystemResolver;

/// Create and update DNS records for this host using the IONOS API, as a
/// sort of DynDNS (for example via a cronjob).
#[derive(Parser, Debug)]
#[command(name = "ionos-dyndns", version)]
struct Args {
    /// Create/Update A record
    #[arg(short = '4', long = "A")]
    a: bool,

    /// Create/Update AAAA record
    #[arg(short = '6', long = "AAAA")]
    aaaa: bool,

    /// Interface name for determining the public IPv6 address
    #[arg(short, long, default_value = "eth0")]
    interface: String,

    /// Host's FQDN (Default: hostname -f)
    #[arg(short = 'H', long)]
    fqdn: Option<String>,

    /// API key public prefix
    #[arg(long)]
    api_prefix: String,

    /// API key secret
    #[arg(long)]
    api_secret: String,
}

/// Ask the system for its own FQDN, used when --fqdn is not given.
fn local_fqdn() -> String {
    Command::new("hostname")
        .arg("-f")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_default()
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    // Nothing to do without at least one record kind; mirror the behavior of
    // calling a tool without arguments and show the help text.
    if !args.a && !args.aaaa {
        Args::command().print_help().ok();
        return;
    }

    let fqdn = args.fqdn.unwrap_or_else(local_fqdn).to_lowercase();

    let config = Config {
        fqdn: fqdn.into(),
        interface: args.interface.into(),
        ipv4: args.a,
        ipv6: args.aaaa,
        credentials: ApiCredentials {
            prefix: args.api_prefix.into(),
            secret: args.api_secret.into(),
        },
    };

    let client = api::ionos::Client::new(&config.credentials);
    let resolver = SystemResolver::new(&config.interface);

    if let Err(e) = reconcile::run(&config, &client, &resolver) {
        error!("{}", e);
        std::process::exit(1);
    }
}
