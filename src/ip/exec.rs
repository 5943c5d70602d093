use std::net::Ipv6Addr;
use std::process::Command;

use super::ResolveError;

/// Inspect `iface` for a global-scope IPv6 address via ip(8).
///
/// Temporary (privacy) addresses and the stable address that manages them
/// (mngtmpaddr) are skipped; what remains is the address a remote peer can
/// actually keep reaching us at. Returns None when the interface carries no
/// such address.
pub(super) fn global_v6_address(iface: &str) -> Result<Option<Ipv6Addr>, ResolveError> {
    let process = Command::new("ip")
        .args(["-6", "-o", "address", "show", "dev", iface, "scope", "global"])
        .output()
        .map_err(|e| ResolveError::Exec("ip", e.to_string().into()))?;

    let output = String::from_utf8_lossy(&process.stdout);

    Ok(parse_ip_output(&output))
}

/// Extract the first qualifying address from `ip -6 -o address show` output.
/// One address per line; the address token follows "inet6" and carries a
/// /prefix-length suffix.
fn parse_ip_output(output: &str) -> Option<Ipv6Addr> {
    for line in output.lines() {
        if line.contains("temporary") || line.contains("mngtmpaddr") {
            continue;
        }

        let mut tokens = line.split_whitespace();

        while let Some(token) = tokens.next() {
            if token != "inet6" {
                continue;
            }

            let address = tokens
                .next()
                .and_then(|addr| addr.split('/').next())
                .and_then(|addr| addr.parse::<Ipv6Addr>().ok());

            if address.is_some() {
                return address;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::parse_ip_output;

    #[test]
    fn picks_the_stable_address() {
        let output = "\
2: eth0    inet6 2001:db8:85a3::8a2e:370:7334/64 scope global dynamic \\       valid_lft 86392sec preferred_lft 14392sec
";

        assert_eq!(
            parse_ip_output(output),
            "2001:db8:85a3::8a2e:370:7334".parse::<Ipv6Addr>().ok()
        );
    }

    #[test]
    fn skips_temporary_and_mngtmpaddr_lines() {
        let output = "\
2: eth0    inet6 2001:db8:0:1:44d3:9ffc:1a2b:3c4d/64 scope global temporary dynamic \\       valid_lft 86392sec preferred_lft 14392sec
2: eth0    inet6 2001:db8:0:1:211:22ff:fe33:4455/64 scope global dynamic mngtmpaddr noprefixroute \\       valid_lft 86392sec preferred_lft 14392sec
2: eth0    inet6 2001:db8:0:1::5/128 scope global \\       valid_lft forever preferred_lft forever
";

        assert_eq!(
            parse_ip_output(output),
            "2001:db8:0:1::5".parse::<Ipv6Addr>().ok()
        );
    }

    #[test]
    fn no_qualifying_address_yields_none() {
        let only_temporary = "\
2: eth0    inet6 2001:db8:0:1:44d3:9ffc:1a2b:3c4d/64 scope global temporary dynamic \\       valid_lft 86392sec preferred_lft 14392sec
";

        assert_eq!(parse_ip_output(""), None);
        assert_eq!(parse_ip_output(only_temporary), None);
    }

    #[test]
    fn garbage_output_yields_none() {
        assert_eq!(parse_ip_output("Device \"eth7\" does not exist.\n"), None);
        assert_eq!(parse_ip_output("2: eth0    inet6 not-an-address/64\n"), None);
    }
}
