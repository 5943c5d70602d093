use log::{info, warn};
use thiserror::Error;

use crate::api::{ApiError, DesiredRecord, DnsProvider, Record, RecordKind};
use crate::config::Config;
use crate::ip::{ResolveAddress, ResolveError};

/// TTL given to every record this updater creates or rewrites. The whole
/// point is that the address may change any minute, so caching is kept short.
pub const RECORD_TTL: u32 = 60;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("\"{0}\" does not contain a registrable domain")]
    InvalidFqdn(Box<str>),

    #[error("no zone named \"{0}\" is visible to this API key")]
    ZoneNotFound(Box<str>),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The records a run has decided to bring into existence, bucketed by how
/// they get there. Each non-empty bucket turns into exactly one API call.
#[derive(Debug, Default, PartialEq, Eq)]
struct Plan {
    creates: Vec<DesiredRecord>,
    updates: Vec<DesiredRecord>,
}

/// Derive the registrable domain (the last two labels) from an FQDN.
///
/// The final label must be alphanumeric, the second-to-last may also carry
/// hyphens. A name without such a pair has no domain to look up.
pub fn domain_from_fqdn(fqdn: &str) -> Option<&str> {
    let mut labels = fqdn.rsplit('.');

    let tld = labels.next()?;
    let sld = labels.next()?;

    let tld_ok = !tld.is_empty() && tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let sld_ok = !sld.is_empty()
        && sld
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !tld_ok || !sld_ok {
        return None;
    }

    Some(&fqdn[fqdn.len() - tld.len() - sld.len() - 1..])
}

/// Decide what (if anything) to do for one record kind and push the outcome
/// onto the plan. Shared by A and AAAA; the kinds differ only in how their
/// address is discovered.
fn reconcile_kind(
    plan: &mut Plan,
    fqdn: &str,
    kind: RecordKind,
    existing: &[Record],
    resolver: &dyn ResolveAddress,
) -> Result<(), ReconcileError> {
    let Some(address) = resolver.resolve(kind)? else {
        info!(
            "could not find a public {} address on this system",
            kind.family()
        );
        return Ok(());
    };

    info!("public {}: {}", kind.family(), address);

    let address = address.to_string();
    let mut matching = existing.iter().filter(|r| r.kind.as_ref() == kind.as_str());
    let first = matching.next();

    let duplicates = matching.count();
    if duplicates > 0 {
        warn!(
            "{} has {} extra {} record(s), only the first one is considered",
            fqdn, duplicates, kind
        );
    }

    match first {
        Some(record) if record.content.as_ref() == address => {
            info!("{} record is up-to-date", kind);
        }

        Some(_) => {
            info!("{} record is outdated", kind);
            plan.updates
                .push(DesiredRecord::new(fqdn, kind, &address, RECORD_TTL));
        }

        None => {
            info!("no {} record found", kind);
            plan.creates
                .push(DesiredRecord::new(fqdn, kind, &address, RECORD_TTL));
        }
    }

    Ok(())
}

/// One full reconciliation pass: resolve the zone, compare every requested
/// record kind against the current address, then dispatch at most one create
/// and one patch call.
pub fn run(
    config: &Config,
    provider: &dyn DnsProvider,
    resolver: &dyn ResolveAddress,
) -> Result<(), ReconcileError> {
    let domain = domain_from_fqdn(&config.fqdn)
        .ok_or_else(|| ReconcileError::InvalidFqdn(config.fqdn.clone()))?;

    let zones = provider.list_zones()?;
    let mut matching = zones.iter().filter(|zone| zone.name.as_ref() == domain);

    let zone = matching
        .next()
        .ok_or_else(|| ReconcileError::ZoneNotFound(domain.into()))?;

    if matching.next().is_some() {
        warn!("more than one zone is named {}, using the first one", domain);
    }

    let existing = provider.list_records(&zone.id, &config.fqdn)?;

    let mut plan = Plan::default();
    for kind in config.kinds() {
        reconcile_kind(&mut plan, &config.fqdn, kind, &existing, resolver)?;
    }

    if !plan.creates.is_empty() {
        provider.create_records(&zone.id, &plan.creates)?;
    }

    if !plan.updates.is_empty() {
        provider.patch_records(&zone.id, &plan.updates)?;
    }

    Ok(())
}
