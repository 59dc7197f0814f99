// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Synchronizer
//!
//! Makes the record store reflect the DNS state implied by one address
//! assignment. Planning is pure; [`DnsSynchronizer::add_records`] and
//! [`DnsSynchronizer::remove_records`] apply a plan through a [`RecordStore`].
//!
//! ```text
//! assignment foo/eth0 10.0.0.5, primary
//!   A      eth0.foo.example.com   → 10.0.0.5
//!   PTR    5.0.0.10.in-addr.arpa  → eth0.foo.example.com
//!   CNAME  foo.example.com        → eth0.foo.example.com
//! ```
//!
//! # Patch rules
//!
//! Forward records are keyed on their content and never patched: a new
//! address means a new record, and the stale one is only ever removed by
//! `remove_records`. PTR and CNAME records are keyed on name alone and their
//! content is overwritten in place.
//!
//! # Ordering
//!
//! Stale records must be removed before new ones are created. Stores may
//! enforce that a forward address appears under one name only.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    ContentMatch, Record, RecordDefaults, RecordFilter, RecordLookup, RecordStore, RecordType, Zone,
};
use crate::domain::invariants::validate_fqdn;
use crate::domain::{widen_zone_name, AddressAssignment, Hostname};
use crate::errors::{IpamError, IpamResult};

/// A record the synchronizer wants to exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRecord {
    pub name: String,
    pub record_type: RecordType,
    pub content: String,
}

/// Every DNS name derived from one assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPlan {
    /// Assignment FQDN, lowercased
    pub fqdn: String,
    /// Bare host FQDN, lowercased
    pub host_fqdn: String,
    pub forward: PlannedRecord,
    /// Boundary-form reverse zone (/24 or /48)
    pub ptr_zone: String,
    pub ptr: PlannedRecord,
    pub cname: Option<PlannedRecord>,
}

/// Outcome of an `add_records` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub created: Vec<Record>,
    pub patched: Vec<Record>,
    /// Records removed for a previous incarnation
    pub removed: usize,
    /// No reverse zone was found, so no PTR was written
    pub ptr_skipped: bool,
}

/// Derive the DNS plan for an assignment of `host_name` under `root_domain`
pub fn plan(assignment: &AddressAssignment, host_name: &Hostname, root_domain: &str) -> DnsPlan {
    let fqdn = assignment.fqdn(host_name, root_domain);
    let host_fqdn = host_name.qualify(root_domain).to_ascii_lowercase();
    let address = assignment.address;

    let cname = assignment.wants_cname().then(|| PlannedRecord {
        name: host_fqdn.clone(),
        record_type: RecordType::Cname,
        content: fqdn.clone(),
    });

    DnsPlan {
        forward: PlannedRecord {
            name: fqdn.clone(),
            record_type: RecordType::forward(address.version()),
            content: address.to_string(),
        },
        ptr_zone: address.reverse_zone(),
        ptr: PlannedRecord {
            name: address.reverse_pointer(),
            record_type: RecordType::Ptr,
            content: fqdn.clone(),
        },
        cname,
        fqdn,
        host_fqdn,
    }
}

/// Reconciliation engine between assignments and DNS records
#[derive(Debug, Clone)]
pub struct DnsSynchronizer {
    root_domain: String,
}

impl DnsSynchronizer {
    pub fn new(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into().to_ascii_lowercase(),
        }
    }

    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    pub fn plan(&self, assignment: &AddressAssignment, host_name: &Hostname) -> DnsPlan {
        plan(assignment, host_name, &self.root_domain)
    }

    /// Create or refresh every record implied by `assignment`
    ///
    /// `previous` is the earlier auto-DNS incarnation of the same assignment,
    /// if there was one; when its FQDN differs its records are removed first.
    ///
    /// # Errors
    ///
    /// Forward-record and CNAME failures propagate. A missing reverse zone
    /// is not an error.
    #[instrument(skip_all, fields(assignment = %assignment.id, address = %assignment.address))]
    pub async fn add_records<S>(
        &self,
        store: &mut S,
        assignment: &AddressAssignment,
        host_name: &Hostname,
        previous: Option<(&AddressAssignment, &Hostname)>,
    ) -> IpamResult<SyncReport>
    where
        S: RecordStore + ?Sized,
    {
        let plan = self.plan(assignment, host_name);
        validate_fqdn(&plan.fqdn)?;
        let mut report = SyncReport::default();

        if let Some((prev, prev_host)) = previous.filter(|(prev, _)| prev.auto_dns) {
            let prev_fqdn = prev.fqdn(prev_host, &self.root_domain);
            if !prev_fqdn.eq_ignore_ascii_case(&plan.fqdn) {
                debug!(from = %prev_fqdn, to = %plan.fqdn, "FQDN changed, removing previous records");
                report.removed = self.remove_records(store, prev, prev_host).await?;
            }
        }

        let root_zone = store
            .find_zone(&self.root_domain)
            .await?
            .ok_or_else(|| IpamError::ZoneNotFound(self.root_domain.clone()))?;

        let (forward, created) = store
            .get_or_create(
                RecordLookup {
                    zone: root_zone.name.clone(),
                    name: plan.forward.name.clone(),
                    record_type: plan.forward.record_type,
                    content: Some(plan.forward.content.clone()),
                },
                RecordDefaults::authoritative(),
            )
            .await?;
        if created {
            debug!(record = %forward, "created forward record");
            report.created.push(forward);
        }

        match self.resolve_ptr_zone(&*store, &plan.ptr_zone).await {
            Ok(zone) => self.upsert_patchable(store, &zone, &plan.ptr, &mut report).await?,
            Err(IpamError::ZoneNotFound(zone)) => {
                debug!(%zone, "no reverse zone, skipping PTR");
                report.ptr_skipped = true;
            }
            Err(err) => return Err(err),
        }

        if let Some(cname) = &plan.cname {
            self.upsert_patchable(store, &root_zone, cname, &mut report)
                .await?;
        }

        Ok(report)
    }

    /// Delete the records `assignment` created, matching on content so that
    /// unrelated records sharing a name survive
    #[instrument(skip_all, fields(assignment = %assignment.id, address = %assignment.address))]
    pub async fn remove_records<S>(
        &self,
        store: &mut S,
        assignment: &AddressAssignment,
        host_name: &Hostname,
    ) -> IpamResult<usize>
    where
        S: RecordStore + ?Sized,
    {
        let plan = self.plan(assignment, host_name);
        let mut removed = store
            .delete_where(
                &RecordFilter::new(&plan.forward.name, [RecordType::A, RecordType::Aaaa])
                    .content(ContentMatch::Exact(plan.forward.content.clone())),
            )
            .await?;

        if assignment.primary {
            removed += store
                .delete_where(
                    &RecordFilter::new(&plan.host_fqdn, [RecordType::Cname])
                        .content(ContentMatch::IgnoreCase(plan.fqdn.clone())),
                )
                .await?;
        }

        removed += store
            .delete_where(
                &RecordFilter::new(&plan.ptr.name, [RecordType::Ptr])
                    .content(ContentMatch::IgnoreCase(plan.fqdn.clone())),
            )
            .await?;

        debug!(fqdn = %plan.fqdn, removed, "removed records");
        Ok(removed)
    }

    /// Find the zone for a PTR, widening once from the /24 or /48 boundary
    /// so that delegations of larger allocations (e.g. a /16) are found
    pub async fn resolve_ptr_zone<S>(&self, store: &S, boundary_zone: &str) -> IpamResult<Zone>
    where
        S: RecordStore + ?Sized,
    {
        if let Some(zone) = store.find_zone(boundary_zone).await? {
            return Ok(zone);
        }

        if let Some(wider) = widen_zone_name(boundary_zone) {
            if let Some(zone) = store.find_zone(&wider).await? {
                return Ok(zone);
            }
        }

        Err(IpamError::ZoneNotFound(boundary_zone.to_string()))
    }

    async fn upsert_patchable<S>(
        &self,
        store: &mut S,
        zone: &Zone,
        planned: &PlannedRecord,
        report: &mut SyncReport,
    ) -> IpamResult<()>
    where
        S: RecordStore + ?Sized,
    {
        let (record, created) = store
            .get_or_create(
                RecordLookup {
                    zone: zone.name.clone(),
                    name: planned.name.clone(),
                    record_type: planned.record_type,
                    content: None,
                },
                RecordDefaults::authoritative().with_content(planned.content.clone()),
            )
            .await?;

        if created {
            debug!(%record, "created record");
            report.created.push(record);
        } else if record.content != planned.content {
            let patched = store.set_content(record.id, &planned.content).await?;
            debug!(record = %patched, previous = %record.content, "patched record content");
            report.patched.push(patched);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HostId;

    fn assignment(address: &str) -> AddressAssignment {
        AddressAssignment::new(HostId::new(), address.parse().unwrap())
    }

    #[test]
    fn test_plan_plain_ipv4() {
        let plan = plan(
            &assignment("10.0.0.5"),
            &Hostname::new("foo").unwrap(),
            "example.com",
        );

        assert_eq!(plan.fqdn, "foo.example.com");
        assert_eq!(plan.forward.record_type, RecordType::A);
        assert_eq!(plan.forward.content, "10.0.0.5");
        assert_eq!(plan.ptr_zone, "0.0.10.in-addr.arpa");
        assert_eq!(plan.ptr.name, "5.0.0.10.in-addr.arpa");
        assert_eq!(plan.ptr.content, "foo.example.com");
        assert!(plan.cname.is_none());
    }

    #[test]
    fn test_plan_primary_interface_ipv6() {
        let a = assignment("2001:db8::25")
            .with_interface(Some(Hostname::new("mail").unwrap()))
            .with_primary(true);
        let plan = plan(&a, &Hostname::new("Foo").unwrap(), "example.com");

        assert_eq!(plan.fqdn, "mail.foo.example.com");
        assert_eq!(plan.forward.record_type, RecordType::Aaaa);
        assert_eq!(plan.forward.content, "2001:db8::25");
        assert_eq!(plan.ptr_zone, "0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa");
        let cname = plan.cname.expect("primary interface plans a CNAME");
        assert_eq!(cname.name, "foo.example.com");
        assert_eq!(cname.content, "mail.foo.example.com");
    }

    #[test]
    fn test_plan_primary_without_interface_has_no_cname() {
        let a = assignment("10.0.0.5").with_primary(true);
        let plan = plan(&a, &Hostname::new("foo").unwrap(), "example.com");
        assert!(plan.cname.is_none());
    }
}
