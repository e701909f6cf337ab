//! Target triplet derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::metadata::{self, TripletMetadata};
use crate::tables;

/// A `cpu-vendor-os_abi` cross-compilation target.
///
/// Only produced by [`resolve_triplet`] or by parsing a triplet listed in the
/// metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Triplet {
    cpu: String,
    vendor: String,
    os_abi: String,
}

impl Triplet {
    /// CPU component (e.g., "armv7").
    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    /// Vendor component (e.g., "neon").
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// OS/ABI component (e.g., "linux-gnueabihf").
    pub fn os_abi(&self) -> &str {
        &self.os_abi
    }

    /// Processor/bitness metadata, if this triplet has a published toolchain.
    pub fn metadata(&self) -> Option<TripletMetadata> {
        metadata::lookup(&self.to_string())
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.cpu, self.vendor, self.os_abi)
    }
}

impl From<Triplet> for String {
    fn from(t: Triplet) -> Self {
        t.to_string()
    }
}

impl FromStr for Triplet {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || TargetError::UnknownTriplet {
            triplet: s.to_string(),
            known: metadata::known_triplets().collect::<Vec<_>>().join(", "),
        };
        if metadata::lookup(s).is_none() {
            return Err(unknown());
        }
        // Known triplets always have a dash-free CPU and vendor.
        let mut parts = s.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(cpu), Some(vendor), Some(os_abi)) => Ok(Triplet {
                cpu: cpu.into(),
                vendor: vendor.into(),
                os_abi: os_abi.into(),
            }),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for Triplet {
    type Error = TargetError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Derive the target triplet for an architecture.
///
/// An explicit CPU or vendor hint beats the table default. The OS/ABI part is
/// always taken from the (CPU, vendor) table.
pub fn resolve_triplet(
    arch: &str,
    cpu_hint: Option<&str>,
    vendor_hint: Option<&str>,
) -> Result<Triplet> {
    let cpu = cpu_hint
        .or_else(|| tables::lookup(tables::DEFAULT_CPU, arch))
        .ok_or_else(|| TargetError::UnsupportedArchitecture {
            arch: arch.to_string(),
            supported: tables::keys(tables::DEFAULT_CPU),
        })?;
    let vendor = vendor_hint
        .or_else(|| tables::lookup(tables::DEFAULT_VENDOR, cpu))
        .ok_or_else(|| TargetError::UnsupportedVendor {
            cpu: cpu.to_string(),
            supported: tables::keys(tables::DEFAULT_VENDOR),
        })?;
    let os_abi = tables::os_abi(cpu, vendor);
    Ok(Triplet {
        cpu: cpu.to_string(),
        vendor: vendor.to_string(),
        os_abi: os_abi.to_string(),
    })
}
