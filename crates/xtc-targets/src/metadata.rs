//! Per-triplet processor metadata.

use serde::Serialize;

/// Processor name and bitness for a target triplet.
///
/// The processor name is what CMake expects in `CMAKE_SYSTEM_PROCESSOR`,
/// which is not always the triplet's CPU component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripletMetadata {
    /// System processor name (e.g., "x86_64", "armv7l").
    pub processor: &'static str,
    /// Pointer width of the target in bits (32 or 64).
    pub bitness: u32,
}

impl TripletMetadata {
    const fn new(processor: &'static str, bitness: u32) -> Self {
        Self { processor, bitness }
    }

    /// Whether the target is 64-bit.
    pub fn is_64_bit(&self) -> bool {
        self.bitness == 64
    }
}

/// Every triplet with a published toolchain, in catalog listing order.
pub static TRIPLET_METADATA: &[(&str, TripletMetadata)] = &[
    ("x86_64-focal-linux-gnu", TripletMetadata::new("x86_64", 64)),
    ("x86_64-bionic-linux-gnu", TripletMetadata::new("x86_64", 64)),
    ("x86_64-centos7-linux-gnu", TripletMetadata::new("x86_64", 64)),
    ("aarch64-rpi3-linux-gnu", TripletMetadata::new("aarch64", 64)),
    // armv8l is not a processor name; 32-bit ARMv8 userlands report armv7l.
    ("armv8-rpi3-linux-gnueabihf", TripletMetadata::new("armv7l", 32)),
    ("armv7-neon-linux-gnueabihf", TripletMetadata::new("armv7l", 32)),
    ("armv6-rpi-linux-gnueabihf", TripletMetadata::new("armv6l", 32)),
];

/// Look up the metadata for a triplet string.
pub fn lookup(triplet: &str) -> Option<TripletMetadata> {
    TRIPLET_METADATA
        .iter()
        .find(|(name, _)| *name == triplet)
        .map(|(_, meta)| *meta)
}

/// Names of all known triplets.
pub fn known_triplets() -> impl Iterator<Item = &'static str> {
    TRIPLET_METADATA.iter().map(|(name, _)| *name)
}
