//! Fixed lookup tables.
//!
//! All tables are immutable slices searched linearly; they are a handful of
//! entries each and their order is the order used in diagnostics.

/// Architecture setting → default toolchain CPU.
pub static DEFAULT_CPU: &[(&str, &str)] = &[
    ("x86_64", "x86_64"),
    ("armv8", "aarch64"),
    ("armv7hf", "armv7"),
    ("armv6", "armv6"),
];

/// Toolchain CPU → default vendor.
pub static DEFAULT_VENDOR: &[(&str, &str)] = &[
    ("x86_64", "bionic"),
    ("aarch64", "rpi3"),
    ("armv8", "rpi3"),
    ("armv7", "neon"),
    ("armv6", "rpi"),
];

/// (CPU, vendor) pairs whose OS/ABI is hard-float EABI.
///
/// Any pair not listed here uses [`DEFAULT_OS_ABI`].
pub static OS_ABI: &[((&str, &str), &str)] = &[
    (("armv8", "rpi3"), "linux-gnueabihf"),
    (("armv7", "neon"), "linux-gnueabihf"),
    (("armv6", "rpi"), "linux-gnueabihf"),
];

/// OS/ABI suffix for every (CPU, vendor) pair not in [`OS_ABI`].
pub const DEFAULT_OS_ABI: &str = "linux-gnu";

/// Vendors the toolchain project publishes builds for.
pub static KNOWN_VENDORS: &[&str] = &["focal", "bionic", "centos7", "neon", "rpi", "rpi3"];

/// Look up `key` in a two-column table.
pub fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// OS/ABI suffix for a (CPU, vendor) pair.
pub fn os_abi(cpu: &str, vendor: &str) -> &'static str {
    OS_ABI
        .iter()
        .find(|((c, v), _)| *c == cpu && *v == vendor)
        .map(|(_, abi)| *abi)
        .unwrap_or(DEFAULT_OS_ABI)
}

/// Comma-separated keys of a table, for error messages.
pub fn keys(table: &[(&str, &str)]) -> String {
    table.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_pairs_use_hard_float() {
        assert_eq!(os_abi("armv7", "neon"), "linux-gnueabihf");
        assert_eq!(os_abi("armv6", "rpi"), "linux-gnueabihf");
        assert_eq!(os_abi("armv8", "rpi3"), "linux-gnueabihf");
    }

    #[test]
    fn other_pairs_use_gnu() {
        assert_eq!(os_abi("aarch64", "rpi3"), "linux-gnu");
        assert_eq!(os_abi("x86_64", "focal"), "linux-gnu");
        // Same CPU with a different vendor is not a special case.
        assert_eq!(os_abi("armv7", "rpi"), "linux-gnu");
    }

    #[test]
    fn lookup_and_keys() {
        assert_eq!(lookup(DEFAULT_CPU, "armv7hf"), Some("armv7"));
        assert_eq!(lookup(DEFAULT_CPU, "mips"), None);
        assert_eq!(keys(DEFAULT_CPU), "x86_64, armv8, armv7hf, armv6");
    }
}
