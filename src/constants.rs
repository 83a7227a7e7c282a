// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zone validator.
//!
//! This module contains all numeric and string constants used by the validation engine.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Hostname Constants
// ============================================================================

/// Maximum length of a fully-qualified hostname without the trailing dot (RFC 1035)
pub const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length of a single DNS label (RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Minimum length of a single DNS label
pub const MIN_LABEL_LENGTH: usize = 1;

/// Smallest classless in-addr.arpa delegation prefix accepted (RFC 2317)
pub const MIN_CLASSLESS_PREFIX: u32 = 25;

/// Largest classless in-addr.arpa delegation prefix accepted (RFC 2317)
pub const MAX_CLASSLESS_PREFIX: u32 = 31;

/// Largest IPv6 prefix length accepted in ip6.arpa slash notation
pub const MAX_IPV6_PREFIX: u32 = 128;

/// Largest IPv4 prefix length (CIDR)
pub const MAX_IPV4_PREFIX: u32 = 32;

// ============================================================================
// TTL Constants
// ============================================================================

/// Largest TTL value a record may carry (2^31 - 1, RFC 2181)
pub const MAX_TTL: i64 = 2_147_483_647;

/// Default TTL applied when neither the record nor the caller supplies one
pub const DEFAULT_TTL_SECS: i32 = 86400;

// ============================================================================
// Priority Constants
// ============================================================================

/// Largest 16-bit priority, preference, weight or port value
pub const MAX_U16_FIELD: u64 = 65535;

/// Default priority for MX, KX and SRV records
pub const DEFAULT_MX_PRIORITY: u16 = 10;

/// Preference used for NID records when the priority field is blank
pub const DEFAULT_ILNP_PREFERENCE: u16 = 0;

// ============================================================================
// SOA Constants
// ============================================================================

/// Largest SOA serial (unsigned 32-bit)
pub const MAX_SOA_SERIAL: u64 = 4_294_967_295;

/// Number of fields in a complete SOA record
pub const SOA_FIELD_COUNT: usize = 7;

/// Recommended minimum SOA refresh interval in seconds (RFC 1912)
pub const SOA_MIN_REFRESH: u64 = 1800;

/// Recommended minimum SOA retry interval in seconds (RFC 1912)
pub const SOA_MIN_RETRY: u64 = 600;

/// Recommended minimum SOA expire interval in seconds (RFC 1912)
pub const SOA_MIN_EXPIRE: u64 = 604_800;

/// Recommended minimum negative caching TTL in seconds (RFC 2308)
pub const SOA_MIN_MINIMUM: u64 = 300;

/// Largest negative caching TTL recommended by RFC 2308
pub const SOA_MAX_MINIMUM: u64 = 86400;

// ============================================================================
// Text Record Constants
// ============================================================================

/// Largest character-string segment in TXT-like records (RFC 1035)
pub const MAX_TXT_SEGMENT_LENGTH: usize = 255;

/// Largest SPF or DMARC policy length accepted in a single string
pub const MAX_POLICY_LENGTH: usize = 255;

// ============================================================================
// DNSSEC Constants
// ============================================================================

/// DNSKEY flags for a zone signing key
pub const DNSKEY_FLAGS_ZSK: u64 = 256;

/// DNSKEY flags for a key signing key (zone key with SEP bit)
pub const DNSKEY_FLAGS_KSK: u64 = 257;

/// The only DNSKEY protocol value allowed (RFC 4034)
pub const DNSKEY_PROTOCOL: u64 = 3;

/// Algorithms RFC 8624 marks as MUST implement
pub const ALGORITHMS_MUST_IMPLEMENT: &[u8] = &[8, 13];

/// Algorithms RFC 8624 marks as RECOMMENDED
pub const ALGORITHMS_RECOMMENDED: &[u8] = &[15, 16];

/// Algorithms RFC 8624 marks as MAY implement
pub const ALGORITHMS_OPTIONAL: &[u8] = &[14];

/// Algorithms RFC 8624 marks as NOT RECOMMENDED
pub const ALGORITHMS_NOT_RECOMMENDED: &[u8] = &[3, 5, 6, 7, 12];

/// Algorithms RFC 8624 marks as deprecated
pub const ALGORITHMS_DEPRECATED: &[u8] = &[1];

/// Algorithms RFC 8624 marks as MUST NOT implement
pub const ALGORITHMS_MUST_NOT: &[u8] = &[0, 2, 4, 9, 10, 11];

/// RSA-family DNSSEC algorithms
pub const RSA_ALGORITHMS: &[u8] = &[1, 5, 7, 8, 10];

/// Smallest RSA modulus in bits considered adequate
pub const MIN_RSA_KEY_BITS: usize = 2048;

/// Digest type for SHA-1
pub const DIGEST_SHA1: u8 = 1;

/// Digest type for SHA-256
pub const DIGEST_SHA256: u8 = 2;

/// Digest type for SHA-384
pub const DIGEST_SHA384: u8 = 4;

/// Hex length of a SHA-1 digest
pub const SHA1_HEX_LENGTH: usize = 40;

/// Hex length of a SHA-256 digest
pub const SHA256_HEX_LENGTH: usize = 64;

/// Hex length of a SHA-384 digest
pub const SHA384_HEX_LENGTH: usize = 96;

/// Hex length of a SHA-512 digest
pub const SHA512_HEX_LENGTH: usize = 128;

/// The reserved DS/CDS content that requests DS removal (RFC 8078)
pub const DS_DELETE_SENTINEL: &str = "0 0 0 00";

/// The reserved CDNSKEY content that requests DS removal (RFC 8078)
pub const DNSKEY_DELETE_SENTINEL: &str = "0 3 0 AA==";

/// Largest NSEC3 iteration count accepted
pub const MAX_NSEC3_ITERATIONS: u64 = 2500;

/// Largest NSEC3 salt length in hex characters before a warning
pub const NSEC3_SALT_WARN_LENGTH: usize = 16;

// ============================================================================
// LUA Records
// ============================================================================

/// PowerDNS Lua helpers that commonly drive a LUA record
pub const LUA_COMMON_FUNCTIONS: &[&str] = &[
    "pickclosest",
    "pickwhashed",
    "ifportup",
    "ifurlup",
    "view",
    "continent",
    "country",
    "latlonloc",
];

/// Record types that may prefix a LUA record body, e.g. `A "ifportup(...)"`
pub const LUA_RECORD_PREFIXES: &[&str] = &[
    "A", "AAAA", "CNAME", "MX", "NS", "PTR", "SOA", "SRV", "TXT", "CAA", "DS", "DNSKEY", "NSEC",
    "NSEC3", "RRSIG", "TLSA", "URI", "LOC", "HINFO", "RP", "AFSDB", "ISDN", "RT", "X25", "PX",
    "GPOS", "NAPTR", "KX", "CERT", "DNAME", "SINK", "OPT", "APL", "SSHFP", "IPSECKEY", "DHCID",
    "NSEC3PARAM", "HIP", "CDS", "CDNSKEY", "OPENPGPKEY", "CSYNC", "ZONEMD", "SVCB", "HTTPS",
];

// ============================================================================
// Record Type Mnemonics
// ============================================================================

/// Meta and query types that may appear in type bitmaps but have no validator
pub const EXTRA_TYPE_MNEMONICS: &[&str] = &["HIP", "SIG", "NXT", "A6", "WKS", "NULL", "ANY"];

/// Types that must never appear in a CSYNC type list (RFC 7477)
pub const CSYNC_PROHIBITED_TYPES: &[&str] = &["DS", "CDNSKEY", "CSYNC"];

/// Types whose content names a target that must not be a CNAME
pub const NON_ALIAS_TARGET_TYPES: &[&str] = &["MX", "NS"];

/// Types checked for conflicts with an existing CNAME at the same name
pub const CNAME_CONFLICT_TYPES: &[&str] = &["A", "AAAA", "TXT", "MX", "NS", "PTR"];

// ============================================================================
// Top Level Domains
// ============================================================================

/// Generic and infrastructure top level domains accepted by the strict TLD check.
///
/// Country code TLDs are matched separately against [`COUNTRY_CODE_TLDS`].
pub const GENERIC_TLDS: &[&str] = &[
    "aero", "app", "arpa", "asia", "biz", "blog", "cat", "cloud", "club", "com", "coop", "dev",
    "edu", "email", "eu", "gov", "info", "int", "io", "jobs", "local", "mil", "mobi", "museum",
    "name", "net", "online", "org", "page", "post", "pro", "shop", "site", "store", "swiss",
    "tech", "tel", "travel", "xxx", "xyz",
];

/// ISO 3166 country code top level domains
pub const COUNTRY_CODE_TLDS: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "aq", "ar", "as", "at", "au", "aw",
    "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn", "bo", "br",
    "bs", "bt", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck", "cl", "cm",
    "cn", "co", "cr", "cu", "cv", "cw", "cx", "cy", "cz", "de", "dj", "dk", "dm", "do", "dz",
    "ec", "ee", "eg", "er", "es", "et", "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gd", "ge",
    "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy",
    "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il", "im", "in", "io", "iq", "ir", "is",
    "it", "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky",
    "kz", "la", "lb", "lc", "li", "lk", "lr", "ls", "lt", "lu", "lv", "ly", "ma", "mc", "md",
    "me", "mg", "mh", "mk", "ml", "mm", "mn", "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv",
    "mw", "mx", "my", "mz", "na", "nc", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu",
    "nz", "om", "pa", "pe", "pf", "pg", "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw",
    "py", "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh", "si",
    "sk", "sl", "sm", "sn", "so", "sr", "ss", "st", "su", "sv", "sx", "sy", "sz", "tc", "td",
    "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr", "tt", "tv", "tw", "tz", "ua",
    "ug", "uk", "us", "uy", "uz", "va", "vc", "ve", "vg", "vi", "vn", "vu", "wf", "ws", "ye",
    "yt", "za", "zm", "zw",
];

// ============================================================================
// Environment Variables
// ============================================================================

/// Overrides [`crate::config::ValidatorConfig::default_ttl`]
pub const ENV_DEFAULT_TTL: &str = "ZONE_VALIDATOR_DEFAULT_TTL";

/// Overrides [`crate::config::ValidatorConfig::hostmaster`]
pub const ENV_HOSTMASTER: &str = "ZONE_VALIDATOR_HOSTMASTER";

/// Overrides the strict top level domain check
pub const ENV_STRICT_TLD_CHECK: &str = "ZONE_VALIDATOR_STRICT_TLD_CHECK";

/// Overrides the single-label hostname check
pub const ENV_TOP_LEVEL_TLD_CHECK: &str = "ZONE_VALIDATOR_TOP_LEVEL_TLD_CHECK";
