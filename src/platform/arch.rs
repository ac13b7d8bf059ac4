//! Processor Architecture Classification
//!
//! Maps a raw architecture name to a closed set of processor families and
//! word widths. Matching is substring-based against an ordered table; the
//! first family with a matching lexeme wins.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Processor family classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArchFamily {
    /// AMD processors
    Amd,
    /// ARM / AArch processors
    Arm,
    /// PowerPC processors
    Ppc,
    /// Intel x86 lineage
    Intel,
    /// Unclassified architecture
    #[default]
    Unknown,
}

/// Processor word-width classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArchWidth {
    /// 32-bit x86
    X86,
    /// 64-bit
    X64,
    /// ARMv7
    Arm7,
    /// ARMv6
    Arm6,
    /// PowerPC
    Ppc,
    /// Unclassified width
    #[default]
    Unknown,
}

const FAMILY_LEXEMES: &[(ArchFamily, &[&str])] = &[
    (ArchFamily::Amd, &["amd"]),
    (ArchFamily::Arm, &["arm", "aarch"]),
    (ArchFamily::Ppc, &["ppc"]),
    (ArchFamily::Intel, &["x86", "686", "386", "368", "64"]),
];

const WIDTH_LEXEMES: &[(ArchWidth, &[&str])] = &[
    (ArchWidth::X86, &["x86", "686", "386", "368"]),
    (ArchWidth::X64, &["64"]),
    (ArchWidth::Arm7, &["arm7"]),
    (ArchWidth::Arm6, &["arm6"]),
    (ArchWidth::Ppc, &["ppc"]),
];

static CURRENT: Lazy<ArchFamily> = Lazy::new(|| ArchFamily::classify(std::env::consts::ARCH));

impl ArchFamily {
    /// Classify a raw architecture name. Total over all strings.
    pub fn classify(arch_name: &str) -> Self {
        let arch = arch_name.to_lowercase();
        for (family, lexemes) in FAMILY_LEXEMES {
            for lexeme in *lexemes {
                if arch.contains(lexeme) {
                    return *family;
                }
            }
        }
        ArchFamily::Unknown
    }

    /// The family of the architecture this process runs on
    pub fn current() -> Self {
        *CURRENT
    }

    /// Get a string representation of the family
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchFamily::Amd => "amd",
            ArchFamily::Arm => "arm",
            ArchFamily::Ppc => "ppc",
            ArchFamily::Intel => "intel",
            ArchFamily::Unknown => "unknown",
        }
    }
}

impl ArchWidth {
    /// Classify the word width of a raw architecture name
    pub fn classify(arch_name: &str) -> Self {
        let arch = arch_name.to_lowercase();
        for (width, lexemes) in WIDTH_LEXEMES {
            for lexeme in *lexemes {
                if arch.contains(lexeme) {
                    return *width;
                }
            }
        }
        ArchWidth::Unknown
    }
}
