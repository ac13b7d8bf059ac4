//! Operating System Family Classification
//!
//! Maps a raw platform name to a closed set of operating system families
//! and exposes the per-family shell launcher and kill command. The match
//! table is ordered; the first family whose lexeme prefixes the lowercased
//! input wins, and anything unmatched is `Unknown`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The operating system family a platform name classifies into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OsFamily {
    /// Linux distributions
    Linux,
    /// macOS / Mac OS X
    Mac,
    /// Microsoft Windows
    Windows,
    /// IBM AIX
    Aix,
    /// SGI IRIX
    Irix,
    /// HP-UX
    HpUx,
    /// IBM OS/400
    Os400,
    /// FreeBSD
    FreeBsd,
    /// OpenBSD
    OpenBsd,
    /// NetBSD
    NetBsd,
    /// IBM OS/2
    Os2,
    /// Oracle Solaris
    Solaris,
    /// SunOS
    SunOs,
    /// MIPS platforms
    Mips,
    /// IBM z/OS
    ZOs,
    /// Unclassified platform
    #[default]
    Unknown,
}

/// Ordered classification table; first prefix match wins
const LEXEMES: &[(OsFamily, &[&str])] = &[
    (OsFamily::Linux, &["linux"]),
    (OsFamily::Mac, &["mac"]),
    (OsFamily::Windows, &["windows"]),
    (OsFamily::Aix, &["aix"]),
    (OsFamily::Irix, &["irix"]),
    (OsFamily::HpUx, &["hp-ux"]),
    (OsFamily::Os400, &["os/400"]),
    (OsFamily::FreeBsd, &["freebsd"]),
    (OsFamily::OpenBsd, &["openbsd"]),
    (OsFamily::NetBsd, &["netbsd"]),
    (OsFamily::Os2, &["os/2"]),
    (OsFamily::Solaris, &["solaris"]),
    (OsFamily::SunOs, &["sunos"]),
    (OsFamily::Mips, &["mips"]),
    (OsFamily::ZOs, &["z/os"]),
];

/// Family of the platform this process runs on
static CURRENT: Lazy<OsFamily> = Lazy::new(|| OsFamily::classify(std::env::consts::OS));

impl OsFamily {
    /// Classify a raw platform name. Total over all strings; an empty or
    /// unmatched name yields [`OsFamily::Unknown`].
    pub fn classify(os_name: &str) -> Self {
        let os = os_name.to_lowercase();
        for (family, prefixes) in LEXEMES {
            for prefix in *prefixes {
                if os.starts_with(prefix) {
                    return *family;
                }
            }
        }
        OsFamily::Unknown
    }

    /// The family of the platform this process runs on
    pub fn current() -> Self {
        *CURRENT
    }

    /// Get a string representation of the family
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Mac => "mac",
            OsFamily::Windows => "windows",
            OsFamily::Aix => "aix",
            OsFamily::Irix => "irix",
            OsFamily::HpUx => "hp-ux",
            OsFamily::Os400 => "os/400",
            OsFamily::FreeBsd => "freebsd",
            OsFamily::OpenBsd => "openbsd",
            OsFamily::NetBsd => "netbsd",
            OsFamily::Os2 => "os/2",
            OsFamily::Solaris => "solaris",
            OsFamily::SunOs => "sunos",
            OsFamily::Mips => "mips",
            OsFamily::ZOs => "z/os",
            OsFamily::Unknown => "unknown",
        }
    }

    /// Whether this family is unix-like
    pub fn is_unix(&self) -> bool {
        matches!(
            self,
            OsFamily::Aix
                | OsFamily::HpUx
                | OsFamily::Irix
                | OsFamily::Linux
                | OsFamily::Mac
                | OsFamily::SunOs
                | OsFamily::Solaris
                | OsFamily::FreeBsd
                | OsFamily::OpenBsd
                | OsFamily::NetBsd
        )
    }

    /// The command used to kill processes by name on this family
    pub fn kill_command(&self) -> &'static str {
        match self {
            OsFamily::Windows => "taskkill /F /IM",
            OsFamily::Solaris | OsFamily::Unknown => "killall",
            _ => "pkill -f",
        }
    }

    /// The shell invocation prefix commands are run through on this family
    pub fn shell_launcher(&self) -> [&'static str; 2] {
        if *self == OsFamily::Windows {
            ["cmd.exe", "/c"]
        } else {
            ["sh", "-c"]
        }
    }
}
