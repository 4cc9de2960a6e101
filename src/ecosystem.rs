//! OSV ecosystem identifiers

/// Ecosystems an OSV record may name in `affected[].package.ecosystem`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    AlmaLinux,
    Alpine,
    Android,
    Bioconductor,
    Bitnami,
    Chainguard,
    ConanCenter,
    Cran,
    CratesIo,
    Debian,
    Ghc,
    Git,
    GitHubActions,
    Go,
    Hackage,
    Hex,
    Julia,
    Kubernetes,
    Linux,
    Mageia,
    Maven,
    Npm,
    NuGet,
    OpenSuse,
    OssFuzz,
    Packagist,
    PhotonOs,
    Pub,
    PyPI,
    RedHat,
    RockyLinux,
    RubyGems,
    Suse,
    SwiftUrl,
    Ubuntu,
    Wolfi,
}

const ALL: [Ecosystem; 36] = [
    Ecosystem::AlmaLinux,
    Ecosystem::Alpine,
    Ecosystem::Android,
    Ecosystem::Bioconductor,
    Ecosystem::Bitnami,
    Ecosystem::Chainguard,
    Ecosystem::ConanCenter,
    Ecosystem::Cran,
    Ecosystem::CratesIo,
    Ecosystem::Debian,
    Ecosystem::Ghc,
    Ecosystem::Git,
    Ecosystem::GitHubActions,
    Ecosystem::Go,
    Ecosystem::Hackage,
    Ecosystem::Hex,
    Ecosystem::Julia,
    Ecosystem::Kubernetes,
    Ecosystem::Linux,
    Ecosystem::Mageia,
    Ecosystem::Maven,
    Ecosystem::Npm,
    Ecosystem::NuGet,
    Ecosystem::OpenSuse,
    Ecosystem::OssFuzz,
    Ecosystem::Packagist,
    Ecosystem::PhotonOs,
    Ecosystem::Pub,
    Ecosystem::PyPI,
    Ecosystem::RedHat,
    Ecosystem::RockyLinux,
    Ecosystem::RubyGems,
    Ecosystem::Suse,
    Ecosystem::SwiftUrl,
    Ecosystem::Ubuntu,
    Ecosystem::Wolfi,
];

impl Ecosystem {
    /// Returns the name used for this ecosystem in OSV records
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::AlmaLinux => "AlmaLinux",
            Ecosystem::Alpine => "Alpine",
            Ecosystem::Android => "Android",
            Ecosystem::Bioconductor => "Bioconductor",
            Ecosystem::Bitnami => "Bitnami",
            Ecosystem::Chainguard => "Chainguard",
            Ecosystem::ConanCenter => "ConanCenter",
            Ecosystem::Cran => "CRAN",
            Ecosystem::CratesIo => "crates.io",
            Ecosystem::Debian => "Debian",
            Ecosystem::Ghc => "GHC",
            Ecosystem::Git => "GIT",
            Ecosystem::GitHubActions => "GitHub Actions",
            Ecosystem::Go => "Go",
            Ecosystem::Hackage => "Hackage",
            Ecosystem::Hex => "Hex",
            Ecosystem::Julia => "Julia",
            Ecosystem::Kubernetes => "Kubernetes",
            Ecosystem::Linux => "Linux",
            Ecosystem::Mageia => "Mageia",
            Ecosystem::Maven => "Maven",
            Ecosystem::Npm => "npm",
            Ecosystem::NuGet => "NuGet",
            Ecosystem::OpenSuse => "openSUSE",
            Ecosystem::OssFuzz => "OSS-Fuzz",
            Ecosystem::Packagist => "Packagist",
            Ecosystem::PhotonOs => "Photon OS",
            Ecosystem::Pub => "Pub",
            Ecosystem::PyPI => "PyPI",
            Ecosystem::RedHat => "Red Hat",
            Ecosystem::RockyLinux => "Rocky Linux",
            Ecosystem::RubyGems => "RubyGems",
            Ecosystem::Suse => "SUSE",
            Ecosystem::SwiftUrl => "SwiftURL",
            Ecosystem::Ubuntu => "Ubuntu",
            Ecosystem::Wolfi => "Wolfi",
        }
    }

    /// Every ecosystem known to the linter, in name order
    pub fn all() -> &'static [Ecosystem] {
        &ALL
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter().copied().find(|e| e.as_str() == s).ok_or(())
    }
}

/// Splits an ecosystem string at its first `:` into the base name and suffix.
///
/// The suffix is release metadata (`"Alpine:v3.16"`, `"Debian:11"`), never a
/// registry selector.
pub fn split_ecosystem(value: &str) -> (&str, Option<&str>) {
    match value.split_once(':') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (value, None),
    }
}
