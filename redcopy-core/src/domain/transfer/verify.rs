// redcopy-core/src/domain/transfer/verify.rs

use serde::Deserialize;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

/// TLS certificate verification for the credential provider.
///
/// YAML and `--verify` accept `true`, `false` or a path to a CA bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "VerifyRepr")]
pub enum VerifyOption {
    #[default]
    Enabled,
    /// TLS is still used, certificates are not checked.
    Disabled,
    CaBundle(PathBuf),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VerifyRepr {
    Flag(bool),
    Bundle(PathBuf),
}

impl From<VerifyRepr> for VerifyOption {
    fn from(repr: VerifyRepr) -> Self {
        match repr {
            VerifyRepr::Flag(true) => Self::Enabled,
            VerifyRepr::Flag(false) => Self::Disabled,
            VerifyRepr::Bundle(path) => Self::CaBundle(path),
        }
    }
}

impl FromStr for VerifyOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "true" => Self::Enabled,
            "false" => Self::Disabled,
            path => Self::CaBundle(PathBuf::from(path)),
        })
    }
}

impl std::fmt::Display for VerifyOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "true"),
            Self::Disabled => write!(f, "false"),
            Self::CaBundle(path) => write!(f, "{}", path.display()),
        }
    }
}
