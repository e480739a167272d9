// crates/om-core/src/ide.rs - Editor identifiers and selection precedence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::name;

/// Short code identifying a supported external editor/IDE.
///
/// The set is extensible: adding an editor means adding a variant here and
/// a candidate list in the launcher. The wire format is the lowercase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorId {
    /// VS Code
    Vs,
    /// Windsurf
    Ws,
    /// Cursor
    Cs,
    /// IntelliJ IDEA
    Ij,
    /// PyCharm
    Pc,
    /// Antigravity
    Ag,
}

impl EditorId {
    pub const ALL: [EditorId; 6] = [
        EditorId::Vs,
        EditorId::Ws,
        EditorId::Cs,
        EditorId::Ij,
        EditorId::Pc,
        EditorId::Ag,
    ];

    /// The short wire/CLI code.
    pub fn code(&self) -> &'static str {
        match self {
            EditorId::Vs => "vs",
            EditorId::Ws => "ws",
            EditorId::Cs => "cs",
            EditorId::Ij => "ij",
            EditorId::Pc => "pc",
            EditorId::Ag => "ag",
        }
    }

    /// Human-readable editor name for messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorId::Vs => "VS Code",
            EditorId::Ws => "Windsurf",
            EditorId::Cs => "Cursor",
            EditorId::Ij => "IntelliJ IDEA",
            EditorId::Pc => "PyCharm",
            EditorId::Ag => "Antigravity",
        }
    }

    /// All supported codes, for help and error messages.
    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|e| e.code()).collect()
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for EditorId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match name::normalize(s).as_str() {
            "vs" => Ok(EditorId::Vs),
            "ws" => Ok(EditorId::Ws),
            "cs" => Ok(EditorId::Cs),
            "ij" => Ok(EditorId::Ij),
            "pc" => Ok(EditorId::Pc),
            "ag" => Ok(EditorId::Ag),
            _ => Err(RegistryError::InvalidEditor(s.to_string())),
        }
    }
}

/// Which stored preference wins when no explicit override was given.
///
/// `GlobalFirst` is the default open behavior; `LocalFirst` is selected per
/// invocation (the CLI's `-d` flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecedenceMode {
    #[default]
    GlobalFirst,
    LocalFirst,
}

/// Resolve the editor to launch for one target.
///
/// Precedence, highest first: the explicit per-invocation override, then the
/// stored preferences in the order selected by `mode`. `None` means no
/// editor could be resolved; callers map that to
/// [`RegistryError::NoPreferredEditor`] together with the command that would
/// fix it, rather than silently picking an arbitrary editor.
pub fn resolve_editor(
    explicit: Option<EditorId>,
    item_preference: Option<EditorId>,
    global_default: Option<EditorId>,
    mode: PrecedenceMode,
) -> Option<EditorId> {
    if explicit.is_some() {
        return explicit;
    }
    match mode {
        PrecedenceMode::GlobalFirst => global_default.or(item_preference),
        PrecedenceMode::LocalFirst => item_preference.or(global_default),
    }
}
