// crates/om-cli/src/services/launcher.rs - Editor launching service
//
// Implements the core's `Launcher` capability with platform-specific
// command candidates per editor. For each editor an ordered list of
// candidates is tried until one spawns; spawning is detached and
// fire-and-forget - the editor process is never waited on or tracked.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use om_core::ide::EditorId;
use om_core::launch::{LaunchError, Launcher};

/// Launches editors through the operating system.
pub struct SystemLauncher;

/// One way to start an editor: a program plus its leading arguments.
/// The target path is appended at spawn time.
struct Candidate {
    program: &'static str,
    args: &'static [&'static str],
}

const fn cmd(program: &'static str) -> Candidate {
    Candidate { program, args: &[] }
}

#[cfg(target_os = "macos")]
const fn app(name: &'static str) -> Candidate {
    Candidate {
        program: "open",
        args: &["-a", name],
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, editor: EditorId, path: &Path) -> Result<(), LaunchError> {
        let candidates = candidates_for(editor);
        for candidate in candidates {
            match spawn_detached(candidate, path) {
                Ok(()) => {
                    debug!(editor = %editor, program = candidate.program, "launched");
                    return Ok(());
                }
                Err(err) => {
                    debug!(
                        editor = %editor,
                        program = candidate.program,
                        error = %err,
                        "launch candidate failed, trying next"
                    );
                }
            }
        }

        let tried: Vec<&str> = candidates.iter().map(|c| c.program).collect();
        Err(LaunchError(format!(
            "could not start {} (tried: {})",
            editor.display_name(),
            tried.join(", ")
        )))
    }
}

fn spawn_detached(candidate: &Candidate, path: &Path) -> std::io::Result<()> {
    Command::new(candidate.program)
        .args(candidate.args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

// Ordered launch candidates per editor. macOS prefers `open -a` with the
// application name; elsewhere the editor's CLI shim is used, with known
// alternates as fallbacks.

#[cfg(target_os = "macos")]
static VS: &[Candidate] = &[app("Visual Studio Code"), cmd("code"), cmd("code-insiders")];
#[cfg(target_os = "macos")]
static WS: &[Candidate] = &[app("Windsurf"), cmd("windsurf")];
#[cfg(target_os = "macos")]
static CS: &[Candidate] = &[app("Cursor"), cmd("cursor")];
#[cfg(target_os = "macos")]
static IJ: &[Candidate] = &[
    app("IntelliJ IDEA"),
    app("IntelliJ IDEA CE"),
    app("IntelliJ IDEA Ultimate"),
    cmd("idea"),
];
#[cfg(target_os = "macos")]
static PC: &[Candidate] = &[
    app("PyCharm"),
    app("PyCharm CE"),
    app("PyCharm Professional"),
    cmd("pycharm"),
];
#[cfg(target_os = "macos")]
static AG: &[Candidate] = &[app("Antigravity"), cmd("antigravity")];

#[cfg(not(target_os = "macos"))]
static VS: &[Candidate] = &[cmd("code"), cmd("code-insiders")];
#[cfg(not(target_os = "macos"))]
static WS: &[Candidate] = &[cmd("windsurf")];
#[cfg(not(target_os = "macos"))]
static CS: &[Candidate] = &[cmd("cursor")];
#[cfg(not(target_os = "macos"))]
static IJ: &[Candidate] = &[cmd("idea"), cmd("idea64.exe"), cmd("intellij")];
#[cfg(not(target_os = "macos"))]
static PC: &[Candidate] = &[
    cmd("pycharm"),
    cmd("pycharm64.exe"),
    cmd("pycharm-professional"),
    cmd("pycharm-community"),
];
#[cfg(not(target_os = "macos"))]
static AG: &[Candidate] = &[cmd("antigravity")];

fn candidates_for(editor: EditorId) -> &'static [Candidate] {
    match editor {
        EditorId::Vs => VS,
        EditorId::Ws => WS,
        EditorId::Cs => CS,
        EditorId::Ij => IJ,
        EditorId::Pc => PC,
        EditorId::Ag => AG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_editor_has_at_least_one_candidate() {
        for editor in EditorId::ALL {
            assert!(!candidates_for(editor).is_empty());
        }
    }

    #[test]
    fn missing_binaries_produce_a_cause_string() {
        // None of the candidate programs exist under this name.
        let err = spawn_detached(&cmd("om-test-no-such-editor-binary"), Path::new("/tmp"))
            .expect_err("spawn of a missing binary should fail");
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
