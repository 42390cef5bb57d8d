use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const STANDARD: &str = "\
name: NIST SP 800-53 Revision 4
AC-2:
  family: ACCESS CONTROL
  name: Account Management
  description: The organization manages information system accounts.
AC-2 (1):
  family: ACCESS CONTROL
  name: Automated System Account Management
  description: The organization employs automated mechanisms.
AU-1:
  family: AUDIT AND ACCOUNTABILITY
  name: Audit and Accountability Policy and Procedures
  description: The organization develops an audit policy.
";

/// Scratch project laid out like a real SSP repository: `standards/` plus
/// `components/<component>/<family>.yaml`.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate fixture dir")?;
        let fixture = Self { dir };
        fixture.write("standards/nist-sp-800-53-rev4.yaml", STANDARD)?;
        fs::create_dir_all(fixture.root().join("components"))?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn component(&self, component: &str, family_file: &str, contents: &str) -> Result<PathBuf> {
        self.write(&format!("components/{component}/{family_file}"), contents)
    }

    /// Run the binary from the fixture root so default paths resolve there.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_recombine-controls"));
        cmd.current_dir(self.root());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = self.command();
        cmd.args(args);
        let output = run_command(cmd)?;
        String::from_utf8(output.stdout).context("stdout was not UTF-8")
    }
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
