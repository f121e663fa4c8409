use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Thin wrapper around the external `docker` executable.
pub struct DockerCli {
    program: PathBuf,
}

impl DockerCli {
    /// Resolve the docker executable from PATH
    pub fn locate() -> Result<Self> {
        let program = which::which("docker")
            .context("The docker executable cannot be found in PATH")?;
        tracing::debug!("Using docker executable: {}", program.display());
        Ok(Self { program })
    }

    /// Spawn `docker run ...` from a prepared argument vector and wait for
    /// it to finish. The leading `docker` token is replaced by the resolved
    /// executable path.
    pub fn start(&self, argv: &[String]) -> Result<()> {
        tracing::debug!("Run command: {:?}", argv);
        let status = Command::new(&self.program)
            .args(&argv[1..])
            .status()
            .context("Unable to start the container")?;
        if !status.success() {
            anyhow::bail!("Unable to start the container: docker run exited with {}", status);
        }
        Ok(())
    }

    /// ID of the most recently created container (`docker ps -q -l`)
    pub fn latest_container_id(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["ps", "-q", "-l"])
            .output()
            .context("Unable to get the container ID")?;
        if !output.status.success() {
            anyhow::bail!("Unable to get the container ID: docker ps exited with {}", output.status);
        }
        let id = String::from_utf8(output.stdout).context("docker ps output is not UTF-8")?;
        Ok(id.trim_end().to_string())
    }

    /// Commit the container to an image reference (`image:save_tag`)
    pub fn commit(&self, container_id: &str, image_reference: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(["commit", container_id, image_reference])
            .status()
            .context("Unable to save the container state")?;
        if !status.success() {
            anyhow::bail!(
                "Unable to save the container state: docker commit exited with {}",
                status
            );
        }
        Ok(())
    }

    /// Kill the container
    pub fn kill(&self, container_id: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(["kill", container_id])
            .status()
            .context("Unable to stop the container")?;
        if !status.success() {
            anyhow::bail!("Unable to stop the container: docker kill exited with {}", status);
        }
        Ok(())
    }

    /// Replace the current process image with an interactive shell session
    /// inside the container. Only returns on failure.
    #[cfg(unix)]
    pub fn exec_shell(&self, container_id: &str, shell: &str) -> Result<()> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let program = CString::new(self.program.as_os_str().as_bytes())
            .context("docker path contains an interior NUL byte")?;
        let argv = ["docker", "exec", "-ti", container_id, shell]
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<_>, _>>()
            .context("exec argument contains an interior NUL byte")?;

        // execv only returns on failure; on success the docker client
        // takes over this process.
        let errno = match nix::unistd::execv(&program, &argv) {
            Ok(never) => match never {},
            Err(errno) => errno,
        };
        anyhow::bail!("Unable to connect to the container: {}", errno)
    }

    /// Spawn an interactive shell session with inherited stdio and exit
    /// with its status once the session ends.
    #[cfg(not(unix))]
    pub fn exec_shell(&self, container_id: &str, shell: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(["exec", "-ti", container_id, shell])
            .status()
            .context("Unable to connect to the container")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

/// Disable X11 access control so gui containers can reach the host display
pub fn xhost_allow() -> Result<()> {
    run_xhost("+").context("Cannot disable xhost access control")
}

/// Re-enable X11 access control
pub fn xhost_revoke() -> Result<()> {
    run_xhost("-").context("Cannot enable xhost access control")
}

fn run_xhost(flag: &str) -> Result<()> {
    let status = Command::new("xhost")
        .arg(flag)
        .status()
        .context("Unable to run xhost")?;
    if !status.success() {
        anyhow::bail!("xhost exited with {}", status);
    }
    Ok(())
}
