use crate::error::{Error, Result};
use r2pipe::{R2Pipe, R2PipeSpawnOptions};
use serde::{Deserialize, Serialize};

/// The text interface of an r2/rizin shell: one command in, its output out.
///
/// `Ok(None)` means the command printed nothing at all, which some commands
/// use to report silent success.
pub trait CommandPipe {
    fn cmd(&mut self, cmd: &str) -> Result<Option<String>>;
    fn close(&mut self);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreInfo {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub format: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinInfo {
    #[serde(default="unknown")]
    pub arch: String,
    #[serde(default)]
    pub bits: u64,
    #[serde(default="unknown")]
    pub os: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Information {
    pub core: CoreInfo,
    pub bin: BinInfo
}

fn unknown() -> String {
    "unknown".to_string()
}

/// A pipe to a spawned `rizin` or `radare2` process
pub struct R2Api {
    pub r2p: R2Pipe
}

impl R2Api {
    pub fn new(exe: &str, filename: &str) -> Result<R2Api> {
        let options = R2PipeSpawnOptions {
            exepath: exe.to_owned(),
            args: vec!()
        };

        let r2p = R2Pipe::spawn(filename, Some(options)).map_err(|e| Error::Spawn {
            exe: exe.to_owned(),
            target: filename.to_owned(),
            reason: e.to_string()
        })?;

        Ok(R2Api { r2p })
    }
}

impl CommandPipe for R2Api {
    fn cmd(&mut self, cmd: &str) -> Result<Option<String>> {
        let out = self.r2p.cmd(cmd).map_err(|e| Error::command(cmd, &e.to_string()))?;
        Ok(normalize(out))
    }

    fn close(&mut self) {
        self.r2p.close();
    }
}

/// Output that is only whitespace or NUL padding counts as no output
pub fn normalize(out: String) -> Option<String> {
    if is_blank(&out) {
        None
    } else {
        Some(out)
    }
}

pub fn is_blank(out: &str) -> bool {
    out.trim_matches(|c: char| c.is_whitespace() || c == '\0').is_empty()
}

/// Query `ij` on any pipe and parse the core/bin sections
pub fn get_info<P: CommandPipe + ?Sized>(pipe: &mut P) -> Result<Information> {
    let json = pipe.cmd("ij")?.ok_or_else(|| Error::command("ij", "no output"))?;
    Ok(serde_json::from_str(json.as_str())?)
}

/// Owns an open pipe for the length of a run and closes it exactly once
pub struct Session<P: CommandPipe> {
    pipe: Option<P>
}

impl<P: CommandPipe> Session<P> {
    pub fn new(pipe: P) -> Self {
        Session { pipe: Some(pipe) }
    }

    pub fn cmd(&mut self, cmd: &str) -> Result<Option<String>> {
        match self.pipe.as_mut() {
            Some(pipe) => pipe.cmd(cmd),
            None => Err(Error::command(cmd, "session is closed"))
        }
    }

    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(mut pipe) = self.pipe.take() {
            pipe.close();
        }
    }
}

impl<P: CommandPipe> CommandPipe for Session<P> {
    fn cmd(&mut self, cmd: &str) -> Result<Option<String>> {
        Session::cmd(self, cmd)
    }

    fn close(&mut self) {
        self.shutdown();
    }
}

impl<P: CommandPipe> Drop for Session<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
