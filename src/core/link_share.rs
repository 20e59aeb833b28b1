// src/core/link_share.rs
//! Public apply links and copying them to a clipboard.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::app_log;
use crate::lfd::RecordId;

pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

pub fn apply_link(base_url: &str, id: &RecordId) -> String {
    format!("{}/apply/{}", base_url.trim_end_matches('/'), id)
}

#[rocket::async_trait]
pub trait Clipboard: Send + Sync {
    fn name(&self) -> &'static str;
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Pipes text into a system clipboard tool (`pbcopy`, `wl-copy`, `xclip`).
pub struct CommandClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboard {
    pub fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    /// Best guess for the current desktop session.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", &[])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", &[])
        } else {
            Self::new("xclip", &["-selection", "clipboard"])
        }
    }
}

#[rocket::async_trait]
impl Clipboard for CommandClipboard {
    fn name(&self) -> &'static str {
        self.program
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let mut child = tokio::process::Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .with_context(|| format!("Failed to write to {}", self.program))?;
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", self.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// Process-local clipboard. Used by the server, where no desktop session exists, and by tests.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    broken: bool,
}

impl MemoryClipboard {
    pub fn broken() -> Self {
        Self {
            contents: Mutex::new(None),
            broken: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[rocket::async_trait]
impl Clipboard for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        if self.broken {
            anyhow::bail!("clipboard unavailable");
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CopyResult {
    pub link: String,
    pub copied: bool,
    pub via: Option<&'static str>,
}

pub struct LinkSharer {
    base_url: String,
    primary: Box<dyn Clipboard>,
    fallback: Option<Box<dyn Clipboard>>,
}

impl LinkSharer {
    pub fn new(base_url: impl Into<String>, primary: Box<dyn Clipboard>) -> Self {
        Self {
            base_url: base_url.into(),
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Clipboard>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn link_for(&self, id: &RecordId) -> String {
        apply_link(&self.base_url, id)
    }

    /// Tries the primary clipboard, then the fallback. Total failure is logged, not raised.
    pub async fn copy(&self, id: &RecordId) -> CopyResult {
        let link = self.link_for(id);

        let clipboards = std::iter::once(&self.primary).chain(self.fallback.as_ref());
        for clipboard in clipboards {
            match clipboard.write_text(&link).await {
                Ok(()) => {
                    app_log!(debug, "Copied {} via {}", link, clipboard.name());
                    return CopyResult {
                        link,
                        copied: true,
                        via: Some(clipboard.name()),
                    };
                }
                Err(e) => {
                    app_log!(warn, "Clipboard {} failed: {:#}", clipboard.name(), e);
                }
            }
        }

        app_log!(error, "Could not copy application link {}", link);
        CopyResult {
            link,
            copied: false,
            via: None,
        }
    }
}

/// "Copied!" for a couple of seconds after a successful copy of one job's link.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    copied: Option<(RecordId, Instant)>,
}

impl CopyFeedback {
    pub fn mark(&mut self, id: &RecordId) {
        self.copied = Some((id.clone(), Instant::now()));
    }

    pub fn clear(&mut self) {
        self.copied = None;
    }

    pub fn is_copied(&self, id: &RecordId) -> bool {
        match &self.copied {
            Some((copied, at)) => copied == id && at.elapsed() < COPY_FEEDBACK_WINDOW,
            None => false,
        }
    }

    pub fn label(&self, id: &RecordId) -> &'static str {
        if self.is_copied(id) {
            "Copied!"
        } else {
            "Copy"
        }
    }
}
