//! primer3 engine, driven as a subprocess speaking Boulder-IO.
//!
//! `primer3_core` reads `KEY=value` records on stdin (terminated by a lone
//! `=`) and writes the same format back. Only the rank-0 pair is extracted;
//! alternates are not explored.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::core::primer::{DesignTask, Primer, PrimerPair};
use crate::design::{DesignError, PrimerDesign};

pub const DEFAULT_PRIMER3_BIN: &str = "primer3_core";
pub const PRIMER3_ENV_BIN: &str = "AMPLIDESIGN_PRIMER3_BIN";

pub struct Primer3Engine {
    executable: String,
}

impl Primer3Engine {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Resolve the executable from `AMPLIDESIGN_PRIMER3_BIN`, falling back
    /// to `primer3_core` on the PATH.
    #[must_use]
    pub fn from_env() -> Self {
        let executable = std::env::var(PRIMER3_ENV_BIN)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PRIMER3_BIN.to_string());
        Self::new(executable)
    }
}

impl PrimerDesign for Primer3Engine {
    fn design(&self, task: &DesignTask<'_>) -> Result<Option<PrimerPair>, DesignError> {
        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    DesignError::EngineNotFound {
                        executable: self.executable.clone(),
                    }
                } else {
                    DesignError::Io(e)
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(render_task(task).as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(DesignError::EngineFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Render one Boulder-IO input record for the task.
///
/// The included region spans the whole template; the target region pins the
/// guide inside the product.
pub fn render_task(task: &DesignTask<'_>) -> String {
    format!(
        "SEQUENCE_ID={}\n\
         SEQUENCE_TEMPLATE={}\n\
         SEQUENCE_INCLUDED_REGION=0,{}\n\
         SEQUENCE_TARGET={},{}\n\
         PRIMER_PRODUCT_SIZE_RANGE={}\n\
         =\n",
        task.id,
        task.template,
        task.template.len(),
        task.target_offset,
        task.target_len,
        task.product_size,
    )
}

/// Parse a Boulder-IO output record into the rank-0 primer pair.
///
/// # Errors
///
/// Returns `DesignError::Engine` if the engine reported a sequence-level
/// error, or `DesignError::BadOutput` if expected tags are missing or
/// malformed.
pub fn parse_output(text: &str) -> Result<Option<PrimerPair>, DesignError> {
    let mut tags: HashMap<&str, &str> = HashMap::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line == "=" {
            break;
        }
        if let Some((key, value)) = line.split_once('=') {
            tags.insert(key, value);
        }
    }

    if let Some(message) = tags.get("PRIMER_ERROR") {
        return Err(DesignError::Engine((*message).to_string()));
    }

    let returned = match tags.get("PRIMER_PAIR_NUM_RETURNED") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| DesignError::BadOutput(format!("bad PRIMER_PAIR_NUM_RETURNED '{raw}'")))?,
        // Older builds omit the count when nothing was found
        None if !tags.contains_key("PRIMER_LEFT_0_SEQUENCE") => 0,
        None => 1,
    };
    if returned == 0 {
        return Ok(None);
    }

    let left = parse_primer(&tags, "LEFT")?;
    let right = parse_primer(&tags, "RIGHT")?;
    Ok(Some(PrimerPair { left, right }))
}

fn parse_primer(tags: &HashMap<&str, &str>, side: &str) -> Result<Primer, DesignError> {
    let sequence = required(tags, &format!("PRIMER_{side}_0_SEQUENCE"))?.to_string();
    let gc_percent = required(tags, &format!("PRIMER_{side}_0_GC_PERCENT"))?
        .parse::<f64>()
        .map_err(|_| DesignError::BadOutput(format!("bad PRIMER_{side}_0_GC_PERCENT")))?;
    let (start, length) = parse_position(required(tags, &format!("PRIMER_{side}_0"))?)
        .ok_or_else(|| DesignError::BadOutput(format!("bad PRIMER_{side}_0 position")))?;
    Ok(Primer {
        sequence,
        start,
        length,
        gc_percent,
    })
}

fn required<'a>(tags: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str, DesignError> {
    tags.get(key)
        .copied()
        .ok_or_else(|| DesignError::BadOutput(format!("missing {key}")))
}

/// Positions come as `start,length`.
fn parse_position(raw: &str) -> Option<(usize, usize)> {
    let (start, length) = raw.split_once(',')?;
    Some((start.trim().parse().ok()?, length.trim().parse().ok()?))
}
