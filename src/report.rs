use std::{fmt, fs::File, path::Path};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cache::AccessResult,
    trace::{AccessKind, Instruction},
};

/// the counters of a simulation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Report {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("cannot create report file {}", path.display()))?;
        serde_json::to_writer_pretty(file, self).wrap_err("cannot write report")?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits: {}, misses: {}, evictions: {}",
            self.hits, self.misses, self.evictions
        )
    }
}

/// what happened to a single instruction, used for the verbose trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionOutcome {
    pub instruction: Instruction,
    pub result: AccessResult,
}

impl fmt::Display for InstructionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instruction)?;
        match self.result {
            AccessResult::Hit(_) => f.write_str(" hit")?,
            AccessResult::Miss(_) => f.write_str(" miss")?,
            AccessResult::Eviction(..) => f.write_str(" miss eviction")?,
        }
        // the store half of a modify always hits
        if self.instruction.kind == AccessKind::Modify {
            f.write_str(" hit")?;
        }
        Ok(())
    }
}
