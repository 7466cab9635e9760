use crate::{
    cache::{AccessResult, Cache},
    config::CacheConfig,
    error::SimError,
    report::{InstructionOutcome, Report},
    trace::{AccessKind, Instruction},
};

/// replays instructions in trace order against one cache
pub struct Simulator {
    config: CacheConfig,
    cache: Cache,
    report: Report,
}

impl Simulator {
    pub fn new(config: CacheConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            cache: Cache::new(&config),
            report: Report::default(),
        })
    }

    /// score a single instruction
    ///
    /// a modify is a load and then a store to the same line. when the load misses it has
    /// already installed the line, so the store is counted as a hit without probing again.
    pub fn access(&mut self, instruction: &Instruction) -> InstructionOutcome {
        let result = self.cache.access(instruction.address);
        match result {
            AccessResult::Hit(_) => self.report.hits += 1,
            AccessResult::Miss(_) => self.report.misses += 1,
            AccessResult::Eviction(..) => {
                self.report.misses += 1;
                self.report.evictions += 1;
            }
        }
        if instruction.kind == AccessKind::Modify {
            self.report.hits += 1;
        }
        tracing::debug!("{instruction}: {result:?}");
        InstructionOutcome {
            instruction: *instruction,
            result,
        }
    }

    pub fn run<'a>(mut self, instructions: impl IntoIterator<Item = &'a Instruction>) -> Report {
        tracing::info!(config = ?self.config, "start simulation");
        for instruction in instructions {
            self.access(instruction);
        }
        tracing::info!(report = %self.report, "simulation done");
        self.report
    }

    /// like `run` but keep the outcome of every instruction
    pub fn run_verbose<'a>(
        mut self,
        instructions: impl IntoIterator<Item = &'a Instruction>,
    ) -> (Report, Vec<InstructionOutcome>) {
        tracing::info!(config = ?self.config, "start simulation");
        let outcomes: Vec<_> = instructions
            .into_iter()
            .map(|instruction| self.access(instruction))
            .collect();
        tracing::info!(report = %self.report, "simulation done");
        (self.report, outcomes)
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}
