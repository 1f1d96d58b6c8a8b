#![allow(dead_code)]

use modforge::config::{Config, ScoringTables, SearchParams};
use modforge::module::{Module, ModulePart};
use modforge::scorer::Scorer;

/// Builder for synthetic modules to clean up tests.
pub struct ModuleBuilder {
    module: Module,
    next_part_id: u32,
}

impl ModuleBuilder {
    pub fn new(uuid: &str) -> Self {
        Self {
            module: Module {
                uuid: uuid.to_string(),
                name: format!("Module {}", uuid),
                config_id: 5500101,
                quality: 5,
                parts: Vec::new(),
            },
            next_part_id: 1110,
        }
    }

    pub fn config(mut self, config_id: u32) -> Self {
        self.module.config_id = config_id;
        self
    }

    pub fn quality(mut self, quality: u32) -> Self {
        self.module.quality = quality;
        self
    }

    pub fn part(mut self, name: &str, value: u32) -> Self {
        self.module.parts.push(ModulePart {
            id: self.next_part_id,
            name: name.to_string(),
            value,
        });
        self.next_part_id += 1;
        self
    }

    pub fn build(self) -> Module {
        self.module
    }
}

pub fn module(uuid: &str, parts: &[(&str, u32)]) -> Module {
    let mut builder = ModuleBuilder::new(uuid);
    for (name, value) in parts {
        builder = builder.part(name, *value);
    }
    builder.build()
}

pub fn default_scorer() -> Scorer {
    Scorer::new(ScoringTables::default()).expect("default tables are valid")
}

/// Small deterministic search parameters so integration tests stay fast.
pub fn fast_params(seed: u64) -> SearchParams {
    SearchParams {
        population_size: 30,
        generations: 5,
        refine_top: 10,
        workers: Some(2),
        seed: Some(seed),
        ..SearchParams::default()
    }
}

pub fn fast_config(seed: u64) -> Config {
    Config {
        search: fast_params(seed),
        ..Config::default()
    }
}
