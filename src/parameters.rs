//! Per-generator parameters, captured
//! from CLI overflow options as `name=value` style key/value pairs and
//! looked up with a per-parameter default.

use std::collections::HashMap;

use crate::config::GeneratorType;

/// Parameters for generators, keyed by option name.
#[derive(Debug, Clone, Default)]
pub struct GeneratorParams {
    params: HashMap<String, f64>,
}

impl GeneratorParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str, default: f64) -> f64 {
        self.params.get(key).copied().unwrap_or(default)
    }

    /// Builds params from CLI overflow pairs, rejecting non-numeric values.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, String> {
        let mut params = HashMap::new();
        for (key, value) in pairs {
            let val = value.parse::<f64>().map_err(|_| {
                format!(
                    "invalid value for parameter '{}': '{}' (must be a number)",
                    key, value
                )
            })?;
            params.insert(key, val);
        }
        Ok(Self { params })
    }
}

/// Parameter documentation for `--list-params`.
#[derive(Debug, Clone)]
pub struct ParamInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub default: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn get_generator_params(generator: GeneratorType) -> Vec<ParamInfo> {
    match generator {
        GeneratorType::DrunkardsWalk => vec![ParamInfo {
            name: "coverage",
            description: "Fraction of all cells to carve into passages",
            default: 0.5,
            min: Some(0.0),
            max: Some(1.0),
        }],
        GeneratorType::CellularAutomata => vec![
            ParamInfo {
                name: "fillProbability",
                description: "Probability a cell starts as a wall",
                default: 0.45,
                min: Some(0.0),
                max: Some(1.0),
            },
            ParamInfo {
                name: "survivalThreshold",
                description: "A wall cell survives as a wall below this alive-neighbor count",
                default: 4.0,
                min: Some(0.0),
                max: Some(8.0),
            },
            ParamInfo {
                name: "birthThreshold",
                description: "A passage cell becomes a wall above this alive-neighbor count",
                default: 5.0,
                min: Some(0.0),
                max: Some(8.0),
            },
            ParamInfo {
                name: "iterations",
                description: "Number of cellular-automaton smoothing passes",
                default: 3.0,
                min: Some(0.0),
                max: None,
            },
        ],
        GeneratorType::Wilson
        | GeneratorType::Dfs
        | GeneratorType::Kruskal
        | GeneratorType::Searchformer => vec![],
    }
}

pub fn print_param_help(generator: GeneratorType) {
    let params = get_generator_params(generator);

    if params.is_empty() {
        println!("Generator '{}' has no configurable parameters.", generator);
        return;
    }

    println!("Parameters for '{}' generator:", generator);
    println!();

    for param in params {
        println!("  --{} <value>", param.name);
        println!("    {}", param.description);
        println!("    Default: {}", param.default);
        match (param.min, param.max) {
            (Some(min), Some(max)) => println!("    Range: {} to {}", min, max),
            (Some(min), None) => println!("    Minimum: {}", min),
            (None, Some(max)) => println!("    Maximum: {}", max),
            (None, None) => {}
        }
        println!();
    }
}

pub fn print_all_params_help() {
    println!("Generator Parameters:");
    println!("====================");
    println!();

    for generator in GeneratorType::ALL {
        let params = get_generator_params(generator);

        if params.is_empty() {
            println!("{}: no parameters", generator);
        } else {
            println!("{}: {} parameter(s)", generator, params.len());
            for param in params {
                println!(
                    "  - {}: {} (default: {})",
                    param.name, param.description, param.default
                );
            }
        }
        println!();
    }
}
