use serde::{Deserialize, Serialize};
use std::time::Instant;

// PORT and its aliases are resolved in get_default_port
const ENV_OVERRIDES: [(&str, &str); 2] = [
    ("MAX_INPUT_SIZE", "max_input_size"),
    ("CONCURRENT_PARSES", "concurrent_parses"),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_input_size: usize,     // Largest accepted whois response, in bytes
    pub concurrent_parses: usize,  // Parses allowed to run at once
    pub start_time: Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigData {
    pub port: u16,
    pub max_input_size: usize,
    pub concurrent_parses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            max_input_size: 1024 * 1024,
            concurrent_parses: Self::get_cpu_cores(),
            start_time: Instant::now(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let system_info = Self::detect_system_capabilities();

        let mut settings = config::Config::builder()
            .set_default("port", Self::get_default_port())?
            .set_default("max_input_size", system_info.max_input_size as i64)?
            .set_default("concurrent_parses", system_info.concurrent_parses as i64)?;

        // Override with environment variables if present
        settings = Self::apply_env_overrides(settings)?;

        let config_data: ConfigData = settings.build()?.try_deserialize()?;

        Ok(Config {
            port: config_data.port,
            max_input_size: config_data.max_input_size,
            concurrent_parses: config_data.concurrent_parses.max(1),
            start_time: Instant::now(),
        })
    }

    fn detect_system_capabilities() -> SystemCapabilities {
        let available_memory = Self::get_available_memory();
        let cpu_cores = Self::get_cpu_cores();
        let is_production = Self::is_production_environment();

        SystemCapabilities {
            max_input_size: Self::calculate_max_input_size(available_memory),
            // Each parse fans out to its own worker threads
            concurrent_parses: if is_production { cpu_cores * 2 } else { cpu_cores },
        }
    }

    fn get_available_memory() -> u64 {
        #[cfg(target_os = "linux")]
        {
            if let Ok(meminfo) = std::fs::read_to_string("/proc/meminfo") {
                for line in meminfo.lines() {
                    if line.starts_with("MemAvailable:") {
                        if let Some(kb) = line.split_whitespace().nth(1) {
                            if let Ok(kb_val) = kb.parse::<u64>() {
                                return kb_val * 1024;
                            }
                        }
                    }
                }
            }
        }

        // Default fallback: assume 4GB
        4 * 1024 * 1024 * 1024
    }

    fn get_cpu_cores() -> usize {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
    }

    fn is_production_environment() -> bool {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
            .unwrap_or(false)
    }

    fn calculate_max_input_size(available_memory: u64) -> usize {
        // 0.1% of available memory, between 256KB and 4MB
        let calculated = (available_memory as f64 * 0.001) as usize;
        calculated.clamp(256 * 1024, 4 * 1024 * 1024)
    }

    fn get_default_port() -> u16 {
        std::env::var("PORT")
            .or_else(|_| std::env::var("HTTP_PORT"))
            .or_else(|_| std::env::var("SERVER_PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000)
    }

    fn apply_env_overrides(
        mut settings: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        for (env_var, config_key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(env_var) {
                settings = settings.set_override(config_key, value)?;
            }
        }

        Ok(settings)
    }
}

struct SystemCapabilities {
    max_input_size: usize,
    concurrent_parses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_has_sane_defaults() {
        let config = Config::load().unwrap();
        assert!(config.max_input_size >= 256 * 1024);
        assert!(config.concurrent_parses >= 1);
    }

    #[test]
    fn test_max_input_size_bounds() {
        assert_eq!(Config::calculate_max_input_size(0), 256 * 1024);
        assert_eq!(Config::calculate_max_input_size(u64::MAX / 2), 4 * 1024 * 1024);
        assert_eq!(Config::calculate_max_input_size(1_000_000_000), 1_000_000);
    }

    #[test]
    fn test_port_is_read_in_one_place() {
        assert!(ENV_OVERRIDES.iter().all(|(_, key)| *key != "port"));
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_input_size, 1024 * 1024);
    }
}
