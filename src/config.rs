use crate::errors::PoolError;
use crate::panic_handler::PanicStrategy;

const MAX_THREADS: usize = 1024;

/// Конфигурация пула потоков
#[derive(Debug, Clone)]
pub struct Config {
    pub num_threads: usize,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
    pub panic_strategy: PanicStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get().max(1),
            thread_name_prefix: "pool-worker".to_string(),
            stack_size: None,
            panic_strategy: PanicStrategy::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn cpu_bound() -> Self {
        Self {
            num_threads: num_cpus::get().max(1),
            ..Default::default()
        }
    }

    /// Twice the core count, for tasks that spend time blocked.
    pub fn io_bound() -> Self {
        Self {
            num_threads: (num_cpus::get() * 2).max(1),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.num_threads == 0 {
            return Err(PoolError::config("num_threads must be > 0"));
        }
        if self.num_threads > MAX_THREADS {
            return Err(PoolError::config(format!(
                "num_threads too large (max {})",
                MAX_THREADS
            )));
        }
        if self.thread_name_prefix.is_empty() {
            return Err(PoolError::config("thread_name_prefix must not be empty"));
        }
        if self.stack_size == Some(0) {
            return Err(PoolError::config("stack_size must be > 0"));
        }
        Ok(())
    }

    pub(crate) fn thread_name(&self, index: usize) -> String {
        format!("{}-{}", self.thread_name_prefix, index)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = n;
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn panic_strategy(mut self, strategy: PanicStrategy) -> Self {
        self.config.panic_strategy = strategy;
        self
    }

    pub fn build(self) -> Result<Config, PoolError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
