//! Environment source: MERKLEHASH__<SECTION>__<KEY>

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "MERKLEHASH";

/// Add environment overrides, e.g. `MERKLEHASH__HASHING__ALGORITHM=blake3`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
