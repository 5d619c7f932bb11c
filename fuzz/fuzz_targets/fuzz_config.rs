//! Fuzz target for configuration parsing.
//!
//! Config files may be hand-edited; parsing and validation should only
//! ever return errors.

#![no_main]

use iqrm_config::{validate_config, IqrmConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = [IqrmConfig::from_json_str(text), IqrmConfig::from_toml_str(text)];
    for config in parsed.into_iter().flatten() {
        if validate_config(&config).is_ok() {
            let _ = iqrm_core::IqrmEngine::from_config(&config);
        }
    }
});
