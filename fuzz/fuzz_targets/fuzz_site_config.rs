#![no_main]

use libfuzzer_sys::fuzz_target;

use fieldmanual::config::SiteConfig;

fuzz_target!(|data: &[u8]| {
    // We don't care about the result, just that parse and validate
    // never panic
    if let Ok(yaml) = std::str::from_utf8(data) {
        if let Ok(config) = serde_yaml::from_str::<SiteConfig>(yaml) {
            let _ = config.validate();
        }
    }
});
