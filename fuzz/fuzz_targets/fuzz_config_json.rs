#![no_main]

use libfuzzer_sys::fuzz_target;
use sortrow_core::event::PointerEvent;
use sortrow_table::{Table, TableConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<TableConfig>(data) {
        // Validation and construction must agree and never panic.
        assert_eq!(config.validate().is_ok(), Table::new(config).is_ok());
    }
    if let Ok(event) = serde_json::from_slice::<PointerEvent>(data) {
        let _ = event.is_primary_activation();
    }
});
