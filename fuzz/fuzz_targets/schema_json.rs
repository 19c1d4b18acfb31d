#![no_main]

use libfuzzer_sys::fuzz_target;
use quipu::schema::Schema;
use quipu::{GeneratorOptions, ValaCodegen};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the schema parser
        if let Ok(schema) = Schema::from_json(s) {
            if schema.validate().is_err() {
                return;
            }
            // If the schema holds up structurally, fuzz the generator
            let mut codegen = ValaCodegen::new(&schema, GeneratorOptions::default());
            for def in &schema.document.enums {
                let _ = codegen.enum_file(def);
            }
            for def in &schema.document.structs {
                let _ = codegen.struct_file(def, false);
            }
            for def in &schema.document.exceptions {
                let _ = codegen.struct_file(def, true);
            }
            for def in &schema.document.services {
                let _ = codegen.service_file(def);
            }
            let _ = codegen.constants_file();
        }
    }
});
