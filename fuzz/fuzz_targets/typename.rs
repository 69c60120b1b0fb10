#![no_main]

use cilname::metadata::{
    typename::{try_parse_assembly_ref, try_parse_type_signature},
    typesystem::ModuleContext,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let context = ModuleContext::new("Fuzz.dll");
        let _ = try_parse_type_signature(&context, name, Some(&context));
        let _ = try_parse_assembly_ref(name);
    }
});
