#![no_main]

use edrv_model::{PathError, PropertyPath, Record, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 1024 {
        return;
    }

    let path = PropertyPath::parse(text);

    // Rendering and re-parsing is stable.
    let rendered = path.to_string();
    assert_eq!(PropertyPath::parse(&rendered), path, "reparse changed {text:?}");
    assert!(path.segments().iter().all(|s| !s.is_empty() && !s.contains('.')));

    // Resolution against a small graph must never panic.
    let address = Record::new("Address")
        .with("city", "City")
        .with("street", "Street")
        .into_object();
    let root = Value::from(
        Record::new("Person")
            .with("name", "Alice")
            .with("address", &address)
            .with("manager", Value::Null),
    );
    let _ = path.read(&root);
    let _ = path.read(&Value::Null);

    match path.write(&root, Value::from("x")) {
        Ok(()) => assert_eq!(path.read(&root), Ok(Some(Value::from("x")))),
        Err(PathError::EmptyPath) => assert!(path.is_empty()),
        Err(_) => {}
    }
});
