//! Tests for sharing schemas and the registry across threads.

use serde_json::json;
use sift::{v, BoxedSchema, SchemaExt, SchemaRegistry};
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_concurrent_validation_through_registry() {
    init_tracing();
    let registry = Arc::new(SchemaRegistry::new());

    registry
        .register(
            "User",
            v::object()
                .field("name", v::string())
                .field("age", v::number().int().positive()),
        )
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let result = registry
                    .safe_parse(
                        "User",
                        &json!({
                            "name": format!("User{}", i),
                            "age": 20 + i
                        }),
                    )
                    .unwrap();
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_schema_gives_same_answers_on_every_thread() {
    let schema: BoxedSchema = v::object()
        .field("email", v::string().email())
        .field("tags", v::array(v::string()).max(2))
        .boxed();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                for _ in 0..100 {
                    let valid = json!({"email": format!("u{}@example.com", i), "tags": []});
                    assert!(schema.parse(&valid).is_ok());

                    let invalid = json!({"email": "nope", "tags": ["a", "b", "c"]});
                    assert_eq!(schema.parse(&invalid).unwrap_err().len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_registration_and_reads() {
    init_tracing();
    let registry = Arc::new(SchemaRegistry::new());

    let writers: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .register(format!("Schema{}", i), v::number().min(i))
                    .unwrap();
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }

    let readers: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let name = format!("Schema{}", i);
                assert!(registry.parse(&name, &json!(i)).is_ok());
                assert!(registry.parse(&name, &json!(i - 1)).is_err());
            })
        })
        .collect();

    for handle in readers {
        handle.join().unwrap();
    }

    assert_eq!(registry.names().len(), 10);
}

#[test]
fn test_duplicate_registration_race_has_one_winner() {
    let registry = Arc::new(SchemaRegistry::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.register("Only", v::any()).is_ok())
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
}
